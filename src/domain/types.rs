// ==========================================
// 卡车租赁 - 领域类型定义
// ==========================================
// 职责: 车辆运营状态、运单状态
// 红线: 未识别的原始值不得导致崩溃,统一落入 Other
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 车辆运营状态 (Operational State)
// ==========================================
// 只有 Maintenance / Broken 会被排除; Other 视为可用 (fail-open)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationalState {
    Active,        // 正常运营
    Maintenance,   // 保养中
    Broken,        // 故障
    Other(String), // 车辆登记处返回的未知状态
}

impl OperationalState {
    pub fn as_str(&self) -> &str {
        match self {
            OperationalState::Active => "active",
            OperationalState::Maintenance => "maintenance",
            OperationalState::Broken => "broken",
            OperationalState::Other(raw) => raw.as_str(),
        }
    }

    /// 是否因运营状态被排除
    pub fn is_excluded(&self) -> bool {
        matches!(self, OperationalState::Maintenance | OperationalState::Broken)
    }
}

impl Default for OperationalState {
    fn default() -> Self {
        OperationalState::Active
    }
}

impl From<&str> for OperationalState {
    fn from(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "active" => OperationalState::Active,
            "maintenance" => OperationalState::Maintenance,
            "broken" => OperationalState::Broken,
            _ => OperationalState::Other(raw.trim().to_string()),
        }
    }
}

impl From<String> for OperationalState {
    fn from(raw: String) -> Self {
        OperationalState::from(raw.as_str())
    }
}

impl From<OperationalState> for String {
    fn from(state: OperationalState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for OperationalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 运单状态 (Delivery Status)
// ==========================================
// 占用车辆的“活跃”子集: pending ~ awaiting-confirmation
// 序列化格式: kebab-case (与运单库一致)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeliveryStatus {
    Pending,              // 待处理
    InProgress,           // 进行中
    Started,              // 已出发
    PickedUp,             // 已装货
    AwaitingConfirmation, // 待确认
    Completed,            // 已完成
    Cancelled,            // 已取消
    Other(String),        // 未知状态,不构成占用
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::InProgress => "in-progress",
            DeliveryStatus::Started => "started",
            DeliveryStatus::PickedUp => "picked-up",
            DeliveryStatus::AwaitingConfirmation => "awaiting-confirmation",
            DeliveryStatus::Completed => "completed",
            DeliveryStatus::Cancelled => "cancelled",
            DeliveryStatus::Other(raw) => raw.as_str(),
        }
    }

    /// 是否为占用车辆的活跃状态
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            DeliveryStatus::Pending
                | DeliveryStatus::InProgress
                | DeliveryStatus::Started
                | DeliveryStatus::PickedUp
                | DeliveryStatus::AwaitingConfirmation
        )
    }
}

impl From<&str> for DeliveryStatus {
    fn from(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "pending" => DeliveryStatus::Pending,
            "in-progress" => DeliveryStatus::InProgress,
            "started" => DeliveryStatus::Started,
            "picked-up" => DeliveryStatus::PickedUp,
            "awaiting-confirmation" => DeliveryStatus::AwaitingConfirmation,
            "completed" => DeliveryStatus::Completed,
            "cancelled" | "canceled" => DeliveryStatus::Cancelled,
            _ => DeliveryStatus::Other(raw.trim().to_string()),
        }
    }
}

impl From<String> for DeliveryStatus {
    fn from(raw: String) -> Self {
        DeliveryStatus::from(raw.as_str())
    }
}

impl From<DeliveryStatus> for String {
    fn from(status: DeliveryStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operational_state_parsing_is_lenient() {
        assert_eq!(OperationalState::from("Active"), OperationalState::Active);
        assert_eq!(OperationalState::from(" MAINTENANCE "), OperationalState::Maintenance);
        assert_eq!(OperationalState::from("broken"), OperationalState::Broken);
        assert_eq!(
            OperationalState::from("retired"),
            OperationalState::Other("retired".to_string())
        );
        assert!(!OperationalState::from("retired").is_excluded());
    }

    #[test]
    fn test_delivery_status_active_subset() {
        for raw in ["pending", "in-progress", "started", "picked-up", "awaiting-confirmation"] {
            assert!(DeliveryStatus::from(raw).is_active(), "{} 应为活跃状态", raw);
        }
        for raw in ["completed", "cancelled", "archived"] {
            assert!(!DeliveryStatus::from(raw).is_active(), "{} 不应为活跃状态", raw);
        }
    }

    #[test]
    fn test_delivery_status_accepts_separator_variants() {
        assert_eq!(DeliveryStatus::from("in_progress"), DeliveryStatus::InProgress);
        assert_eq!(DeliveryStatus::from("Picked Up"), DeliveryStatus::PickedUp);
        assert_eq!(DeliveryStatus::from("canceled"), DeliveryStatus::Cancelled);
    }

    #[test]
    fn test_serde_roundtrip_uses_wire_names() {
        let json = serde_json::to_string(&DeliveryStatus::AwaitingConfirmation).unwrap();
        assert_eq!(json, "\"awaiting-confirmation\"");

        let state: OperationalState = serde_json::from_str("\"on-loan\"").unwrap();
        assert_eq!(state, OperationalState::Other("on-loan".to_string()));
    }
}
