// ==========================================
// 卡车租赁 - 车辆领域模型
// ==========================================
// 数据归属: 外部车辆登记处 (fleet registry)
// 引擎只读,不修改
// ==========================================

use crate::domain::types::OperationalState;
use serde::{Deserialize, Serialize};

// ==========================================
// Truck - 车辆
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    pub id: String, // 车辆ID (唯一)

    #[serde(alias = "capacity")]
    pub capacity_t: f64, // 额定载重 (吨)

    #[serde(default, alias = "operationalState", alias = "status")]
    pub operational_state: OperationalState, // 运营状态

    #[serde(default)]
    pub plate: String, // 车牌 (仅显示)
}

impl Truck {
    pub fn new(id: &str, capacity_t: f64) -> Self {
        Self {
            id: id.to_string(),
            capacity_t,
            operational_state: OperationalState::Active,
            plate: String::new(),
        }
    }

    pub fn with_plate(mut self, plate: &str) -> Self {
        self.plate = plate.to_string();
        self
    }

    pub fn with_state(mut self, state: OperationalState) -> Self {
        self.operational_state = state;
        self
    }

    /// 载重是否可用于计算（有限且为正）
    pub fn has_valid_capacity(&self) -> bool {
        self.capacity_t.is_finite() && self.capacity_t > 0.0
    }

    /// 参与计算的有效载重，非法载重按 0 处理
    pub fn effective_capacity_t(&self) -> f64 {
        if self.has_valid_capacity() {
            self.capacity_t
        } else {
            0.0
        }
    }
}

/// 车队平均载重（吨），无有效车辆时返回 None
pub fn average_capacity_t(trucks: &[Truck]) -> Option<f64> {
    let valid: Vec<f64> = trucks
        .iter()
        .filter(|t| t.has_valid_capacity())
        .map(|t| t.capacity_t)
        .collect();
    if valid.is_empty() {
        return None;
    }
    Some(valid.iter().sum::<f64>() / valid.len() as f64)
}

/// 车辆集合总载重（吨）
pub fn total_capacity_t(trucks: &[Truck]) -> f64 {
    trucks.iter().map(Truck::effective_capacity_t).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_accepts_registry_field_names() {
        let json = r#"{"id":"T1","capacity":5.5,"operationalState":"maintenance","plate":"沪A-12345"}"#;
        let truck: Truck = serde_json::from_str(json).unwrap();
        assert_eq!(truck.capacity_t, 5.5);
        assert_eq!(truck.operational_state, OperationalState::Maintenance);
        assert_eq!(truck.plate, "沪A-12345");
    }

    #[test]
    fn test_missing_state_defaults_to_active() {
        let truck: Truck = serde_json::from_str(r#"{"id":"T2","capacity_t":3.0}"#).unwrap();
        assert_eq!(truck.operational_state, OperationalState::Active);
        assert!(truck.plate.is_empty());
    }

    #[test]
    fn test_average_ignores_invalid_capacity() {
        let trucks = vec![Truck::new("A", 2.0), Truck::new("B", 4.0), Truck::new("C", f64::NAN)];
        assert_eq!(average_capacity_t(&trucks), Some(3.0));
        assert_eq!(total_capacity_t(&trucks), 6.0);
        assert_eq!(average_capacity_t(&[]), None);
    }
}
