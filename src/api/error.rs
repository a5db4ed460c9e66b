// ==========================================
// 卡车租赁 - API层错误类型
// ==========================================
// 职责: 将引擎/配置错误转换为前端可直接展示的消息与建议
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::AllocationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误（重新输入即可恢复）
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("车辆不存在: truck_id={0}")]
    UnknownTruck(String),

    // ==========================================
    // 业务结果
    // ==========================================
    #[error("运力不足: 缺口 {shortfall_t:.2} 吨, 当前可用 {available_t:.2} 吨")]
    InsufficientCapacity {
        shortfall_t: f64,
        available_t: f64,
        estimated_additional_trucks: Option<u32>,
    },

    /// 单次计算失败，不影响进程
    #[error("无法计算车辆组合: {0}")]
    NoCombinationFound(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

// ==========================================
// 从 AllocationError 转换
// ==========================================
impl From<AllocationError> for ApiError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::InvalidInput { reason } => ApiError::InvalidInput(reason),
            AllocationError::InsufficientCapacity {
                shortfall_t,
                available_t,
                estimated_additional_trucks,
            } => ApiError::InsufficientCapacity {
                shortfall_t,
                available_t,
                estimated_additional_trucks,
            },
            err @ AllocationError::NoCombinationFound { .. } => {
                ApiError::NoCombinationFound(err.to_string())
            }
        }
    }
}

impl ApiError {
    /// 错误码（前端据此选择展示样式）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::UnknownTruck(_) => "UNKNOWN_TRUCK",
            ApiError::InsufficientCapacity { .. } => "INSUFFICIENT_CAPACITY",
            ApiError::NoCombinationFound(_) => "NO_COMBINATION_FOUND",
            ApiError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// 面向用户的处理建议
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            ApiError::InvalidInput(_) => vec!["请输入大于 0 的货物重量（吨）".to_string()],
            ApiError::UnknownTruck(_) => vec!["车辆列表已变化，请刷新后重新选择".to_string()],
            ApiError::InsufficientCapacity {
                shortfall_t,
                estimated_additional_trucks,
                ..
            } => {
                let mut suggestions = Vec::new();
                match estimated_additional_trucks {
                    Some(n) if *n > 0 => suggestions.push(format!(
                        "申请增派约 {} 辆车以补足 {:.2} 吨缺口",
                        n, shortfall_t
                    )),
                    _ => suggestions.push(format!("申请增派车辆以补足 {:.2} 吨缺口", shortfall_t)),
                }
                suggestions.push("选择其他配送日期，等待车辆释放".to_string());
                suggestions.push("将货物拆分为多批次运输".to_string());
                suggestions
            }
            ApiError::NoCombinationFound(_) => vec!["暂时无法计算，请稍后重试或手动选择车辆".to_string()],
            ApiError::Config(_) => vec!["请检查分配引擎配置文件".to_string()],
        }
    }

    pub fn to_response(&self) -> ApiErrorResponse {
        let (shortfall_t, estimated_additional_trucks) = match self {
            ApiError::InsufficientCapacity {
                shortfall_t,
                estimated_additional_trucks,
                ..
            } => (Some(*shortfall_t), *estimated_additional_trucks),
            _ => (None, None),
        };
        ApiErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            suggestions: self.suggestions(),
            shortfall_t,
            estimated_additional_trucks,
        }
    }
}

/// 错误响应（序列化给前端）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortfall_t: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_additional_trucks: Option<u32>,
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_capacity_conversion_and_guidance() {
        let api_err: ApiError = AllocationError::InsufficientCapacity {
            shortfall_t: 2.0,
            available_t: 3.0,
            estimated_additional_trucks: Some(2),
        }
        .into();

        assert_eq!(api_err.code(), "INSUFFICIENT_CAPACITY");
        let suggestions = api_err.suggestions();
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions[0].contains("2 辆"));

        let response = api_err.to_response();
        assert_eq!(response.shortfall_t, Some(2.0));
        assert_eq!(response.estimated_additional_trucks, Some(2));
    }

    #[test]
    fn test_invalid_input_conversion() {
        let api_err: ApiError = AllocationError::InvalidInput {
            reason: "target_weight_t=0".to_string(),
        }
        .into();
        assert!(matches!(api_err, ApiError::InvalidInput(_)));
        assert!(api_err.to_response().shortfall_t.is_none());
    }
}
