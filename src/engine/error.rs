// ==========================================
// 卡车租赁 - 引擎层错误类型
// ==========================================
// 原则: 错误即返回值,调用方据此给出具体指引
// 工具: thiserror 派生宏
// ==========================================

use serde::Serialize;
use thiserror::Error;

/// 分配引擎错误
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationError {
    /// 目标货重非正数或非数值（可本地恢复：重新输入）
    #[error("无效的目标货重: {reason}")]
    InvalidInput { reason: String },

    /// 可用总载重低于目标货重
    #[error(
        "运力不足: 缺口={shortfall_t:.2}t, 可用={available_t:.2}t, 预计还需车辆={}",
        .estimated_additional_trucks.map(|n| n.to_string()).unwrap_or_else(|| "未知".to_string())
    )]
    InsufficientCapacity {
        shortfall_t: f64,
        available_t: f64,
        estimated_additional_trucks: Option<u32>,
    },

    /// 总载重足够但未得到覆盖组合（逻辑上不可达的兜底）
    #[error("未找到可覆盖目标货重的车辆组合: target={target_weight_t}t")]
    NoCombinationFound { target_weight_t: f64 },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, AllocationError>;
