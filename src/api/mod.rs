// ==========================================
// 卡车租赁 - API 层
// ==========================================
// 职责: 提供表单级接口，供界面或命令行调用
// ==========================================

pub mod allocation_api;
pub mod dto;
pub mod error;
pub mod validator;

// 重导出核心类型
pub use allocation_api::AllocationApi;
pub use dto::{
    AllocationPlanResponse, AvailableTrucksResponse, DistributionResponse, ExcludedTruckView,
    PlanAllocationRequest, RedistributeRequest, WeightInput,
};
pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use validator::{parse_target_date, parse_target_weight, resolve_selection};
