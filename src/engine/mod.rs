// ==========================================
// 卡车租赁 - 引擎层
// ==========================================
// 职责: 车辆分配的全部计算逻辑
// 红线: 同步纯计算, 无 I/O, 无共享可变状态, 无缓存
// ==========================================

pub mod availability;
pub mod calendar_day;
pub mod capacity_optimizer;
pub mod cargo_distributor;
pub mod error;
pub mod orchestrator;

// 重导出核心引擎
pub use availability::{AvailabilityFilter, AvailabilityReport, ExcludedTruck, ExclusionReason};
pub use calendar_day::{to_calendar_day_key, CalendarDayNormalizer};
pub use capacity_optimizer::{
    efficiency_score, estimate_additional_trucks, CapacityOptimizer, CAPACITY_EPSILON,
};
pub use cargo_distributor::CargoDistributor;
pub use error::{AllocationError, EngineResult};
pub use orchestrator::{AllocationOrchestrator, AllocationPlan};
