// ==========================================
// 卡车租赁车辆分配引擎 - 核心库
// ==========================================
// 系统定位: 决策支持 (人工可改选车辆)
// 流程: 可用性过滤 → 运力组合优化 → 货物分配
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分配计算
pub mod engine;

// 配置层 - 引擎参数
pub mod config;

// API 层 - 表单接口
pub mod api;

// 日志系统
pub mod logging;

// 性能埋点
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DeliveryStatus, OperationalState};

// 领域实体
pub use domain::{
    AllocationResult, Assignment, CargoDistribution, CargoRequest, DeliveryRecord,
    RawDeliveryDate, SelectionStrategy, Truck,
};

// 引擎
pub use engine::{
    AllocationError, AllocationOrchestrator, AllocationPlan, AvailabilityFilter,
    CalendarDayNormalizer, CapacityOptimizer, CargoDistributor,
};

// 配置
pub use config::{AllocationConfig, ConfigManager};

// API
pub use api::{AllocationApi, ApiError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "卡车租赁车辆分配引擎";
