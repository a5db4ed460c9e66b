// ==========================================
// 卡车租赁 - 领域模型层
// ==========================================
// 职责: 定义车辆、运单、分配结果等领域实体
// 红线: 不含引擎逻辑,不含 I/O
// ==========================================

pub mod allocation;
pub mod delivery;
pub mod truck;
pub mod types;

// 重导出核心类型
pub use allocation::{
    AllocationResult, Assignment, CargoDistribution, CargoRequest, SelectionStrategy,
};
pub use delivery::{DeliveryRecord, RawDeliveryDate};
pub use truck::{average_capacity_t, total_capacity_t, Truck};
pub use types::{DeliveryStatus, OperationalState};
