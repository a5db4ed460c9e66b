// ==========================================
// 卡车租赁 - 分配引擎编排器
// ==========================================
// 用途: 按固定顺序协调三个引擎
// 可用性过滤 → 运力组合优化 → 货物分配
// 手动改选车辆时只重跑货物分配
// ==========================================

use crate::config::AllocationConfig;
use crate::domain::allocation::{AllocationResult, CargoDistribution, CargoRequest};
use crate::domain::delivery::DeliveryRecord;
use crate::domain::truck::Truck;
use crate::engine::availability::{AvailabilityFilter, AvailabilityReport};
use crate::engine::capacity_optimizer::CapacityOptimizer;
use crate::engine::cargo_distributor::CargoDistributor;
use crate::engine::error::EngineResult;
use crate::perf::PerfGuard;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ==========================================
// AllocationPlan - 一次完整计算的结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub request: CargoRequest,
    pub availability: AvailabilityReport,
    pub allocation: AllocationResult,
    pub distribution: CargoDistribution,
}

// ==========================================
// AllocationOrchestrator - 引擎编排器
// ==========================================
pub struct AllocationOrchestrator {
    filter: AvailabilityFilter,
    optimizer: CapacityOptimizer,
    distributor: CargoDistributor,
}

impl AllocationOrchestrator {
    pub fn new() -> Self {
        Self::from_config(&AllocationConfig::default())
    }

    pub fn from_config(config: &AllocationConfig) -> Self {
        Self {
            filter: AvailabilityFilter::from_config(config),
            optimizer: CapacityOptimizer::from_config(config),
            distributor: CargoDistributor::new(),
        }
    }

    pub fn filter(&self) -> &AvailabilityFilter {
        &self.filter
    }

    /// 执行完整分配流程
    ///
    /// # 参数
    /// - `fleet`: 完整车队快照（同时作为运力缺口估算的平均载重基准）
    /// - `deliveries`: 运单快照
    /// - `request`: 货物请求
    pub fn plan(
        &self,
        fleet: &[Truck],
        deliveries: &[DeliveryRecord],
        request: &CargoRequest,
    ) -> EngineResult<AllocationPlan> {
        let _perf = PerfGuard::new("allocation_plan");
        info!(
            fleet_count = fleet.len(),
            deliveries_count = deliveries.len(),
            target_weight_t = request.target_weight_t,
            target_date = ?request.target_date,
            "开始执行车辆分配"
        );

        // ==========================================
        // 步骤1: 可用性过滤
        // ==========================================
        let availability = self.filter.screen(fleet, deliveries, request.target_date);
        debug!(
            available_count = availability.available.len(),
            "步骤1完成: 可用性过滤"
        );

        // ==========================================
        // 步骤2: 运力组合优化
        // ==========================================
        let allocation = self.optimizer.optimize_with_fleet(
            &availability.available,
            request.target_weight_t,
            fleet,
        )?;
        debug!(truck_count = allocation.truck_count, "步骤2完成: 组合优化");

        // ==========================================
        // 步骤3: 货物分配
        // ==========================================
        let distribution = self
            .distributor
            .distribute(&allocation.selected_trucks, request.target_weight_t);

        info!(
            strategy = %allocation.strategy,
            truck_count = allocation.truck_count,
            waste_t = allocation.waste_t,
            "车辆分配完成"
        );

        Ok(AllocationPlan {
            request: request.clone(),
            availability,
            allocation,
            distribution,
        })
    }

    /// 用户手动改选车辆后重新分配（不经过优化器）
    pub fn redistribute(&self, selected: &[Truck], target_weight_t: f64) -> CargoDistribution {
        let _perf = PerfGuard::new("allocation_redistribute");
        self.distributor.distribute(selected, target_weight_t)
    }
}

impl Default for AllocationOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
