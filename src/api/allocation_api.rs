// ==========================================
// 卡车租赁 - 车辆分配 API
// ==========================================
// 职责: 表单输入校验 → 引擎编排 → 响应组装
// 手动改选: 只重跑货物分配，不重新优化
// ==========================================

use crate::api::dto::{
    AllocationPlanResponse, AvailableTrucksResponse, DistributionResponse, PlanAllocationRequest,
    RedistributeRequest,
};
use crate::api::error::ApiResult;
use crate::api::validator::{parse_target_date, parse_target_weight, resolve_selection};
use crate::config::{AllocationConfig, ConfigManager};
use crate::domain::allocation::CargoRequest;
use crate::domain::delivery::DeliveryRecord;
use crate::domain::truck::Truck;
use crate::engine::orchestrator::AllocationOrchestrator;
use tracing::{info, instrument, warn};

// ==========================================
// AllocationApi - 车辆分配 API
// ==========================================

/// 车辆分配API
///
/// 职责：
/// 1. 浏览指定日期的可用车辆
/// 2. 计算分配方案（可用性过滤 + 组合优化 + 货物分配）
/// 3. 手动改选后的重新分配
pub struct AllocationApi {
    orchestrator: AllocationOrchestrator,
}

impl AllocationApi {
    /// 按给定配置创建（配置先校验）
    pub fn new(config: &AllocationConfig) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self {
            orchestrator: AllocationOrchestrator::from_config(config),
        })
    }

    /// 从配置文件加载后创建
    pub fn from_config_manager(manager: &ConfigManager) -> ApiResult<Self> {
        let config = manager.load()?;
        Self::new(&config)
    }

    /// 浏览可用车辆
    ///
    /// # 参数
    /// - `date_text`: 配送日期文本，None/空串表示未选择日期
    ///
    /// # 返回
    /// - Ok(AvailableTrucksResponse): 可用车辆与排除原因
    /// - Err(ApiError::InvalidInput): 日期无法识别
    #[instrument(skip(self, fleet, deliveries))]
    pub fn browse_available_trucks(
        &self,
        fleet: &[Truck],
        deliveries: &[DeliveryRecord],
        date_text: Option<&str>,
    ) -> ApiResult<AvailableTrucksResponse> {
        let target_date = parse_target_date(date_text, self.orchestrator.filter().normalizer())?;
        let report = self.orchestrator.filter().screen(fleet, deliveries, target_date);
        Ok(AvailableTrucksResponse::from(report))
    }

    /// 计算分配方案
    ///
    /// # 返回
    /// - Ok(AllocationPlanResponse): 选中车辆 + 每车装载
    /// - Err(ApiError::InvalidInput): 货重/日期非法
    /// - Err(ApiError::InsufficientCapacity): 可用运力不足（附建议）
    /// - Err(ApiError::NoCombinationFound): 未找到覆盖组合
    #[instrument(skip(self, fleet, deliveries), fields(fleet_count = fleet.len()))]
    pub fn plan_allocation(
        &self,
        request: &PlanAllocationRequest,
        fleet: &[Truck],
        deliveries: &[DeliveryRecord],
    ) -> ApiResult<AllocationPlanResponse> {
        let target_weight_t = parse_target_weight(&request.target_weight)?;
        let target_date = parse_target_date(
            request.target_date.as_deref(),
            self.orchestrator.filter().normalizer(),
        )?;

        let cargo = CargoRequest::new(target_weight_t, target_date);
        let plan = self.orchestrator.plan(fleet, deliveries, &cargo).map_err(|e| {
            warn!(error = %e, "车辆分配失败");
            e
        })?;

        info!(
            selected = ?plan.allocation.selected_truck_ids(),
            "分配方案已生成"
        );
        Ok(AllocationPlanResponse::from(plan))
    }

    /// 手动改选车辆后重新分配货物
    ///
    /// 选择不足以覆盖货重时不报错，通过 shortfall_t 提示。
    ///
    /// # 返回
    /// - Err(ApiError::UnknownTruck): 选择中包含车队外的车辆ID
    #[instrument(skip(self, fleet, request))]
    pub fn redistribute_selection(
        &self,
        request: &RedistributeRequest,
        fleet: &[Truck],
    ) -> ApiResult<DistributionResponse> {
        let target_weight_t = parse_target_weight(&request.target_weight)?;
        let selected = resolve_selection(fleet, &request.selected_truck_ids)?;
        let distribution = self.orchestrator.redistribute(&selected, target_weight_t);
        Ok(DistributionResponse::from(distribution))
    }

    /// 切换车辆选中状态（已选则移除，未选则追加到末尾）
    pub fn toggle_selection(selected_ids: &[String], truck_id: &str) -> Vec<String> {
        if selected_ids.iter().any(|id| id == truck_id) {
            selected_ids
                .iter()
                .filter(|id| id.as_str() != truck_id)
                .cloned()
                .collect()
        } else {
            let mut next = selected_ids.to_vec();
            next.push(truck_id.to_string());
            next
        }
    }
}

impl Default for AllocationApi {
    fn default() -> Self {
        Self {
            orchestrator: AllocationOrchestrator::new(),
        }
    }
}
