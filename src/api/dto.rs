// ==========================================
// 卡车租赁 - API 请求/响应 DTO
// ==========================================
// 职责: 前端表单输入与计算结果的序列化形态
// ==========================================

use crate::domain::allocation::{Assignment, CargoDistribution, SelectionStrategy};
use crate::domain::truck::Truck;
use crate::engine::availability::{AvailabilityReport, ExcludedTruck};
use crate::engine::calendar_day::CALENDAR_DAY_KEY_FORMAT;
use crate::engine::orchestrator::AllocationPlan;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// 请求
// ==========================================

/// 货重输入：表单可能提交数字或文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightInput {
    Number(f64),
    Text(String),
}

impl From<f64> for WeightInput {
    fn from(value: f64) -> Self {
        WeightInput::Number(value)
    }
}

impl From<&str> for WeightInput {
    fn from(value: &str) -> Self {
        WeightInput::Text(value.to_string())
    }
}

/// 计算分配方案请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAllocationRequest {
    pub target_weight: WeightInput,
    #[serde(default)]
    pub target_date: Option<String>,
}

/// 手动改选车辆后的重新分配请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedistributeRequest {
    pub selected_truck_ids: Vec<String>,
    pub target_weight: WeightInput,
}

// ==========================================
// 响应
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedTruckView {
    pub truck_id: String,
    pub plate: String,
    pub reason: String,
}

impl From<&ExcludedTruck> for ExcludedTruckView {
    fn from(excluded: &ExcludedTruck) -> Self {
        Self {
            truck_id: excluded.truck.id.clone(),
            plate: excluded.truck.plate.clone(),
            reason: excluded.reason.to_string(),
        }
    }
}

/// 可用车辆浏览响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableTrucksResponse {
    pub target_date: Option<String>,
    pub available_trucks: Vec<Truck>,
    pub excluded_trucks: Vec<ExcludedTruckView>,
}

impl From<AvailabilityReport> for AvailableTrucksResponse {
    fn from(report: AvailabilityReport) -> Self {
        Self {
            target_date: report.target_date.map(format_day),
            excluded_trucks: report.excluded.iter().map(ExcludedTruckView::from).collect(),
            available_trucks: report.available,
        }
    }
}

/// 分配方案响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlanResponse {
    pub target_weight_t: f64,
    pub target_date: Option<String>,
    pub available_trucks: Vec<Truck>,
    pub excluded_trucks: Vec<ExcludedTruckView>,
    pub selected_truck_ids: Vec<String>,
    pub total_capacity_t: f64,
    pub waste_t: f64,
    pub truck_count: usize,
    pub efficiency_pct: f64,
    pub strategy: SelectionStrategy,
    pub assignments: Vec<Assignment>,
}

impl From<AllocationPlan> for AllocationPlanResponse {
    fn from(plan: AllocationPlan) -> Self {
        let efficiency_pct = plan.allocation.efficiency() * 100.0;
        let availability = AvailableTrucksResponse::from(plan.availability);
        Self {
            target_weight_t: plan.request.target_weight_t,
            target_date: availability.target_date,
            available_trucks: availability.available_trucks,
            excluded_trucks: availability.excluded_trucks,
            selected_truck_ids: plan.allocation.selected_truck_ids(),
            total_capacity_t: plan.allocation.total_capacity_t,
            waste_t: plan.allocation.waste_t,
            truck_count: plan.allocation.truck_count,
            efficiency_pct,
            strategy: plan.allocation.strategy,
            assignments: plan.distribution.assignments,
        }
    }
}

/// 重新分配响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResponse {
    pub target_weight_t: f64,
    pub total_capacity_t: f64,
    pub shortfall_t: f64,
    pub covers_target: bool,
    pub assignments: Vec<Assignment>,
}

impl From<CargoDistribution> for DistributionResponse {
    fn from(distribution: CargoDistribution) -> Self {
        Self {
            covers_target: distribution.covers_target(),
            target_weight_t: distribution.target_weight_t,
            total_capacity_t: distribution.total_capacity_t,
            shortfall_t: distribution.shortfall_t,
            assignments: distribution.assignments,
        }
    }
}

fn format_day(day: NaiveDate) -> String {
    day.format(CALENDAR_DAY_KEY_FORMAT).to_string()
}
