// ==========================================
// 卡车租赁 - 分配结果领域模型
// ==========================================
// 职责: 货物请求、车辆组合结果、单车货物分配
// 红线: 结果只在当次调用内有效,任何输入变化都必须重新计算
// ==========================================

use crate::domain::truck::{total_capacity_t, Truck};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ==========================================
// CargoRequest - 货物请求（单次调用有效）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoRequest {
    pub target_weight_t: f64,             // 目标货重 (吨)
    pub target_date: Option<NaiveDate>,   // 配送日期 (未选择时为浏览模式)
}

impl CargoRequest {
    pub fn new(target_weight_t: f64, target_date: Option<NaiveDate>) -> Self {
        Self {
            target_weight_t,
            target_date,
        }
    }
}

// ==========================================
// SelectionStrategy - 组合来源
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    SingleTruck, // 单车最佳匹配
    Exhaustive,  // 小车队穷举
    Greedy,      // 大车队启发式
}

impl SelectionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionStrategy::SingleTruck => "single_truck",
            SelectionStrategy::Exhaustive => "exhaustive",
            SelectionStrategy::Greedy => "greedy",
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// AllocationResult - 车辆组合结果
// ==========================================
// 不变量: selected_trucks 非空, total_capacity_t + CAPACITY_EPSILON >= target_weight_t
// 容差内不足时 waste_t 可为极小负数 (>= -1e-9)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub selected_trucks: Vec<Truck>,
    pub target_weight_t: f64,
    pub total_capacity_t: f64,
    pub waste_t: f64, // total_capacity_t - target_weight_t, 下限 -CAPACITY_EPSILON
    pub truck_count: usize,
    pub strategy: SelectionStrategy,
}

impl AllocationResult {
    /// 由选中车辆构造结果（汇总量在此统一计算）
    pub fn from_selection(
        selected_trucks: Vec<Truck>,
        target_weight_t: f64,
        strategy: SelectionStrategy,
    ) -> Self {
        let total = total_capacity_t(&selected_trucks);
        Self {
            truck_count: selected_trucks.len(),
            total_capacity_t: total,
            waste_t: total - target_weight_t,
            target_weight_t,
            selected_trucks,
            strategy,
        }
    }

    /// 装载效率 = 目标货重 / 组合总载重
    pub fn efficiency(&self) -> f64 {
        if self.total_capacity_t <= 0.0 {
            return 0.0;
        }
        self.target_weight_t / self.total_capacity_t
    }

    pub fn selected_truck_ids(&self) -> Vec<String> {
        self.selected_trucks.iter().map(|t| t.id.clone()).collect()
    }

    pub fn is_single_truck(&self) -> bool {
        self.truck_count == 1
    }
}

// ==========================================
// Assignment - 单车货物分配
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub truck_id: String,
    pub plate: String,
    pub capacity_t: f64,
    pub assigned_weight_t: f64,
    pub utilization_pct: f64, // 0 - 100
}

// ==========================================
// CargoDistribution - 一次分配的全部结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoDistribution {
    pub target_weight_t: f64,
    pub total_capacity_t: f64,
    /// 手动选择的车辆不足以覆盖目标货重时的缺口（吨）
    pub shortfall_t: f64,
    pub assignments: Vec<Assignment>,
}

impl CargoDistribution {
    pub fn total_assigned_t(&self) -> f64 {
        self.assignments.iter().map(|a| a.assigned_weight_t).sum()
    }

    pub fn get(&self, truck_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.truck_id == truck_id)
    }

    pub fn by_truck_id(&self) -> HashMap<&str, &Assignment> {
        self.assignments
            .iter()
            .map(|a| (a.truck_id.as_str(), a))
            .collect()
    }

    pub fn covers_target(&self) -> bool {
        self.shortfall_t <= 0.0
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}
