// ==========================================
// 卡车租赁 - 货物分配引擎
// ==========================================
// 职责: 按载重比例将目标货重分摊到选中车辆
// 输入: 选中车辆（优化结果或用户手动勾选）+ 目标货重
// 输出: CargoDistribution（每车分配吨位 + 利用率）
// 红线: 每次从零计算,不记忆选择来源,不报错
// ==========================================

use crate::domain::allocation::{Assignment, CargoDistribution};
use crate::domain::truck::Truck;
use crate::engine::capacity_optimizer::CAPACITY_EPSILON;
use std::collections::HashSet;
use tracing::{instrument, warn};

// ==========================================
// CargoDistributor - 货物分配引擎
// ==========================================
pub struct CargoDistributor {
    // 无状态引擎
}

impl CargoDistributor {
    pub fn new() -> Self {
        Self {}
    }

    /// 按载重比例分配货物
    ///
    /// - assigned = capacity / Σcapacity × target
    /// - utilization = min(100, assigned / capacity × 100)
    /// - 重复车辆ID只计一次（保留首次出现）
    /// - Σcapacity 为 0 时全部分配为 0
    /// - Σcapacity 在容差内覆盖目标时, assigned 不超过 capacity
    #[instrument(skip(self, selected), fields(selected_count = selected.len()))]
    pub fn distribute(&self, selected: &[Truck], target_weight_t: f64) -> CargoDistribution {
        let target_weight_t = if target_weight_t.is_finite() && target_weight_t > 0.0 {
            target_weight_t
        } else {
            if target_weight_t != 0.0 {
                warn!(target_weight_t, "目标货重非法，按 0 分配");
            }
            0.0
        };

        let mut seen = HashSet::new();
        let unique: Vec<&Truck> = selected
            .iter()
            .filter(|t| seen.insert(t.id.as_str()))
            .collect();

        let total_capacity_t: f64 = unique.iter().map(|t| t.effective_capacity_t()).sum();
        // 覆盖目标（含容差）时单车分配不超过载重
        let covered = target_weight_t <= total_capacity_t + CAPACITY_EPSILON;

        let assignments = unique
            .iter()
            .map(|truck| {
                let capacity_t = truck.effective_capacity_t();
                let (assigned_weight_t, utilization_pct) = if total_capacity_t > 0.0 && capacity_t > 0.0 {
                    let mut assigned = capacity_t / total_capacity_t * target_weight_t;
                    if covered {
                        assigned = assigned.min(capacity_t);
                    }
                    let utilization = (assigned / capacity_t * 100.0).clamp(0.0, 100.0);
                    (assigned, utilization)
                } else {
                    (0.0, 0.0)
                };
                Assignment {
                    truck_id: truck.id.clone(),
                    plate: truck.plate.clone(),
                    capacity_t: truck.capacity_t,
                    assigned_weight_t,
                    utilization_pct,
                }
            })
            .collect();

        CargoDistribution {
            target_weight_t,
            total_capacity_t,
            shortfall_t: if covered {
                0.0
            } else {
                target_weight_t - total_capacity_t
            },
            assignments,
        }
    }
}

impl Default for CargoDistributor {
    fn default() -> Self {
        Self::new()
    }
}
