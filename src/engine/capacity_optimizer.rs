// ==========================================
// 卡车租赁 - 运力组合优化引擎
// ==========================================
// 职责: 为目标货重选出车辆数最少、浪费最小的覆盖组合
// 输入: 候选车辆（已过滤）+ 目标货重
// 输出: AllocationResult 或 显式错误（无效输入 / 运力不足 / 无组合）
// ==========================================
// 流程:
// 1) 单车最佳匹配: 只要有单车能装下,一律选单车
// 2) 组合搜索: 小车队穷举（位掩码升序,带迭代上限）; 大车队启发式
// 3) 兜底: 结果必须覆盖目标货重,否则返回 NoCombinationFound
// ==========================================

use crate::config::allocation_config::EXHAUSTIVE_CANDIDATES_HARD_LIMIT;
use crate::config::AllocationConfig;
use crate::domain::allocation::{AllocationResult, SelectionStrategy};
use crate::domain::truck::{average_capacity_t, Truck};
use crate::engine::error::{AllocationError, EngineResult};
use std::cmp::Ordering;
use tracing::{debug, info, instrument, warn};

/// 浮点比较容差（吨）
pub const CAPACITY_EPSILON: f64 = 1e-9;

// 位掩码为 u64
const MAX_BITMASK_CANDIDATES: usize = 63;

// ==========================================
// CapacityOptimizer - 运力组合优化引擎
// ==========================================
pub struct CapacityOptimizer {
    exhaustive_max_candidates: usize,
    exhaustive_iteration_cap: usize,
    greedy_overshoot_tolerance_t: f64,
    greedy_min_cover_ratio: f64,
}

impl CapacityOptimizer {
    /// 使用默认参数（穷举阈值 10 辆, 迭代上限 1000）
    pub fn new() -> Self {
        Self::from_config(&AllocationConfig::default())
    }

    /// 由配置构造；未经校验的穷举参数收敛到硬上限内，保证最坏耗时有界
    pub fn from_config(config: &AllocationConfig) -> Self {
        let exhaustive_max_candidates = config
            .exhaustive_max_candidates
            .min(EXHAUSTIVE_CANDIDATES_HARD_LIMIT);
        let exhaustive_iteration_cap = config.exhaustive_iteration_cap.max(1);
        if exhaustive_max_candidates != config.exhaustive_max_candidates
            || exhaustive_iteration_cap != config.exhaustive_iteration_cap
        {
            warn!(
                exhaustive_max_candidates = config.exhaustive_max_candidates,
                exhaustive_iteration_cap = config.exhaustive_iteration_cap,
                hard_limit = EXHAUSTIVE_CANDIDATES_HARD_LIMIT,
                "穷举参数越界，已收敛"
            );
        }
        Self {
            exhaustive_max_candidates,
            exhaustive_iteration_cap,
            greedy_overshoot_tolerance_t: config.greedy_overshoot_tolerance_t,
            greedy_min_cover_ratio: config.greedy_min_cover_ratio,
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 选出覆盖目标货重的车辆组合
    ///
    /// 运力不足时，预计还需车辆数按候选车辆平均载重估算。
    pub fn optimize(&self, candidates: &[Truck], target_weight_t: f64) -> EngineResult<AllocationResult> {
        self.optimize_inner(candidates, target_weight_t, None)
    }

    /// 同 `optimize`，但运力不足时按完整车队（未过滤）的平均载重估算还需车辆数
    pub fn optimize_with_fleet(
        &self,
        candidates: &[Truck],
        target_weight_t: f64,
        fleet: &[Truck],
    ) -> EngineResult<AllocationResult> {
        self.optimize_inner(candidates, target_weight_t, average_capacity_t(fleet))
    }

    #[instrument(skip(self, candidates), fields(candidates_count = candidates.len()))]
    fn optimize_inner(
        &self,
        candidates: &[Truck],
        target_weight_t: f64,
        fleet_average_t: Option<f64>,
    ) -> EngineResult<AllocationResult> {
        // 0. 前置校验
        if !target_weight_t.is_finite() || target_weight_t <= 0.0 {
            return Err(AllocationError::InvalidInput {
                reason: format!("target_weight_t={} 必须为正数", target_weight_t),
            });
        }

        let usable: Vec<&Truck> = candidates
            .iter()
            .filter(|t| {
                let valid = t.has_valid_capacity();
                if !valid {
                    warn!(truck_id = %t.id, capacity_t = t.capacity_t, "车辆载重非法，不参与组合");
                }
                valid
            })
            .collect();

        if usable.is_empty() {
            return Err(AllocationError::InsufficientCapacity {
                shortfall_t: target_weight_t,
                available_t: 0.0,
                estimated_additional_trucks: fleet_average_t
                    .and_then(|avg| estimate_additional_trucks(target_weight_t, avg)),
            });
        }

        let total_available_t: f64 = usable.iter().map(|t| t.capacity_t).sum();
        if total_available_t + CAPACITY_EPSILON < target_weight_t {
            let shortfall_t = target_weight_t - total_available_t;
            let average_t = fleet_average_t
                .unwrap_or(total_available_t / usable.len() as f64);
            info!(
                total_available_t,
                target_weight_t,
                shortfall_t,
                "运力不足"
            );
            return Err(AllocationError::InsufficientCapacity {
                shortfall_t,
                available_t: total_available_t,
                estimated_additional_trucks: estimate_additional_trucks(shortfall_t, average_t),
            });
        }

        // 载重升序; 同载重按ID,保证结果确定
        let mut sorted = usable;
        sorted.sort_by(|a, b| {
            a.capacity_t
                .total_cmp(&b.capacity_t)
                .then_with(|| a.id.cmp(&b.id))
        });

        // 1. 单车最佳匹配
        if let Some(truck) = best_single_fit(&sorted, target_weight_t) {
            let result = AllocationResult::from_selection(
                vec![truck.clone()],
                target_weight_t,
                SelectionStrategy::SingleTruck,
            );
            info!(truck_id = %truck.id, waste_t = result.waste_t, "单车匹配");
            return Ok(result);
        }

        // 2. 组合搜索
        let selection = if sorted.len() <= self.exhaustive_max_candidates.min(MAX_BITMASK_CANDIDATES) {
            match self.exhaustive_search(&sorted, target_weight_t) {
                Some(found) => Some((found, SelectionStrategy::Exhaustive)),
                None => {
                    // 迭代上限截断了搜索
                    warn!(
                        candidates_count = sorted.len(),
                        iteration_cap = self.exhaustive_iteration_cap,
                        "穷举未得到覆盖组合，改用启发式"
                    );
                    self.greedy_search(&sorted, target_weight_t)
                        .map(|found| (found, SelectionStrategy::Greedy))
                }
            }
        } else {
            self.greedy_search(&sorted, target_weight_t)
                .map(|found| (found, SelectionStrategy::Greedy))
        };

        // 3. 兜底校验
        let (selected, strategy) = selection.ok_or(AllocationError::NoCombinationFound {
            target_weight_t,
        })?;
        let result = AllocationResult::from_selection(
            selected.into_iter().cloned().collect(),
            target_weight_t,
            strategy,
        );
        if result.selected_trucks.is_empty()
            || result.total_capacity_t + CAPACITY_EPSILON < target_weight_t
        {
            warn!(
                total_capacity_t = result.total_capacity_t,
                target_weight_t,
                "组合未覆盖目标货重"
            );
            return Err(AllocationError::NoCombinationFound { target_weight_t });
        }

        info!(
            strategy = %result.strategy,
            truck_count = result.truck_count,
            total_capacity_t = result.total_capacity_t,
            waste_t = result.waste_t,
            "组合选定"
        );
        Ok(result)
    }

    // ==========================================
    // 穷举分支
    // ==========================================

    /// 按位掩码升序遍历非空子集
    ///
    /// 排序规则: 车辆数少优先 → 浪费少优先 → 车辆ID排序后字典序小优先
    fn exhaustive_search<'a>(&self, trucks: &[&'a Truck], target_weight_t: f64) -> Option<Vec<&'a Truck>> {
        let n = trucks.len();
        if n == 0 || n > MAX_BITMASK_CANDIDATES {
            return None;
        }

        let last_mask: u64 = (1u64 << n) - 1;
        let mut best: Option<SubsetScore> = None;
        let mut visited = 0usize;

        for mask in 1..=last_mask {
            if visited >= self.exhaustive_iteration_cap {
                debug!(visited, last_mask, "穷举达到迭代上限");
                break;
            }
            visited += 1;

            let total_t: f64 = members(trucks, mask).map(|t| t.capacity_t).sum();
            if total_t + CAPACITY_EPSILON < target_weight_t {
                continue;
            }

            let score = SubsetScore::new(trucks, mask, total_t - target_weight_t);
            let better = match &best {
                Some(current) => score.cmp_rank(current) == Ordering::Less,
                None => true,
            };
            if better {
                best = Some(score);
            }
        }

        debug!(visited, found = best.is_some(), "穷举完成");
        best.map(|score| members(trucks, score.mask).collect())
    }

    // ==========================================
    // 启发式分支
    // ==========================================

    /// 按效率分降序贪心选车，不回溯
    ///
    /// 入选条件（满足其一）:
    /// - 剩余 - 载重 >= -容差（超出不多于容差吨）
    /// - 载重 >= 比例 × 剩余（至少覆盖剩余的一定比例）
    fn greedy_search<'a>(&self, trucks: &[&'a Truck], target_weight_t: f64) -> Option<Vec<&'a Truck>> {
        let mut ranked: Vec<&'a Truck> = trucks.to_vec();
        ranked.sort_by(|a, b| {
            efficiency_score(b.capacity_t, target_weight_t)
                .total_cmp(&efficiency_score(a.capacity_t, target_weight_t))
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut remaining_t = target_weight_t;
        let mut selected = Vec::new();

        for truck in ranked {
            if remaining_t <= CAPACITY_EPSILON {
                break;
            }
            let capacity_t = truck.capacity_t;
            let within_overshoot = remaining_t - capacity_t >= -self.greedy_overshoot_tolerance_t;
            let covers_enough = capacity_t >= self.greedy_min_cover_ratio * remaining_t;
            if within_overshoot || covers_enough {
                selected.push(truck);
                remaining_t -= capacity_t;
            }
        }

        debug!(selected_count = selected.len(), remaining_t, "启发式完成");
        if remaining_t <= CAPACITY_EPSILON {
            Some(selected)
        } else {
            None
        }
    }
}

impl Default for CapacityOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 效率分: 载重不超过目标时为 载重/目标, 否则为 目标/载重
pub fn efficiency_score(capacity_t: f64, target_weight_t: f64) -> f64 {
    if capacity_t <= 0.0 || target_weight_t <= 0.0 {
        return 0.0;
    }
    if capacity_t <= target_weight_t {
        capacity_t / target_weight_t
    } else {
        target_weight_t / capacity_t
    }
}

/// 预计还需车辆数 = ceil(缺口 / 平均载重)
pub fn estimate_additional_trucks(shortfall_t: f64, average_capacity_t: f64) -> Option<u32> {
    if !average_capacity_t.is_finite() || average_capacity_t <= 0.0 || !shortfall_t.is_finite() {
        return None;
    }
    if shortfall_t <= 0.0 {
        return Some(0);
    }
    let needed = (shortfall_t / average_capacity_t).ceil();
    Some(needed.min(u32::MAX as f64) as u32)
}

/// 升序载重列表中浪费最小的单车
fn best_single_fit<'a>(sorted_ascending: &[&'a Truck], target_weight_t: f64) -> Option<&'a Truck> {
    sorted_ascending
        .iter()
        .copied()
        .find(|t| t.capacity_t + CAPACITY_EPSILON >= target_weight_t)
}

fn members<'s, 'a>(trucks: &'s [&'a Truck], mask: u64) -> impl Iterator<Item = &'a Truck> + 's {
    trucks
        .iter()
        .enumerate()
        .filter(move |&(i, _)| mask & (1u64 << i) != 0)
        .map(|(_, t)| *t)
}

/// 子集评分
struct SubsetScore {
    mask: u64,
    truck_count: u32,
    waste_t: f64,
    sorted_ids: Vec<String>,
}

impl SubsetScore {
    fn new(trucks: &[&Truck], mask: u64, waste_t: f64) -> Self {
        let mut sorted_ids: Vec<String> = members(trucks, mask).map(|t| t.id.clone()).collect();
        sorted_ids.sort();
        Self {
            mask,
            truck_count: mask.count_ones(),
            waste_t,
            sorted_ids,
        }
    }

    /// Less 表示 self 更优
    fn cmp_rank(&self, other: &Self) -> Ordering {
        self.truck_count
            .cmp(&other.truck_count)
            .then_with(|| {
                if (self.waste_t - other.waste_t).abs() <= CAPACITY_EPSILON {
                    Ordering::Equal
                } else {
                    self.waste_t.total_cmp(&other.waste_t)
                }
            })
            .then_with(|| self.sorted_ids.cmp(&other.sorted_ids))
    }
}
