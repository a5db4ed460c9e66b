// ==========================================
// 卡车租赁 - 车辆可用性过滤引擎
// ==========================================
// 职责: 运营状态过滤 + 配送日期冲突过滤
// 输入: 车队快照 + 运单快照 + 配送日期(可选)
// 输出: 可用车辆（保持原顺序）+ 被排除车辆及原因
// 红线: 纯函数,不修改输入,不报错
// ==========================================

use crate::config::AllocationConfig;
use crate::domain::delivery::DeliveryRecord;
use crate::domain::truck::Truck;
use crate::domain::types::{DeliveryStatus, OperationalState};
use crate::engine::calendar_day::CalendarDayNormalizer;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, instrument};

// ==========================================
// ExclusionReason - 排除原因
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExclusionReason {
    Maintenance,                              // 保养中
    Broken,                                   // 故障
    BookedOnDate { status: DeliveryStatus },  // 当日已有活跃运单
}

impl ExclusionReason {
    /// 运营状态导致的排除原因（未知状态放行）
    pub fn for_state(state: &OperationalState) -> Option<Self> {
        if !state.is_excluded() {
            return None;
        }
        match state {
            OperationalState::Broken => Some(ExclusionReason::Broken),
            _ => Some(ExclusionReason::Maintenance),
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExclusionReason::Maintenance => write!(f, "MAINTENANCE"),
            ExclusionReason::Broken => write!(f, "BROKEN"),
            ExclusionReason::BookedOnDate { status } => {
                write!(f, "BOOKED_ON_DATE: status={}", status)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedTruck {
    pub truck: Truck,
    pub reason: ExclusionReason,
}

/// 过滤结果
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AvailabilityReport {
    pub target_date: Option<NaiveDate>,
    pub available: Vec<Truck>,
    pub excluded: Vec<ExcludedTruck>,
}

// ==========================================
// AvailabilityFilter - 可用性过滤引擎
// ==========================================
pub struct AvailabilityFilter {
    normalizer: CalendarDayNormalizer,
}

impl AvailabilityFilter {
    /// 以 UTC 折算运单日期
    pub fn new() -> Self {
        Self {
            normalizer: CalendarDayNormalizer::utc(),
        }
    }

    pub fn from_config(config: &AllocationConfig) -> Self {
        Self::with_normalizer(CalendarDayNormalizer::with_offset_minutes(
            config.calendar_utc_offset_minutes,
        ))
    }

    pub fn with_normalizer(normalizer: CalendarDayNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &CalendarDayNormalizer {
        &self.normalizer
    }

    /// 返回指定日期可预订的车辆
    ///
    /// # 参数
    /// - `trucks`: 车队快照
    /// - `deliveries`: 运单快照
    /// - `date`: 配送日期；None 表示浏览模式，仅按运营状态过滤
    pub fn filter_available(
        &self,
        trucks: &[Truck],
        deliveries: &[DeliveryRecord],
        date: Option<NaiveDate>,
    ) -> Vec<Truck> {
        self.screen(trucks, deliveries, date).available
    }

    /// 过滤并给出每辆被排除车辆的原因
    #[instrument(skip(self, trucks, deliveries), fields(
        trucks_count = trucks.len(),
        deliveries_count = deliveries.len(),
        date = ?date
    ))]
    pub fn screen(
        &self,
        trucks: &[Truck],
        deliveries: &[DeliveryRecord],
        date: Option<NaiveDate>,
    ) -> AvailabilityReport {
        let booked = match date {
            Some(day) => self.booked_trucks_on(deliveries, day),
            None => HashMap::new(),
        };

        let mut report = AvailabilityReport {
            target_date: date,
            ..AvailabilityReport::default()
        };

        for truck in trucks {
            let reason = ExclusionReason::for_state(&truck.operational_state).or_else(|| {
                booked
                    .get(truck.id.as_str())
                    .map(|status| ExclusionReason::BookedOnDate {
                        status: (*status).clone(),
                    })
            });

            match reason {
                Some(reason) => {
                    debug!(truck_id = %truck.id, reason = %reason, "车辆不可用");
                    report.excluded.push(ExcludedTruck {
                        truck: truck.clone(),
                        reason,
                    });
                }
                None => report.available.push(truck.clone()),
            }
        }

        debug!(
            available_count = report.available.len(),
            excluded_count = report.excluded.len(),
            "可用性过滤完成"
        );
        report
    }

    /// 指定日期存在活跃运单的车辆 → 首个冲突运单状态
    fn booked_trucks_on<'a>(
        &self,
        deliveries: &'a [DeliveryRecord],
        day: NaiveDate,
    ) -> HashMap<&'a str, &'a DeliveryStatus> {
        let mut booked = HashMap::new();
        for delivery in deliveries {
            if !delivery.status.is_active() {
                continue;
            }
            // 无法解析的日期不构成冲突
            if self.normalizer.normalize(&delivery.date) == Some(day) {
                booked
                    .entry(delivery.truck_id.as_str())
                    .or_insert(&delivery.status);
            }
        }
        booked
    }
}

impl Default for AvailabilityFilter {
    fn default() -> Self {
        Self::new()
    }
}
