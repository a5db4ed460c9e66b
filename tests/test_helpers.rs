// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 车队/运单测试数据构造
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use truck_allocation::domain::types::{DeliveryStatus, OperationalState};
use truck_allocation::domain::{DeliveryRecord, RawDeliveryDate, Truck};

/// 按载重列表生成车队，ID 为 T01, T02, ...
pub fn fleet_of(capacities: &[f64]) -> Vec<Truck> {
    capacities
        .iter()
        .enumerate()
        .map(|(i, c)| truck(&format!("T{:02}", i + 1), *c))
        .collect()
}

pub fn truck(id: &str, capacity_t: f64) -> Truck {
    Truck::new(id, capacity_t).with_plate(&format!("粤B-{}", id))
}

pub fn truck_in_state(id: &str, capacity_t: f64, state: OperationalState) -> Truck {
    truck(id, capacity_t).with_state(state)
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn delivery_on(truck_id: &str, date: NaiveDate, status: DeliveryStatus) -> DeliveryRecord {
    DeliveryRecord::new(truck_id, date, status)
}

pub fn delivery_at_epoch(truck_id: &str, seconds: i64, status: DeliveryStatus) -> DeliveryRecord {
    DeliveryRecord::new(
        truck_id,
        RawDeliveryDate::EpochSeconds {
            seconds,
            nanoseconds: 0,
        },
        status,
    )
}

pub fn ids(trucks: &[Truck]) -> Vec<&str> {
    trucks.iter().map(|t| t.id.as_str()).collect()
}
