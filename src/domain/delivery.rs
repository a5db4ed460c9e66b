// ==========================================
// 卡车租赁 - 运单领域模型
// ==========================================
// 数据归属: 外部运单库 (booking store)
// 日期存在多种原始编码,统一在 engine::calendar_day 归一化
// ==========================================

use crate::domain::types::DeliveryStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// RawDeliveryDate - 运单日期原始编码
// ==========================================
// 反序列化按顺序尝试: 秒级时间戳对象 → 字符串 → 其他任意值
// Date / DateTime 仅由进程内调用方直接构造
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDeliveryDate {
    /// 时间戳对象 {seconds, nanoseconds}（兼容 _seconds/_nanoseconds）
    EpochSeconds {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: i64,
    },
    /// ISO-8601 字符串
    Text(String),
    /// 原生日期
    Date(NaiveDate),
    /// 原生时间点
    DateTime(DateTime<Utc>),
    /// 无法识别的编码（按“无冲突”处理）
    Unrecognized(serde_json::Value),
}

impl Default for RawDeliveryDate {
    fn default() -> Self {
        RawDeliveryDate::Unrecognized(serde_json::Value::Null)
    }
}

impl From<NaiveDate> for RawDeliveryDate {
    fn from(date: NaiveDate) -> Self {
        RawDeliveryDate::Date(date)
    }
}

impl From<&str> for RawDeliveryDate {
    fn from(text: &str) -> Self {
        RawDeliveryDate::Text(text.to_string())
    }
}

// ==========================================
// DeliveryRecord - 运单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    #[serde(alias = "truckId")]
    pub truck_id: String, // 关联车辆ID

    #[serde(default)]
    pub date: RawDeliveryDate, // 运单日期（原始编码）

    pub status: DeliveryStatus, // 运单状态
}

impl DeliveryRecord {
    pub fn new(truck_id: &str, date: impl Into<RawDeliveryDate>, status: DeliveryStatus) -> Self {
        Self {
            truck_id: truck_id.to_string(),
            date: date.into(),
            status,
        }
    }
}
