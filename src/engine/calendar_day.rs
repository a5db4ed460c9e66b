// ==========================================
// 卡车租赁 - 日历日归一化
// ==========================================
// 职责: 将运单日期的各种原始编码统一折算为 YYYY-MM-DD 日历日
// 红线: 无法解析的日期返回 None（调用方按“无冲突”处理）,不得报错
// ==========================================

use crate::domain::delivery::RawDeliveryDate;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use tracing::warn;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// 日历日键格式
pub const CALENDAR_DAY_KEY_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// CalendarDayNormalizer - 日历日归一化器
// ==========================================
// 时间点类编码（时间戳、带时区字符串、DateTime）先换算到 offset 再取日期;
// 纯日期与不带时区的日期时间字符串按字面日期处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDayNormalizer {
    offset: FixedOffset,
}

impl CalendarDayNormalizer {
    /// 以 UTC 折算
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// 以指定 UTC 偏移（分钟）折算，非法偏移回退为 UTC
    pub fn with_offset_minutes(minutes: i32) -> Self {
        match minutes.checked_mul(60).and_then(FixedOffset::east_opt) {
            Some(offset) => Self { offset },
            None => {
                warn!(offset_minutes = minutes, "非法 UTC 偏移，回退为 UTC");
                Self::utc()
            }
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// 原始编码 → 日历日
    pub fn normalize(&self, raw: &RawDeliveryDate) -> Option<NaiveDate> {
        match raw {
            RawDeliveryDate::EpochSeconds {
                seconds,
                nanoseconds,
            } => self.from_epoch(*seconds, *nanoseconds),
            RawDeliveryDate::Text(text) => self.normalize_text(text),
            RawDeliveryDate::Date(date) => Some(*date),
            RawDeliveryDate::DateTime(instant) => {
                Some(instant.with_timezone(&self.offset).date_naive())
            }
            RawDeliveryDate::Unrecognized(_) => None,
        }
    }

    /// 字符串 → 日历日
    ///
    /// 支持: `2024-01-05`、`2024-01-05T10:00:00`、`2024-01-05 10:00:00`、
    /// RFC 3339（`Z` 或 `+08:00`）、`+0800` 形式的偏移
    pub fn normalize_text(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
            return Some(instant.with_timezone(&self.offset).date_naive());
        }
        if let Ok(instant) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
            return Some(instant.with_timezone(&self.offset).date_naive());
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Some(naive.date());
            }
        }
        NaiveDate::parse_from_str(text, CALENDAR_DAY_KEY_FORMAT).ok()
    }

    /// 原始编码 → `YYYY-MM-DD` 键
    pub fn day_key(&self, raw: &RawDeliveryDate) -> Option<String> {
        self.normalize(raw)
            .map(|date| date.format(CALENDAR_DAY_KEY_FORMAT).to_string())
    }

    fn from_epoch(&self, seconds: i64, nanoseconds: i64) -> Option<NaiveDate> {
        // 纳秒越界时进位到秒
        let carry = nanoseconds.div_euclid(NANOS_PER_SECOND);
        let nanos = u32::try_from(nanoseconds.rem_euclid(NANOS_PER_SECOND)).ok()?;
        let instant = DateTime::from_timestamp(seconds.checked_add(carry)?, nanos)?;
        Some(instant.with_timezone(&self.offset).date_naive())
    }
}

impl Default for CalendarDayNormalizer {
    fn default() -> Self {
        Self::utc()
    }
}

/// 按 UTC 折算的日历日键
pub fn to_calendar_day_key(raw: &RawDeliveryDate) -> Option<String> {
    CalendarDayNormalizer::utc().day_key(raw)
}
