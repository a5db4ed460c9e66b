// ==========================================
// 卡车租赁 - 分配引擎配置项
// ==========================================
// 职责: 组合搜索阈值、启发式参数、日历时区
// 优先级: 内置默认值 < JSON 配置文件 < 键值覆写
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ==========================================
// 配置键常量（供设置表/键值覆写使用）
// ==========================================
pub mod config_keys {
    pub const EXHAUSTIVE_MAX_CANDIDATES: &str = "allocation.exhaustive_max_candidates";
    pub const EXHAUSTIVE_ITERATION_CAP: &str = "allocation.exhaustive_iteration_cap";
    pub const GREEDY_OVERSHOOT_TOLERANCE_T: &str = "allocation.greedy_overshoot_tolerance_t";
    pub const GREEDY_MIN_COVER_RATIO: &str = "allocation.greedy_min_cover_ratio";
    pub const CALENDAR_UTC_OFFSET_MINUTES: &str = "calendar.utc_offset_minutes";
}

/// 穷举分支允许的最大车辆数上限（2^20 个子集）
pub const EXHAUSTIVE_CANDIDATES_HARD_LIMIT: usize = 20;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("配置文件读取失败: path={path}, {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败: path={path}, {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置值非法 (key={key}): {message}")]
    InvalidValue { key: String, message: String },
}

// ==========================================
// AllocationConfig - 分配引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// 候选车辆数不超过该值时走穷举分支
    pub exhaustive_max_candidates: usize,

    /// 穷举分支最多访问的子集数
    pub exhaustive_iteration_cap: usize,

    /// 启发式: 允许超出剩余货重的吨数
    pub greedy_overshoot_tolerance_t: f64,

    /// 启发式: 单车至少覆盖剩余货重的比例
    pub greedy_min_cover_ratio: f64,

    /// 时间戳折算日历日所用的 UTC 偏移（分钟）
    pub calendar_utc_offset_minutes: i32,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            exhaustive_max_candidates: 10,
            exhaustive_iteration_cap: 1000,
            greedy_overshoot_tolerance_t: 1.0,
            greedy_min_cover_ratio: 0.5,
            calendar_utc_offset_minutes: 0,
        }
    }
}

impl AllocationConfig {
    /// 校验配置取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exhaustive_max_candidates > EXHAUSTIVE_CANDIDATES_HARD_LIMIT {
            return Err(ConfigError::InvalidValue {
                key: config_keys::EXHAUSTIVE_MAX_CANDIDATES.to_string(),
                message: format!(
                    "{} 超过上限 {}",
                    self.exhaustive_max_candidates, EXHAUSTIVE_CANDIDATES_HARD_LIMIT
                ),
            });
        }
        if self.exhaustive_iteration_cap == 0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::EXHAUSTIVE_ITERATION_CAP.to_string(),
                message: "必须大于 0".to_string(),
            });
        }
        if !self.greedy_overshoot_tolerance_t.is_finite() || self.greedy_overshoot_tolerance_t < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::GREEDY_OVERSHOOT_TOLERANCE_T.to_string(),
                message: format!("{} 不是非负有限数", self.greedy_overshoot_tolerance_t),
            });
        }
        if !self.greedy_min_cover_ratio.is_finite()
            || self.greedy_min_cover_ratio <= 0.0
            || self.greedy_min_cover_ratio > 1.0
        {
            return Err(ConfigError::InvalidValue {
                key: config_keys::GREEDY_MIN_COVER_RATIO.to_string(),
                message: format!("{} 不在 (0, 1] 区间", self.greedy_min_cover_ratio),
            });
        }
        // 合法时区偏移: (-24h, +24h)
        if self.calendar_utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::CALENDAR_UTC_OFFSET_MINUTES.to_string(),
                message: format!("{} 超出 ±1440 分钟", self.calendar_utc_offset_minutes),
            });
        }
        Ok(())
    }

    /// 应用键值覆写
    ///
    /// 无法解析的值保留原配置并记录告警；未知键忽略。
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) {
        for (key, raw) in overrides {
            let value = raw.trim();
            let applied = match key.as_str() {
                config_keys::EXHAUSTIVE_MAX_CANDIDATES => value
                    .parse::<usize>()
                    .map(|v| self.exhaustive_max_candidates = v)
                    .is_ok(),
                config_keys::EXHAUSTIVE_ITERATION_CAP => value
                    .parse::<usize>()
                    .map(|v| self.exhaustive_iteration_cap = v)
                    .is_ok(),
                config_keys::GREEDY_OVERSHOOT_TOLERANCE_T => value
                    .parse::<f64>()
                    .map(|v| self.greedy_overshoot_tolerance_t = v)
                    .is_ok(),
                config_keys::GREEDY_MIN_COVER_RATIO => value
                    .parse::<f64>()
                    .map(|v| self.greedy_min_cover_ratio = v)
                    .is_ok(),
                config_keys::CALENDAR_UTC_OFFSET_MINUTES => value
                    .parse::<i32>()
                    .map(|v| self.calendar_utc_offset_minutes = v)
                    .is_ok(),
                _ => {
                    tracing::debug!(config_key = %key, "未知配置键，忽略");
                    continue;
                }
            };

            if !applied {
                tracing::warn!(
                    config_key = %key,
                    raw_value = %raw,
                    "配置值格式错误，保留原值"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AllocationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.exhaustive_max_candidates, 10);
        assert_eq!(config.exhaustive_iteration_cap, 1000);
    }

    #[test]
    fn test_apply_overrides_skips_unparseable_values() {
        let mut config = AllocationConfig::default();
        let overrides = HashMap::from([
            (config_keys::GREEDY_OVERSHOOT_TOLERANCE_T.to_string(), "0.5".to_string()),
            (config_keys::EXHAUSTIVE_ITERATION_CAP.to_string(), "abc".to_string()),
            ("unrelated.key".to_string(), "1".to_string()),
        ]);
        config.apply_overrides(&overrides);
        assert_eq!(config.greedy_overshoot_tolerance_t, 0.5);
        assert_eq!(config.exhaustive_iteration_cap, 1000);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = AllocationConfig {
            exhaustive_max_candidates: 64,
            ..AllocationConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));

        let config = AllocationConfig {
            greedy_min_cover_ratio: 0.0,
            ..AllocationConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AllocationConfig {
            calendar_utc_offset_minutes: 1440,
            ..AllocationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AllocationConfig =
            serde_json::from_str(r#"{"calendar_utc_offset_minutes": 480}"#).unwrap();
        assert_eq!(config.calendar_utc_offset_minutes, 480);
        assert_eq!(config.exhaustive_max_candidates, 10);
    }
}
