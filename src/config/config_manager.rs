// ==========================================
// 卡车租赁 - 配置管理器
// ==========================================
// 职责: 定位并加载配置文件,叠加键值覆写,统一校验
// 存储: JSON 文件 ($TRUCK_ALLOCATION_CONFIG 或 用户配置目录)
// ==========================================

use crate::config::allocation_config::{AllocationConfig, ConfigError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "TRUCK_ALLOCATION_CONFIG";

const CONFIG_DIR_NAME: &str = "truck-allocation";
const CONFIG_FILE_NAME: &str = "allocation.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    path: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用指定配置文件
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// 按环境变量 → 用户配置目录的顺序定位配置文件
    pub fn from_env() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(default_config_path);
        Self { path }
    }

    /// 仅使用内置默认值
    pub fn defaults_only() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 加载配置
    ///
    /// # 返回
    /// - 文件不存在: 内置默认值
    /// - 文件存在但无法读取/解析/校验: ConfigError
    pub fn load(&self) -> Result<AllocationConfig, ConfigError> {
        self.load_with_overrides(&HashMap::new())
    }

    /// 加载配置并叠加键值覆写（例如应用设置表中的条目）
    pub fn load_with_overrides(
        &self,
        overrides: &HashMap<String, String>,
    ) -> Result<AllocationConfig, ConfigError> {
        let mut config = match &self.path {
            Some(path) if path.exists() => read_config_file(path)?,
            Some(path) => {
                tracing::debug!(path = %path.display(), "配置文件不存在，使用默认配置");
                AllocationConfig::default()
            }
            None => AllocationConfig::default(),
        };

        config.apply_overrides(overrides);
        config.validate()?;

        tracing::info!(
            exhaustive_max_candidates = config.exhaustive_max_candidates,
            exhaustive_iteration_cap = config.exhaustive_iteration_cap,
            greedy_overshoot_tolerance_t = config.greedy_overshoot_tolerance_t,
            greedy_min_cover_ratio = config.greedy_min_cover_ratio,
            calendar_utc_offset_minutes = config.calendar_utc_offset_minutes,
            "分配引擎配置已加载"
        );
        Ok(config)
    }

    /// 将配置写回文件（设置页保存时使用）
    pub fn save(&self, config: &AllocationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let path = match &self.path {
            Some(p) => p,
            None => {
                return Err(ConfigError::InvalidValue {
                    key: CONFIG_PATH_ENV.to_string(),
                    message: "未指定配置文件路径".to_string(),
                })
            }
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let body = serde_json::to_string_pretty(config).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, body).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

/// 默认配置文件路径: <用户配置目录>/truck-allocation/allocation.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn read_config_file(path: &Path) -> Result<AllocationConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}
