// ==========================================
// 卡车租赁 - 配置层
// ==========================================
// 职责: 分配引擎参数管理,支持文件 + 键值覆写
// ==========================================

pub mod allocation_config;
pub mod config_manager;

// 重导出核心配置类型
pub use allocation_config::{config_keys, AllocationConfig, ConfigError};
pub use config_manager::{default_config_path, ConfigManager, CONFIG_PATH_ENV};
