// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置文件加载、覆写与保存
// ==========================================

use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;
use truck_allocation::config::{config_keys, AllocationConfig, ConfigError, ConfigManager};

// ==========================================
// 测试 1: 文件不存在时使用默认值
// ==========================================
#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("absent.json"));

    let config = manager.load().unwrap();
    assert_eq!(config, AllocationConfig::default());
    assert_eq!(config.exhaustive_max_candidates, 10);
    assert_eq!(config.exhaustive_iteration_cap, 1000);
}

// ==========================================
// 测试 2: 文件部分字段 + 键值覆写
// ==========================================
#[test]
fn test_file_then_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("allocation.json");
    fs::write(
        &path,
        r#"{"greedy_min_cover_ratio": 0.6, "calendar_utc_offset_minutes": 480}"#,
    )
    .unwrap();

    let manager = ConfigManager::with_path(&path);
    let config = manager.load().unwrap();
    assert_eq!(config.greedy_min_cover_ratio, 0.6);
    assert_eq!(config.calendar_utc_offset_minutes, 480);
    assert_eq!(config.greedy_overshoot_tolerance_t, 1.0);

    let mut overrides = HashMap::new();
    overrides.insert(config_keys::CALENDAR_UTC_OFFSET_MINUTES.to_string(), "-300".to_string());
    overrides.insert(config_keys::GREEDY_MIN_COVER_RATIO.to_string(), "not-a-number".to_string());
    let config = manager.load_with_overrides(&overrides).unwrap();
    assert_eq!(config.calendar_utc_offset_minutes, -300);
    assert_eq!(config.greedy_min_cover_ratio, 0.6);
}

// ==========================================
// 测试 3: 格式错误 / 越界
// ==========================================
#[test]
fn test_invalid_files_are_rejected() {
    let dir = TempDir::new().unwrap();

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        ConfigManager::with_path(&broken).load(),
        Err(ConfigError::Parse { .. })
    ));

    let out_of_range = dir.path().join("range.json");
    fs::write(&out_of_range, r#"{"exhaustive_max_candidates": 40}"#).unwrap();
    match ConfigManager::with_path(&out_of_range).load() {
        Err(ConfigError::InvalidValue { key, .. }) => {
            assert_eq!(key, config_keys::EXHAUSTIVE_MAX_CANDIDATES)
        }
        other => panic!("预期越界错误, 实际: {:?}", other),
    }
}

// ==========================================
// 测试 4: 保存后重新加载
// ==========================================
#[test]
fn test_save_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("allocation.json");
    let manager = ConfigManager::with_path(&path);

    let config = AllocationConfig {
        exhaustive_max_candidates: 8,
        ..AllocationConfig::default()
    };
    manager.save(&config).unwrap();
    assert_eq!(manager.load().unwrap(), config);

    assert!(ConfigManager::defaults_only().save(&config).is_err());
}
