use itam_config::{AppConfig, ConfigError, ReportKind, StorageBackend};

// 环境变量为进程级共享状态，所有断言放在同一个测试中顺序执行。
#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::remove_var("ITAM_STORAGE");
        std::env::remove_var("ITAM_DATABASE_URL");
        std::env::set_var("ITAM_REPORT", "financial");
        std::env::set_var("ITAM_FILTER_LOCATION_ID", "3");
        std::env::set_var("ITAM_FILTER_START", "2024-01-01");
        std::env::set_var("ITAM_FILTER_END", "2024-12-31");
    }

    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.storage, StorageBackend::Memory);
    assert_eq!(config.db_max_connections, 8);
    assert_eq!(config.report, ReportKind::Financial);
    assert_eq!(config.filter.location_id, Some(3));
    assert!(config.filter.category_id.is_none());
    assert!(config.filter.date_range.is_some());

    unsafe {
        std::env::set_var("ITAM_STORAGE", "postgres");
    }
    let err = AppConfig::from_env().expect_err("missing url");
    assert!(matches!(err, ConfigError::Missing(key) if key == "ITAM_DATABASE_URL"));

    unsafe {
        std::env::set_var("ITAM_STORAGE", "memory");
        std::env::remove_var("ITAM_FILTER_END");
    }
    let err = AppConfig::from_env().expect_err("half range");
    assert!(matches!(err, ConfigError::Missing(key) if key == "ITAM_FILTER_END"));

    unsafe {
        std::env::set_var("ITAM_FILTER_END", "2024-12-31");
        std::env::set_var("ITAM_REPORT", "weekly");
    }
    let err = AppConfig::from_env().expect_err("bad report");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "ITAM_REPORT"));
}
