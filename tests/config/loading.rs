use movies_core::config::{ConfigManager, ConfigurationError, MoviesConfig};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn repo_config_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config")
}

#[test]
fn test_repository_config_loads_for_test_environment() {
    let manager =
        ConfigManager::load_from_directory_with_env(Some(repo_config_dir()), "test").unwrap();
    let config = manager.config();

    assert_eq!(manager.environment(), "test");
    assert_eq!(config.resilience.max_failures, 3);
    assert_eq!(config.resilience.retries, 1);
    assert_eq!(config.entities.films.index, "movies");
    assert_eq!(config.entities.persons.cache_ttl(), Duration::from_secs(300));
}

#[test]
fn test_production_section_overrides_debug() {
    let manager =
        ConfigManager::load_from_directory_with_env(Some(repo_config_dir()), "production").unwrap();

    assert!(!manager.config().app.debug);
    assert_eq!(manager.config().resilience.max_failures, 5);
}

#[test]
fn test_missing_directory_reports_searched_paths() {
    let dir = TempDir::new().unwrap();

    let err = ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
        .unwrap_err();

    assert!(matches!(err, ConfigurationError::ConfigFileNotFound { .. }));
}

#[test]
fn test_invalid_values_fail_validation() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("movies-config.yaml"),
        "resilience:\n  max_failures: 0\n",
    )
    .unwrap();

    let err = ConfigManager::load_from_directory_with_env(Some(dir.path().to_path_buf()), "test")
        .unwrap_err();

    assert!(matches!(err, ConfigurationError::InvalidValue { .. }));
}

#[test]
fn test_from_config_validates() {
    let mut config = MoviesConfig::default();
    config.entities.genres.index = String::new();

    assert!(ConfigManager::from_config(config, "test").is_err());
    assert!(ConfigManager::from_config(MoviesConfig::default(), "test").is_ok());
}
