//! Config and manifest error scenario tests

use harvest::HarvestError;
use harvest::config::{Config, LogLevel};
use harvest::manifest::read_manifest;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_file_not_found_falls_back_to_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("harvest.yaml");

    let (config, warning) = Config::load_or_default(&path).unwrap();

    assert_eq!(config, Config::default());
    assert!(matches!(warning, Some(HarvestError::ConfigMissing(p)) if p == path));
}

#[test]
fn test_config_file_invalid_yaml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("invalid.yaml");
    fs::write(&path, "invalid: yaml: content: [unclosed").unwrap();

    let result = Config::load_or_default(&path);

    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse configuration file")
    );
}

#[test]
fn test_config_file_zero_workers() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("harvest.yaml");
    fs::write(&path, "max_workers: 0\n").unwrap();

    let result = Config::load(&path);

    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .starts_with("Invalid configuration")
    );
}

#[test]
fn test_config_file_lenient_log_level() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("harvest.yaml");
    fs::write(&path, "log_level: LOUD\nclean_directory: out\n").unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.log_level, LogLevel::Info);
    assert_eq!(config.clean_directory, "out");
}

#[test]
fn test_config_directory_instead_of_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config_dir.yaml");
    fs::create_dir(&path).unwrap();

    let result = Config::load(&path);

    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to read configuration file")
    );
}

#[test]
fn test_manifest_missing_is_fatal() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("repositories.csv");

    let error = read_manifest(&path).unwrap_err();

    assert!(error.is_fatal_to_run());
    assert_eq!(
        error.to_string(),
        format!("The manifest file '{}' does not exist.", path.display())
    );
}

#[test]
fn test_manifest_without_required_columns() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("repositories.csv");
    fs::write(&path, "url|active\nhttps://example.com/a.git|true\n").unwrap();

    let error = read_manifest(&path).unwrap_err();

    assert!(error.is_fatal_to_run());
    assert!(error.to_string().contains("repo_url"));
}
