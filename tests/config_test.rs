// tests/config_test.rs
use git_calver::analyzer::ScanMode;
use git_calver::config::{load_config, Config, VersionOptions, CONFIG_FILE_NAME};
use git_calver::CalverError;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.format.prefix, "v");
    assert_eq!(config.format.separator, ".");
    assert!(!config.format.short);
    assert_eq!(config.history.year, None);
    assert_eq!(config.history.scan, ScanMode::EarlyExit);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[format]
prefix = "rel-"

[history]
year = 2015
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let repo_dir = TempDir::new().unwrap();
    let config = load_config(Some(temp_file.path()), repo_dir.path()).unwrap();
    assert_eq!(config.format.prefix, "rel-");
    assert_eq!(config.format.separator, ".");
    assert_eq!(config.history.year, Some(2015));
}

#[test]
fn test_load_from_repository_path() {
    let repo_dir = TempDir::new().unwrap();
    std::fs::copy(
        "tests/fixtures/calver.toml",
        repo_dir.path().join(CONFIG_FILE_NAME),
    )
    .unwrap();

    let config = load_config(None, repo_dir.path()).unwrap();
    let options = VersionOptions::from_config(&config);
    assert_eq!(options.prefix, "build-");
    assert_eq!(options.separator, "-");
    assert!(options.short);
    assert_eq!(options.year.as_deref(), Some("2000"));
    assert_eq!(options.scan, ScanMode::Full);
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let repo_dir = TempDir::new().unwrap();
    let result = load_config(Some(Path::new("/definitely/not/here.toml")), repo_dir.path());
    assert!(matches!(result, Err(CalverError::Config(_))));
}

#[test]
fn test_malformed_config_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[format\nprefix = ").unwrap();
    temp_file.flush().unwrap();

    let repo_dir = TempDir::new().unwrap();
    let result = load_config(Some(temp_file.path()), repo_dir.path());
    assert!(matches!(result, Err(CalverError::Toml(_))));
}
