// tests/config_test.rs
use publish_docs::config::{load_config, Config, CONFIG_FILE_NAME};
use publish_docs::DocPublishError;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_default_config_matches_zephyr_layout() {
    let config = Config::default();
    assert_eq!(config.repository.upstream_remote, "upstream");
    assert_eq!(config.repository.release_branch, "v{release}-branch");
    assert_eq!(config.build.env_script, "zephyr-env.sh");
    assert_eq!(config.build.program, "make");
    assert_eq!(config.build.target, "htmldocs");
    assert_eq!(config.build.html_dir, "doc/_build/html");
    assert_eq!(config.build.api_dir, "doc/_build/doxygen/html");
    assert_eq!(config.publish.bucket, "s3://docs.zephyrproject.org");
    assert_eq!(config.publish.api_prefix, "apidoc");
}

#[test]
fn test_load_from_explicit_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[repository]
upstream_remote = "origin"

[build]
program = "ninja"
target = "docs"

[publish]
bucket = "s3://staging-docs"
quiet = false
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let workspace = TempDir::new().unwrap();
    let config = load_config(Some(temp_file.path()), workspace.path()).unwrap();

    assert_eq!(config.repository.upstream_remote, "origin");
    assert_eq!(config.repository.release_branch, "v{release}-branch");
    assert_eq!(config.build.program, "ninja");
    assert_eq!(config.build.target, "docs");
    assert_eq!(config.build.env_script, "zephyr-env.sh");
    assert_eq!(config.publish.bucket, "s3://staging-docs");
    assert!(!config.publish.quiet);
}

#[test]
fn test_load_from_workspace_file() {
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join(CONFIG_FILE_NAME),
        "[publish]\nbucket = \"s3://workspace-docs\"\n",
    )
    .unwrap();

    let config = load_config(None, workspace.path()).unwrap();
    assert_eq!(config.publish.bucket, "s3://workspace-docs");
}

#[test]
fn test_missing_explicit_file_is_config_error() {
    let workspace = TempDir::new().unwrap();
    let missing = workspace.path().join("nope.toml");

    let err = load_config(Some(&missing), workspace.path()).unwrap_err();
    assert!(matches!(err, DocPublishError::Config(_)));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[publish\nbucket = ").unwrap();
    temp_file.flush().unwrap();

    let workspace = TempDir::new().unwrap();
    let err = load_config(Some(temp_file.path()), workspace.path()).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_wrong_type_is_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[publish]\nquiet = \"sometimes\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let workspace = TempDir::new().unwrap();
    assert!(load_config(Some(temp_file.path()), workspace.path()).is_err());
}
