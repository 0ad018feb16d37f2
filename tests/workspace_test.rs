use publish_docs::cli::orchestration::{workspace_from_env, MAIN_REPO_STATE};
use serial_test::serial;
use std::env;
use tempfile::TempDir;

#[test]
#[serial]
fn test_main_repo_state_selects_workspace() {
    let dir = TempDir::new().unwrap();
    env::set_var(MAIN_REPO_STATE, dir.path());

    let workspace = workspace_from_env();
    env::remove_var(MAIN_REPO_STATE);

    assert_eq!(workspace.unwrap(), dir.path());
}

#[test]
#[serial]
fn test_unset_main_repo_state_uses_current_dir() {
    env::remove_var(MAIN_REPO_STATE);
    assert_eq!(workspace_from_env().unwrap(), env::current_dir().unwrap());
}

#[test]
#[serial]
fn test_missing_main_repo_state_directory() {
    let dir = TempDir::new().unwrap();
    let gone = dir.path().join("not-there");
    env::set_var(MAIN_REPO_STATE, &gone);

    let workspace = workspace_from_env();
    env::remove_var(MAIN_REPO_STATE);

    assert!(workspace.is_err());
}
