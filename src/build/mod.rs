//! Documentation build: environment capture and the build invocation

pub mod environment;

pub use environment::{capture_environment, BuildEnvironment};

use crate::config::BuildConfig;
use crate::domain::DocMode;
use crate::error::Result;
use crate::process::{CommandRunner, Invocation};
use std::fs;
use std::path::Path;

/// Outcome of the documentation build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    Succeeded,
    Failed { code: Option<i32> },
    /// Dry run: nothing was executed
    Skipped,
}

impl BuildStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildStatus::Succeeded)
    }
}

/// `make DOC_TAG=<mode> htmldocs`, with the prepared environment
pub fn build_invocation(
    config: &BuildConfig,
    mode: DocMode,
    workspace: &Path,
    env: BuildEnvironment,
) -> Invocation {
    Invocation::new(config.program.clone())
        .arg(format!("{}={}", config.tag_variable, mode.tag()))
        .arg(config.target.clone())
        .env(env.into_vars())
        .current_dir(workspace)
}

/// Run the build. Only the exit status decides success.
pub fn run_build(runner: &dyn CommandRunner, invocation: &Invocation) -> Result<BuildStatus> {
    let code = runner.status(invocation)?;
    if code == Some(0) {
        Ok(BuildStatus::Succeeded)
    } else {
        tracing::warn!("Build exited with {:?}", code);
        Ok(BuildStatus::Failed { code })
    }
}

/// Number of lines in the build's warnings file, if it exists and has any
pub fn count_warnings(path: &Path) -> Option<usize> {
    let contents = fs::read_to_string(path).ok()?;
    let count = contents.lines().filter(|l| !l.trim().is_empty()).count();
    (count > 0).then_some(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::RecordingRunner;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_build_invocation_daily() {
        let config = BuildConfig::default();
        let inv = build_invocation(
            &config,
            DocMode::Daily,
            Path::new("/work/zephyr"),
            BuildEnvironment::default(),
        );

        assert_eq!(inv.program, "make");
        assert_eq!(inv.args, vec!["DOC_TAG=daily", "htmldocs"]);
        assert_eq!(inv.env, Some(BTreeMap::new()));
    }

    #[test]
    fn test_build_invocation_release_tag() {
        let inv = build_invocation(
            &BuildConfig::default(),
            DocMode::Release,
            Path::new("."),
            BuildEnvironment::default(),
        );
        assert_eq!(inv.args[0], "DOC_TAG=release");
    }

    #[test]
    fn test_run_build_maps_exit_status() {
        let mut runner = RecordingRunner::new();
        let inv = Invocation::new("make");
        assert_eq!(run_build(&runner, &inv).unwrap(), BuildStatus::Succeeded);

        runner.set_exit_code("make", 2);
        assert_eq!(
            run_build(&runner, &inv).unwrap(),
            BuildStatus::Failed { code: Some(2) }
        );
    }

    #[test]
    fn test_count_warnings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.warnings");
        assert_eq!(count_warnings(&path), None);

        fs::write(&path, "").unwrap();
        assert_eq!(count_warnings(&path), None);

        fs::write(&path, "a.rst:1: WARNING: x\n\nb.rst:2: WARNING: y\n").unwrap();
        assert_eq!(count_warnings(&path), Some(2));
    }
}
