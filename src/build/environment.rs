use crate::config::BuildConfig;
use crate::error::{DocPublishError, Result};
use crate::process::{CommandRunner, Invocation};
use std::collections::BTreeMap;
use std::path::Path;

/// Build-directory override cleared before every documentation build.
pub const BUILDDIR: &str = "BUILDDIR";
/// Board directory selector read by the documentation build.
pub const ENV_VAR_BOARD_DIR: &str = "ENV_VAR_BOARD_DIR";
/// Architecture selector read by the documentation build.
pub const ENV_VAR_ARCH: &str = "ENV_VAR_ARCH";

/// Environment handed to the build process.
///
/// Produced by sourcing the environment script in a child shell and reading
/// back what it exported. The publisher's own environment is never modified.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildEnvironment {
    vars: BTreeMap<String, String>,
}

impl BuildEnvironment {
    /// Parse `env -0` output: `KEY=VALUE` records separated by NUL bytes
    pub fn parse_nul_separated(raw: &[u8]) -> Self {
        let vars = raw
            .split(|b| *b == 0)
            .filter(|record| !record.is_empty())
            .filter_map(|record| {
                let record = String::from_utf8_lossy(record);
                let (key, value) = record.split_once('=')?;
                if key.is_empty() {
                    return None;
                }
                Some((key.to_string(), value.to_string()))
            })
            .collect();
        BuildEnvironment { vars }
    }

    /// Drop `BUILDDIR` and set the board and arch selectors
    pub fn prepare_for_docs(mut self, config: &BuildConfig) -> Self {
        self.vars.remove(BUILDDIR);
        self.vars.insert(
            ENV_VAR_BOARD_DIR.to_string(),
            config.board_dir_selector.clone(),
        );
        self.vars
            .insert(ENV_VAR_ARCH.to_string(), config.arch_selector.clone());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn into_vars(self) -> BTreeMap<String, String> {
        self.vars
    }
}

/// Source `script` inside `workspace` and capture the resulting environment.
///
/// The script's own output is discarded; a missing script or a non-zero
/// status from sourcing it is a [DocPublishError::Environment].
pub fn capture_environment(
    runner: &dyn CommandRunner,
    workspace: &Path,
    script: &str,
) -> Result<BuildEnvironment> {
    let script_path = workspace.join(script);
    if !script_path.is_file() {
        return Err(DocPublishError::environment(format!(
            "Environment script not found: {}",
            script_path.display()
        )));
    }

    let invocation = Invocation::new("bash")
        .args([
            "-c",
            "source \"$1\" >/dev/null && env -0",
            "publish-docs",
        ])
        .arg(script_path.to_string_lossy())
        .current_dir(workspace);

    let output = runner.output(&invocation)?;
    if !output.success() {
        return Err(DocPublishError::environment(format!(
            "Sourcing {} failed with exit code {}",
            script_path.display(),
            output
                .code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "(signal)".to_string())
        )));
    }

    let env = BuildEnvironment::parse_nul_separated(&output.stdout);
    tracing::debug!(
        "Captured {} variables from {}",
        env.len(),
        script_path.display()
    );
    Ok(env)
}
