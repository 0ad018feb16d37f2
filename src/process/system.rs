use crate::error::{DocPublishError, Result};
use crate::process::{CommandOutput, CommandRunner, Invocation};
use std::process::{Command, Stdio};

/// Spawns real processes with `std::process::Command`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);

        if let Some(ref env) = invocation.env {
            cmd.env_clear();
            cmd.envs(env);
        }

        if let Some(ref dir) = invocation.current_dir {
            cmd.current_dir(dir);
        }

        cmd
    }
}

impl CommandRunner for SystemRunner {
    fn status(&self, invocation: &Invocation) -> Result<Option<i32>> {
        tracing::debug!("Running: {}", invocation);

        let status = Self::command(invocation).status().map_err(|e| {
            DocPublishError::command(format!("Failed to start {}: {}", invocation.program, e))
        })?;

        Ok(status.code())
    }

    fn output(&self, invocation: &Invocation) -> Result<CommandOutput> {
        tracing::debug!("Running (captured): {}", invocation);

        let output = Self::command(invocation)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| {
                DocPublishError::command(format!(
                    "Failed to start {}: {}",
                    invocation.program, e
                ))
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: output.stdout,
        })
    }
}
