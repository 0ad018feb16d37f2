//! External command execution
//!
//! The build system and the object-store CLI are black boxes driven through
//! the [CommandRunner] trait. [SystemRunner] spawns real processes;
//! [RecordingRunner] records invocations and returns scripted results.

pub mod mock;
pub mod system;

pub use mock::RecordingRunner;
pub use system::SystemRunner;

use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A fully described external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Complete child environment. `None` inherits the parent's.
    pub env: Option<BTreeMap<String, String>>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
            env: None,
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Exit status and captured stdout of a finished command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands
///
/// Both methods fail only when the command cannot be started. A command that
/// runs and exits non-zero is reported through the returned exit code.
pub trait CommandRunner: Send + Sync {
    /// Run with inherited stdio and return the exit code
    fn status(&self, invocation: &Invocation) -> Result<Option<i32>>;

    /// Run with stdout captured
    fn output(&self, invocation: &Invocation) -> Result<CommandOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builder() {
        let inv = Invocation::new("make")
            .arg("DOC_TAG=daily")
            .args(["htmldocs"])
            .current_dir("/work/zephyr");

        assert_eq!(inv.program, "make");
        assert_eq!(inv.args, vec!["DOC_TAG=daily", "htmldocs"]);
        assert_eq!(inv.current_dir, Some(PathBuf::from("/work/zephyr")));
        assert!(inv.env.is_none());
        assert_eq!(inv.to_string(), "make DOC_TAG=daily htmldocs");
    }

    #[test]
    fn test_output_success() {
        assert!(CommandOutput {
            code: Some(0),
            stdout: Vec::new()
        }
        .success());
        assert!(!CommandOutput::default().success());
    }
}
