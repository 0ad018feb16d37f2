use crate::error::Result;
use crate::process::{CommandOutput, CommandRunner, Invocation};
use std::collections::HashMap;
use std::sync::Mutex;

/// Runner that records invocations instead of spawning processes
///
/// Every program exits 0 with empty stdout unless told otherwise.
pub struct RecordingRunner {
    exit_codes: HashMap<String, i32>,
    stdout: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        RecordingRunner {
            exit_codes: HashMap::new(),
            stdout: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make every run of `program` exit with `code`
    pub fn set_exit_code(&mut self, program: impl Into<String>, code: i32) {
        self.exit_codes.insert(program.into(), code);
    }

    /// Captured stdout returned for `program`
    pub fn set_stdout(&mut self, program: impl Into<String>, stdout: impl Into<Vec<u8>>) {
        self.stdout.insert(program.into(), stdout.into());
    }

    /// All invocations in the order they ran
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Invocations of a single program
    pub fn invocations_of(&self, program: &str) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|inv| inv.program == program)
            .collect()
    }

    fn record(&self, invocation: &Invocation) -> Option<i32> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }
        Some(
            self.exit_codes
                .get(&invocation.program)
                .copied()
                .unwrap_or(0),
        )
    }
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for RecordingRunner {
    fn status(&self, invocation: &Invocation) -> Result<Option<i32>> {
        Ok(self.record(invocation))
    }

    fn output(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let code = self.record(invocation);
        Ok(CommandOutput {
            code,
            stdout: self
                .stdout
                .get(&invocation.program)
                .cloned()
                .unwrap_or_default(),
        })
    }
}
