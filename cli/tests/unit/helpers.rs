//! Shared test helpers: output constructors and a scripted command runner.

#![allow(dead_code, clippy::expect_used)]

use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use firebase_provision::application::ports::CommandRunner;

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
/// On Windows `ExitStatusExt::from_raw` takes the exit code directly.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

// ── ScriptedRunner ───────────────────────────────────────────────────────────

type Script = dyn Fn(&str, &[&str]) -> Result<Output> + Send + Sync;

/// A `CommandRunner` that records every `(program, args)` call and answers
/// from a closure.
///
/// Cloning shares the call log, so one runner can back several adapters.
#[derive(Clone)]
pub struct ScriptedRunner {
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    timeouts: Arc<Mutex<Vec<Duration>>>,
    script: Arc<Script>,
}

impl ScriptedRunner {
    pub fn new(script: impl Fn(&str, &[&str]) -> Result<Output> + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            timeouts: Arc::new(Mutex::new(Vec::new())),
            script: Arc::new(script),
        }
    }

    /// Runner whose every command succeeds with `stdout`.
    pub fn always_ok(stdout: &'static [u8]) -> Self {
        Self::new(move |_, _| Ok(ok_output(stdout)))
    }

    /// Runner whose every command exits 1.
    pub fn always_fail() -> Self {
        Self::new(|_, _| Ok(err_output(1, b"boom")))
    }

    /// Snapshot of recorded calls, each joined as `"program arg1 arg2"`.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("mutex poisoned")
            .iter()
            .map(|(program, args)| {
                let mut line = program.clone();
                for arg in args {
                    line.push(' ');
                    line.push_str(arg);
                }
                line
            })
            .collect()
    }

    pub fn recorded_calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().expect("mutex poisoned").clone()
    }

    pub fn recorded_timeouts(&self) -> Vec<Duration> {
        self.timeouts.lock().expect("mutex poisoned").clone()
    }

    fn record(&self, program: &str, args: &[&str]) {
        self.calls.lock().expect("mutex poisoned").push((
            program.to_owned(),
            args.iter().map(ToString::to_string).collect(),
        ));
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.record(program, args);
        (self.script)(program, args)
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output> {
        self.timeouts.lock().expect("mutex poisoned").push(timeout);
        self.run(program, args).await
    }

    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        self.record(program, args);
        (self.script)(program, args).map(|o| o.status)
    }
}
