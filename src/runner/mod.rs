//! Execution of generated code
//!
//! Generated Python never runs inside this process. An [`Executor`] hands the
//! text to an external interpreter and reports what it printed, or a
//! [`RuntimeError`]. Runtime errors are kept apart from translation errors:
//! a program can translate cleanly and still fail when run.
//!
//! [`PythonRunner`] is the subprocess implementation used by the CLI and TUI.

pub mod python;

pub use python::PythonRunner;

use std::time::Duration;
use thiserror::Error;

/// Environment variable naming the Python interpreter to run.
pub const PYTHON_ENV_VAR: &str = "PSEUDOPY_PYTHON";

pub const DEFAULT_PYTHON: &str = "python3";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while executing generated code
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The interpreter could not be started
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program exited unsuccessfully
    #[error("Program exited with {}: {}", exit_code_text(.code), .stderr.trim_end())]
    Failed {
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The program ran past its time limit and was killed
    #[error("Program timed out after {}s", .limit.as_secs_f64())]
    Timeout { limit: Duration, stdout: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_code_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// What the program sees on standard input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProgramInput {
    /// Closed stdin; `input()` raises `EOFError`
    #[default]
    Empty,
    /// Fixed text, typically one answer per line
    Text(String),
    /// Share this process's stdin
    Inherit,
}

/// Captured output of a finished program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionOutput {
    /// Stdout split into lines, without terminators.
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

/// Something that can run generated code
pub trait Executor {
    fn execute(&self, code: &str, input: &ProgramInput) -> Result<ExecutionOutput, RuntimeError>;
}

/// Runner settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Interpreter executable
    pub python: String,
    /// Wall-clock limit per run
    pub timeout: Duration,
}

impl RunnerConfig {
    /// Defaults, with the interpreter overridden by `PSEUDOPY_PYTHON` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(python) = std::env::var(PYTHON_ENV_VAR) {
            if !python.trim().is_empty() {
                config.python = python;
            }
        }
        config
    }

    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
