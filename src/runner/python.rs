//! Python subprocess executor

use super::{ExecutionOutput, Executor, ProgramInput, RunnerConfig, RuntimeError};
use log::{debug, warn};
use std::io::{self, Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs generated code with `python -c` in a child process.
#[derive(Debug, Clone, Default)]
pub struct PythonRunner {
    config: RunnerConfig,
}

impl PythonRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    fn spawn(&self, code: &str, input: &ProgramInput) -> Result<Child, RuntimeError> {
        let stdin = match input {
            ProgramInput::Empty => Stdio::null(),
            ProgramInput::Text(_) => Stdio::piped(),
            ProgramInput::Inherit => Stdio::inherit(),
        };

        Command::new(&self.config.python)
            .arg("-c")
            .arg(code)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RuntimeError::Spawn {
                program: self.config.python.clone(),
                source,
            })
    }

    /// Wait for the child, killing it once the time limit passes.
    /// Returns `None` on timeout.
    fn wait_with_deadline(&self, child: &mut Child) -> io::Result<Option<ExitStatus>> {
        let deadline = Instant::now() + self.config.timeout;

        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(Some(status));
            }
            if Instant::now() >= deadline {
                // the child may exit between try_wait and kill
                let _ = child.kill();
                child.wait()?;
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Executor for PythonRunner {
    fn execute(&self, code: &str, input: &ProgramInput) -> Result<ExecutionOutput, RuntimeError> {
        debug!("running {} lines with {}", code.lines().count(), self.config.python);
        let started = Instant::now();

        let mut child = self.spawn(code, input)?;

        // Feed stdin and drain both pipes concurrently so neither side blocks
        let writer = match (input, child.stdin.take()) {
            (ProgramInput::Text(text), Some(stdin)) => Some(spawn_writer(stdin, text.clone())),
            _ => None,
        };
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let status = self.wait_with_deadline(&mut child)?;

        if let Some(writer) = writer {
            join(writer)?;
        }
        let stdout = stdout.map(join).transpose()?.unwrap_or_default();
        let stderr = stderr.map(join).transpose()?.unwrap_or_default();

        debug!("program finished in {:?}", started.elapsed());

        match status {
            Some(status) if status.success() => Ok(ExecutionOutput { stdout, stderr }),
            Some(status) => {
                warn!("program exited with {}", status);
                Err(RuntimeError::Failed {
                    code: status.code(),
                    stdout,
                    stderr,
                })
            }
            None => {
                warn!("program killed after {:?}", self.config.timeout);
                Err(RuntimeError::Timeout {
                    limit: self.config.timeout,
                    stdout,
                })
            }
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<io::Result<String>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    })
}

fn spawn_writer<W: Write + Send + 'static>(mut pipe: W, text: String) -> JoinHandle<io::Result<()>> {
    thread::spawn(move || match pipe.write_all(text.as_bytes()) {
        // the program may exit without reading all of its input
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    })
}

fn join<T>(handle: JoinHandle<io::Result<T>>) -> io::Result<T> {
    handle
        .join()
        .map_err(|_| io::Error::other("pipe thread panicked"))?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn python_available() -> bool {
        Command::new(RunnerConfig::default().python)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn runner() -> PythonRunner {
        PythonRunner::new(RunnerConfig::default().with_timeout(Duration::from_secs(5)))
    }

    #[test]
    fn test_missing_interpreter() {
        let runner = PythonRunner::new(
            RunnerConfig::default().with_python("pseudopy-no-such-interpreter"),
        );

        let err = runner.execute("print(1)", &ProgramInput::Empty).unwrap_err();
        assert!(matches!(err, RuntimeError::Spawn { ref program, .. } if program == "pseudopy-no-such-interpreter"));
    }

    #[test]
    fn test_captures_stdout() {
        if !python_available() {
            eprintln!("python3 not available, skipping");
            return;
        }

        let output = runner()
            .execute("x = 5\nprint(x)\nprint(\"done\")", &ProgramInput::Empty)
            .unwrap();
        assert_eq!(output.lines(), vec!["5", "done"]);
    }

    #[test]
    fn test_program_input() {
        if !python_available() {
            eprintln!("python3 not available, skipping");
            return;
        }

        let output = runner()
            .execute(
                "name = input()\nprint(name + \"!\")",
                &ProgramInput::Text("Ada\n".to_string()),
            )
            .unwrap();
        assert_eq!(output.stdout, "Ada!\n");
    }

    #[test]
    fn test_runtime_failure() {
        if !python_available() {
            eprintln!("python3 not available, skipping");
            return;
        }

        let err = runner()
            .execute("print(1)\nprint(y)", &ProgramInput::Empty)
            .unwrap_err();
        match err {
            RuntimeError::Failed {
                code,
                stdout,
                stderr,
            } => {
                assert_eq!(code, Some(1));
                assert_eq!(stdout, "1\n");
                assert!(stderr.contains("NameError"));
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_timeout() {
        if !python_available() {
            eprintln!("python3 not available, skipping");
            return;
        }

        let runner = PythonRunner::new(
            RunnerConfig::default().with_timeout(Duration::from_millis(300)),
        );
        let err = runner
            .execute("while True:\n    pass", &ProgramInput::Empty)
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Timeout { .. }));
    }
}
