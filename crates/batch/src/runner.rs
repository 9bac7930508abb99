//! Synchronous execution of external commands.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::Stdio;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Instant;

use motion_common::error::{MotionError, MotionResult};

use crate::command::CommandSpec;

/// Result of a successful command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, if the platform reported one.
    pub code: Option<i32>,

    /// stdout and stderr, merged line by line in arrival order.
    pub output: String,
}

/// Executes one command to completion.
///
/// Implementations must block until the command exits and must return an
/// error for a non-zero exit or a launch failure.
pub trait ProcessRunner {
    fn run(&mut self, command: &CommandSpec) -> MotionResult<CommandOutput>;

    /// Delete an intermediate file. A missing file is an error.
    fn remove_file(&mut self, path: &Path) -> MotionResult<()> {
        std::fs::remove_file(path).map_err(|source| MotionError::Cleanup {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Removed intermediate file");
        Ok(())
    }

    /// Runner name for logs.
    fn name(&self) -> &str;
}

/// Runs commands as real child processes.
///
/// No timeout is applied: a child that never exits blocks the batch.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&mut self, command: &CommandSpec) -> MotionResult<CommandOutput> {
        let program = command.program_name();
        tracing::debug!(command = %command, "Running external command");

        let started = Instant::now();
        let mut child = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| MotionError::CommandLaunch {
                program: program.clone(),
                source,
            })?;

        tracing::debug!(program = %program, pid = child.id(), "Process started");

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other(format!("Failed to capture {program} stdout")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other(format!("Failed to capture {program} stderr")))?;

        // Both pipes are drained concurrently so neither can fill up and
        // stall the child; lines are merged in the order they arrive.
        let (tx, rx) = mpsc::channel();
        let readers = [spawn_line_reader(stdout, tx.clone()), spawn_line_reader(stderr, tx)];

        let mut merged = String::new();
        for line in rx {
            tracing::debug!(program = %program, "{line}");
            merged.push_str(&line);
            merged.push('\n');
        }
        for reader in readers {
            if reader.join().is_err() {
                tracing::warn!(program = %program, "Output reader thread panicked");
            }
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(MotionError::command_failed(
                program,
                status.to_string(),
                merged.trim_end(),
            ));
        }

        tracing::debug!(
            program = %program,
            elapsed_ms = started.elapsed().as_millis(),
            "Process finished"
        );

        Ok(CommandOutput {
            code: status.code(),
            output: merged,
        })
    }

    fn name(&self) -> &str {
        "system"
    }
}

fn spawn_line_reader<R>(stream: R, tx: mpsc::Sender<String>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    std::thread::spawn(move || {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\n', '\r']).to_string();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx.send(format!("<failed to read output: {err}>"));
                    break;
                }
            }
        }
    })
}

/// Logs every command and deletion instead of performing it.
#[derive(Debug, Default)]
pub struct DryRunRunner;

impl DryRunRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for DryRunRunner {
    fn run(&mut self, command: &CommandSpec) -> MotionResult<CommandOutput> {
        tracing::info!(command = %command, "Dry run");
        Ok(CommandOutput {
            code: Some(0),
            output: String::new(),
        })
    }

    fn remove_file(&mut self, path: &Path) -> MotionResult<()> {
        tracing::info!(path = %path.display(), "Dry run: would remove");
        Ok(())
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}
