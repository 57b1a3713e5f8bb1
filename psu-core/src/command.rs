//! External command execution with a hard timeout
//!
//! Used for the sensor re-scan trigger. The command affects the whole sensor
//! bus, so a hung invocation must not block the caller forever.

use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::constants::command;
use crate::error::{PsuError, Result};

/// Runs a fixed command line
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &str) -> Result<()>;
}

/// Spawns the command directly (no shell) and waits up to `timeout`
#[derive(Debug, Clone)]
pub struct ShellCommandRunner {
    timeout: Duration,
}

impl ShellCommandRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new(command::DEFAULT_TIMEOUT)
    }
}

impl CommandRunner for ShellCommandRunner {
    fn run(&self, command_line: &str) -> Result<()> {
        let mut parts = command_line.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| PsuError::invalid_config("command", "empty command line"))?;

        debug!(command = command_line, "Running external command");

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PsuError::CommandSpawn {
                command: command_line.to_string(),
                source: e,
            })?;

        let start = Instant::now();
        loop {
            match child.try_wait()? {
                Some(status) if status.success() => return Ok(()),
                Some(status) => {
                    return Err(PsuError::CommandFailed {
                        command: command_line.to_string(),
                        status: status.to_string(),
                    })
                }
                None if start.elapsed() >= self.timeout => {
                    warn!(command = command_line, timeout_ms = self.timeout.as_millis() as u64, "Killing command after timeout");
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(PsuError::Timeout(format!(
                        "'{}' did not finish within {:?}",
                        command_line, self.timeout
                    )));
                }
                None => thread::sleep(command::POLL_INTERVAL),
            }
        }
    }
}
