//! Shell command execution for the external source formatter

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::generation::GenerationError;

#[cfg(windows)]
const SHELL: (&str, &str) = ("cmd", "/C");
#[cfg(not(windows))]
const SHELL: (&str, &str) = ("sh", "-c");

/// Runs a command line through the platform shell
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(
        &self,
        command: &str,
        working_dir: &Path,
    ) -> Result<CommandOutput, GenerationError>;
}

/// Exit status and captured output of a finished command
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Short failure description: stderr, else stdout, prefixed by the exit status
    pub fn failure_summary(&self) -> String {
        let status = match self.exit_code {
            Some(code) => format!("exited with {code}"),
            None => "terminated by signal".to_string(),
        };
        let detail = [self.stderr.trim(), self.stdout.trim()]
            .into_iter()
            .find(|text| !text.is_empty());
        match detail {
            Some(detail) => format!("{status}: {detail}"),
            None => status,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShellCommandExecutor;

#[async_trait]
impl CommandExecutor for ShellCommandExecutor {
    async fn execute(
        &self,
        command: &str,
        working_dir: &Path,
    ) -> Result<CommandOutput, GenerationError> {
        let (shell, flag) = SHELL;
        let output = Command::new(shell)
            .arg(flag)
            .arg(command)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                GenerationError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to run '{command}': {e}"),
                ))
            })?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Quote a path for interpolation into a shell command line
pub fn shell_quote(value: &str) -> String {
    if cfg!(windows) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}

/// Records commands instead of running them; every command finishes with the
/// configured output
#[cfg(test)]
#[derive(Default)]
pub struct MockCommandExecutor {
    pub output: CommandOutput,
    pub executed: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockCommandExecutor {
    pub fn succeeding() -> Self {
        Self::finishing_with(0, "")
    }

    pub fn finishing_with(exit_code: i32, stderr: &str) -> Self {
        Self {
            output: CommandOutput {
                exit_code: Some(exit_code),
                stdout: String::new(),
                stderr: stderr.to_string(),
            },
            executed: Default::default(),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl CommandExecutor for MockCommandExecutor {
    async fn execute(
        &self,
        command: &str,
        _working_dir: &Path,
    ) -> Result<CommandOutput, GenerationError> {
        self.executed.lock().unwrap().push(command.to_string());
        Ok(self.output.clone())
    }
}
