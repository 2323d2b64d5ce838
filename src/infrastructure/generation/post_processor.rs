//! Source formatting of generated files

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::generation::{GenerationError, SourceFormatter};
use crate::infrastructure::shell::{CommandExecutor, shell_quote};

/// Placeholder replaced with the quoted file path in a formatter command
pub const FILE_PLACEHOLDER: &str = "{file}";

/// Formats each file by running an external command such as
/// `ktlint --format {file}`
pub struct CommandFormatter {
    executor: Arc<dyn CommandExecutor>,
    command: String,
}

impl CommandFormatter {
    pub fn new<S: Into<String>>(executor: Arc<dyn CommandExecutor>, command: S) -> Self {
        Self {
            executor,
            command: command.into(),
        }
    }

    /// Command line for one file; without a placeholder the path is appended
    pub fn command_for(&self, path: &Path) -> String {
        let quoted = shell_quote(&path.to_string_lossy());
        if self.command.contains(FILE_PLACEHOLDER) {
            self.command.replace(FILE_PLACEHOLDER, &quoted)
        } else {
            format!("{} {quoted}", self.command)
        }
    }
}

#[async_trait]
impl SourceFormatter for CommandFormatter {
    async fn format(&self, path: &Path) -> Result<(), GenerationError> {
        let command = self.command_for(path);
        let working_dir = path.parent().unwrap_or_else(|| Path::new("."));

        tracing::debug!(path = %path.display(), command = %command, "Formatting generated file");

        let result = self
            .executor
            .execute(&command, working_dir)
            .await
            .map_err(|e| GenerationError::Format {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if result.succeeded() {
            Ok(())
        } else {
            Err(GenerationError::Format {
                path: path.to_path_buf(),
                message: format!("formatter {}", result.failure_summary()),
            })
        }
    }
}

/// Leaves files as rendered
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFormatter;

#[async_trait]
impl SourceFormatter for NoopFormatter {
    async fn format(&self, _path: &Path) -> Result<(), GenerationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::shell::MockCommandExecutor;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_placeholder_substitution() {
        let executor = Arc::new(MockCommandExecutor::succeeding());
        let formatter = CommandFormatter::new(executor.clone(), "ktlint --format {file}");

        formatter
            .format(Path::new("/out/src/main/kotlin/Accounts.kt"))
            .await
            .unwrap();

        let executed = executor.executed.lock().unwrap();
        assert_eq!(executed.len(), 1);
        assert!(executed[0].starts_with("ktlint --format "));
        assert!(executed[0].contains("/out/src/main/kotlin/Accounts.kt"));
    }

    #[test]
    fn test_path_appended_without_placeholder() {
        let formatter = CommandFormatter::new(Arc::new(MockCommandExecutor::succeeding()), "ktfmt");
        let command = formatter.command_for(&PathBuf::from("Accounts.kt"));

        assert!(command.starts_with("ktfmt "));
        assert!(command.contains("Accounts.kt"));
    }

    #[tokio::test]
    async fn test_failing_command_is_format_error() {
        let executor = Arc::new(MockCommandExecutor::finishing_with(1, "Broken.kt:1:1 Expecting a top level declaration"));
        let formatter = CommandFormatter::new(executor, "ktlint --format {file}");

        let err = formatter
            .format(Path::new("/out/Broken.kt"))
            .await
            .unwrap_err();

        match err {
            GenerationError::Format { path, message } => {
                assert_eq!(path, PathBuf::from("/out/Broken.kt"));
                assert!(message.contains("exited with 1"));
                assert!(message.contains("Expecting a top level declaration"));
            }
            other => panic!("Expected Format error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_noop_formatter() {
        NoopFormatter.format(Path::new("anything.kt")).await.unwrap();
    }
}
