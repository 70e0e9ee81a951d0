//! Error taxonomy for the command runner.
//!
//! Every failure carries the command text (and, for timeouts, the partial
//! output) so callers can diagnose without re-running the command.

use std::time::Duration;

use thiserror::Error;

/// Errors produced by [`super::run_simple_command`].
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The command string was empty or whitespace-only.
    #[error("cannot run an empty command")]
    EmptyCommand,

    /// The OS failed to create the child process.
    #[error("failed to run command\nCommand: {command}\nCause: {source}")]
    Spawn {
        /// The command that was attempted, after flag augmentation.
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process did not finish within the wait ceiling. The process tree
    /// has already been killed by the time this error surfaces.
    #[error(
        "failed to finish after {} ms\nCommand: {command}\nCurrent output:\n{output}",
        .waited.as_millis()
    )]
    Timeout {
        /// The command that was executed, after flag augmentation.
        command: String,
        /// Total wait accumulated before giving up.
        waited: Duration,
        /// Everything captured from both streams up to the kill.
        output: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_message_names_command() {
        let err = RunnerError::Spawn {
            command: "mycli --version --skip-update".to_string(),
            source: std::io::Error::other("boom"),
        };
        let msg = err.to_string();
        assert!(msg.contains("mycli --version --skip-update"));
        assert!(msg.contains("boom"));
    }

    #[test]
    fn test_timeout_message_includes_elapsed_and_partial_output() {
        let err = RunnerError::Timeout {
            command: "sleep 9999".to_string(),
            waited: Duration::from_millis(4000),
            output: "partial line\n".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("4000 ms"));
        assert!(msg.contains("sleep 9999"));
        assert!(msg.contains("partial line"));
    }
}
