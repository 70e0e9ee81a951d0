//! Shell command execution with merged output capture.
//!
//! This module is the public surface of the library: it spawns a command
//! through a shell, collects stdout and stderr into one ANSI-stripped buffer,
//! and waits for completion under a configurable ceiling.

pub mod ansi;
mod config;
mod error;
mod process;


pub use config::RunnerConfig;
pub use error::RunnerError;
pub use process::ShellProcess;

/// Fixed argument appended to the command to silence the invoked tool's
/// automatic update check.
pub const SKIP_UPDATE_FLAG: &str = "--skip-update";

/// Per-invocation options for [`run_simple_command`].
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Append [`SKIP_UPDATE_FLAG`] to the command before spawning.
    pub skip_update: bool,
    /// Set the test-trace environment variable on the child so the invoked
    /// tool emits trace output. Applied per child, never process-wide.
    pub test_trace: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            skip_update: true,
            test_trace: true,
        }
    }
}

/// Run a simple CLI command that requires no interaction and return its
/// merged, color-stripped output.
///
/// Uses [`RunnerConfig::default`] timing: a 1 second completion check
/// interval and a 30 second wait ceiling.
///
/// # Arguments
/// * `command` - Command line to run through the shell, e.g. `<cli> --version`
/// * `options` - Flag augmentation and child environment options
///
/// # Errors
/// * [`RunnerError::EmptyCommand`] if `command` is blank
/// * [`RunnerError::Spawn`] if the OS fails to create the child process
/// * [`RunnerError::Timeout`] if the process does not finish within the wait
///   ceiling; the process tree is killed before the error is returned
pub async fn run_simple_command(
    command: &str,
    options: &RunOptions,
) -> Result<String, RunnerError> {
    run_simple_command_with(command, options, &RunnerConfig::default()).await
}

/// Same as [`run_simple_command`], with explicit timing configuration.
pub async fn run_simple_command_with(
    command: &str,
    options: &RunOptions,
    config: &RunnerConfig,
) -> Result<String, RunnerError> {
    if command.trim().is_empty() {
        return Err(RunnerError::EmptyCommand);
    }

    let command = if options.skip_update {
        format!("{command} {SKIP_UPDATE_FLAG}")
    } else {
        command.to_string()
    };

    let mut shell = ShellProcess::spawn(&command, options.test_trace)?;
    shell.wait_until_finished(config).await?;

    Ok(shell.output())
}
