//! Shell process record: spawn, stream collection, bounded wait, tree kill.
//!
//! One [`ShellProcess`] exists per invocation. Its two reader tasks are the
//! only writers to its output buffer, and the record never outlives the call
//! that created it.

use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, warn};

use super::ansi::strip_ansi;
use super::config::RunnerConfig;
use super::error::RunnerError;

/// Environment variable set on the child to make the invoked tool emit test
/// trace output.
pub const TEST_TRACE_ENV: &str = "SLACK_TEST_TRACE";

/// Read buffer size for each output stream.
const STREAM_READ_BUFFER: usize = 8192;

/// Tracks one spawned shell command: its process handle, the merged output
/// buffer, and whether the process has finished.
#[derive(Debug)]
pub struct ShellProcess {
    child: tokio::process::Child,
    /// Merged stdout+stderr, ANSI-stripped, appended in arrival order.
    output: Arc<Mutex<String>>,
    /// Set exactly once, when the process has exited and both readers drained.
    finished: bool,
    /// The exact command string handed to the shell.
    command: String,
    /// Process id captured at spawn; the child is its own process group
    /// leader on Unix, so this doubles as the group id for tree kills.
    pid: Option<u32>,
    readers: Vec<JoinHandle<()>>,
}

fn default_shell() -> String {
    // Prefer the user's configured shell, but keep a safe fallback.
    std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
}

/// Read a stream to EOF, stripping ANSI escapes from each chunk before
/// appending it to the shared buffer.
fn collect_stream<R>(mut stream: R, output: Arc<Mutex<String>>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = [0u8; STREAM_READ_BUFFER];
        loop {
            match stream.read(&mut buf).await {
                // EOF: the write end closed with the process
                Ok(0) => break,
                Ok(n) => {
                    let chunk = String::from_utf8_lossy(&buf[..n]);
                    let cleaned = strip_ansi(&chunk);
                    if let Ok(mut out) = output.lock() {
                        out.push_str(&cleaned);
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!(error = %e, "stream read error, stopping collection");
                    break;
                }
            }
        }
    })
}

impl ShellProcess {
    /// Spawn `command` through the user's shell and start collecting output.
    ///
    /// The child gets its own process group on Unix so the whole tree can be
    /// killed on timeout. When `test_trace` is set, [`TEST_TRACE_ENV`] is set
    /// on the child's environment only, never on this process.
    pub fn spawn(command: &str, test_trace: bool) -> Result<Self, RunnerError> {
        Self::spawn_with_shell(&default_shell(), command, test_trace)
    }

    pub(crate) fn spawn_with_shell(
        shell: &str,
        command: &str,
        test_trace: bool,
    ) -> Result<Self, RunnerError> {
        let mut cmd = Command::new(shell);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if test_trace {
            cmd.env(TEST_TRACE_ENV, "true");
        }

        // New process group so a timeout kill reaps shell-spawned descendants
        #[cfg(unix)]
        {
            cmd.process_group(0);
        }

        let mut child = cmd.spawn().map_err(|source| RunnerError::Spawn {
            command: command.to_string(),
            source,
        })?;

        let pid = child.id();
        debug!(command, pid, "spawned shell command");

        let output = Arc::new(Mutex::new(String::new()));
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(collect_stream(stdout, Arc::clone(&output)));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(collect_stream(stderr, Arc::clone(&output)));
        }

        Ok(Self {
            child,
            output,
            finished: false,
            command: command.to_string(),
            pid,
            readers,
        })
    }

    /// Wait until the process exits, checking at `config.poll_interval`
    /// granularity against `config.wait_ceiling`.
    ///
    /// Completion is observed immediately via the exit future; only the
    /// timeout is observed at interval boundaries, so a timeout surfaces
    /// after at least the ceiling and at most the ceiling plus one interval.
    ///
    /// # Errors
    /// [`RunnerError::Timeout`] with the partial output once the accumulated
    /// wait exceeds the ceiling; the process tree is killed first.
    pub async fn wait_until_finished(&mut self, config: &RunnerConfig) -> Result<(), RunnerError> {
        let mut waited = Duration::ZERO;

        loop {
            match time::timeout(config.poll_interval, self.child.wait()).await {
                Ok(Ok(status)) => {
                    // Join the readers so the buffer holds everything the
                    // process wrote before exiting.
                    self.drain_readers().await;
                    self.finished = true;
                    debug!(command = %self.command, ?status, "shell command finished");
                    return Ok(());
                }
                Ok(Err(e)) => {
                    return Err(RunnerError::Spawn {
                        command: self.command.clone(),
                        source: e,
                    });
                }
                Err(_elapsed) => {
                    waited += config.poll_interval;
                    if waited > config.wait_ceiling {
                        warn!(
                            command = %self.command,
                            waited_ms = waited.as_millis() as u64,
                            "wait ceiling exceeded, killing process tree"
                        );
                        self.terminate_tree().await;
                        return Err(RunnerError::Timeout {
                            command: self.command.clone(),
                            waited,
                            output: self.output(),
                        });
                    }
                }
            }
        }
    }

    /// Kill the process and all of its descendants.
    ///
    /// On Unix this signals the child's process group (the child is its own
    /// group leader), so shell-spawned grandchildren die too.
    pub async fn terminate_tree(&mut self) {
        #[cfg(unix)]
        if let Some(pid) = self.pid.and_then(|p| i32::try_from(p).ok()) {
            let pgid = nix::unistd::Pid::from_raw(pid);
            if let Err(e) = nix::sys::signal::killpg(pgid, nix::sys::signal::Signal::SIGKILL) {
                debug!(%pgid, error = %e, "killpg failed, process may have already exited");
            }
        }

        // Reap the direct child; covers non-Unix targets as well
        if let Err(e) = self.child.kill().await {
            debug!(error = %e, "kill after timeout failed");
        }

        for handle in self.readers.drain(..) {
            handle.abort();
        }
    }

    async fn drain_readers(&mut self) {
        for handle in self.readers.drain(..) {
            if let Err(e) = handle.await {
                debug!(error = %e, "output reader task failed");
            }
        }
    }

    /// Snapshot of the merged output collected so far.
    pub fn output(&self) -> String {
        self.output
            .lock()
            .map(|out| out.clone())
            .unwrap_or_default()
    }

    /// The exact command string that was executed, after flag augmentation.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether the process has exited and its output is fully collected.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// OS process id of the spawned shell, if it started.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }
}
