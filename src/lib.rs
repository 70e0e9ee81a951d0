//! shell-runner - run a CLI command through a shell and capture its output
//!
//! This library provides a small helper for driving command-line tools from
//! end-to-end tests:
//! - Spawns a command through a shell, so callers may pass shell syntax
//!   (pipes, redirects, `&&` chains)
//! - Collects stdout and stderr into a single merged buffer, stripping ANSI
//!   color/style escape sequences from every chunk
//! - Waits for the process with a bounded ceiling; on timeout the whole
//!   process tree is killed and the partial output is reported in the error
//!
//! # Example
//!
//! ```no_run
//! use shell_runner::{run_simple_command, RunOptions};
//!
//! #[tokio::main]
//! async fn main() {
//!     let opts = RunOptions {
//!         skip_update: false,
//!         ..RunOptions::default()
//!     };
//!
//!     let output = run_simple_command("git --version", &opts)
//!         .await
//!         .unwrap();
//!
//!     println!("{output}");
//! }
//! ```

pub mod runner;
pub mod utils;

// Re-export commonly used types
pub use runner::{
    RunOptions, RunnerConfig, RunnerError, run_simple_command, run_simple_command_with,
};
