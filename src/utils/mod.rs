//! Utility modules for common functionality.
//!
//! Currently just logging setup for binaries and test harnesses that embed
//! the library.

pub mod logger;
