//! Timing configuration for the bounded wait.

use std::time::Duration;

/// External timing knobs for [`super::run_simple_command_with`].
///
/// Both values are supplied by the caller and never mutated after creation.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Interval between completion checks while the child is running.
    pub poll_interval: Duration,
    /// Maximum total wait before the child is declared timed out and killed.
    pub wait_ceiling: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            wait_ceiling: Duration::from_millis(30_000),
        }
    }
}

impl RunnerConfig {
    /// Override the completion check interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the wait ceiling.
    pub fn with_wait_ceiling(mut self, ceiling: Duration) -> Self {
        self.wait_ceiling = ceiling;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let cfg = RunnerConfig::default();
        assert_eq!(cfg.poll_interval, Duration::from_millis(1000));
        assert_eq!(cfg.wait_ceiling, Duration::from_millis(30_000));
    }

    #[test]
    fn test_builder_overrides() {
        let cfg = RunnerConfig::default()
            .with_poll_interval(Duration::from_millis(100))
            .with_wait_ceiling(Duration::from_millis(300));
        assert_eq!(cfg.poll_interval, Duration::from_millis(100));
        assert_eq!(cfg.wait_ceiling, Duration::from_millis(300));
    }
}
