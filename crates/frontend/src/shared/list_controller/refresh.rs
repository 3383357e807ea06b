use std::time::Duration;

/// How often a list reloads itself while its page is mounted.
///
/// The loop is owned by the controller and stops on `dispose()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    interval: Option<Duration>,
}

impl RefreshPolicy {
    /// Five minutes, the interval the admin pages have always polled at
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);

    /// A zero interval disables the loop
    pub fn every(interval: Duration) -> Self {
        Self {
            interval: Some(interval).filter(|d| !d.is_zero()),
        }
    }

    pub fn disabled() -> Self {
        Self { interval: None }
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.interval.is_some()
    }
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self::every(Self::DEFAULT_INTERVAL)
    }
}
