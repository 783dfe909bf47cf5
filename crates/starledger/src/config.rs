//! Registry configuration.

use std::time::Duration;

use crate::error::{LedgerError, Result};

/// How long a challenge stays valid after it is issued.
pub const DEFAULT_OWNERSHIP_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Configuration for the [`StarRegistry`](crate::StarRegistry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Maximum age of a challenge at submission time.
    pub ownership_window: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            ownership_window: DEFAULT_OWNERSHIP_WINDOW,
        }
    }
}

impl RegistryConfig {
    /// Set the ownership window.
    pub fn with_ownership_window(mut self, window: Duration) -> Self {
        self.ownership_window = window;
        self
    }

    /// The ownership window in milliseconds, saturating at `i64::MAX`.
    pub fn window_millis(&self) -> i64 {
        i64::try_from(self.ownership_window.as_millis()).unwrap_or(i64::MAX)
    }

    /// Reject configurations the registry cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.window_millis() == 0 {
            return Err(LedgerError::InvalidConfig(
                "ownership window must be at least 1ms".into(),
            ));
        }
        Ok(())
    }
}
