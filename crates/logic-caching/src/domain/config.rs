//! Caching configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use logic_caching::CachingConfig;
//! use std::time::Duration;
//!
//! let config = CachingConfig::default()
//!     .with_fetch_timeout(Duration::from_secs(10))
//!     .with_bootstrap_on_start(true);
//! config.validate()?;
//! ```

use crate::error::CacheError;
use std::time::Duration;

/// Caching logic configuration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CachingConfig {
    /// Fetch the friend list while the session starts instead of on first lookup.
    pub bootstrap_on_start: bool,
    /// Upper bound on a single friend or member fetch. `None` leaves timing
    /// to the operation provider.
    pub fetch_timeout: Option<Duration>,
}

impl CachingConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), CacheError> {
        if self.fetch_timeout == Some(Duration::ZERO) {
            return Err(CacheError::InvalidConfig(
                "fetch_timeout cannot be 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder-style method to set the fetch timeout
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Builder-style method to enable the startup friend bootstrap
    pub fn with_bootstrap_on_start(mut self, enabled: bool) -> Self {
        self.bootstrap_on_start = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CachingConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.bootstrap_on_start);
        assert!(config.fetch_timeout.is_none());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = CachingConfig::default().with_fetch_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(CacheError::InvalidConfig(_))));
    }
}
