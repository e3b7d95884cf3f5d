//! # Client Configuration
//!
//! Unified configuration for the session, the logic units and logging.
//!
//! Defaults are usable for local runs; `load_config` applies environment
//! overrides on top of them.

use logic_caching::{CacheError, CachingConfig};
use logic_notice::DEFAULT_NOTICE_CAPACITY;
use shared_bus::DEFAULT_EVENT_QUEUE_CAPACITY;
use shared_types::Uin;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Complete client configuration.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Session configuration.
    pub session: SessionConfig,
    /// Resolution cache configuration.
    pub caching: CachingConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Validate the configuration before a session is built.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the bot uin is zero
    /// - a channel capacity is zero
    /// - the caching configuration is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.bot_uin == Uin(0) {
            return Err(ConfigError::MissingBotUin);
        }
        if self.session.event_queue_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("event_queue_capacity"));
        }
        if self.session.notice_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("notice_capacity"));
        }
        self.caching.validate()?;
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The bot account uin was not set.
    #[error("Bot uin is not set. Set BOT_UIN environment variable or provide in config.")]
    MissingBotUin,

    #[error("{0} must be greater than zero")]
    ZeroCapacity(&'static str),

    #[error(transparent)]
    Caching(#[from] CacheError),
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Uin of the logged-in bot account.
    pub bot_uin: Uin,
    /// Events buffered between the transport and the dispatcher.
    pub event_queue_capacity: usize,
    /// Notices buffered per notice subscriber.
    pub notice_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            bot_uin: Uin(0), // MUST be set before the session starts
            event_queue_capacity: DEFAULT_EVENT_QUEUE_CAPACITY,
            notice_capacity: DEFAULT_NOTICE_CAPACITY,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, e.g. `info,logic_caching=debug`.
    pub filter: String,
    /// Include the event target in log lines.
    pub with_target: bool,
    /// Include the thread id in log lines.
    pub with_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            with_target: true,
            with_thread_ids: true,
        }
    }
}

/// Build the configuration from defaults and process environment.
pub fn load_config() -> ClientConfig {
    let mut config = ClientConfig::default();
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

/// Apply overrides read through `lookup`.
///
/// Unparsable values are reported and ignored.
pub fn apply_overrides<F>(config: &mut ClientConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(uin) = parse_var::<u32, _>(&lookup, "BOT_UIN") {
        config.session.bot_uin = Uin(uin);
        info!(bot_uin = uin, "Loaded bot uin from environment");
    }

    if let Some(capacity) = parse_var(&lookup, "BOT_EVENT_QUEUE") {
        config.session.event_queue_capacity = capacity;
    }

    if let Some(millis) = parse_var(&lookup, "BOT_FETCH_TIMEOUT_MS") {
        config.caching.fetch_timeout = Some(Duration::from_millis(millis));
    }

    if let Some(enabled) = parse_var(&lookup, "BOT_BOOTSTRAP_ON_START") {
        config.caching.bootstrap_on_start = enabled;
    }

    if let Some(filter) = lookup("RUST_LOG") {
        config.logging.filter = filter;
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparsable environment override");
            None
        }
    }
}
