//! # Session Container
//!
//! Holds the logic units of one bot session with their shared
//! collaborators injected at construction.

pub mod config;
pub mod session;

pub use config::{apply_overrides, load_config, ClientConfig, ConfigError, LoggingConfig, SessionConfig};
pub use session::{ClientSession, SessionError};
