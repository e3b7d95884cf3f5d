//! # Error Types
//!
//! Defines error types used across logic units.

use crate::entities::Uin;
use thiserror::Error;

/// Errors returned by the operation provider when a fetch fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The session is not online.
    #[error("Session offline")]
    Offline,

    /// The server did not answer in time.
    #[error("Request timed out")]
    Timeout,

    /// The server rejected the request.
    #[error("Server returned error code {code}: {message}")]
    Rejected { code: i32, message: String },

    /// The requested group is unknown to the server.
    #[error("Group not found: {0}")]
    GroupNotFound(Uin),

    /// Transport-level failure.
    #[error("Transport error: {0}")]
    Transport(String),
}
