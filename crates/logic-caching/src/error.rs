//! Error types for the caching logic

use shared_types::{ProviderError, Uin};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// The scope a fetch was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchScope {
    /// The global friend list.
    Friends,
    /// The member list of one group.
    Group(Uin),
}

impl fmt::Display for FetchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Friends => write!(f, "friends"),
            Self::Group(uin) => write!(f, "group {uin}"),
        }
    }
}

/// Errors that can occur while resolving identifiers.
///
/// A lookup miss is not an error; it is reported as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("Fetching {scope} failed: {source}")]
    Fetch {
        scope: FetchScope,
        #[source]
        source: ProviderError,
    },

    #[error("Fetching {scope} timed out after {after:?}")]
    FetchTimeout { scope: FetchScope, after: Duration },

    /// The friend list contained a uin twice, or a uin that was already known.
    #[error("Friend list returned duplicate uin {uin}")]
    DuplicateFriendUin { uin: Uin },

    #[error("Invalid caching configuration: {0}")]
    InvalidConfig(String),
}

impl CacheError {
    /// The fetch scope this error belongs to, if it came from a fetch.
    #[must_use]
    pub fn scope(&self) -> Option<FetchScope> {
        match self {
            Self::Fetch { scope, .. } | Self::FetchTimeout { scope, .. } => Some(*scope),
            Self::DuplicateFriendUin { .. } => Some(FetchScope::Friends),
            Self::InvalidConfig(_) => None,
        }
    }
}
