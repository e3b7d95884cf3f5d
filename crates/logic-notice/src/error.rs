//! Error types for the notice logic

use logic_caching::CacheError;
use shared_types::Uin;
use thiserror::Error;

/// Errors raised while turning a membership push into a notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoticeError {
    /// The member could not be resolved because a fetch failed.
    #[error("Resolving member of group {group_uin} failed: {source}")]
    Resolve {
        group_uin: Uin,
        #[source]
        source: CacheError,
    },
}
