//! Outbound Ports (Driven Ports)
//!
//! Network operations the caching logic depends on. The concrete
//! implementation lives with the session/transport layer.

use async_trait::async_trait;
use shared_types::{FriendRecord, MemberRecord, ProviderError, Uin};

/// Operation provider (Driven Port)
///
/// Both calls are full-list fetches; the caching logic never asks for a
/// single entry.
#[async_trait]
pub trait OperationProvider: Send + Sync {
    /// Fetch the complete friend list of the bot account.
    async fn fetch_friends(&self) -> Result<Vec<FriendRecord>, ProviderError>;

    /// Fetch the complete member list of a group.
    async fn fetch_members(&self, group_uin: Uin) -> Result<Vec<MemberRecord>, ProviderError>;
}
