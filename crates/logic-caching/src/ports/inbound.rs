//! Inbound Ports (Driving Ports)
//!
//! The API other logic units use to translate identifiers. The caching
//! logic is the single source of truth for uin <-> uid translation.

use async_trait::async_trait;
use shared_types::{BotGroup, Uid, Uin};
use std::sync::Arc;

use crate::error::CacheError;

/// Identifier resolution API (Driving Port)
#[async_trait]
pub trait UidResolverApi: Send + Sync {
    /// Resolve the uid of `uin`.
    ///
    /// With `group_uin` set, the group's member list is fetched first if it
    /// was never resolved. The friend list is always fetched once before
    /// the first answer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(uid))` - The uin is known
    /// - `Ok(None)` - The uin is unknown in the requested scope
    /// - `Err(_)` - A required fetch failed; nothing was marked resolved
    async fn resolve_uid(&self, group_uin: Option<Uin>, uin: Uin) -> Result<Option<Uid>, CacheError>;

    /// Resolve the uin of `uid`, following the same fetch rules as
    /// `resolve_uid`.
    async fn resolve_uin(&self, group_uin: Option<Uin>, uid: &Uid) -> Result<Option<Uin>, CacheError>;

    /// The last group roster pushed by the server.
    fn cached_groups(&self) -> Arc<[BotGroup]>;

    /// Whether the member list of `group_uin` was already merged.
    fn is_group_resolved(&self, group_uin: Uin) -> bool;
}
