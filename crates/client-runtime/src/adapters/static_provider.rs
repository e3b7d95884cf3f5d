//! # Static Operation Provider
//!
//! Answers friend and member fetches from a fixed data set. Used by the
//! demo binary and the integration suite in place of a live session.

use async_trait::async_trait;
use logic_caching::OperationProvider;
use serde::{Deserialize, Serialize};
use shared_types::{FriendRecord, MemberRecord, ProviderError, Uin};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Serialized form of a static provider's data set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFixture {
    #[serde(default)]
    pub friends: Vec<FriendRecord>,
    #[serde(default)]
    pub groups: Vec<GroupFixture>,
}

/// Member list of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFixture {
    pub group_uin: Uin,
    pub members: Vec<MemberRecord>,
}

/// In-memory `OperationProvider`.
#[derive(Debug, Default)]
pub struct StaticProvider {
    friends: Vec<FriendRecord>,
    members: HashMap<Uin, Vec<MemberRecord>>,
    fetches: AtomicU64,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a provider from a JSON `ProviderFixture`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let fixture: ProviderFixture = serde_json::from_str(json)?;
        Ok(Self::from(fixture))
    }

    pub fn with_friend(mut self, friend: FriendRecord) -> Self {
        self.friends.push(friend);
        self
    }

    pub fn with_group(mut self, group_uin: impl Into<Uin>, members: Vec<MemberRecord>) -> Self {
        self.members.insert(group_uin.into(), members);
        self
    }

    /// Number of fetches answered so far.
    pub fn fetches(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }
}

impl From<ProviderFixture> for StaticProvider {
    fn from(fixture: ProviderFixture) -> Self {
        Self {
            friends: fixture.friends,
            members: fixture
                .groups
                .into_iter()
                .map(|group| (group.group_uin, group.members))
                .collect(),
            fetches: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl OperationProvider for StaticProvider {
    async fn fetch_friends(&self) -> Result<Vec<FriendRecord>, ProviderError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        debug!(count = self.friends.len(), "Serving static friend list");
        Ok(self.friends.clone())
    }

    async fn fetch_members(&self, group_uin: Uin) -> Result<Vec<MemberRecord>, ProviderError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        self.members
            .get(&group_uin)
            .cloned()
            .ok_or(ProviderError::GroupNotFound(group_uin))
    }
}
