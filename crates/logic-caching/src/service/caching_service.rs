//! Caching Service
//!
//! Lazily populates the uin <-> uid table from the friend list and from
//! group member lists, and keeps the last pushed group roster.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared_types::{BotGroup, FriendRecord, MemberRecord, ProviderError, Uid, Uin};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{CachingConfig, UidTable};
use crate::error::{CacheError, FetchScope};
use crate::metrics::{CacheMetrics, CacheStatsSnapshot};
use crate::ports::{OperationProvider, UidResolverApi};
use crate::service::fetch_slot::{FetchSlot, SlotOutcome};

/// Caching Service implementation
///
/// Implements the `UidResolverApi` port using the injected operation
/// provider. One instance lives for the duration of a client session.
pub struct CachingService {
    /// Operation provider (driven port)
    provider: Arc<dyn OperationProvider>,
    config: CachingConfig,
    /// uin <-> uid, shared by the friend and every group scope
    table: RwLock<UidTable>,
    /// Set once the friend list has been merged
    friends_ready: AtomicBool,
    friend_slot: FetchSlot,
    friends: RwLock<Arc<[FriendRecord]>>,
    /// Resolved groups with the member list their fetch returned
    members: RwLock<HashMap<Uin, Arc<[MemberRecord]>>>,
    /// Slots of groups that are not resolved yet
    group_slots: Mutex<HashMap<Uin, Arc<FetchSlot>>>,
    /// Last pushed group roster
    groups: RwLock<Arc<[BotGroup]>>,
    metrics: CacheMetrics,
}

impl CachingService {
    /// Create a new service with the given operation provider
    pub fn new(provider: Arc<dyn OperationProvider>, config: CachingConfig) -> Self {
        Self {
            provider,
            config,
            table: RwLock::new(UidTable::new()),
            friends_ready: AtomicBool::new(false),
            friend_slot: FetchSlot::new(),
            friends: RwLock::new(Arc::from(Vec::new())),
            members: RwLock::new(HashMap::new()),
            group_slots: Mutex::new(HashMap::new()),
            groups: RwLock::new(Arc::from(Vec::new())),
            metrics: CacheMetrics::new(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &CachingConfig {
        &self.config
    }

    /// Fetch and merge the friend list unless that already succeeded.
    ///
    /// Every friend uin must be new; a duplicate aborts the whole bootstrap
    /// and leaves the table untouched.
    pub async fn bootstrap_friends(&self) -> Result<(), CacheError> {
        if self.is_friend_bootstrapped() {
            return Ok(());
        }

        let outcome = self
            .friend_slot
            .run(
                || self.is_friend_bootstrapped(),
                || async {
                    self.metrics.record_fetch(true);
                    let friends = self
                        .fetch_limited(FetchScope::Friends, self.provider.fetch_friends())
                        .await?;

                    let count = self
                        .table
                        .write()
                        .insert_unique(friends.iter().map(|f| (f.uin, &f.uid)))
                        .map_err(|e| {
                            warn!(error = %e, "Friend bootstrap aborted");
                            e
                        })?;

                    *self.friends.write() = Arc::from(friends);
                    self.friends_ready.store(true, Ordering::Release);
                    info!(count, "Friend uids cached");
                    Ok::<(), CacheError>(())
                },
            )
            .await?;

        if outcome == SlotOutcome::AlreadyDone {
            self.metrics.record_coalesced();
        }
        Ok(())
    }

    /// Fetch and merge the member list of `group_uin` unless it is resolved.
    ///
    /// Members whose uin is already known keep their existing uid.
    async fn resolve_group(&self, group_uin: Uin) -> Result<(), CacheError> {
        if self.is_group_resolved(group_uin) {
            return Ok(());
        }

        let slot = self.group_slot(group_uin);
        let outcome = slot
            .run(
                || self.is_group_resolved(group_uin),
                || async {
                    debug!(group_uin = %group_uin, "Caching group members");
                    self.metrics.record_fetch(false);
                    let members = self
                        .fetch_limited(
                            FetchScope::Group(group_uin),
                            self.provider.fetch_members(group_uin),
                        )
                        .await?;

                    let inserted = self
                        .table
                        .write()
                        .insert_missing(members.iter().map(|m| (m.uin, &m.uid)));
                    let count = members.len();

                    self.members.write().insert(group_uin, Arc::from(members));
                    debug!(group_uin = %group_uin, members = count, new_uids = inserted, "Group members cached");
                    Ok::<(), CacheError>(())
                },
            )
            .await?;

        match outcome {
            SlotOutcome::Fetched => {
                // Resolved groups never fetch again; the slot is no longer needed.
                let mut slots = self.group_slots.lock();
                if slots.get(&group_uin).is_some_and(|s| Arc::ptr_eq(s, &slot)) {
                    slots.remove(&group_uin);
                }
            }
            SlotOutcome::AlreadyDone => self.metrics.record_coalesced(),
        }
        Ok(())
    }

    fn group_slot(&self, group_uin: Uin) -> Arc<FetchSlot> {
        self.group_slots
            .lock()
            .entry(group_uin)
            .or_insert_with(|| Arc::new(FetchSlot::new()))
            .clone()
    }

    /// Await a provider call, applying the configured time limit.
    async fn fetch_limited<T, F>(&self, scope: FetchScope, fetch: F) -> Result<T, CacheError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        let result = match self.config.fetch_timeout {
            Some(limit) => match tokio::time::timeout(limit, fetch).await {
                Ok(result) => result.map_err(|source| CacheError::Fetch { scope, source }),
                Err(_) => Err(CacheError::FetchTimeout { scope, after: limit }),
            },
            None => fetch.await.map_err(|source| CacheError::Fetch { scope, source }),
        };

        if let Err(e) = &result {
            self.metrics.record_fetch_failure();
            warn!(scope = %scope, error = %e, "Fetch failed");
        }
        result
    }

    /// Replace the group roster snapshot.
    pub fn apply_roster(&self, groups: &[BotGroup]) {
        *self.groups.write() = Arc::from(groups);
        self.metrics.record_roster_push();
        debug!(count = groups.len(), "Caching group entities");
    }

    /// Whether the friend list has been merged.
    pub fn is_friend_bootstrapped(&self) -> bool {
        self.friends_ready.load(Ordering::Acquire)
    }

    /// The friend list merged by the bootstrap (empty before it ran).
    pub fn cached_friends(&self) -> Arc<[FriendRecord]> {
        self.friends.read().clone()
    }

    /// The member list of a resolved group.
    pub fn cached_members(&self, group_uin: Uin) -> Option<Arc<[MemberRecord]>> {
        self.members.read().get(&group_uin).cloned()
    }

    /// Number of uins with a known uid.
    pub fn known_uins(&self) -> usize {
        self.table.read().len()
    }

    /// Counters since the session started.
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.metrics.snapshot()
    }

    async fn prepare_scope(&self, group_uin: Option<Uin>) -> Result<(), CacheError> {
        self.bootstrap_friends().await?;
        if let Some(group_uin) = group_uin {
            self.resolve_group(group_uin).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UidResolverApi for CachingService {
    async fn resolve_uid(&self, group_uin: Option<Uin>, uin: Uin) -> Result<Option<Uid>, CacheError> {
        self.prepare_scope(group_uin).await?;

        let uid = self.table.read().uid(uin).cloned();
        self.metrics.record_lookup(uid.is_some());
        Ok(uid)
    }

    async fn resolve_uin(&self, group_uin: Option<Uin>, uid: &Uid) -> Result<Option<Uin>, CacheError> {
        self.prepare_scope(group_uin).await?;

        let uin = self.table.read().uin(uid);
        self.metrics.record_lookup(uin.is_some());
        Ok(uin)
    }

    fn cached_groups(&self) -> Arc<[BotGroup]> {
        self.groups.read().clone()
    }

    fn is_group_resolved(&self, group_uin: Uin) -> bool {
        self.members.read().contains_key(&group_uin)
    }
}
