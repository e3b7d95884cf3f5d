//! Shared fixtures for the integration flows.

use async_trait::async_trait;
use client_runtime::{ClientConfig, ClientSession, StaticProvider};
use logic_caching::OperationProvider;
use parking_lot::Mutex;
use shared_types::{FriendRecord, MemberRecord, ProviderError, Uin};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Uin of the bot account in every fixture.
pub const BOT_UIN: Uin = Uin(10001);

/// Provider wrapping a `StaticProvider` with call counting, latency and
/// injected group failures.
pub struct ScriptedProvider {
    inner: StaticProvider,
    latency: Duration,
    pending_failures: Mutex<HashMap<Uin, usize>>,
    friend_calls: AtomicUsize,
    member_calls: Mutex<HashMap<Uin, usize>>,
}

impl ScriptedProvider {
    pub fn new(inner: StaticProvider) -> Self {
        Self {
            inner,
            latency: Duration::ZERO,
            pending_failures: Mutex::new(HashMap::new()),
            friend_calls: AtomicUsize::new(0),
            member_calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make the next `times` member fetches of `group_uin` fail.
    pub fn fail_group(&self, group_uin: Uin, times: usize) {
        self.pending_failures.lock().insert(group_uin, times);
    }

    pub fn friend_calls(&self) -> usize {
        self.friend_calls.load(Ordering::SeqCst)
    }

    pub fn member_calls(&self, group_uin: Uin) -> usize {
        self.member_calls.lock().get(&group_uin).copied().unwrap_or(0)
    }

    fn take_failure(&self, group_uin: Uin) -> bool {
        let mut pending = self.pending_failures.lock();
        match pending.get_mut(&group_uin) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }
}

#[async_trait]
impl OperationProvider for ScriptedProvider {
    async fn fetch_friends(&self) -> Result<Vec<FriendRecord>, ProviderError> {
        self.friend_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_friends().await
    }

    async fn fetch_members(&self, group_uin: Uin) -> Result<Vec<MemberRecord>, ProviderError> {
        *self.member_calls.lock().entry(group_uin).or_default() += 1;
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.take_failure(group_uin) {
            return Err(ProviderError::Transport("connection reset".to_string()));
        }
        self.inner.fetch_members(group_uin).await
    }
}

/// Friends `[(100, "u100")]`, group 1 `[(100, "u100"), (200, "u200")]`,
/// group 2 `[(300, "u300")]`.
pub fn standard_provider() -> StaticProvider {
    StaticProvider::new()
        .with_friend(FriendRecord::new(100, "u100"))
        .with_group(
            1,
            vec![MemberRecord::new(100, "u100"), MemberRecord::new(200, "u200")],
        )
        .with_group(2, vec![MemberRecord::new(300, "u300")])
}

pub fn test_config() -> ClientConfig {
    let mut config = ClientConfig::default();
    config.session.bot_uin = BOT_UIN;
    config
}

/// Build and start a session over `provider`.
pub async fn started_session(provider: Arc<ScriptedProvider>) -> ClientSession {
    let session = ClientSession::new(test_config(), provider).unwrap();
    session.start().await.unwrap();
    session
}

/// Yield until `condition` holds, failing after one second.
pub async fn wait_until<F: Fn() -> bool>(condition: F) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .unwrap();
}
