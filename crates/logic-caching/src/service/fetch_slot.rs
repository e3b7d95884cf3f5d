//! Per-scope fetch serialization
//!
//! One `FetchSlot` exists per fetch scope (the friend list, or one group).
//! Holding the slot's async mutex is the only way to run that scope's
//! "check / fetch / merge / mark" sequence, so at most one fetch per scope
//! is in flight. Callers that queued behind a fetch take its outcome
//! instead of issuing their own.

use crate::error::CacheError;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// How a caller got through the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SlotOutcome {
    /// This caller ran the fetch.
    Fetched,
    /// The scope was already resolved once the caller got the slot.
    AlreadyDone,
}

#[derive(Debug, Default)]
pub(crate) struct FetchSlot {
    /// Error of the most recent attempt, guarded by the slot mutex.
    last_error: Mutex<Option<CacheError>>,
    /// Completed attempts, bumped while the mutex is held.
    attempts: AtomicU64,
}

impl FetchSlot {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Run `fetch` unless `is_done` already holds.
    ///
    /// A caller that observed an attempt finishing while it waited gets that
    /// attempt's error back. A caller that arrives after a failed attempt has
    /// finished starts a fresh one.
    pub(crate) async fn run<D, F, Fut>(&self, is_done: D, fetch: F) -> Result<SlotOutcome, CacheError>
    where
        D: Fn() -> bool,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), CacheError>>,
    {
        let observed = self.attempts.load(Ordering::Acquire);
        let mut last_error = self.last_error.lock().await;

        if is_done() {
            return Ok(SlotOutcome::AlreadyDone);
        }

        if self.attempts.load(Ordering::Acquire) != observed {
            if let Some(err) = last_error.as_ref() {
                return Err(err.clone());
            }
        }

        let result = fetch().await;
        *last_error = result.as_ref().err().cloned();
        self.attempts.fetch_add(1, Ordering::AcqRel);

        result.map(|()| SlotOutcome::Fetched)
    }
}
