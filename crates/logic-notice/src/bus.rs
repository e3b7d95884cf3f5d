//! # Notice Bus
//!
//! Broadcasts `GroupNotice`s to every attached consumer.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

use crate::notice::GroupNotice;

/// Notices buffered per subscriber before the slowest one starts lagging.
pub const DEFAULT_NOTICE_CAPACITY: usize = 256;

/// In-memory notice fan-out.
///
/// Uses `tokio::sync::broadcast`; a notice published while nobody is
/// subscribed is dropped.
#[derive(Debug)]
pub struct NoticeBus {
    sender: broadcast::Sender<GroupNotice>,
    notices_published: AtomicU64,
    capacity: usize,
}

impl NoticeBus {
    /// Create a bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_NOTICE_CAPACITY)
    }

    /// Create a bus with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            notices_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Attach a new consumer. It sees notices published from now on.
    #[must_use]
    pub fn subscribe(&self) -> NoticeSubscription {
        debug!(subscribers = self.sender.receiver_count() + 1, "Notice subscription created");
        NoticeSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Publish a notice, returning the number of consumers that got it.
    pub fn publish(&self, notice: GroupNotice) -> usize {
        self.notices_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(notice) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(notice)) => {
                debug!(group_uin = %notice.group_uin, "Notice dropped (no subscribers)");
                0
            }
        }
    }

    /// Total notices published, delivered or not.
    pub fn notices_published(&self) -> u64 {
        self.notices_published.load(Ordering::Relaxed)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of the notice bus.
pub struct NoticeSubscription {
    receiver: broadcast::Receiver<GroupNotice>,
}

impl NoticeSubscription {
    /// Receive the next notice.
    ///
    /// Returns `None` once the bus is dropped. Notices lost to lag are
    /// skipped.
    pub async fn recv(&mut self) -> Option<GroupNotice> {
        loop {
            match self.receiver.recv().await {
                Ok(notice) => return Some(notice),
                Err(broadcast::error::RecvError::Closed) => return None,
                Err(broadcast::error::RecvError::Lagged(count)) => {
                    debug!(lagged = count, "Notice subscriber lagged, some notices dropped");
                }
            }
        }
    }

    /// Take a notice if one is ready, without waiting.
    pub fn try_recv(&mut self) -> Option<GroupNotice> {
        loop {
            match self.receiver.try_recv() {
                Ok(notice) => return Some(notice),
                Err(broadcast::error::TryRecvError::Lagged(count)) => {
                    debug!(lagged = count, "Notice subscriber lagged, some notices dropped");
                }
                Err(_) => return None,
            }
        }
    }
}
