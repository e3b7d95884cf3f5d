//! # Event Pump
//!
//! Moves protocol events from the transport into the dispatcher.
//!
//! ```text
//! transport ──EventSink::push──► mpsc (bounded) ──► EventPump ──► Dispatcher
//!                                                       ▲
//!                                        shutdown (watch)┘
//! ```
//!
//! Events are dispatched one at a time in arrival order. The pump stops
//! when every `EventSink` is dropped or when shutdown is signalled.

use serde::Serialize;
use shared_bus::{EventDispatcher, ProtocolEvent};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

/// Errors when handing an event to the pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PumpError {
    /// The pump stopped; the event was not queued.
    #[error("Event pump closed")]
    Closed,

    /// The queue is full (only from `try_push`).
    #[error("Event queue full")]
    Full,
}

/// Transport-side handle feeding the pump.
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: mpsc::Sender<ProtocolEvent>,
}

impl EventSink {
    /// Queue an event, waiting for space if the queue is full.
    pub async fn push(&self, event: ProtocolEvent) -> Result<(), PumpError> {
        self.sender.send(event).await.map_err(|_| PumpError::Closed)
    }

    /// Queue an event without waiting.
    pub fn try_push(&self, event: ProtocolEvent) -> Result<(), PumpError> {
        self.sender.try_send(event).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => PumpError::Full,
            mpsc::error::TrySendError::Closed(_) => PumpError::Closed,
        })
    }

    /// Whether the pump has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Totals reported when the pump stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PumpStats {
    /// Events dispatched.
    pub events: u64,
    /// Events for which at least one logic unit failed.
    pub failed_events: u64,
}

/// Consumer side of the event queue.
pub struct EventPump {
    events: ReceiverStream<ProtocolEvent>,
    dispatcher: Arc<dyn EventDispatcher>,
    shutdown: watch::Receiver<bool>,
}

impl EventPump {
    /// Create a bounded queue and the pump draining it.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn channel(
        capacity: usize,
        dispatcher: Arc<dyn EventDispatcher>,
        shutdown: watch::Receiver<bool>,
    ) -> (EventSink, EventPump) {
        let (sender, receiver) = mpsc::channel(capacity);
        let pump = Self {
            events: ReceiverStream::new(receiver),
            dispatcher,
            shutdown,
        };
        (EventSink { sender }, pump)
    }

    /// Dispatch events until the queue closes or shutdown is signalled.
    pub async fn run(mut self) -> PumpStats {
        let mut stats = PumpStats::default();
        info!("Event pump started");

        loop {
            if *self.shutdown.borrow() {
                break;
            }

            tokio::select! {
                biased;
                changed = self.shutdown.changed() => {
                    if changed.is_err() {
                        debug!("Shutdown sender dropped");
                        break;
                    }
                }
                next = self.events.next() => {
                    let Some(event) = next else {
                        debug!("All event sinks dropped");
                        break;
                    };

                    let kind = event.kind();
                    let report = self.dispatcher.dispatch(event).await;
                    stats.events += 1;
                    if !report.is_success() {
                        stats.failed_events += 1;
                        warn!(kind = ?kind, failures = report.failures.len(), "Event handled with failures");
                    }
                }
            }
        }

        info!(events = stats.events, failed = stats.failed_events, "Event pump stopped");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use shared_bus::{DispatchError, DispatchReport, EventKind};
    use shared_types::{BotGroup, Uid, Uin};
    use std::time::Duration;

    /// Dispatcher recording every event; member events fail
    #[derive(Default)]
    struct RecordingDispatcher {
        seen: Mutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl EventDispatcher for RecordingDispatcher {
        async fn dispatch(&self, event: ProtocolEvent) -> DispatchReport {
            let kind = event.kind();
            self.seen.lock().push(kind);

            let mut report = DispatchReport::default();
            if kind == EventKind::GroupListPushed {
                report.delivered = 1;
            } else {
                report.failures.push(DispatchError {
                    unit: "Recorder",
                    kind,
                    source: "member events unsupported".into(),
                });
            }
            report
        }

        fn events_dispatched(&self) -> u64 {
            self.seen.lock().len() as u64
        }
    }

    fn roster(uin: u32) -> ProtocolEvent {
        ProtocolEvent::GroupListPushed {
            groups: vec![BotGroup::new(uin, "group")],
        }
    }

    fn joined() -> ProtocolEvent {
        ProtocolEvent::GroupMemberIncreased {
            group_uin: Uin(1),
            member_uid: Uid::new("u1"),
            operator_uid: None,
        }
    }

    #[tokio::test]
    async fn test_drains_queue_in_order_until_sinks_drop() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let (sink, pump) = EventPump::channel(8, dispatcher.clone(), shutdown_rx);

        sink.push(roster(1)).await.unwrap();
        sink.push(joined()).await.unwrap();
        sink.push(roster(2)).await.unwrap();
        drop(sink);

        let stats = pump.run().await;

        assert_eq!(stats, PumpStats { events: 3, failed_events: 1 });
        assert_eq!(
            *dispatcher.seen.lock(),
            vec![
                EventKind::GroupListPushed,
                EventKind::GroupMemberIncreased,
                EventKind::GroupListPushed,
            ]
        );
    }

    #[tokio::test]
    async fn test_shutdown_stops_idle_pump() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (sink, pump) = EventPump::channel(8, dispatcher, shutdown_rx);

        let handle = tokio::spawn(pump.run());
        shutdown_tx.send(true).unwrap();

        let stats = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.events, 0);
        assert!(sink.is_closed());
        assert_eq!(sink.push(roster(1)).await, Err(PumpError::Closed));
    }

    #[tokio::test]
    async fn test_try_push_reports_full_queue() {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let (sink, _pump) = EventPump::channel(1, dispatcher, shutdown_rx);

        assert_eq!(sink.try_push(roster(1)), Ok(()));
        assert_eq!(sink.try_push(roster(2)), Err(PumpError::Full));
    }
}
