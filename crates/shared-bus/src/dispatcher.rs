//! # Event Dispatcher
//!
//! Delivers an incoming protocol event to every logic unit subscribed to
//! its kind, in registration order.

use crate::events::{EventKind, ProtocolEvent};
use crate::logic::LogicError;
use crate::registry::SubscriptionRegistry;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, warn};

/// A logic unit failed to process an event.
#[derive(Debug, Error)]
#[error("Logic unit {unit} failed on {kind:?}: {source}")]
pub struct DispatchError {
    /// The failing unit.
    pub unit: &'static str,
    /// Kind of the event being processed.
    pub kind: EventKind,
    /// The unit's error.
    #[source]
    pub source: LogicError,
}

/// Outcome of dispatching one event.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Units that processed the event successfully.
    pub delivered: usize,
    /// Units that returned an error.
    pub failures: Vec<DispatchError>,
}

impl DispatchReport {
    /// Whether every subscribed unit succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total subscribed units that saw the event.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }
}

/// Trait for handing events to logic units.
///
/// This is the interface the transport layer (or the runtime's event pump)
/// uses to deliver decoded pushes.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    /// Dispatch an event to its subscribers.
    ///
    /// Returns after every subscriber finished processing the event.
    async fn dispatch(&self, event: ProtocolEvent) -> DispatchReport;

    /// Get the total number of events dispatched.
    fn events_dispatched(&self) -> u64;
}

/// Dispatcher backed by a frozen `SubscriptionRegistry`.
pub struct Dispatcher {
    registry: SubscriptionRegistry,
    events_dispatched: AtomicU64,
}

impl Dispatcher {
    /// Create a dispatcher over a built registry.
    #[must_use]
    pub fn new(registry: SubscriptionRegistry) -> Self {
        Self {
            registry,
            events_dispatched: AtomicU64::new(0),
        }
    }

    /// Get access to the registry.
    #[must_use]
    pub fn registry(&self) -> &SubscriptionRegistry {
        &self.registry
    }
}

#[async_trait]
impl EventDispatcher for Dispatcher {
    async fn dispatch(&self, event: ProtocolEvent) -> DispatchReport {
        let kind = event.kind();
        let subscribers = self.registry.subscribers(kind);

        self.events_dispatched.fetch_add(1, Ordering::Relaxed);

        if subscribers.is_empty() {
            debug!(kind = ?kind, "Event dropped (no subscribers)");
            return DispatchReport::default();
        }

        let mut report = DispatchReport::default();
        for unit in subscribers {
            match unit.incoming(&event).await {
                Ok(()) => report.delivered += 1,
                Err(source) => {
                    warn!(unit = unit.name(), kind = ?kind, error = %source, "Logic unit failed");
                    report.failures.push(DispatchError {
                        unit: unit.name(),
                        kind,
                        source,
                    });
                }
            }
        }

        debug!(
            kind = ?kind,
            delivered = report.delivered,
            failed = report.failures.len(),
            "Event dispatched"
        );
        report
    }

    fn events_dispatched(&self) -> u64 {
        self.events_dispatched.load(Ordering::Relaxed)
    }
}
