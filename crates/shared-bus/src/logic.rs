//! # Logic Unit Trait
//!
//! Defines the contract every business-logic component implements to
//! receive protocol events from the dispatcher.
//!
//! ## Example Implementation
//!
//! ```rust,ignore
//! use shared_bus::{EventKind, LogicResult, LogicUnit, ProtocolEvent};
//! use async_trait::async_trait;
//!
//! pub struct RosterLogger;
//!
//! #[async_trait]
//! impl LogicUnit for RosterLogger {
//!     fn name(&self) -> &'static str { "RosterLogger" }
//!     fn subscriptions(&self) -> &'static [EventKind] { &[EventKind::GroupListPushed] }
//!     async fn incoming(&self, event: &ProtocolEvent) -> LogicResult { Ok(()) }
//! }
//! ```

use crate::events::{EventKind, ProtocolEvent};
use async_trait::async_trait;
use std::sync::Arc;

/// Boxed error returned by a logic unit that failed to process an event.
pub type LogicError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of handling a single event.
pub type LogicResult = Result<(), LogicError>;

/// Descriptive metadata about a logic unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicInfo {
    /// Unique unit name, used as a log tag.
    pub name: &'static str,
    /// Brief description.
    pub description: &'static str,
    /// Event kinds the unit receives.
    pub subscribes: Vec<EventKind>,
}

/// The contract ALL logic units implement.
///
/// A unit is registered once per session. The dispatcher only calls
/// `incoming` with events whose kind appears in `subscriptions()`.
#[async_trait]
pub trait LogicUnit: Send + Sync {
    /// Unique name of the unit.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str {
        ""
    }

    /// Event kinds this unit wants to receive.
    ///
    /// Read once at registration time; changing the answer afterwards has
    /// no effect.
    fn subscriptions(&self) -> &'static [EventKind];

    /// Process one incoming event.
    ///
    /// Returns when processing of this event is complete. Event variants the
    /// unit does not handle must return `Ok(())`.
    async fn incoming(&self, event: &ProtocolEvent) -> LogicResult;

    /// Get detailed information about this unit.
    fn info(&self) -> LogicInfo {
        LogicInfo {
            name: self.name(),
            description: self.description(),
            subscribes: self.subscriptions().to_vec(),
        }
    }
}

/// A shared, type-erased logic unit handle.
pub type DynLogicUnit = Arc<dyn LogicUnit>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Quiet;

    #[async_trait]
    impl LogicUnit for Quiet {
        fn name(&self) -> &'static str {
            "Quiet"
        }

        fn subscriptions(&self) -> &'static [EventKind] {
            &[EventKind::GroupMemberIncreased, EventKind::GroupMemberDecreased]
        }

        async fn incoming(&self, _event: &ProtocolEvent) -> LogicResult {
            Ok(())
        }
    }

    #[test]
    fn test_logic_info_defaults() {
        let info = Quiet.info();
        assert_eq!(info.name, "Quiet");
        assert_eq!(info.description, "");
        assert_eq!(info.subscribes.len(), 2);
    }
}
