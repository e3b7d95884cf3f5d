//! # Shared Bus - Event Dispatch for Logic Units
//!
//! Routes protocol events pushed by the server to the logic units that
//! declared interest in them.
//!
//! ## Dispatch Pattern
//!
//! ```text
//! ┌──────────────┐   dispatch()   ┌──────────────┐   incoming()   ┌──────────────┐
//! │  Transport   │ ─────────────→ │  Dispatcher  │ ─────────────→ │ Logic Unit A │
//! │ (decoded     │                │              │                └──────────────┘
//! │   pushes)    │                │  registry:   │   incoming()   ┌──────────────┐
//! └──────────────┘                │  kind → [..] │ ─────────────→ │ Logic Unit B │
//!                                 └──────────────┘                └──────────────┘
//! ```
//!
//! ## Rules
//!
//! - Subscriptions are declared by each unit and frozen when the registry is built
//! - Dispatch order for one event kind is registration order
//! - A failing unit does not prevent later units from seeing the event

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod dispatcher;
pub mod events;
pub mod logic;
pub mod registry;

// Re-export main types
pub use dispatcher::{DispatchError, DispatchReport, Dispatcher, EventDispatcher};
pub use events::{EventKind, ProtocolEvent};
pub use logic::{DynLogicUnit, LogicError, LogicInfo, LogicResult, LogicUnit};
pub use registry::{RegistryError, SubscriptionRegistry, SubscriptionRegistryBuilder};

/// Maximum events buffered between the transport and the dispatcher.
pub const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 1024;
