//! # Client Runtime Library
//!
//! Exposes the session container, the event pump and the static provider
//! for the demo binary and the integration suite.
//!
//! ## Event Flow
//!
//! ```text
//! transport ──► EventSink ──► EventPump ──► Dispatcher
//!                                              │
//!                   ┌──────────────────────────┴──────────────┐
//!                   ↓                                         ↓
//!             CachingLogic                               NoticeLogic
//!       (GroupListPushed → roster)        (GroupMember* → resolve_uin → NoticeBus)
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod container;
pub mod pump;

pub use adapters::StaticProvider;
pub use container::{load_config, ClientConfig, ClientSession, ConfigError, SessionError};
pub use pump::{EventPump, EventSink, PumpError, PumpStats};
