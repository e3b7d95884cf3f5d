//! # Logic Notice
//!
//! Turns member join and leave pushes into user-facing notices.
//!
//! Join/leave pushes carry the member uid only. `NoticeLogic` asks the
//! resolution cache for the matching uin, scoped to the group the event
//! belongs to, and broadcasts a `GroupNotice` on the `NoticeBus`.
//!
//! ```text
//! ProtocolEvent::GroupMember{Increased,Decreased}
//!        │
//!        ▼
//!   NoticeLogic ──resolve_uin(group, uid)──► UidResolverApi
//!        │
//!        ▼
//!   NoticeBus ──► Subscription (one per consumer)
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod bus;
pub mod error;
pub mod logic;
pub mod notice;

pub use bus::{NoticeBus, NoticeSubscription, DEFAULT_NOTICE_CAPACITY};
pub use error::NoticeError;
pub use logic::{NoticeLogic, NOTICE_LOGIC_NAME};
pub use notice::{GroupNotice, NoticeKind};
