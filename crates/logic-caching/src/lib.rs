//! # Logic Caching
//!
//! Resolution cache translating between the two identifier namespaces of
//! the protocol: the numeric `Uin` and the opaque `Uid`.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure data structures, no I/O
//!   - `UidTable`: Bidirectional uin <-> uid map with bulk insert rules
//!   - `CachingConfig`: Configuration with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `UidResolverApi`: Driving port used by other logic units
//!   - `OperationProvider`: Driven port fetching friend and member lists
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `CachingService`: Implements `UidResolverApi` with one in-flight
//!     fetch per scope
//!
//! - **Adapters Layer** (`adapters/`): Event bus connection
//!   - `LogicUnit` implementation consuming group roster pushes
//!
//! ## Invariants
//!
//! - **Stable uid**: a uin once mapped to a uid is never remapped or removed
//! - **Friend bootstrap**: the friend list is fetched at most once after success
//! - **Group resolution**: a group is marked resolved only after its members merged
//! - **Roster snapshot**: each roster push fully replaces the previous one
//!
//! ## Wiring
//!
//! ```ignore
//! use logic_caching::{CachingConfig, CachingService};
//! use shared_bus::SubscriptionRegistry;
//! use std::sync::Arc;
//!
//! let caching = Arc::new(CachingService::new(provider, CachingConfig::default()));
//! let registry = SubscriptionRegistry::builder()
//!     .register(caching.clone())?
//!     .build();
//!
//! let uid = caching.resolve_uid(Some(group_uin), member_uin).await?;
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::CACHING_LOGIC_NAME;
pub use domain::{CachingConfig, UidTable};
pub use error::{CacheError, FetchScope};
pub use metrics::{CacheMetrics, CacheStatsSnapshot};
pub use ports::{OperationProvider, UidResolverApi};
pub use service::CachingService;
