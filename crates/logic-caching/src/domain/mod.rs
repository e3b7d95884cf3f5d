//! Domain Layer
//!
//! Pure data structures of the caching logic. No I/O, no locking.

pub mod config;
pub mod uid_table;

pub use config::CachingConfig;
pub use uid_table::UidTable;
