//! Adapters Layer
//!
//! Connects the caching service to the event dispatcher.
//!
//! ## Adapters
//!
//! - `LogicUnit for CachingService` - Consumes group roster pushes

pub mod logic_unit;

/// Registration name of the caching logic unit
pub const CACHING_LOGIC_NAME: &str = "CachingLogic";
