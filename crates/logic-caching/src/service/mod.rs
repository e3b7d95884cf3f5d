//! Service Layer
//!
//! Implements the driving port on top of the driven port.

mod fetch_slot;

pub mod caching_service;

pub use caching_service::CachingService;
