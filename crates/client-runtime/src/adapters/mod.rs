//! # Adapters
//!
//! Operation provider implementations usable without a live connection.

pub mod static_provider;

pub use static_provider::{GroupFixture, ProviderFixture, StaticProvider};
