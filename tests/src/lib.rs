//! # Bot-Client Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-crate flows through a full session
//!     ├── flows.rs      # Dispatch → cache → notice
//!     └── concurrency.rs# Single-flight fetches under load
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p client-tests
//! cargo test -p client-tests integration::flows
//! ```

pub mod integration;
