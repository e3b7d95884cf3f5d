//! # Shared Types Crate
//!
//! This crate contains the identifier types and contact entities shared by
//! every logic unit of the client.
//!
//! ## Design Principles
//!
//! - **Two identifier namespaces**: `Uin` is the numeric, user-facing
//!   identifier of accounts and groups; `Uid` is the opaque identifier newer
//!   protocol calls require. Translation between them belongs to the caching
//!   logic only.
//! - **Single Source of Truth**: entities pushed by the server and records
//!   returned by fetch operations are defined here and nowhere else.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
