//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for other logic units
//! - Driven Ports (outbound) - Network operations

pub mod inbound;
pub mod outbound;

pub use inbound::UidResolverApi;
pub use outbound::OperationProvider;
