//! # Subscription Registry
//!
//! Maps every event kind to the ordered list of logic units that declared
//! interest in it. Built once at session startup and immutable afterwards.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let registry = SubscriptionRegistry::builder()
//!     .register(caching.clone())?
//!     .register(notice.clone())?
//!     .build();
//! ```

use crate::events::EventKind;
use crate::logic::{DynLogicUnit, LogicInfo};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from registry construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two units share the same name.
    #[error("Logic unit {0} is already registered")]
    DuplicateUnit(&'static str),
}

/// Collects logic units before the registry is frozen.
#[derive(Default)]
pub struct SubscriptionRegistryBuilder {
    units: Vec<DynLogicUnit>,
    names: HashSet<&'static str>,
}

impl SubscriptionRegistryBuilder {
    /// Register a unit. Registration order is dispatch order.
    pub fn register(mut self, unit: DynLogicUnit) -> Result<Self, RegistryError> {
        let name = unit.name();
        if !self.names.insert(name) {
            return Err(RegistryError::DuplicateUnit(name));
        }
        info!(unit = name, subscribes = ?unit.subscriptions(), "Registering logic unit");
        self.units.push(unit);
        Ok(self)
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> SubscriptionRegistry {
        let mut routes: HashMap<EventKind, Vec<DynLogicUnit>> = HashMap::new();

        for unit in &self.units {
            // A unit listing a kind twice still receives it once.
            let mut seen = HashSet::new();
            for kind in unit.subscriptions() {
                if seen.insert(*kind) {
                    routes.entry(*kind).or_default().push(unit.clone());
                }
            }
        }

        for (kind, subscribers) in &routes {
            debug!(kind = ?kind, subscribers = subscribers.len(), "Route built");
        }

        SubscriptionRegistry {
            routes,
            units: self.units,
        }
    }
}

/// Immutable mapping from event kind to subscribed units.
pub struct SubscriptionRegistry {
    routes: HashMap<EventKind, Vec<DynLogicUnit>>,
    units: Vec<DynLogicUnit>,
}

impl SubscriptionRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> SubscriptionRegistryBuilder {
        SubscriptionRegistryBuilder::default()
    }

    /// Units subscribed to `kind`, in registration order.
    #[must_use]
    pub fn subscribers(&self, kind: EventKind) -> &[DynLogicUnit] {
        self.routes.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of units subscribed to `kind`.
    #[must_use]
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers(kind).len()
    }

    /// Get info about all registered units, in registration order.
    #[must_use]
    pub fn units(&self) -> Vec<LogicInfo> {
        self.units.iter().map(|u| u.info()).collect()
    }

    /// Check if a unit with this name is registered.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.units.iter().any(|u| u.name() == name)
    }

    /// Number of registered units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether no unit is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
