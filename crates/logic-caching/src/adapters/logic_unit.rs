//! Event dispatcher adapter for the caching logic
//!
//! The caching unit only listens to group roster pushes. Member joins and
//! leaves do not touch the cache: a resolved group stays resolved.

use async_trait::async_trait;
use shared_bus::{EventKind, LogicResult, LogicUnit, ProtocolEvent};

use super::CACHING_LOGIC_NAME;
use crate::service::CachingService;

const SUBSCRIPTIONS: &[EventKind] = &[EventKind::GroupListPushed];

#[async_trait]
impl LogicUnit for CachingService {
    fn name(&self) -> &'static str {
        CACHING_LOGIC_NAME
    }

    fn description(&self) -> &'static str {
        "Caches the group roster and translates uin <-> uid"
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        SUBSCRIPTIONS
    }

    async fn incoming(&self, event: &ProtocolEvent) -> LogicResult {
        if let ProtocolEvent::GroupListPushed { groups } = event {
            self.apply_roster(groups);
        }
        Ok(())
    }
}
