//! # Notice Logic
//!
//! Logic unit translating member join/leave pushes into `GroupNotice`s.

use async_trait::async_trait;
use logic_caching::UidResolverApi;
use shared_bus::{EventKind, LogicResult, LogicUnit, ProtocolEvent};
use shared_types::{Uid, Uin};
use std::sync::Arc;
use tracing::{debug, info};

use crate::bus::NoticeBus;
use crate::error::NoticeError;
use crate::notice::{GroupNotice, NoticeKind};

/// Registration name of the notice logic unit
pub const NOTICE_LOGIC_NAME: &str = "NoticeLogic";

const SUBSCRIPTIONS: &[EventKind] = &[
    EventKind::GroupMemberIncreased,
    EventKind::GroupMemberDecreased,
];

/// Resolves the member of each membership push and publishes a notice.
pub struct NoticeLogic {
    resolver: Arc<dyn UidResolverApi>,
    bus: Arc<NoticeBus>,
}

impl NoticeLogic {
    pub fn new(resolver: Arc<dyn UidResolverApi>, bus: Arc<NoticeBus>) -> Self {
        Self { resolver, bus }
    }

    /// The bus notices are published on.
    pub fn bus(&self) -> &Arc<NoticeBus> {
        &self.bus
    }

    /// Build the notice for one membership change.
    pub async fn build_notice(
        &self,
        group_uin: Uin,
        kind: NoticeKind,
        member_uid: &Uid,
        operator_uid: Option<&Uid>,
    ) -> Result<GroupNotice, NoticeError> {
        let member_uin = self
            .resolver
            .resolve_uin(Some(group_uin), member_uid)
            .await
            .map_err(|source| NoticeError::Resolve { group_uin, source })?;

        if member_uin.is_none() {
            debug!(group_uin = %group_uin, member_uid = %member_uid, "Member uid not in cache");
        }

        Ok(GroupNotice {
            group_uin,
            kind,
            member_uid: member_uid.clone(),
            member_uin,
            operator_uid: operator_uid.cloned(),
        })
    }
}

#[async_trait]
impl LogicUnit for NoticeLogic {
    fn name(&self) -> &'static str {
        NOTICE_LOGIC_NAME
    }

    fn description(&self) -> &'static str {
        "Publishes member join and leave notices"
    }

    fn subscriptions(&self) -> &'static [EventKind] {
        SUBSCRIPTIONS
    }

    async fn incoming(&self, event: &ProtocolEvent) -> LogicResult {
        let (group_uin, kind, member_uid, operator_uid) = match event {
            ProtocolEvent::GroupMemberIncreased {
                group_uin,
                member_uid,
                operator_uid,
            } => (*group_uin, NoticeKind::Joined, member_uid, operator_uid),
            ProtocolEvent::GroupMemberDecreased {
                group_uin,
                member_uid,
                operator_uid,
            } => (*group_uin, NoticeKind::Left, member_uid, operator_uid),
            _ => return Ok(()),
        };

        let notice = self
            .build_notice(group_uin, kind, member_uid, operator_uid.as_ref())
            .await?;

        info!(notice = %notice, "Group membership changed");
        self.bus.publish(notice);
        Ok(())
    }
}
