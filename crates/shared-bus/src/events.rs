//! # Protocol Events
//!
//! Defines every event the transport layer can hand to the dispatcher.
//! Each variant is an immutable value built from a decoded server push.

use serde::{Deserialize, Serialize};
use shared_types::{BotGroup, Uid, Uin};

/// All events that can be dispatched to logic units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProtocolEvent {
    // =========================================================================
    // ROSTER PUSHES
    // =========================================================================
    /// The server pushed the full list of groups the bot belongs to.
    GroupListPushed {
        /// Groups in server order.
        groups: Vec<BotGroup>,
    },

    // =========================================================================
    // MEMBERSHIP CHANGES
    // =========================================================================
    /// A member joined a group. Newer protocol pushes identify the member by uid.
    GroupMemberIncreased {
        /// The group that gained a member.
        group_uin: Uin,
        /// The member who joined.
        member_uid: Uid,
        /// The admin who approved or invited, if any.
        operator_uid: Option<Uid>,
    },

    /// A member left or was removed from a group.
    GroupMemberDecreased {
        /// The group that lost a member.
        group_uin: Uin,
        /// The member who left.
        member_uid: Uid,
        /// The admin who removed the member, if it was a kick.
        operator_uid: Option<Uid>,
    },
}

impl ProtocolEvent {
    /// Get the kind tag for this event (for subscription lookup).
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::GroupListPushed { .. } => EventKind::GroupListPushed,
            Self::GroupMemberIncreased { .. } => EventKind::GroupMemberIncreased,
            Self::GroupMemberDecreased { .. } => EventKind::GroupMemberDecreased,
        }
    }
}

/// Event kind tags used to declare subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// `ProtocolEvent::GroupListPushed`.
    GroupListPushed,
    /// `ProtocolEvent::GroupMemberIncreased`.
    GroupMemberIncreased,
    /// `ProtocolEvent::GroupMemberDecreased`.
    GroupMemberDecreased,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 3] = [
        EventKind::GroupListPushed,
        EventKind::GroupMemberIncreased,
        EventKind::GroupMemberDecreased,
    ];
}
