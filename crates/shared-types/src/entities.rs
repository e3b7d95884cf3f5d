//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identifiers**: `Uin`, `Uid`
//! - **Roster**: `BotGroup`
//! - **Fetched records**: `FriendRecord`, `MemberRecord`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: IDENTIFIERS
// =============================================================================

/// Legacy numeric identifier of an account or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Uin(pub u32);

impl Uin {
    /// Get the raw numeric value.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for Uin {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Uin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque stable identifier used by newer protocol operations.
///
/// A uid is learned from the server once and never changes for the
/// lifetime of the account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    /// Wrap a server-provided uid string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the uid as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Uid {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Uid {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// CLUSTER B: ROSTER
// =============================================================================

/// A group the bot account belongs to, as pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotGroup {
    /// Group uin.
    pub group_uin: Uin,
    /// Display name of the group.
    pub group_name: String,
    /// Current member count.
    pub member_count: u32,
    /// Maximum member count allowed.
    pub max_member: u32,
}

impl BotGroup {
    /// Create a group descriptor with empty display metadata.
    pub fn new(group_uin: impl Into<Uin>, group_name: impl Into<String>) -> Self {
        Self {
            group_uin: group_uin.into(),
            group_name: group_name.into(),
            member_count: 0,
            max_member: 0,
        }
    }
}

// =============================================================================
// CLUSTER C: FETCHED RECORDS
// =============================================================================

/// A friend entry returned by the friend-list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRecord {
    /// Friend uin.
    pub uin: Uin,
    /// Friend uid.
    pub uid: Uid,
    /// Nickname chosen by the friend.
    pub nickname: String,
    /// Remark set by the bot account.
    pub remarks: String,
}

impl FriendRecord {
    /// Create a record carrying only the identifier pair.
    pub fn new(uin: impl Into<Uin>, uid: impl Into<Uid>) -> Self {
        Self {
            uin: uin.into(),
            uid: uid.into(),
            nickname: String::new(),
            remarks: String::new(),
        }
    }
}

/// Role of a member inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GroupPermission {
    /// Regular member.
    #[default]
    Member,
    /// Group administrator.
    Admin,
    /// Group owner.
    Owner,
}

/// A member entry returned by the group member-list fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Member uin.
    pub uin: Uin,
    /// Member uid.
    pub uid: Uid,
    /// Card name shown inside the group.
    pub member_card: Option<String>,
    /// Role inside the group.
    pub permission: GroupPermission,
}

impl MemberRecord {
    /// Create a regular-member record carrying only the identifier pair.
    pub fn new(uin: impl Into<Uin>, uid: impl Into<Uid>) -> Self {
        Self {
            uin: uin.into(),
            uid: uid.into(),
            member_card: None,
            permission: GroupPermission::Member,
        }
    }
}
