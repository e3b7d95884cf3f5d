//! Notice entities

use serde::{Deserialize, Serialize};
use shared_types::{Uid, Uin};
use std::fmt;

/// Direction of a membership change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoticeKind {
    /// A member joined the group.
    Joined,
    /// A member left or was removed from the group.
    Left,
}

impl fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Joined => write!(f, "joined"),
            Self::Left => write!(f, "left"),
        }
    }
}

/// A membership change with the member translated to a uin where possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupNotice {
    pub group_uin: Uin,
    pub kind: NoticeKind,
    pub member_uid: Uid,
    /// `None` when the uid is unknown even after the group was resolved.
    pub member_uin: Option<Uin>,
    pub operator_uid: Option<Uid>,
}

impl GroupNotice {
    /// Whether the member was removed by someone else.
    #[must_use]
    pub fn is_kick(&self) -> bool {
        self.kind == NoticeKind::Left
            && self
                .operator_uid
                .as_ref()
                .is_some_and(|operator| operator != &self.member_uid)
    }
}

impl fmt::Display for GroupNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.member_uin {
            Some(uin) => write!(f, "{} {} group {}", uin, self.kind, self.group_uin),
            None => write!(f, "{} {} group {}", self.member_uid, self.kind, self.group_uin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left(operator: Option<&str>) -> GroupNotice {
        GroupNotice {
            group_uin: Uin(1),
            kind: NoticeKind::Left,
            member_uid: Uid::new("u9"),
            member_uin: Some(Uin(9)),
            operator_uid: operator.map(Uid::new),
        }
    }

    #[test]
    fn test_kick_requires_other_operator() {
        assert!(left(Some("u1")).is_kick());
        assert!(!left(Some("u9")).is_kick());
        assert!(!left(None).is_kick());
    }

    #[test]
    fn test_display_prefers_uin() {
        assert_eq!(left(None).to_string(), "9 left group 1");

        let mut unresolved = left(None);
        unresolved.member_uin = None;
        assert_eq!(unresolved.to_string(), "u9 left group 1");
    }
}
