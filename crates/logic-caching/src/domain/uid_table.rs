//! Bidirectional uin <-> uid table
//!
//! Both directions are updated together. Entries are never removed and an
//! existing uin is never remapped.

use crate::error::CacheError;
use shared_types::{Uid, Uin};
use std::collections::{HashMap, HashSet};

/// Uin to uid mapping with a reverse index.
#[derive(Debug, Default, Clone)]
pub struct UidTable {
    by_uin: HashMap<Uin, Uid>,
    by_uid: HashMap<Uid, Uin>,
}

impl UidTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a batch where every uin must be new.
    ///
    /// The whole batch is rejected if any uin repeats inside the batch or is
    /// already present; nothing is applied in that case.
    pub fn insert_unique<'a, I>(&mut self, pairs: I) -> Result<usize, CacheError>
    where
        I: IntoIterator<Item = (Uin, &'a Uid)>,
    {
        let pairs: Vec<(Uin, &Uid)> = pairs.into_iter().collect();

        let mut seen = HashSet::with_capacity(pairs.len());
        for (uin, _) in &pairs {
            if self.by_uin.contains_key(uin) || !seen.insert(*uin) {
                return Err(CacheError::DuplicateFriendUin { uin: *uin });
            }
        }

        for (uin, uid) in &pairs {
            self.link(*uin, uid);
        }
        Ok(pairs.len())
    }

    /// Insert a batch, skipping uins that are already known.
    ///
    /// Returns the number of new entries.
    pub fn insert_missing<'a, I>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (Uin, &'a Uid)>,
    {
        let mut inserted = 0;
        for (uin, uid) in pairs {
            if !self.by_uin.contains_key(&uin) {
                self.link(uin, uid);
                inserted += 1;
            }
        }
        inserted
    }

    fn link(&mut self, uin: Uin, uid: &Uid) {
        self.by_uin.insert(uin, uid.clone());
        // First writer wins if the server ever hands one uid to two uins.
        self.by_uid.entry(uid.clone()).or_insert(uin);
    }

    /// Look up the uid of a uin.
    #[must_use]
    pub fn uid(&self, uin: Uin) -> Option<&Uid> {
        self.by_uin.get(&uin)
    }

    /// Look up the uin of a uid.
    #[must_use]
    pub fn uin(&self, uid: &Uid) -> Option<Uin> {
        self.by_uid.get(uid).copied()
    }

    /// Number of known uins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_uin.len()
    }

    /// Whether the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_uin.is_empty()
    }
}
