use std::collections::{BTreeMap, BTreeSet};

use topo_hash::ObjectId;

/// Which branch names point at which commit.
///
/// One commit may carry any number of names; names iterate sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchMap {
    heads: BTreeMap<ObjectId, BTreeSet<String>>,
}

impl BranchMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that branch `name` points at `head`.
    pub fn insert(&mut self, head: ObjectId, name: impl Into<String>) {
        self.heads.entry(head).or_default().insert(name.into());
    }

    /// Branch names at `oid`, if any.
    pub fn names(&self, oid: &ObjectId) -> Option<&BTreeSet<String>> {
        self.heads.get(oid)
    }

    /// Distinct head commits in ascending order.
    pub fn heads(&self) -> impl Iterator<Item = &ObjectId> {
        self.heads.keys()
    }

    /// Number of distinct head commits.
    pub fn len(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, ObjectId)> for BranchMap {
    fn from_iter<I: IntoIterator<Item = (N, ObjectId)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, head) in iter {
            map.insert(head, name);
        }
        map
    }
}
