//! Solution membership index.
//!
//! Dataverse solutions track their component registrations by id. The index
//! is a secondary structure (solution id → member node-id set) consulted by
//! the solution filter; the primary tree is never mutated to reflect
//! membership.
//!
//! Not every node kind is represented in the membership data: web hooks are
//! registered outside solution tracking and data providers are synthetic
//! virtual-entity nodes, so both are exempt from solution filtering and
//! always retained. Images are not independently trackable either; they
//! follow their parent step's retention decision inside the filter instead.

use crate::node::{NodeId, NodeKind};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Identifier of a solution scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SolutionId(String);

impl SolutionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SolutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SolutionId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SolutionId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Solution id → member node ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionIndex {
    memberships: HashMap<SolutionId, HashSet<NodeId>>,
}

impl SolutionIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole index (bulk snapshot).
    pub fn replace(&mut self, memberships: HashMap<SolutionId, HashSet<NodeId>>) {
        self.memberships = memberships;
    }

    /// Register a single node into a solution's member set.
    ///
    /// Used when a node is created while a solution scope is active, so the
    /// new node is not spuriously hidden by the active filter.
    pub fn register(&mut self, solution: SolutionId, node: NodeId) {
        self.memberships.entry(solution).or_default().insert(node);
    }

    /// Member set for a solution, if the solution is known.
    #[must_use]
    pub fn members(&self, solution: &SolutionId) -> Option<&HashSet<NodeId>> {
        self.memberships.get(solution)
    }

    #[must_use]
    pub fn is_member(&self, solution: &SolutionId, node: &NodeId) -> bool {
        self.memberships
            .get(solution)
            .is_some_and(|set| set.contains(node))
    }

    /// Whether membership data exists for this kind at all.
    ///
    /// Untracked kinds are exempt from solution filtering.
    #[must_use]
    pub const fn tracks(kind: NodeKind) -> bool {
        !matches!(
            kind,
            NodeKind::WebHook | NodeKind::DataProvider | NodeKind::Image
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_query() {
        let mut index = SolutionIndex::new();
        index.register("sol1".into(), "a1".into());
        index.register("sol1".into(), "s1".into());
        index.register("sol2".into(), "a2".into());

        assert!(index.is_member(&"sol1".into(), &"a1".into()));
        assert!(!index.is_member(&"sol1".into(), &"a2".into()));
        assert!(!index.is_member(&"unknown".into(), &"a1".into()));
        assert_eq!(index.members(&"sol1".into()).unwrap().len(), 2);
    }

    #[test]
    fn replace_discards_previous_memberships() {
        let mut index = SolutionIndex::new();
        index.register("sol1".into(), "a1".into());

        let mut fresh = HashMap::new();
        fresh.insert(SolutionId::new("sol2"), HashSet::from([NodeId::new("b1")]));
        index.replace(fresh);

        assert!(!index.is_member(&"sol1".into(), &"a1".into()));
        assert!(index.is_member(&"sol2".into(), &"b1".into()));
    }

    #[test]
    fn untracked_kinds() {
        assert!(!SolutionIndex::tracks(NodeKind::WebHook));
        assert!(!SolutionIndex::tracks(NodeKind::DataProvider));
        assert!(!SolutionIndex::tracks(NodeKind::Image));
        assert!(SolutionIndex::tracks(NodeKind::Assembly));
        assert!(SolutionIndex::tracks(NodeKind::Step));
        assert!(SolutionIndex::tracks(NodeKind::CustomApi));
    }
}
