//! Free-text search over display names.
//!
//! A search term selects a visible-id set rather than a filtered tree: a
//! node is visible when it matches, when an ancestor matches (a matching
//! container reveals its whole subtree), or when a descendant matches (the
//! path to a match stays navigable). Full-tree rendering applies the set as
//! per-row visibility; virtual-window rendering applies it as a pre-filter
//! on the flattened list.

use regtree_model::{NodeId, TreeNode};
use std::collections::HashSet;

/// Compute the visible-id set for a case-insensitive substring search.
///
/// One recursive pass: matches propagate down (subtree of a match) via
/// `under_match` and up (ancestors of a match) via the return value.
#[must_use]
pub fn visible_ids(roots: &[TreeNode], query: &str) -> HashSet<NodeId> {
    let needle = query.to_lowercase();
    let mut out = HashSet::new();
    for root in roots {
        visit(root, &needle, false, &mut out);
    }
    out
}

fn visit(
    node: &TreeNode,
    needle: &str,
    under_match: bool,
    out: &mut HashSet<NodeId>,
) -> bool {
    let self_match = node.label().to_lowercase().contains(needle);
    let subtree_revealed = under_match || self_match;

    let mut descendant_match = false;
    for child in node.children() {
        descendant_match |= visit(child, needle, subtree_revealed, out);
    }

    if subtree_revealed || descendant_match {
        out.insert(node.id().clone());
    }
    self_match || descendant_match
}
