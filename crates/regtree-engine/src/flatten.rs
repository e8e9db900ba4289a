//! Tree flattening.
//!
//! Converts the (already filtered) hierarchical view into the flat ordered
//! row list the renderer consumes. Collapsed subtrees are absent from the
//! output entirely, not merely hidden: a collapsed container contributes one
//! row and nothing below it.

use regtree_model::{NodeId, TreeNode};
use smallvec::SmallVec;
use std::collections::HashSet;

/// One visible row: a node reference plus its depth in the hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct FlatRow<'a> {
    pub node: &'a TreeNode,
    pub depth: usize,
}

/// Pre-order flatten, descending only into expanded containers.
#[must_use]
pub fn flatten<'a>(roots: &'a [TreeNode], expanded: &HashSet<NodeId>) -> Vec<FlatRow<'a>> {
    let mut out = Vec::new();
    // Explicit stack; deep trees should not be bounded by recursion depth.
    let mut stack: SmallVec<[(&TreeNode, usize); 32]> = SmallVec::new();
    for root in roots.iter().rev() {
        stack.push((root, 0));
    }
    while let Some((node, depth)) = stack.pop() {
        out.push(FlatRow { node, depth });
        if node.has_children() && expanded.contains(node.id()) {
            for child in node.children().iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
    out
}

/// Flatten and keep only rows in the search-visible set.
///
/// Used in virtual-window mode, where hidden rows must not occupy scroll
/// space. The visible set is subtree-connected (an invisible node has no
/// visible descendants), so filtering flat rows cannot orphan children.
#[must_use]
pub fn flatten_searched<'a>(
    roots: &'a [TreeNode],
    expanded: &HashSet<NodeId>,
    visible: Option<&HashSet<NodeId>>,
) -> Vec<FlatRow<'a>> {
    let rows = flatten(roots, expanded);
    match visible {
        None => rows,
        Some(set) => rows
            .into_iter()
            .filter(|row| set.contains(row.node.id()))
            .collect(),
    }
}
