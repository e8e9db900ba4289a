//! Forest container and id-addressed operations.
//!
//! The registration tree is a forest: an ordered list of root nodes, each
//! owning its subtree. All structural operations address nodes by id and
//! search the whole forest; a missing id yields `None` so callers can treat
//! stale references as no-ops.

use crate::node::{NodeId, TreeNode};

/// Ordered forest of registration nodes.
///
/// Node ids are unique across the forest at all times; producers own that
/// invariant and the forest relies on it (id search stops at the first hit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    roots: Vec<TreeNode>,
}

impl Forest {
    /// Create an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forest from a root list.
    #[must_use]
    pub fn from_roots(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }

    #[must_use]
    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut Vec<TreeNode> {
        &mut self.roots
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total node count across all subtrees.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.iter().map(TreeNode::subtree_len).sum()
    }

    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Find a node by id anywhere in the forest.
    #[must_use]
    pub fn find(&self, id: &NodeId) -> Option<&TreeNode> {
        fn walk<'a>(node: &'a TreeNode, id: &NodeId) -> Option<&'a TreeNode> {
            if node.id() == id {
                return Some(node);
            }
            node.children().iter().find_map(|c| walk(c, id))
        }
        self.roots.iter().find_map(|r| walk(r, id))
    }

    /// Find a node by id anywhere in the forest, mutably.
    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut TreeNode> {
        fn walk<'a>(node: &'a mut TreeNode, id: &NodeId) -> Option<&'a mut TreeNode> {
            if node.id() == id {
                return Some(node);
            }
            node.children_mut().iter_mut().find_map(|c| walk(c, id))
        }
        self.roots.iter_mut().find_map(|r| walk(r, id))
    }

    /// Remove a node (and its subtree) by id from wherever it occurs.
    ///
    /// Returns the detached subtree, or `None` if the id is unknown.
    pub fn remove(&mut self, id: &NodeId) -> Option<TreeNode> {
        fn remove_from(list: &mut Vec<TreeNode>, id: &NodeId) -> Option<TreeNode> {
            if let Some(pos) = list.iter().position(|n| n.id() == id) {
                return Some(list.remove(pos));
            }
            list.iter_mut()
                .find_map(|n| remove_from(n.children_mut(), id))
        }
        remove_from(&mut self.roots, id)
    }

    /// Insert a node under `parent_id`, or as a root when `parent_id` is
    /// `None`. The node is appended at the end of the sibling list.
    ///
    /// Returns `false` when the parent id is unknown; the node is dropped.
    pub fn insert(&mut self, parent_id: Option<&NodeId>, node: TreeNode) -> bool {
        match parent_id {
            None => {
                self.roots.push(node);
                true
            }
            Some(pid) => match self.find_mut(pid) {
                Some(parent) => {
                    parent.children_mut().push(node);
                    true
                }
                None => false,
            },
        }
    }

    /// Ancestor path from a root down to (and including) the target node.
    ///
    /// Returns `None` when the id is unknown.
    #[must_use]
    pub fn path_to(&self, id: &NodeId) -> Option<Vec<NodeId>> {
        fn walk(node: &TreeNode, id: &NodeId, path: &mut Vec<NodeId>) -> bool {
            path.push(node.id().clone());
            if node.id() == id {
                return true;
            }
            for child in node.children() {
                if walk(child, id, path) {
                    return true;
                }
            }
            path.pop();
            false
        }

        let mut path = Vec::new();
        for root in &self.roots {
            if walk(root, id, &mut path) {
                return Some(path);
            }
            path.clear();
        }
        None
    }

    /// Pre-order walk over every node with its depth.
    pub fn walk(&self, mut f: impl FnMut(&TreeNode, usize)) {
        fn visit(node: &TreeNode, depth: usize, f: &mut impl FnMut(&TreeNode, usize)) {
            f(node, depth);
            for child in node.children() {
                visit(child, depth + 1, f);
            }
        }
        for root in &self.roots {
            visit(root, 0, &mut f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeData;

    fn sample() -> Forest {
        Forest::from_roots(vec![
            TreeNode::new("p1", "Package", NodeData::Package).child(
                TreeNode::new("a1", "Assembly", NodeData::assembly()).child(
                    TreeNode::new("t1", "Type", NodeData::PluginType)
                        .child(TreeNode::new("s1", "Step", NodeData::step())),
                ),
            ),
            TreeNode::new("w1", "Hook", NodeData::WebHook),
        ])
    }

    #[test]
    fn find_reaches_any_depth() {
        let forest = sample();
        assert_eq!(forest.find(&"s1".into()).unwrap().label(), "Step");
        assert_eq!(forest.find(&"w1".into()).unwrap().label(), "Hook");
        assert!(forest.find(&"nope".into()).is_none());
    }

    #[test]
    fn len_counts_every_node() {
        assert_eq!(sample().len(), 5);
        assert_eq!(Forest::new().len(), 0);
    }

    #[test]
    fn remove_detaches_subtree() {
        let mut forest = sample();
        let removed = forest.remove(&"a1".into()).unwrap();
        assert_eq!(removed.subtree_len(), 3);
        assert!(!forest.contains(&"s1".into()));
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn remove_root() {
        let mut forest = sample();
        assert!(forest.remove(&"w1".into()).is_some());
        assert_eq!(forest.roots().len(), 1);
    }

    #[test]
    fn remove_unknown_is_none() {
        let mut forest = sample();
        assert!(forest.remove(&"nope".into()).is_none());
        assert_eq!(forest.len(), 5);
    }

    #[test]
    fn insert_under_parent_appends() {
        let mut forest = sample();
        let ok = forest.insert(
            Some(&"t1".into()),
            TreeNode::new("s2", "Second", NodeData::step()),
        );
        assert!(ok);
        let t1 = forest.find(&"t1".into()).unwrap();
        assert_eq!(t1.children().len(), 2);
        assert_eq!(t1.children()[1].id().as_str(), "s2");
    }

    #[test]
    fn insert_without_parent_becomes_root() {
        let mut forest = sample();
        assert!(forest.insert(None, TreeNode::new("p2", "Other", NodeData::Package)));
        assert_eq!(forest.roots().len(), 3);
    }

    #[test]
    fn insert_unknown_parent_fails() {
        let mut forest = sample();
        let ok = forest.insert(
            Some(&"nope".into()),
            TreeNode::new("s9", "Lost", NodeData::step()),
        );
        assert!(!ok);
        assert_eq!(forest.len(), 5);
    }

    #[test]
    fn path_to_includes_target() {
        let forest = sample();
        let path = forest.path_to(&"s1".into()).unwrap();
        let ids: Vec<&str> = path.iter().map(NodeId::as_str).collect();
        assert_eq!(ids, ["p1", "a1", "t1", "s1"]);
    }

    #[test]
    fn path_to_root_is_single_entry() {
        let forest = sample();
        let path = forest.path_to(&"w1".into()).unwrap();
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn walk_is_preorder_with_depth() {
        let forest = sample();
        let mut seen = Vec::new();
        forest.walk(|node, depth| seen.push((node.id().as_str().to_string(), depth)));
        assert_eq!(
            seen,
            [
                ("p1".to_string(), 0),
                ("a1".to_string(), 1),
                ("t1".to_string(), 2),
                ("s1".to_string(), 3),
                ("w1".to_string(), 0),
            ]
        );
    }
}
