//! Client-side tree filters.
//!
//! Three independent filters derive a display tree from the raw forest:
//! solution membership, hidden-step visibility, and vendor-assembly
//! visibility. All of them are pure: the input slice is never mutated and
//! the output is a structurally independent copy (container shape is cloned;
//! leaf payloads are cloned with their nodes).
//!
//! Composition order is fixed: solution (most restrictive) → hidden-step →
//! vendor. Each stage consumes the previous stage's output, so suppression
//! only ever compounds — a node dropped at one stage cannot reappear later.
//!
//! The hidden-step and vendor filters share one subtlety: a container that
//! *became* empty because this filter removed all of its children is dropped,
//! while a container that was already empty in the input is kept. Freshly
//! registered plugin types have no steps yet and must stay visible.

use crate::config::ViewConfig;
use regtree_model::{NodeId, NodeKind, SolutionId, SolutionIndex, TreeNode};
use std::collections::HashSet;

/// Active filter toggles for one view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Drop steps marked hidden (internal registrations).
    pub hide_hidden_steps: bool,
    /// Drop vendor assemblies outside the allow-list.
    pub hide_vendor_assemblies: bool,
    /// Restrict the tree to members of this solution.
    pub solution: Option<SolutionId>,
}

/// Run the configured filter stages over `roots`.
#[must_use]
pub fn apply_filters(
    roots: &[TreeNode],
    options: &FilterOptions,
    index: &SolutionIndex,
    config: &ViewConfig,
) -> Vec<TreeNode> {
    let mut out: Vec<TreeNode>;

    if let Some(solution) = &options.solution {
        let empty = HashSet::new();
        let members = index.members(solution).unwrap_or(&empty);
        out = filter_by_solution(roots, members);
    } else {
        out = roots.to_vec();
    }

    if options.hide_hidden_steps {
        out = filter_hidden_steps(&out);
    }
    if options.hide_vendor_assemblies {
        out = filter_vendor_assemblies(&out, &config.vendor_prefix, &config.vendor_allow_list);
    }
    out
}

/// Retain nodes that belong to the solution, or lead to one that does.
///
/// A node survives when it is a direct member, when its kind is not tracked
/// by the membership data (see [`SolutionIndex::tracks`]), or when any
/// descendant survives. Retained steps keep their image children wholesale:
/// images are not independently trackable and inherit the step's decision.
#[must_use]
pub fn filter_by_solution(roots: &[TreeNode], members: &HashSet<NodeId>) -> Vec<TreeNode> {
    fn retain(node: &TreeNode, members: &HashSet<NodeId>) -> Option<TreeNode> {
        if node.kind() == NodeKind::Step {
            return members
                .contains(node.id())
                .then(|| node.clone());
        }

        let kept: Vec<TreeNode> = node
            .children()
            .iter()
            .filter_map(|c| retain(c, members))
            .collect();

        let keep = !SolutionIndex::tracks(node.kind())
            || members.contains(node.id())
            || !kept.is_empty();
        keep.then(|| {
            let mut clone = node.clone_shallow();
            *clone.children_mut() = kept;
            clone
        })
    }

    roots.iter().filter_map(|r| retain(r, members)).collect()
}

/// Drop steps whose metadata marks them hidden.
#[must_use]
pub fn filter_hidden_steps(roots: &[TreeNode]) -> Vec<TreeNode> {
    prune(roots, &|node| {
        node.step_data().is_some_and(|step| step.hidden)
    })
}

/// Drop vendor assemblies, keeping allow-listed labels.
#[must_use]
pub fn filter_vendor_assemblies(
    roots: &[TreeNode],
    prefix: &str,
    allow_list: &[String],
) -> Vec<TreeNode> {
    prune(roots, &|node| {
        node.kind() == NodeKind::Assembly
            && node.label().starts_with(prefix)
            && !allow_list.iter().any(|a| a == node.label())
    })
}

/// Shared recursion for the drop-and-suppress filters.
///
/// `drop_node` marks nodes removed outright. Containers are then kept or
/// dropped based on whether they were empty before the filter ran: the
/// recursive step returns the filtered clone paired with that bit, so no
/// bookkeeping is ever written onto the clones themselves.
fn prune(roots: &[TreeNode], drop_node: &dyn Fn(&TreeNode) -> bool) -> Vec<TreeNode> {
    fn visit(node: &TreeNode, drop_node: &dyn Fn(&TreeNode) -> bool) -> Option<TreeNode> {
        if drop_node(node) {
            return None;
        }

        let was_originally_empty = !node.has_children();
        let kept: Vec<TreeNode> = node
            .children()
            .iter()
            .filter_map(|c| visit(c, drop_node))
            .collect();

        let emptied_by_filter =
            node.kind().is_container() && !was_originally_empty && kept.is_empty();
        if emptied_by_filter {
            return None;
        }

        let mut clone = node.clone_shallow();
        *clone.children_mut() = kept;
        Some(clone)
    }

    roots.iter().filter_map(|r| visit(r, drop_node)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regtree_model::{NodeData, StepData};

    fn step(id: &str, label: &str, hidden: bool) -> TreeNode {
        TreeNode::new(
            id,
            label,
            NodeData::Step(StepData {
                enabled: true,
                hidden,
                ..StepData::default()
            }),
        )
    }

    fn ids(nodes: &[TreeNode]) -> Vec<String> {
        let mut out = Vec::new();
        fn walk(node: &TreeNode, out: &mut Vec<String>) {
            out.push(node.id().as_str().to_string());
            for c in node.children() {
                walk(c, out);
            }
        }
        for n in nodes {
            walk(n, &mut out);
        }
        out
    }

    #[test]
    fn hidden_filter_keeps_container_with_surviving_child() {
        let roots = vec![
            TreeNode::new("p1", "Type", NodeData::PluginType)
                .child(step("s1", "Hidden", true))
                .child(step("s2", "Visible", false)),
        ];
        let filtered = filter_hidden_steps(&roots);
        assert_eq!(ids(&filtered), ["p1", "s2"]);
    }

    #[test]
    fn hidden_filter_drops_container_emptied_by_filter() {
        let roots = vec![
            TreeNode::new("p1", "Type", NodeData::PluginType)
                .child(step("s1", "Hidden", true))
                .child(step("s2", "AlsoHidden", true)),
        ];
        assert!(filter_hidden_steps(&roots).is_empty());
    }

    #[test]
    fn hidden_filter_keeps_originally_empty_container() {
        let roots = vec![TreeNode::new("p2", "Fresh", NodeData::PluginType)];
        let filtered = filter_hidden_steps(&roots);
        assert_eq!(ids(&filtered), ["p2"]);
    }

    #[test]
    fn hidden_filter_suppression_cascades_upward() {
        let roots = vec![
            TreeNode::new("a1", "Asm", NodeData::assembly()).child(
                TreeNode::new("t1", "Type", NodeData::PluginType).child(step("s1", "Hidden", true)),
            ),
        ];
        // Type loses its only step, assembly loses its only type.
        assert!(filter_hidden_steps(&roots).is_empty());
    }

    #[test]
    fn vendor_filter_drops_prefixed_assembly() {
        let roots = vec![
            TreeNode::new("a1", "Microsoft.Dynamics.Internal", NodeData::assembly())
                .child(TreeNode::new("t1", "T", NodeData::PluginType).child(step("s", "S", false))),
            TreeNode::new("a2", "Contoso.Plugins", NodeData::assembly())
                .child(TreeNode::new("t2", "T2", NodeData::PluginType).child(step("s2", "S2", false))),
        ];
        let config = ViewConfig::default();
        let filtered =
            filter_vendor_assemblies(&roots, &config.vendor_prefix, &config.vendor_allow_list);
        assert_eq!(ids(&filtered), ["a2", "t2", "s2"]);
    }

    #[test]
    fn vendor_filter_allow_list_survives() {
        let roots = vec![
            TreeNode::new("a1", "Microsoft.Crm.ServiceBus", NodeData::assembly())
                .child(TreeNode::new("t1", "T", NodeData::PluginType).child(step("s", "S", false))),
        ];
        let config = ViewConfig::default();
        let filtered =
            filter_vendor_assemblies(&roots, &config.vendor_prefix, &config.vendor_allow_list);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn vendor_filter_suppresses_emptied_package() {
        let package = TreeNode::new("pkg", "Pkg", NodeData::Package)
            .child(TreeNode::new("a1", "Microsoft.Xrm.Sdk", NodeData::assembly()).child(
                TreeNode::new("t1", "T", NodeData::PluginType).child(step("s", "S", false)),
            ));
        let empty_package = TreeNode::new("pkg2", "FreshPkg", NodeData::Package);
        let config = ViewConfig::default();
        let filtered = filter_vendor_assemblies(
            &[package, empty_package],
            &config.vendor_prefix,
            &config.vendor_allow_list,
        );
        // pkg became empty through filtering; pkg2 was empty all along.
        assert_eq!(ids(&filtered), ["pkg2"]);
    }

    #[test]
    fn solution_filter_preserves_ancestors_of_members() {
        let roots = vec![
            TreeNode::new("a1", "Asm", NodeData::assembly()).child(
                TreeNode::new("t1", "Type", NodeData::PluginType)
                    .child(step("s1", "Member", false))
                    .child(step("s2", "Other", false)),
            ),
        ];
        let members = HashSet::from([NodeId::new("s1")]);
        let filtered = filter_by_solution(&roots, &members);
        assert_eq!(ids(&filtered), ["a1", "t1", "s1"]);
    }

    #[test]
    fn solution_filter_keeps_member_step_images() {
        let roots = vec![
            TreeNode::new("t1", "Type", NodeData::PluginType).child(
                step("s1", "Member", false)
                    .child(TreeNode::new("i1", "PreImage", NodeData::Image)),
            ),
        ];
        let members = HashSet::from([NodeId::new("s1")]);
        let filtered = filter_by_solution(&roots, &members);
        assert_eq!(ids(&filtered), ["t1", "s1", "i1"]);
    }

    #[test]
    fn solution_filter_exempts_untracked_kinds() {
        let roots = vec![
            TreeNode::new("w1", "Hook", NodeData::WebHook),
            TreeNode::new("d1", "Provider", NodeData::DataProvider),
            TreeNode::new("a1", "Asm", NodeData::assembly()),
        ];
        let filtered = filter_by_solution(&roots, &HashSet::new());
        assert_eq!(ids(&filtered), ["w1", "d1"]);
    }

    #[test]
    fn solution_filter_member_container_without_member_children() {
        let roots = vec![
            TreeNode::new("a1", "Asm", NodeData::assembly()).child(
                TreeNode::new("t1", "Type", NodeData::PluginType).child(step("s1", "S", false)),
            ),
        ];
        let members = HashSet::from([NodeId::new("a1")]);
        let filtered = filter_by_solution(&roots, &members);
        // Assembly is a member; its non-member descendants are not.
        assert_eq!(ids(&filtered), ["a1"]);
    }

    #[test]
    fn stages_compose_monotonically() {
        let roots = vec![
            TreeNode::new("a1", "Contoso.Plugins", NodeData::assembly()).child(
                TreeNode::new("t1", "Type", NodeData::PluginType)
                    .child(step("s1", "Member", false))
                    .child(step("s2", "Hidden", true)),
            ),
            TreeNode::new("a2", "Microsoft.Xrm.Sdk", NodeData::assembly()).child(
                TreeNode::new("t2", "Type2", NodeData::PluginType).child(step("s3", "S3", false)),
            ),
        ];
        let mut index = SolutionIndex::new();
        index.register("sol".into(), "s1".into());
        index.register("sol".into(), "s3".into());

        let options = FilterOptions {
            hide_hidden_steps: true,
            hide_vendor_assemblies: true,
            solution: Some("sol".into()),
        };
        let filtered = apply_filters(&roots, &options, &index, &ViewConfig::default());
        assert_eq!(ids(&filtered), ["a1", "t1", "s1"]);
    }

    #[test]
    fn unknown_solution_behaves_as_empty_member_set() {
        let roots = vec![TreeNode::new("a1", "Asm", NodeData::assembly())];
        let options = FilterOptions {
            solution: Some("missing".into()),
            ..FilterOptions::default()
        };
        let filtered = apply_filters(
            &roots,
            &options,
            &SolutionIndex::new(),
            &ViewConfig::default(),
        );
        assert!(filtered.is_empty());
    }

    #[test]
    fn filters_do_not_mutate_input() {
        let roots = vec![
            TreeNode::new("t1", "Type", NodeData::PluginType).child(step("s1", "Hidden", true)),
        ];
        let before = roots.clone();
        let _ = filter_hidden_steps(&roots);
        assert_eq!(roots, before);
    }
}
