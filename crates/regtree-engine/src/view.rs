//! The owning tree-view controller.
//!
//! One [`TreeView`] instance holds all state for one panel: the raw forest,
//! the solution-membership index, expansion/selection/filter/search state,
//! and the derived filtered view the renderer projects from. There is no
//! hidden global state and the rendered output is never consulted as a
//! source of truth; every question is answered from the controller.
//!
//! Mutation handlers return [`Effect`] lists describing the follow-up the
//! host shell must perform (re-render, empty state, scroll-into-view,
//! selection notification). After any structural mutation the effect is a
//! full re-render of the filtered, flattened tree with the active search
//! re-applied; targeted row patching is deliberately not offered.

use crate::config::ViewConfig;
use crate::effect::Effect;
use crate::filter::{FilterOptions, apply_filters};
use crate::flatten::{FlatRow, flatten, flatten_searched};
use crate::search::visible_ids;
use crate::window::{RenderMode, ScrollCoalescer, Window, mode_for};
use regtree_model::{Forest, NodeId, SolutionId, SolutionIndex, TreeNode};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Controller for one registration tree panel.
#[derive(Debug, Default)]
pub struct TreeView {
    config: ViewConfig,
    forest: Forest,
    solutions: SolutionIndex,

    expanded: HashSet<NodeId>,
    selected: Option<NodeId>,
    filters: FilterOptions,
    search: Option<String>,

    scroll_top: u32,
    viewport_height: u32,
    coalescer: ScrollCoalescer,
    last_window: Option<Window>,

    /// Snapshot said the source itself is empty (vs. not yet loaded).
    confirmed_empty: bool,
    /// Filtered copy of the forest; what flattening and rendering consume.
    view: Vec<TreeNode>,
    /// Search visibility set over the filtered view, when a term is active.
    search_visible: Option<HashSet<NodeId>>,
}

impl TreeView {
    #[must_use]
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Inbound mutations
    // ────────────────────────────────────────────────────────────────────

    /// Bulk-replace the tree and (optionally) the membership index.
    ///
    /// Expansion state survives the snapshot for every id that still
    /// exists; a stale selection is dropped.
    pub fn apply_snapshot(
        &mut self,
        roots: Vec<TreeNode>,
        is_empty: bool,
        memberships: Option<HashMap<SolutionId, HashSet<NodeId>>>,
    ) -> Vec<Effect> {
        self.forest = Forest::from_roots(roots);
        if let Some(memberships) = memberships {
            self.solutions.replace(memberships);
        }
        self.confirmed_empty = is_empty;
        self.drop_stale_selection();
        self.rebuild();
        if self.is_empty_view() {
            vec![Effect::ShowEmptyState]
        } else {
            vec![Effect::Render]
        }
    }

    /// Replace one node's own fields, preserving its children.
    pub fn update_node(&mut self, id: &NodeId, replacement: TreeNode) -> Vec<Effect> {
        let Some(node) = self.forest.find_mut(id) else {
            warn!(node = %id, "update for unknown node ignored");
            return Vec::new();
        };
        node.replace_fields(replacement);
        self.rebuild();
        vec![Effect::Render]
    }

    /// Replace a node together with its entire children list.
    pub fn update_subtree(&mut self, id: &NodeId, replacement: TreeNode) -> Vec<Effect> {
        let Some(node) = self.forest.find_mut(id) else {
            warn!(node = %id, "subtree update for unknown node ignored");
            return Vec::new();
        };
        node.replace_subtree(replacement);
        self.drop_stale_selection();
        self.rebuild();
        vec![Effect::Render]
    }

    /// Insert a node under `parent` (or as a root) and make it reachable.
    ///
    /// Every ancestor of the new node is force-expanded, and when the
    /// insert happens inside an active solution scope the node is
    /// registered into that solution's member set so the filter does not
    /// immediately hide it.
    pub fn add_node(
        &mut self,
        parent: Option<&NodeId>,
        node: TreeNode,
        solution: Option<SolutionId>,
    ) -> Vec<Effect> {
        let id = node.id().clone();
        let kind = node.kind();
        if !self.forest.insert(parent, node) {
            warn!(node = %id, "add under unknown parent ignored");
            return Vec::new();
        }

        if let Some(solution) = solution
            && SolutionIndex::tracks(kind)
        {
            self.solutions.register(solution, id.clone());
        }

        if let Some(path) = self.forest.path_to(&id) {
            for ancestor in &path[..path.len() - 1] {
                self.expanded.insert(ancestor.clone());
            }
        }

        self.rebuild();
        vec![Effect::Render, Effect::ScrollIntoView { id }]
    }

    /// Delete a node (and its subtree) wherever it occurs.
    pub fn remove_node(&mut self, id: &NodeId) -> Vec<Effect> {
        if self.forest.remove(id).is_none() {
            warn!(node = %id, "remove for unknown node ignored");
            return Vec::new();
        }
        self.drop_stale_selection();
        self.rebuild();
        if self.forest.is_empty() {
            vec![Effect::ShowEmptyState]
        } else {
            vec![Effect::Render]
        }
    }

    /// Expand the path to a node, select it, and surface it to the host.
    ///
    /// Used after host-side creation so the new registration is visible
    /// and selected without manual navigation.
    pub fn select_and_reveal(&mut self, id: &NodeId) -> Vec<Effect> {
        let Some(path) = self.forest.path_to(id) else {
            warn!(node = %id, "reveal for unknown node ignored");
            return Vec::new();
        };
        for ancestor in &path[..path.len() - 1] {
            self.expanded.insert(ancestor.clone());
        }
        self.selected = Some(id.clone());
        let kind = self.forest.find(id).map(TreeNode::kind);
        self.rebuild();

        let mut effects = vec![
            Effect::Render,
            Effect::ScrollIntoView { id: id.clone() },
        ];
        if let Some(kind) = kind {
            effects.push(Effect::SelectionChanged {
                id: id.clone(),
                kind,
            });
        }
        effects
    }

    // ────────────────────────────────────────────────────────────────────
    // Filters and search
    // ────────────────────────────────────────────────────────────────────

    /// Switch the active solution scope (`None` shows everything).
    pub fn set_solution(&mut self, solution: Option<SolutionId>) -> Vec<Effect> {
        self.filters.solution = solution;
        self.rebuild();
        vec![Effect::Render]
    }

    pub fn set_hide_hidden_steps(&mut self, hide: bool) -> Vec<Effect> {
        self.filters.hide_hidden_steps = hide;
        self.rebuild();
        vec![Effect::Render]
    }

    pub fn set_hide_vendor_assemblies(&mut self, hide: bool) -> Vec<Effect> {
        self.filters.hide_vendor_assemblies = hide;
        self.rebuild();
        vec![Effect::Render]
    }

    /// Set or clear the free-text search term.
    pub fn set_search(&mut self, query: Option<String>) -> Vec<Effect> {
        self.search = query
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());
        self.refresh_search();
        self.last_window = None;
        vec![Effect::Render]
    }

    // ────────────────────────────────────────────────────────────────────
    // Interaction
    // ────────────────────────────────────────────────────────────────────

    /// Toggle expansion from the expand/collapse glyph. Selection is
    /// untouched.
    pub fn toggle_expansion(&mut self, id: &NodeId) -> Vec<Effect> {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.clone());
        }
        self.last_window = None;
        vec![Effect::Render]
    }

    /// Row-body click: select, notify, and expand if collapsed.
    ///
    /// Expansion here is one-way — clicking an expanded row never collapses
    /// it, so inspecting children cannot accidentally fold them away. The
    /// glyph is the only collapse affordance.
    pub fn activate_row(&mut self, id: &NodeId) -> Vec<Effect> {
        let Some(node) = find_in(&self.view, id) else {
            warn!(node = %id, "activate for unknown row ignored");
            return Vec::new();
        };
        let kind = node.kind();
        if node.has_children() {
            self.expanded.insert(id.clone());
        }
        self.selected = Some(id.clone());
        self.last_window = None;
        vec![
            Effect::Render,
            Effect::SelectionChanged {
                id: id.clone(),
                kind,
            },
        ]
    }

    /// Expand every container currently visible under the active search.
    ///
    /// Nodes hidden by the search term keep their expansion state; filters
    /// already removed everything else from the view.
    pub fn expand_all(&mut self) -> Vec<Effect> {
        fn visit(node: &TreeNode, visible: Option<&HashSet<NodeId>>, out: &mut HashSet<NodeId>) {
            let node_visible = visible.is_none_or(|set| set.contains(node.id()));
            if node_visible && node.has_children() {
                out.insert(node.id().clone());
            }
            for child in node.children() {
                visit(child, visible, out);
            }
        }
        let mut to_expand = HashSet::new();
        for root in &self.view {
            visit(root, self.search_visible.as_ref(), &mut to_expand);
        }
        self.expanded.extend(to_expand);
        self.last_window = None;
        vec![Effect::Render]
    }

    /// Collapse everything unconditionally.
    pub fn collapse_all(&mut self) -> Vec<Effect> {
        self.expanded.clear();
        self.last_window = None;
        vec![Effect::Render]
    }

    // ────────────────────────────────────────────────────────────────────
    // Scrolling
    // ────────────────────────────────────────────────────────────────────

    pub fn set_viewport_height(&mut self, px: u32) {
        self.viewport_height = px;
    }

    /// Record a scroll offset; coalesced until the next [`TreeView::on_frame`].
    pub fn on_scroll(&mut self, scroll_top: u32) {
        self.coalescer.push(scroll_top);
    }

    /// Animation-frame tick: drain the pending scroll and decide whether
    /// the virtual window moved enough to re-render.
    pub fn on_frame(&mut self) -> Vec<Effect> {
        let Some(scroll_top) = self.coalescer.take() else {
            return Vec::new();
        };
        self.scroll_top = scroll_top;
        if self.mode() == RenderMode::Full {
            return Vec::new();
        }

        let next = self.current_window();
        let moved = match &self.last_window {
            None => true,
            Some(last) => last.differs_beyond_slack(&next, self.config.rewindow_slack),
        };
        if moved {
            self.last_window = Some(next);
            vec![Effect::Render]
        } else {
            Vec::new()
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Derived state for rendering
    // ────────────────────────────────────────────────────────────────────

    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Filtered roots, for nested full-tree rendering.
    #[must_use]
    pub fn view_roots(&self) -> &[TreeNode] {
        &self.view
    }

    /// All flat rows of the filtered view (search untouched; full-tree mode
    /// hides non-matching rows visually instead of removing them).
    #[must_use]
    pub fn flat_rows(&self) -> Vec<FlatRow<'_>> {
        flatten(&self.view, &self.expanded)
    }

    /// Flat rows with the search pre-filter applied (virtual-window mode).
    #[must_use]
    pub fn searched_rows(&self) -> Vec<FlatRow<'_>> {
        flatten_searched(&self.view, &self.expanded, self.search_visible.as_ref())
    }

    /// Row count the renderer actually materializes space for.
    #[must_use]
    pub fn visible_row_count(&self) -> usize {
        self.searched_rows().len()
    }

    /// Mode follows the unsearched flattened length: a search term narrows
    /// what the window shows but never drops a large tree back into full
    /// rendering, which would materialize every hidden row.
    #[must_use]
    pub fn mode(&self) -> RenderMode {
        mode_for(self.flat_rows().len(), &self.config)
    }

    /// The virtual window for the current scroll position.
    #[must_use]
    pub fn current_window(&self) -> Window {
        Window::compute(
            self.scroll_top,
            self.viewport_height,
            self.visible_row_count(),
            &self.config,
        )
    }

    #[must_use]
    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.contains(id)
    }

    #[must_use]
    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    /// Whether a row is visible under the active search (always true when
    /// no term is set).
    #[must_use]
    pub fn is_search_visible(&self, id: &NodeId) -> bool {
        self.search_visible
            .as_ref()
            .is_none_or(|set| set.contains(id))
    }

    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    #[must_use]
    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    /// Nothing to show: the source is empty or everything was filtered out.
    #[must_use]
    pub fn is_empty_view(&self) -> bool {
        self.confirmed_empty || self.forest.is_empty()
    }

    #[must_use]
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    #[must_use]
    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    // ────────────────────────────────────────────────────────────────────
    // Internals
    // ────────────────────────────────────────────────────────────────────

    /// Recompute the filtered view and the search set over it. Any pending
    /// window is invalidated; structural changes force a fresh render.
    fn rebuild(&mut self) {
        self.view = apply_filters(
            self.forest.roots(),
            &self.filters,
            &self.solutions,
            &self.config,
        );
        self.refresh_search();
        self.last_window = None;
    }

    fn refresh_search(&mut self) {
        self.search_visible = self
            .search
            .as_deref()
            .map(|term| visible_ids(&self.view, term));
    }

    fn drop_stale_selection(&mut self) {
        if let Some(selected) = &self.selected
            && !self.forest.contains(selected)
        {
            self.selected = None;
        }
    }

    pub(crate) fn expanded_ids(&self) -> &HashSet<NodeId> {
        &self.expanded
    }

    /// Swap in restored view state and re-derive everything from it.
    pub(crate) fn apply_persisted(
        &mut self,
        expanded: HashSet<NodeId>,
        selected: Option<NodeId>,
        filters: FilterOptions,
        scroll_top: u32,
    ) {
        self.expanded = expanded;
        self.selected = selected;
        self.filters = filters;
        self.scroll_top = scroll_top;
        self.drop_stale_selection();
        self.rebuild();
    }
}

fn find_in<'a>(nodes: &'a [TreeNode], id: &NodeId) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_in(node.children(), id) {
            return Some(found);
        }
    }
    None
}
