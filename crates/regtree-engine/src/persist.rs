//! View-state persistence across panel reloads.
//!
//! Hosts tear panels down and restore them later; [`ViewPersistState`]
//! captures the parts of a [`TreeView`] worth surviving that round trip:
//! expansion, selection, scroll position, and the filter toggles. Tree data
//! itself is not persisted — the host re-pushes a snapshot on reload.
//!
//! With the `state-persistence` feature the state derives serde so hosts
//! can stash it in their own state bags; without it the type still exists
//! for in-process save/restore.
//!
//! Restoring against a tree that has since changed is harmless: expanded
//! ids that no longer exist are ignored by flattening, and a stale
//! selection is dropped during restore.

use crate::filter::FilterOptions;
use crate::view::TreeView;
use regtree_model::{NodeId, SolutionId};
use std::collections::HashSet;

/// Snapshot of one panel's restorable view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct ViewPersistState {
    /// Ids of expanded containers.
    pub expanded: HashSet<String>,
    /// Selected node id, if any.
    pub selected: Option<String>,
    /// Scroll offset in pixels.
    pub scroll_top: u32,
    pub hide_hidden_steps: bool,
    pub hide_vendor_assemblies: bool,
    /// Active solution scope id, if any.
    pub solution: Option<String>,
}

impl TreeView {
    /// Capture the restorable view state.
    #[must_use]
    pub fn save_state(&self) -> ViewPersistState {
        let filters = self.filters();
        ViewPersistState {
            expanded: self
                .expanded_ids()
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            selected: self.selected_id().map(|id| id.as_str().to_string()),
            scroll_top: self.scroll_top(),
            hide_hidden_steps: filters.hide_hidden_steps,
            hide_vendor_assemblies: filters.hide_vendor_assemblies,
            solution: filters.solution.as_ref().map(|s| s.as_str().to_string()),
        }
    }

    /// Restore previously captured view state and re-derive the view.
    pub fn restore_state(&mut self, state: ViewPersistState) {
        let expanded: HashSet<NodeId> = state.expanded.into_iter().map(NodeId::new).collect();
        let filters = FilterOptions {
            hide_hidden_steps: state.hide_hidden_steps,
            hide_vendor_assemblies: state.hide_vendor_assemblies,
            solution: state.solution.map(SolutionId::new),
        };
        self.apply_persisted(
            expanded,
            state.selected.map(NodeId::new),
            filters,
            state.scroll_top,
        );
    }
}
