//! Row visual composition.
//!
//! A [`RowVisual`] is the deterministic visual description of one node at
//! one depth: indentation, state classes, toggle marker, icon, badge, and
//! the context-menu descriptor. Markup assembly lives in [`crate::markup`];
//! hosts that bypass markup (native menus, tests) consume the typed fields
//! directly.

use bitflags::bitflags;
use regtree_engine::TreeView;
use regtree_model::{Capabilities, ExecutionMode, NodeData, NodeId, NodeKind, Stage, TreeNode};

bitflags! {
    /// Visual state classes applied to a row.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RowClasses: u8 {
        const SELECTED = 1 << 0;
        const MANAGED = 1 << 1;
        /// Step exists but is disabled.
        const DISABLED = 1 << 2;
        /// Row is outside the active search's visible set (full-tree mode
        /// keeps the row in the markup and hides it visually).
        const SEARCH_HIDDEN = 1 << 3;
    }
}

impl RowClasses {
    /// CSS class tokens for the set flags, in stable order.
    #[must_use]
    pub fn tokens(self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.contains(RowClasses::SELECTED) {
            out.push("selected");
        }
        if self.contains(RowClasses::MANAGED) {
            out.push("managed");
        }
        if self.contains(RowClasses::DISABLED) {
            out.push("disabled");
        }
        if self.contains(RowClasses::SEARCH_HIDDEN) {
            out.push("search-hidden");
        }
        out
    }
}

/// Expand/collapse affordance shown at the left edge of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleMarker {
    Expanded,
    Collapsed,
    /// No children: render a spacer instead of a glyph.
    Leaf,
}

/// Secondary annotation rendered after the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    /// Number of children on a container row.
    ChildCount(usize),
    /// Pipeline summary on a step row.
    StepSummary { stage: Stage, mode: ExecutionMode },
}

/// Typed context-menu payload for one row.
///
/// Handed to the host's menu system as data; capability flags gate which
/// menu entries its "when" clauses enable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDescriptor {
    pub id: NodeId,
    pub kind: NodeKind,
    pub caps: Capabilities,
}

/// Complete visual description of one rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowVisual {
    pub id: NodeId,
    pub kind: NodeKind,
    pub depth: usize,
    /// Left padding in pixels (depth × indent unit).
    pub indent_px: u32,
    /// Raw display name; markup assembly escapes it.
    pub label: String,
    pub classes: RowClasses,
    pub toggle: ToggleMarker,
    /// Producer-supplied hint, or the kind-keyed fallback.
    pub icon: String,
    pub badge: Option<Badge>,
    pub menu: MenuDescriptor,
}

/// Fallback icon name when the producer supplied no hint.
#[must_use]
pub const fn fallback_icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Package => "package",
        NodeKind::Assembly => "library",
        NodeKind::PluginType => "symbol-class",
        NodeKind::Step => "symbol-event",
        NodeKind::Image => "file-media",
        NodeKind::WebHook => "plug",
        NodeKind::ServiceEndpoint => "cloud",
        NodeKind::DataProvider => "database",
        NodeKind::CustomApi => "symbol-method",
    }
}

/// Compute the visual description of `node` rendered at `depth`.
#[must_use]
pub fn compose_row(node: &TreeNode, depth: usize, view: &TreeView) -> RowVisual {
    let id = node.id().clone();
    let kind = node.kind();

    let mut classes = RowClasses::empty();
    if view.is_selected(&id) {
        classes |= RowClasses::SELECTED;
    }
    if node.is_managed() {
        classes |= RowClasses::MANAGED;
    }
    if node.step_data().is_some_and(|step| !step.enabled) {
        classes |= RowClasses::DISABLED;
    }
    if !view.is_search_visible(&id) {
        classes |= RowClasses::SEARCH_HIDDEN;
    }

    let toggle = if !node.has_children() {
        ToggleMarker::Leaf
    } else if view.is_expanded(&id) {
        ToggleMarker::Expanded
    } else {
        ToggleMarker::Collapsed
    };

    let badge = match node.data() {
        NodeData::Step(step) => Some(Badge::StepSummary {
            stage: step.stage,
            mode: step.mode,
        }),
        _ if node.has_children() => Some(Badge::ChildCount(node.children().len())),
        _ => None,
    };

    RowVisual {
        kind,
        depth,
        indent_px: depth as u32 * view.config().indent_unit,
        label: node.label().to_string(),
        classes,
        toggle,
        icon: node
            .icon()
            .map_or_else(|| fallback_icon(kind).to_string(), str::to_string),
        badge,
        menu: MenuDescriptor {
            id: id.clone(),
            kind,
            caps: node.caps(),
        },
        id,
    }
}
