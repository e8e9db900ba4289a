//! Follow-up effects reported by controller operations.

use regtree_model::{NodeId, NodeKind};

/// What the host shell must do after a controller operation.
///
/// Mutations deliberately report a full re-render rather than a targeted
/// patch: row positions shift under the virtual window whenever sibling
/// counts change, and mutations are discrete user actions, so correctness
/// wins over per-mutation efficiency here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Re-render the filtered, flattened tree (search re-applied).
    Render,
    /// Replace the tree with the explicit empty-state presentation.
    ShowEmptyState,
    /// Show the loading progress presentation, hiding the tree.
    ShowProgress { step: String, percent: u8 },
    /// Bring the row for this node into the viewport, centered.
    ScrollIntoView { id: NodeId },
    /// Selection moved; forward `selectNode` to the host process.
    SelectionChanged { id: NodeId, kind: NodeKind },
}
