#![forbid(unsafe_code)]

//! Regtree public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a
//! lightweight prelude for host shells that drive one panel end to end.

// --- Model re-exports ------------------------------------------------------

pub use regtree_model::{
    AssemblyData, Capabilities, ExecutionMode, Forest, NodeData, NodeId, NodeKind, SolutionId,
    SolutionIndex, Stage, StepData, TreeNode,
};

// --- Engine re-exports -----------------------------------------------------

pub use regtree_engine::{
    Effect, FilterOptions, FlatRow, RenderMode, ScrollCoalescer, TreeView, ViewConfig,
    ViewPersistState, Window,
};

// --- Render re-exports -----------------------------------------------------

pub use regtree_render::{
    Badge, MenuDescriptor, RowClasses, RowVisual, ToggleMarker, compose_row, render_tree,
};

// --- Protocol re-exports ---------------------------------------------------

pub use regtree_protocol::{HostCommand, Outcome, PanelBridge, ProtocolError, ViewEvent};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Effect, HostCommand, NodeData, NodeId, NodeKind, Outcome, PanelBridge, TreeNode, TreeView,
        ViewConfig, ViewEvent,
    };

    pub use crate::{engine, model, protocol, render};
}

pub use regtree_engine as engine;
pub use regtree_model as model;
pub use regtree_protocol as protocol;
pub use regtree_render as render;
