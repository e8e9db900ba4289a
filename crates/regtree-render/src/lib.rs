#![forbid(unsafe_code)]

//! Render: pure projection from controller state to row visuals and markup.
//!
//! Nothing in this crate holds state. Every function recomputes its output
//! from a [`regtree_engine::TreeView`] borrow, so the rendered markup can
//! never disagree with the controller about what is expanded, selected, or
//! visible.

pub mod markup;
pub mod row;

pub use markup::{empty_state, loading_progress, render_tree};
pub use row::{Badge, MenuDescriptor, RowClasses, RowVisual, ToggleMarker, compose_row};
