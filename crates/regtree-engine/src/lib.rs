#![forbid(unsafe_code)]

//! Engine: filtering, search, flattening, windowing, and the owning
//! [`TreeView`] controller for the registration tree.
//!
//! The engine is headless and single-threaded: every operation is a
//! synchronous state transition on one [`TreeView`] instance, and rendering
//! is a pure projection computed elsewhere from the controller's derived
//! state. Hosts with more than one panel run one controller per panel.

pub mod config;
pub mod effect;
pub mod filter;
pub mod flatten;
pub mod persist;
pub mod search;
pub mod view;
pub mod window;

pub use config::ViewConfig;
pub use effect::Effect;
pub use filter::FilterOptions;
pub use flatten::FlatRow;
pub use persist::ViewPersistState;
pub use view::TreeView;
pub use window::{RenderMode, ScrollCoalescer, Window};
