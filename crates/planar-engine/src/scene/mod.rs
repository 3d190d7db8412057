//! Scene graph.
//!
//! Responsibilities:
//! - own the rooted tree of named nodes (parents own children exclusively)
//! - host the component model (at most one component per kind per node)
//! - propagate transform changes with the documented translate/rotate rules
//! - construct nodes of registered behavioral kinds via `NodeRegistry`

mod component;
mod error;
mod node;
mod registry;
mod transform;

pub use component::{Component, ComponentKind, SharedComponent};
pub use error::SceneError;
pub use node::Node;
pub use registry::NodeRegistry;
pub use transform::Transform;
