use std::fmt;
use std::sync::{Arc, Mutex};

use crate::render::Gfx;

use super::Node;

/// Identifier for a component kind.
///
/// A node carries at most one component per kind; the id doubles as the
/// component-map key and as the lookup token for removal/queries.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ComponentKind(pub &'static str);

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A component as stored on a node.
///
/// Each component sits behind its own lock so the per-tick update pass can
/// run user code without holding the node's component-map lock.
pub type SharedComponent = Arc<Mutex<Box<dyn Component>>>;

/// Behavior or data attached to exactly one scene node.
///
/// Capabilities are opt-in: a component that overrides [`update`] (and
/// reports so via [`updates`]) is stepped once per simulation tick on the
/// loop thread; a component that draws registers a callback with the render
/// pipeline, typically from its node-kind factory, and may route it through
/// [`render`].
///
/// The owning node is passed into `update` rather than stored, which keeps
/// the owner back-reference non-owning by construction. A component that
/// must remember its node should hold a `Weak<Node>`.
pub trait Component: Send {
    /// Kind id; one component per kind per node.
    fn kind(&self) -> ComponentKind;

    /// Whether [`update`] should be called each tick.
    fn updates(&self) -> bool {
        false
    }

    /// Per-tick step, on the simulation-loop thread.
    fn update(&mut self, node: &Arc<Node>) {
        let _ = node;
    }

    /// Optional draw hook for render-capable components.
    fn render(&mut self, gfx: &mut Gfx) {
        let _ = gfx;
    }
}
