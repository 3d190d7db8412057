use thiserror::Error;

use super::ComponentKind;

/// Failures raised by scene-graph operations.
///
/// None of these are fatal: the attempt is dropped, the caller gets the
/// failure, and the rest of the scene is untouched.
#[derive(Debug, Error)]
pub enum SceneError {
    /// No factory is registered for the requested node kind.
    #[error("unknown node kind `{0}`")]
    UnknownKind(String),

    /// A registered factory failed; the node was not added.
    #[error("construction of node `{name}` (kind `{kind}`) failed: {reason}")]
    ConstructionFailed {
        kind: String,
        name: String,
        reason: String,
    },

    /// The node already carries a component of this kind.
    #[error("node already has a `{0}` component")]
    DuplicateComponent(ComponentKind),
}
