use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::lock;

use super::{Node, SceneError};

/// Factory for a behavioral node kind.
///
/// Receives the freshly constructed (not yet parented) node and attaches
/// whatever components the kind calls for. Returning an error drops the
/// node; nothing is added to the scene.
pub type NodeFactory = Arc<dyn Fn(&Arc<Node>) -> Result<(), SceneError> + Send + Sync>;

/// Maps node-kind identifiers to factories.
///
/// This replaces construct-by-runtime-type-token: kinds are registered at
/// startup under a string id, and lookup of an unknown id is a typed
/// failure, not a reflective dig through constructors.
#[derive(Default)]
pub struct NodeRegistry {
    factories: Mutex<HashMap<String, NodeFactory>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `kind`, replacing any previous entry.
    pub fn register<F>(&self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&Arc<Node>) -> Result<(), SceneError> + Send + Sync + 'static,
    {
        let kind = kind.into();
        let previous = lock(&self.factories).insert(kind.clone(), Arc::new(factory));
        if previous.is_some() {
            log::warn!("node kind `{kind}` re-registered; previous factory replaced");
        }
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        lock(&self.factories).contains_key(kind)
    }

    /// Builds a node of `kind` named `name` under `parent`.
    ///
    /// The child is appended to the parent's child list only after the
    /// factory succeeds, so a failed construction leaves the scene exactly
    /// as it was. Failures are reported, not fatal.
    pub(super) fn construct(
        &self,
        parent: &Arc<Node>,
        kind: &str,
        name: &str,
    ) -> Result<Arc<Node>, SceneError> {
        // Snapshot the factory so user code runs outside the map lock.
        let factory = lock(&self.factories).get(kind).cloned();
        let Some(factory) = factory else {
            let err = SceneError::UnknownKind(kind.to_string());
            log::error!("{err}");
            return Err(err);
        };

        let child = Node::new(name, Arc::downgrade(parent));
        if let Err(err) = factory(&child) {
            log::error!("{err}");
            return Err(err);
        }

        parent.adopt(child.clone());
        Ok(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Component, ComponentKind};

    struct Tag;

    impl Component for Tag {
        fn kind(&self) -> ComponentKind {
            ComponentKind("tag")
        }
    }

    #[test]
    fn registered_kind_attaches_its_components() {
        let registry = NodeRegistry::new();
        registry.register("tagged", |node: &Arc<Node>| {
            node.attach(Box::new(Tag))?;
            Ok(())
        });

        let root = Node::root("world");
        let child = root.add_child(&registry, "tagged", "t").unwrap();

        assert!(child.has_component(ComponentKind("tag")));
        assert_eq!(root.child_count(), 1);
        assert!(Arc::ptr_eq(&child.parent().unwrap(), &root));
    }

    #[test]
    fn unknown_kind_is_a_typed_failure_and_adds_nothing() {
        let registry = NodeRegistry::new();
        let root = Node::root("world");

        let err = root.add_child(&registry, "ghost", "g").unwrap_err();
        assert!(matches!(err, SceneError::UnknownKind(_)));
        assert_eq!(root.child_count(), 0);
    }

    #[test]
    fn failing_factory_drops_the_attempt() {
        let registry = NodeRegistry::new();
        registry.register("broken", |_node: &Arc<Node>| {
            Err(SceneError::ConstructionFailed {
                kind: "broken".into(),
                name: "b".into(),
                reason: "resource missing".into(),
            })
        });

        let root = Node::root("world");
        let err = root.add_child(&registry, "broken", "b").unwrap_err();
        assert!(matches!(err, SceneError::ConstructionFailed { .. }));
        assert_eq!(root.child_count(), 0);
    }
}
