use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};

use crate::coords::Vec2;
use crate::lock;

use super::{Component, ComponentKind, NodeRegistry, SceneError, SharedComponent, Transform};

/// A named node in the rooted scene tree.
///
/// Parents own their children exclusively (`Arc` held only in the parent's
/// child list); the parent back-reference is a `Weak` used for upward
/// traversal, never for lifetime. Dropping the last `Arc` to a node releases
/// its whole subtree.
///
/// Child and component collections each sit behind their own mutex, and all
/// traversal works on a snapshot taken at call time, so mutation during
/// iteration is defined: the iteration simply sees the list as it was when
/// it started.
pub struct Node {
    name: String,
    parent: Weak<Node>,
    children: Mutex<Vec<Arc<Node>>>,
    transform: Mutex<Transform>,
    components: Mutex<BTreeMap<ComponentKind, SharedComponent>>,
}

impl Node {
    pub(super) fn new(name: impl Into<String>, parent: Weak<Node>) -> Arc<Node> {
        Arc::new(Node {
            name: name.into(),
            parent,
            children: Mutex::new(Vec::new()),
            transform: Mutex::new(Transform::default()),
            components: Mutex::new(BTreeMap::new()),
        })
    }

    /// Creates a parentless root node. The engine builds one ("world")
    /// before the loop starts; every other node hangs below it.
    pub fn root(name: impl Into<String>) -> Arc<Node> {
        Self::new(name, Weak::new())
    }

    /// Node name. Names are labels, not keys; uniqueness is not enforced.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upward traversal; `None` for the root (or a detached subtree root).
    pub fn parent(&self) -> Option<Arc<Node>> {
        self.parent.upgrade()
    }

    // ── children ──────────────────────────────────────────────────────────

    /// Appends a bare structural child (transform only, no components).
    pub fn add_empty_child(self: &Arc<Self>, name: impl Into<String>) -> Arc<Node> {
        let child = Node::new(name, Arc::downgrade(self));
        lock(&self.children).push(child.clone());
        child
    }

    /// Constructs a child of the registered behavioral kind `kind`.
    ///
    /// On factory failure nothing is added and the error is reported to the
    /// caller; the attempt is simply dropped.
    pub fn add_child(
        self: &Arc<Self>,
        registry: &NodeRegistry,
        kind: &str,
        name: impl Into<String>,
    ) -> Result<Arc<Node>, SceneError> {
        registry.construct(self, kind, &name.into())
    }

    /// Appends an already-constructed child whose parent back-reference
    /// points at `self`. Used by the registry after a factory succeeds.
    pub(super) fn adopt(&self, child: Arc<Node>) {
        lock(&self.children).push(child);
    }

    /// Detaches `child` and releases ownership of it.
    ///
    /// Identity-based (`Arc::ptr_eq`); a child not present is a no-op. The
    /// removed node's own children go with it when its last `Arc` drops.
    pub fn remove_child(&self, child: &Arc<Node>) {
        lock(&self.children).retain(|c| !Arc::ptr_eq(c, child));
    }

    /// Removes this node from its parent, if it has one.
    pub fn detach(self: &Arc<Self>) {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
        }
    }

    /// Applies `visitor` to every direct child, in insertion order.
    ///
    /// Iterates over a snapshot taken at call time: children added or
    /// removed by `visitor` (or by another thread) are not reflected in the
    /// ongoing traversal.
    pub fn for_each_child(&self, mut visitor: impl FnMut(&Arc<Node>)) {
        for child in self.children() {
            visitor(&child);
        }
    }

    /// Snapshot of the child list, in insertion order.
    pub fn children(&self) -> Vec<Arc<Node>> {
        lock(&self.children).clone()
    }

    pub fn child_count(&self) -> usize {
        lock(&self.children).len()
    }

    // ── components ────────────────────────────────────────────────────────

    /// Attaches `component`; at most one instance per kind per node.
    pub fn attach(&self, component: Box<dyn Component>) -> Result<(), SceneError> {
        let kind = component.kind();
        let mut map = lock(&self.components);
        if map.contains_key(&kind) {
            return Err(SceneError::DuplicateComponent(kind));
        }
        map.insert(kind, Arc::new(Mutex::new(component)));
        Ok(())
    }

    /// Looks up the component of `kind`, if attached.
    pub fn component(&self, kind: ComponentKind) -> Option<SharedComponent> {
        lock(&self.components).get(&kind).cloned()
    }

    pub fn has_component(&self, kind: ComponentKind) -> bool {
        lock(&self.components).contains_key(&kind)
    }

    /// Per-tick component pass: steps every update-capable component on this
    /// node, then recurses through the child snapshot.
    ///
    /// Runs on the simulation-loop thread. Each component updates under its
    /// own lock only; the component-map lock is not held across user code.
    pub fn update_components(self: &Arc<Self>) {
        let components: Vec<SharedComponent> = lock(&self.components).values().cloned().collect();

        for component in components {
            let mut c = lock(&component);
            if c.updates() {
                c.update(self);
            }
        }

        for child in self.children() {
            child.update_components();
        }
    }

    // ── transform ─────────────────────────────────────────────────────────

    /// Snapshot of the implicit Transform component. Every node has exactly
    /// one, so this never fails.
    pub fn transform(&self) -> Transform {
        *lock(&self.transform)
    }

    pub fn set_transform(&self, t: Transform) {
        *lock(&self.transform) = t;
    }

    /// Moves this node by `delta`, then applies the *same* world-space delta
    /// to every descendant.
    ///
    /// Positions are tracked as flat world-space offsets, not composed
    /// matrices: moving a parent shifts the entire subtree by the identical
    /// vector. Note the asymmetry with [`rotate`], which is intentional.
    pub fn translate(self: &Arc<Self>, delta: Vec2) {
        lock(&self.transform).position += delta;
        for child in self.children() {
            child.translate(delta);
        }
    }

    /// Adds `degrees` to this node's rotation.
    ///
    /// Rotation is local-only and never propagates to children — the
    /// documented counterpart to [`translate`]'s subtree propagation.
    pub fn rotate(&self, degrees: f32) {
        lock(&self.transform).rotation += degrees;
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("children", &self.child_count())
            .field("transform", &self.transform())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_keep_insertion_order() {
        let root = Node::root("world");
        root.add_empty_child("a");
        root.add_empty_child("b");
        root.add_empty_child("c");

        let names: Vec<String> = root
            .children()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn graph_stays_a_tree() {
        let root = Node::root("world");
        let a = root.add_empty_child("a");
        let b = a.add_empty_child("b");

        // Every reachable node's parent pointer refers to the node that
        // added it, and only the root has no parent.
        assert!(root.parent().is_none());
        assert!(Arc::ptr_eq(&a.parent().unwrap(), &root));
        assert!(Arc::ptr_eq(&b.parent().unwrap(), &a));
    }

    #[test]
    fn remove_child_is_identity_based_and_noop_when_absent() {
        let root = Node::root("world");
        let a = root.add_empty_child("dupe");
        let b = root.add_empty_child("dupe");

        root.remove_child(&a);
        let left = root.children();
        assert_eq!(left.len(), 1);
        assert!(Arc::ptr_eq(&left[0], &b));

        // Removing again does nothing.
        root.remove_child(&a);
        assert_eq!(root.child_count(), 1);
    }

    #[test]
    fn removing_a_node_releases_its_subtree() {
        let root = Node::root("world");
        let a = root.add_empty_child("a");
        let b = a.add_empty_child("b");

        let weak_b = Arc::downgrade(&b);
        drop(b);
        root.remove_child(&a);
        drop(a);

        assert!(weak_b.upgrade().is_none());
    }

    #[test]
    fn detach_removes_self_from_parent() {
        let root = Node::root("world");
        let a = root.add_empty_child("a");
        a.detach();
        assert_eq!(root.child_count(), 0);
        assert!(a.parent().is_some()); // back-reference survives; lifetime does not depend on it
    }

    #[test]
    fn for_each_child_iterates_a_snapshot() {
        let root = Node::root("world");
        root.add_empty_child("a");
        root.add_empty_child("b");

        let mut seen = 0;
        let root2 = root.clone();
        root.for_each_child(|child| {
            seen += 1;
            // Mutating mid-traversal neither panics nor extends the walk.
            root2.remove_child(child);
            root2.add_empty_child("late");
        });
        assert_eq!(seen, 2);
    }

    #[test]
    fn translate_shifts_every_descendant_by_the_same_delta() {
        let root = Node::root("world");
        let a = root.add_empty_child("a");
        let b = a.add_empty_child("b");
        b.set_transform(Transform::new(Vec2::new(5.0, 5.0), 0.0));

        let delta = Vec2::new(2.0, -3.0);
        root.translate(delta);

        assert_eq!(root.transform().position, delta);
        assert_eq!(a.transform().position, delta);
        assert_eq!(b.transform().position, Vec2::new(7.0, 2.0));
    }

    #[test]
    fn rotate_is_local_only() {
        let root = Node::root("world");
        let a = root.add_empty_child("a");

        root.rotate(90.0);
        root.rotate(45.0);

        assert_eq!(root.transform().rotation, 135.0);
        assert_eq!(a.transform().rotation, 0.0);
    }

    struct Counter {
        ticks: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    }

    impl Component for Counter {
        fn kind(&self) -> ComponentKind {
            ComponentKind("counter")
        }
        fn updates(&self) -> bool {
            true
        }
        fn update(&mut self, _node: &Arc<Node>) {
            self.ticks.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
    }

    struct Inert;

    impl Component for Inert {
        fn kind(&self) -> ComponentKind {
            ComponentKind("inert")
        }
    }

    #[test]
    fn one_component_per_kind() {
        let root = Node::root("world");
        assert!(root.attach(Box::new(Inert)).is_ok());
        let err = root.attach(Box::new(Inert)).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateComponent(_)));
    }

    #[test]
    fn update_pass_steps_update_capable_components_across_the_tree() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let ticks = std::sync::Arc::new(AtomicUsize::new(0));
        let root = Node::root("world");
        let child = root.add_empty_child("child");

        root.attach(Box::new(Counter { ticks: ticks.clone() })).unwrap();
        root.attach(Box::new(Inert)).unwrap();
        child
            .attach(Box::new(Counter { ticks: ticks.clone() }))
            .unwrap();

        root.update_components();
        root.update_components();

        // Two update-capable components, two ticks each.
        assert_eq!(ticks.load(Ordering::SeqCst), 4);
    }
}
