use std::sync::{Arc, Mutex};

use crate::lock;

/// Something that can schedule a repaint — the host window in production,
/// a counter in tests.
pub trait RepaintTarget: Send + Sync {
    fn request_repaint(&self);
}

/// Late-bound handle to the render surface.
///
/// The simulation loop starts before the host window exists (the window is
/// only created once the host event loop resumes), so the loop holds this
/// handle instead of the window. Requests before a target is bound are
/// dropped; the first presented frame catches up naturally.
#[derive(Default)]
pub struct RepaintHandle {
    target: Mutex<Option<Arc<dyn RepaintTarget>>>,
}

impl RepaintHandle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Binds (or rebinds) the concrete surface.
    pub fn bind(&self, target: Arc<dyn RepaintTarget>) {
        *lock(&self.target) = Some(target);
    }

    pub fn is_bound(&self) -> bool {
        lock(&self.target).is_some()
    }

    /// Forwards a repaint request to the bound target, if any.
    pub fn request_repaint(&self) {
        // Clone out of the lock; the target may re-enter engine code.
        let target = lock(&self.target).clone();
        if let Some(target) = target {
            target.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTarget(AtomicUsize);

    impl RepaintTarget for CountingTarget {
        fn request_repaint(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn requests_before_binding_are_dropped() {
        let handle = RepaintHandle::new();
        assert!(!handle.is_bound());

        // No target yet: nothing to deliver to, nothing to panic over.
        handle.request_repaint();

        let target = Arc::new(CountingTarget(AtomicUsize::new(0)));
        handle.bind(target.clone());
        assert!(handle.is_bound());

        handle.request_repaint();
        handle.request_repaint();
        assert_eq!(target.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn rebinding_redirects_later_requests() {
        let handle = RepaintHandle::new();
        let first = Arc::new(CountingTarget(AtomicUsize::new(0)));
        let second = Arc::new(CountingTarget(AtomicUsize::new(0)));

        handle.bind(first.clone());
        handle.request_repaint();

        handle.bind(second.clone());
        handle.request_repaint();

        assert_eq!(first.0.load(Ordering::SeqCst), 1);
        assert_eq!(second.0.load(Ordering::SeqCst), 1);
    }
}
