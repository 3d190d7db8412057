use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::coords::Vec2;
use crate::lock;
use crate::sim::LoopShared;

use super::Gfx;

/// A registered draw callback. `Fn` (not `FnMut`) because the pipeline is
/// shared across threads; callbacks needing state carry their own interior
/// mutability.
pub type RenderFn = Arc<dyn Fn(&mut Gfx) + Send + Sync>;

/// Token returned on registration, used for removal.
///
/// Closures have no usable identity in Rust, so removal works by id rather
/// than by callback value; removing an id that is not registered is a no-op.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CallbackId(u64);

struct Slot {
    id: CallbackId,
    draw: RenderFn,
}

/// Ordered draw-callback collections composed into one frame per repaint.
///
/// Composition order: the base graphics callback once, then every image
/// callback in insertion order, then every particle callback in insertion
/// order. Both collections may be mutated from game or component code at
/// any time; each pass iterates a snapshot taken at call time.
pub struct Pipeline {
    base: RenderFn,
    images: Mutex<Vec<Slot>>,
    particles: Mutex<Vec<Slot>>,
    translation: Mutex<Vec2>,
    next_id: AtomicU64,
    /// Loop status probe; present iff the engine runs with a positive tick
    /// rate. When present and the loop is not alive, render passes are
    /// skipped (no drawing into a context that is mid-teardown).
    gate: Mutex<Option<Arc<LoopShared>>>,
}

impl Pipeline {
    pub fn new(base: RenderFn) -> Self {
        Self {
            base,
            images: Mutex::new(Vec::new()),
            particles: Mutex::new(Vec::new()),
            translation: Mutex::new(Vec2::zero()),
            next_id: AtomicU64::new(1),
            gate: Mutex::new(None),
        }
    }

    pub(crate) fn attach_loop(&self, loop_shared: Arc<LoopShared>) {
        *lock(&self.gate) = Some(loop_shared);
    }

    /// Frame-wide translation vector copied into each frame's [`Gfx`].
    pub fn translation(&self) -> Vec2 {
        *lock(&self.translation)
    }

    pub fn set_translation(&self, translation: Vec2) {
        *lock(&self.translation) = translation;
    }

    fn next_id(&self) -> CallbackId {
        CallbackId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Registers a visual-object renderer; drawn after the base callback.
    pub fn add_image_render_method(&self, draw: RenderFn) -> CallbackId {
        let id = self.next_id();
        lock(&self.images).push(Slot { id, draw });
        id
    }

    /// Unregisters an image renderer; unknown ids are a no-op.
    pub fn remove_image_render_method(&self, id: CallbackId) {
        lock(&self.images).retain(|slot| slot.id != id);
    }

    /// Registers a particle-system renderer; drawn after all image renderers.
    pub fn add_particle_render_method(&self, draw: RenderFn) -> CallbackId {
        let id = self.next_id();
        lock(&self.particles).push(Slot { id, draw });
        id
    }

    /// Unregisters a particle renderer; unknown ids are a no-op.
    pub fn remove_particle_render_method(&self, id: CallbackId) {
        lock(&self.particles).retain(|slot| slot.id != id);
    }

    /// Composes one frame: base callback, image callbacks in insertion
    /// order, particle callbacks in insertion order.
    ///
    /// Skipped entirely while the configured simulation loop is not alive.
    /// Runs on whichever thread the host delivers repaints on.
    pub fn render(&self, gfx: &mut Gfx) {
        if let Some(loop_shared) = lock(&self.gate).clone() {
            if !loop_shared.is_alive() {
                log::trace!("render pass skipped: simulation loop not alive");
                return;
            }
        }

        (self.base)(gfx);

        // Snapshots: callbacks may add/remove entries mid-pass without
        // affecting this frame's ordering.
        let images: Vec<RenderFn> = lock(&self.images).iter().map(|s| s.draw.clone()).collect();
        let particles: Vec<RenderFn> =
            lock(&self.particles).iter().map(|s| s.draw.clone()).collect();

        for draw in images {
            draw(gfx);
        }
        for draw in particles {
            draw(gfx);
        }
    }
}
