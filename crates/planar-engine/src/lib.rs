//! Planar engine crate.
//!
//! Runtime core of a small real-time 2D engine: a process-wide engine
//! context, a fixed-rate simulation loop on its own thread, a hierarchical
//! scene graph with attachable components, a draw-callback render pipeline,
//! and input dispatch bridged from the host toolkit.

pub mod assets;
pub mod coords;
pub mod core;
pub mod input;
pub mod logging;
pub mod render;
pub mod scene;
pub mod sim;
pub mod window;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks a mutex, absorbing poisoning.
///
/// A panicked callback on one thread must not wedge the collections every
/// other thread still reads; the engine favors log-and-continue over aborts.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
