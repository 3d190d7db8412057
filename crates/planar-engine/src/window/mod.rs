//! Host-toolkit bridge.
//!
//! Owns the winit event loop on the main thread, creates the single engine
//! window, binds it as the repaint target, and forwards window events into
//! the input dispatcher and render pipeline.

mod runtime;

pub use runtime::run;
