//! Render pipeline.
//!
//! Responsibilities:
//! - compose one frame per repaint from ordered draw callbacks
//! - expose the renderer-agnostic `Gfx` context callbacks record into
//! - provide the late-bound repaint handle the simulation loop pokes
//!
//! Pixel-level drawing stays external: the core orders the callbacks and
//! carries their recorded commands, it never interprets them.

mod gfx;
mod pipeline;
mod surface;

pub use gfx::{DrawCmd, Gfx};
pub use pipeline::{CallbackId, Pipeline, RenderFn};
pub use surface::{RepaintHandle, RepaintTarget};
