//! Engine context.
//!
//! This module owns the process-wide runtime state: configuration, the
//! typed error taxonomy, the one-live-instance rule, and the wiring that
//! turns a config plus game callbacks into a running scene, loop, and
//! pipeline.

mod config;
mod engine;
mod error;

pub use config::EngineConfig;
pub use engine::{Collaborators, Engine, EngineHandle, GameCallbacks, Visualizer};
pub use error::EngineError;
