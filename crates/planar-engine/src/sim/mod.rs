//! Simulation loop.
//!
//! Provides the fixed-rate tick clock and the dedicated loop thread that
//! drives start/update/repaint. Intended usage:
//! - one `LoopShared` + `SimulationLoop` per engine context
//! - the loop thread is the only caller of the game's start/update callbacks

mod sim_loop;
mod tick_clock;

pub use sim_loop::{LoopDriver, LoopShared, LoopState, SimulationLoop};
pub use tick_clock::TickClock;
