//! Input dispatch.
//!
//! Translates host toolkit input events into the game's stored handler
//! slots. Handlers run synchronously on the host's event-delivery thread —
//! never on the simulation loop thread — and nothing is queued or buffered,
//! so they are expected to be fast and non-blocking.

mod bundle;
mod dispatch;
mod types;

pub use bundle::{KeyHandler, KeyboardBundle, MouseBundle, MouseHandler};
pub use dispatch::InputDispatcher;
pub use types::{Key, KeyEvent, MouseButton, MouseEvent};
