use crate::coords::Vec2;

/// Keyboard key identifier, trimmed to what 2D games commonly bind.
///
/// The host bridge maps platform keycodes into these variants; anything
/// unmapped arrives as `Key::Unknown` with the platform's raw code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Platform key not represented above.
    Unknown(u32),
}

/// A keyboard event as delivered to a handler slot.
///
/// `ch` carries the produced character for "typed" events; press/release
/// events leave it unset.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub ch: Option<char>,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// A mouse event as delivered to a handler slot.
///
/// `button` is unset for enter/exit events, which have no button of their
/// own; `position` is the last known cursor position in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseEvent {
    pub position: Vec2,
    pub button: Option<MouseButton>,
}
