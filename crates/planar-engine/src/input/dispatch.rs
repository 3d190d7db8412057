use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::coords::Vec2;

use super::{Key, KeyEvent, KeyboardBundle, MouseBundle, MouseButton, MouseEvent};

/// Routes host input events into the registered handler slots.
///
/// Construction takes the bundles once; an empty bundle disables the whole
/// device (no slot will ever fire). Translation state (cursor position,
/// pending click) lives here, so the dispatcher is driven mutably by the
/// single host event thread while the slots themselves stay immutable.
pub struct InputDispatcher {
    keyboard: Option<KeyboardBundle>,
    mouse: Option<MouseBundle>,

    pointer: Vec2,
    /// Button of the last unreleased press, for click synthesis.
    pressed_button: Option<MouseButton>,
}

impl InputDispatcher {
    pub fn new(keyboard: KeyboardBundle, mouse: MouseBundle) -> Self {
        Self {
            keyboard: (!keyboard.is_empty()).then_some(keyboard),
            mouse: (!mouse.is_empty()).then_some(mouse),
            pointer: Vec2::zero(),
            pressed_button: None,
        }
    }

    /// Whether keyboard listening is registered at all.
    pub fn keyboard_registered(&self) -> bool {
        self.keyboard.is_some()
    }

    pub fn mouse_registered(&self) -> bool {
        self.mouse.is_some()
    }

    // ── slot delivery (unset slot ⇒ silently dropped) ─────────────────────

    fn fire_key(slot: Option<&super::KeyHandler>, ev: &KeyEvent) {
        if let Some(handler) = slot {
            handler(ev);
        }
    }

    fn fire_mouse(slot: Option<&super::MouseHandler>, ev: &MouseEvent) {
        if let Some(handler) = slot {
            handler(ev);
        }
    }

    // ── device-agnostic event entry points ────────────────────────────────

    /// Records the cursor position; moves have no handler slot of their own.
    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer = position;
    }

    pub fn pointer_entered(&mut self) {
        let ev = MouseEvent {
            position: self.pointer,
            button: None,
        };
        Self::fire_mouse(self.mouse.as_ref().and_then(|m| m.entered.as_ref()), &ev);
    }

    pub fn pointer_exited(&mut self) {
        // Leaving the surface cancels any pending click.
        self.pressed_button = None;
        let ev = MouseEvent {
            position: self.pointer,
            button: None,
        };
        Self::fire_mouse(self.mouse.as_ref().and_then(|m| m.exited.as_ref()), &ev);
    }

    /// Press/release for a mouse button. A release matching the pending
    /// press additionally fires `clicked` (press-then-release semantics).
    pub fn button_changed(&mut self, button: MouseButton, pressed: bool) {
        let ev = MouseEvent {
            position: self.pointer,
            button: Some(button),
        };

        if pressed {
            self.pressed_button = Some(button);
            Self::fire_mouse(self.mouse.as_ref().and_then(|m| m.pressed.as_ref()), &ev);
        } else {
            Self::fire_mouse(self.mouse.as_ref().and_then(|m| m.released.as_ref()), &ev);
            if self.pressed_button.take() == Some(button) {
                Self::fire_mouse(self.mouse.as_ref().and_then(|m| m.clicked.as_ref()), &ev);
            }
        }
    }

    /// Key press/release; a press carrying produced text also fires one
    /// `typed` event per character.
    pub fn key_changed(&mut self, key: Key, pressed: bool, text: Option<&str>) {
        let ev = KeyEvent { key, ch: None };

        if pressed {
            Self::fire_key(self.keyboard.as_ref().and_then(|k| k.pressed.as_ref()), &ev);
            if let Some(text) = text {
                for ch in text.chars() {
                    let typed = KeyEvent { key, ch: Some(ch) };
                    Self::fire_key(
                        self.keyboard.as_ref().and_then(|k| k.typed.as_ref()),
                        &typed,
                    );
                }
            }
        } else {
            Self::fire_key(
                self.keyboard.as_ref().and_then(|k| k.released.as_ref()),
                &ev,
            );
        }
    }

    // ── host (winit) translation ──────────────────────────────────────────

    /// Translates one host window event and delivers it. Called on the host
    /// event thread; unrelated event kinds fall through untouched.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(to_logical(window, *position));
            }

            WindowEvent::CursorEntered { .. } => self.pointer_entered(),
            WindowEvent::CursorLeft { .. } => self.pointer_exited(),

            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                self.button_changed(map_mouse_button(*button), pressed);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let key = map_key(event.physical_key);
                let pressed = event.state == ElementState::Pressed;
                let text = event.text.as_ref().map(|t| t.as_str());
                self.key_changed(key, pressed, text);
            }

            _ => {}
        }
    }
}

fn to_logical(window: &Window, position: PhysicalPosition<f64>) -> Vec2 {
    let logical = position.to_logical::<f64>(window.scale_factor());
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(physical: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = physical else {
        return Key::Unknown(0);
    };

    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Space => Key::Space,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,

        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        other => Key::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_key_slot(counter: &Arc<AtomicUsize>) -> super::super::KeyHandler {
        let c = counter.clone();
        Box::new(move |_ev| {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn counting_mouse_slot(counter: &Arc<AtomicUsize>) -> super::super::MouseHandler {
        let c = counter.clone();
        Box::new(move |_ev| {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn empty_bundles_disable_the_device() {
        let dispatcher = InputDispatcher::new(KeyboardBundle::default(), MouseBundle::default());
        assert!(!dispatcher.keyboard_registered());
        assert!(!dispatcher.mouse_registered());
    }

    #[test]
    fn unset_slots_drop_events_silently() {
        let presses = Arc::new(AtomicUsize::new(0));
        let keyboard = KeyboardBundle {
            pressed: Some(counting_key_slot(&presses)),
            ..Default::default()
        };

        let mut dispatcher = InputDispatcher::new(keyboard, MouseBundle::default());

        // `released` and `typed` are unset: no observable call, no error.
        dispatcher.key_changed(Key::Space, true, Some(" "));
        dispatcher.key_changed(Key::Space, false, None);

        assert_eq!(presses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn typed_fires_once_per_produced_character() {
        let typed = Arc::new(AtomicUsize::new(0));
        let keyboard = KeyboardBundle {
            typed: Some(counting_key_slot(&typed)),
            ..Default::default()
        };

        let mut dispatcher = InputDispatcher::new(keyboard, MouseBundle::default());
        dispatcher.key_changed(Key::A, true, Some("ab"));
        dispatcher.key_changed(Key::A, false, None);

        assert_eq!(typed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn click_is_synthesized_from_press_then_release() {
        let clicks = Arc::new(AtomicUsize::new(0));
        let mouse = MouseBundle {
            clicked: Some(counting_mouse_slot(&clicks)),
            ..Default::default()
        };

        let mut dispatcher = InputDispatcher::new(KeyboardBundle::default(), mouse);

        dispatcher.button_changed(MouseButton::Left, true);
        dispatcher.button_changed(MouseButton::Left, false);
        assert_eq!(clicks.load(Ordering::SeqCst), 1);

        // A release with no matching press is not a click.
        dispatcher.button_changed(MouseButton::Left, false);
        assert_eq!(clicks.load(Ordering::SeqCst), 1);

        // Leaving the surface cancels the pending click.
        dispatcher.button_changed(MouseButton::Left, true);
        dispatcher.pointer_exited();
        dispatcher.button_changed(MouseButton::Left, false);
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handlers_see_the_last_known_pointer_position() {
        let seen = Arc::new(std::sync::Mutex::new(Vec2::zero()));
        let s = seen.clone();
        let mouse = MouseBundle {
            pressed: Some(Box::new(move |ev| {
                *crate::lock(&s) = ev.position;
            })),
            ..Default::default()
        };

        let mut dispatcher = InputDispatcher::new(KeyboardBundle::default(), mouse);
        dispatcher.pointer_moved(Vec2::new(12.0, 34.0));
        dispatcher.button_changed(MouseButton::Right, true);

        assert_eq!(*crate::lock(&seen), Vec2::new(12.0, 34.0));
    }
}
