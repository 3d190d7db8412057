use super::{KeyEvent, MouseEvent};

pub type KeyHandler = Box<dyn Fn(&KeyEvent) + Send + Sync>;
pub type MouseHandler = Box<dyn Fn(&MouseEvent) + Send + Sync>;

/// Optional keyboard handler slots.
///
/// An unset slot means the event kind is unused — delivery is silently
/// dropped, which is the documented default, not an error. A bundle with
/// every slot unset disables keyboard listening entirely.
#[derive(Default)]
pub struct KeyboardBundle {
    pub pressed: Option<KeyHandler>,
    pub typed: Option<KeyHandler>,
    pub released: Option<KeyHandler>,
}

impl KeyboardBundle {
    /// True iff every slot is unset; the signal to skip listener
    /// registration for the keyboard.
    pub fn is_empty(&self) -> bool {
        self.pressed.is_none() && self.typed.is_none() && self.released.is_none()
    }
}

/// Optional mouse handler slots; same conventions as [`KeyboardBundle`].
#[derive(Default)]
pub struct MouseBundle {
    pub clicked: Option<MouseHandler>,
    pub entered: Option<MouseHandler>,
    pub exited: Option<MouseHandler>,
    pub pressed: Option<MouseHandler>,
    pub released: Option<MouseHandler>,
}

impl MouseBundle {
    pub fn is_empty(&self) -> bool {
        self.clicked.is_none()
            && self.entered.is_none()
            && self.exited.is_none()
            && self.pressed.is_none()
            && self.released.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundles_are_empty_until_any_slot_is_set() {
        assert!(KeyboardBundle::default().is_empty());
        assert!(MouseBundle::default().is_empty());

        let keyboard = KeyboardBundle {
            typed: Some(Box::new(|_ev| {})),
            ..Default::default()
        };
        assert!(!keyboard.is_empty());

        let mouse = MouseBundle {
            exited: Some(Box::new(|_ev| {})),
            ..Default::default()
        };
        assert!(!mouse.is_empty());
    }
}
