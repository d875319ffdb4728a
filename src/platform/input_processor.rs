//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit window events into engine Events.
//
// Architecture:
//   WindowEvent → InputProcessor → Event → display signal channel
//
// Stateful modifier tracking: caches the state from ModifiersChanged and
// stamps it onto every subsequent key/mouse event. Unmapped keys (F-keys,
// numpad, media keys) are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{Event, KeyCode, Modifiers, MouseButton};

//=== InputProcessor ======================================================

/// Converts winit input to engine events with sticky modifier state.
pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
        }
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates cached modifier state (applied to subsequent events).
    pub(crate) fn update_modifiers(&mut self, modifiers_state: ModifiersState) {
        self.current_modifiers = Modifiers::from(modifiers_state);
    }

    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a winit KeyEvent (filters unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<Event> {
        match key_event.physical_key {
            PhysicalKey::Code(code) => self.process_key(code, key_event.state),
            _ => None,
        }
    }

    /// Converts a physical key transition (filters unmapped keys).
    pub(crate) fn process_key(&self, code: WinitKeyCode, state: ElementState) -> Option<Event> {
        let key = KeyCode::from(code);
        if key == KeyCode::Unidentified {
            return None;
        }

        let modifiers = self.current_modifiers;
        Some(match state {
            ElementState::Pressed => Event::KeyDown { key, modifiers },
            ElementState::Released => Event::KeyUp { key, modifiers },
        })
    }

    /// Converts a mouse button transition (with modifiers).
    pub(crate) fn process_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> Event {
        let button = MouseButton::from(button);
        let modifiers = self.current_modifiers;

        match state {
            ElementState::Pressed => Event::MouseButtonDown { button, modifiers },
            ElementState::Released => Event::MouseButtonUp { button, modifiers },
        }
    }

    /// Creates a mouse move event (surface pixels, no modifiers).
    pub(crate) fn process_mouse_move(&self, x: f64, y: f64) -> Event {
        Event::MouseMoved {
            x: x as f32,
            y: y as f32,
        }
    }

    pub(crate) fn process_resize(&self, width: u32, height: u32) -> Event {
        Event::Resized { width, height }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

/// Maps variants that share a name in both enums; the rest is Unidentified.
macro_rules! map_same_name {
    ($code:expr; $($name:ident),* $(,)?) => {
        match $code {
            $(WinitKeyCode::$name => KeyCode::$name,)*
            _ => KeyCode::Unidentified,
        }
    };
}

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        map_same_name!(code;
            Digit0, Digit1, Digit2, Digit3, Digit4,
            Digit5, Digit6, Digit7, Digit8, Digit9,
            KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
            KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
            KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
            ArrowDown, ArrowLeft, ArrowRight, ArrowUp,
            Space, Enter, Escape, Tab, Backspace, Delete,
        )
    }
}

/// Back/Forward/Other collapse to `Other`.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if shift { state.insert(ModifiersState::SHIFT); }
        if ctrl { state.insert(ModifiersState::CONTROL); }
        if alt { state.insert(ModifiersState::ALT); }
        state
    }

    #[test]
    fn starts_with_no_modifiers() {
        let processor = InputProcessor::new();
        assert_eq!(processor.current_modifiers(), Modifiers::NONE);
    }

    #[test]
    fn key_events_carry_cached_modifiers() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(false, true, false));

        let down = processor.process_key(WinitKeyCode::KeyS, ElementState::Pressed);
        assert_eq!(
            down,
            Some(Event::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL })
        );

        processor.update_modifiers(make_modifiers(true, false, false));
        let up = processor.process_key(WinitKeyCode::KeyS, ElementState::Released);
        assert_eq!(
            up,
            Some(Event::KeyUp { key: KeyCode::KeyS, modifiers: Modifiers::SHIFT })
        );
    }

    #[test]
    fn unmapped_keys_are_filtered() {
        let processor = InputProcessor::new();
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert_eq!(processor.process_key(WinitKeyCode::F13, ElementState::Pressed), None);
    }

    #[test]
    fn mouse_button_has_modifiers() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(false, false, true));

        let event = processor.process_mouse_button(WinitMouseButton::Left, ElementState::Pressed);

        assert_eq!(
            event,
            Event::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::ALT }
        );
    }

    #[test]
    fn mouse_move_and_resize() {
        let processor = InputProcessor::new();

        assert_eq!(
            processor.process_mouse_move(123.5, 456.25),
            Event::MouseMoved { x: 123.5, y: 456.25 }
        );
        assert_eq!(
            processor.process_resize(800, 600),
            Event::Resized { width: 800, height: 600 }
        );
    }

    #[test]
    fn keycode_conversion() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::Digit7), KeyCode::Digit7);
        assert_eq!(KeyCode::from(WinitKeyCode::Escape), KeyCode::Escape);
        assert_eq!(KeyCode::from(WinitKeyCode::ArrowUp), KeyCode::ArrowUp);
    }

    #[test]
    fn mouse_button_conversion() {
        assert_eq!(MouseButton::from(WinitMouseButton::Right), MouseButton::Right);
        assert_eq!(MouseButton::from(WinitMouseButton::Back), MouseButton::Other);
    }
}
