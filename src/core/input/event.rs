//=========================================================================
// Input Event Types
//
// Defines the engine-side representation of input events.
//
// This module abstracts away platform-specific input (e.g. Winit) into a
// small, portable enum that scenes receive through `on_event` and their
// event pool. The core never interprets events beyond their kind: they
// are forwarded unmodified.
//
// Event Flow:
// ```text
// Platform Layer (Winit) / DisplayHandle::push_event
//         ↓
//    Event (this module)
//         ↓
//    SceneManager::handle_events
//         ├─► EventPool (deferred, LIFO drain)
//         └─► Scene::on_event (immediate)
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, thumb buttons and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Keys not mapped by the platform layer.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt) captured with key and button events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
        alt: false,
    };

    /// Alt only.
    pub const ALT: Self = Self {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

//=== EventKind ===========================================================

/// Discriminant of an [`Event`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Quit,
    KeyDown,
    KeyUp,
    MouseButtonDown,
    MouseButtonUp,
    MouseMoved,
    Resized,
    User,
    Unidentified,
}

//=== Event ===============================================================

/// Input event delivered to the current scene.
///
/// # Event Types
///
/// - **Quit**: The user or OS asked the application to close
/// - **KeyDown/KeyUp**: Keyboard events with modifier state
/// - **MouseButtonDown/MouseButtonUp**: Mouse button events with modifier state
/// - **MouseMoved**: Cursor position in surface pixels (top-left origin)
/// - **Resized**: Drawable surface changed size
/// - **User**: Application-defined event code, injected via `DisplayHandle`
/// - **Unidentified**: Platform event the engine does not model
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Quit,

    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    MouseButtonDown {
        button: MouseButton,
        modifiers: Modifiers,
    },

    MouseButtonUp {
        button: MouseButton,
        modifiers: Modifiers,
    },

    MouseMoved { x: f32, y: f32 },

    Resized { width: u32, height: u32 },

    User(u32),

    Unidentified,
}

impl Event {
    /// Returns the payload-free discriminant of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Quit => EventKind::Quit,
            Self::KeyDown { .. } => EventKind::KeyDown,
            Self::KeyUp { .. } => EventKind::KeyUp,
            Self::MouseButtonDown { .. } => EventKind::MouseButtonDown,
            Self::MouseButtonUp { .. } => EventKind::MouseButtonUp,
            Self::MouseMoved { .. } => EventKind::MouseMoved,
            Self::Resized { .. } => EventKind::Resized,
            Self::User(_) => EventKind::User,
            Self::Unidentified => EventKind::Unidentified,
        }
    }

    /// Shorthand for `KeyDown` without modifiers.
    pub fn key_down(key: KeyCode) -> Self {
        Self::KeyDown {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Shorthand for `KeyUp` without modifiers.
    pub fn key_up(key: KeyCode) -> Self {
        Self::KeyUp {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Returns true for [`Event::Quit`].
    pub fn is_quit(&self) -> bool {
        matches!(self, Self::Quit)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_ignores_payload() {
        assert_eq!(Event::key_down(KeyCode::KeyA).kind(), EventKind::KeyDown);
        assert_eq!(Event::key_down(KeyCode::KeyB).kind(), EventKind::KeyDown);
        assert_eq!(
            Event::MouseMoved { x: 1.0, y: 2.0 }.kind(),
            Event::MouseMoved { x: 300.0, y: 400.0 }.kind()
        );
        assert_eq!(Event::User(7).kind(), EventKind::User);
    }

    #[test]
    fn key_events_differ_by_direction() {
        assert_ne!(Event::key_down(KeyCode::Space), Event::key_up(KeyCode::Space));
        assert_ne!(
            Event::key_down(KeyCode::Space).kind(),
            Event::key_up(KeyCode::Space).kind()
        );
    }

    #[test]
    fn quit_is_detected() {
        assert!(Event::Quit.is_quit());
        assert!(!Event::Unidentified.is_quit());
    }

    #[test]
    fn modifiers_default_to_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert_ne!(Modifiers::SHIFT, Modifiers::CTRL);
    }
}
