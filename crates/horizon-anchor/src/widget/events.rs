//! Input events consumed by anchored-surface controls.
//!
//! The host translates its platform events into [`InputEvent`]s and feeds
//! them to a control's `handle_event`. Pointer positions are in the same
//! (document) coordinate space as the anchor rectangle.

use crate::geometry::{Point, Rect, Size};

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };
}

/// Keys the controls react to. Everything else arrives as `Other`, with its
/// text (if any) carried by [`KeyPressEvent::text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Space,
    Escape,
    Backspace,
    Tab,
    Other,
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPressEvent {
    pub key: Key,
    /// Text produced by the key press, if any.
    pub text: String,
    pub modifiers: KeyboardModifiers,
}

impl KeyPressEvent {
    /// A key press with no text and no modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            text: String::new(),
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// A key press producing `text` (typing into the search field).
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let key = if text == " " { Key::Space } else { Key::Other };
        Self {
            key,
            text,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Which region a hover event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverRegion {
    Anchor,
    Surface,
}

/// An input event for an anchored-surface control.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed anywhere in the document.
    PointerDown { position: Point, button: PointerButton },
    /// Pointer moved anywhere in the document.
    PointerMove { position: Point },
    /// Pointer entered the anchor or the surface.
    HoverEnter(HoverRegion),
    /// Pointer left the anchor or the surface.
    HoverLeave(HoverRegion),
    /// Key pressed while the control has focus.
    KeyPress(KeyPressEvent),
    /// The control lost keyboard focus.
    FocusOut,
    /// The anchor was measured or moved.
    AnchorGeometry(Option<Rect>),
    /// The surface was measured.
    SurfaceGeometry(Option<Size>),
    /// The viewport was resized.
    ViewportResize(Size),
    /// The document (or an ancestor of the anchor) scrolled.
    Scroll(Point),
}

impl InputEvent {
    /// Primary-button press at `(x, y)`.
    pub fn click(x: f32, y: f32) -> Self {
        Self::PointerDown {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    /// Key press without text.
    pub fn key(key: Key) -> Self {
        Self::KeyPress(KeyPressEvent::new(key))
    }

    /// Typed text.
    pub fn type_text(text: impl Into<String>) -> Self {
        Self::KeyPress(KeyPressEvent::text(text))
    }
}
