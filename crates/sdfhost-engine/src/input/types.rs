use std::fmt;

/// Raw mouse button index, numbered like DOM `MouseEvent.button`:
/// 0 primary, 1 auxiliary (middle), 2 secondary, 3 back, 4 forward.
pub type RawButton = u16;

/// Platform-agnostic input events, produced by a platform adapter.
///
/// Key identifiers follow DOM `KeyboardEvent.key` naming (`"a"`, `"A"`, `" "`,
/// `"ArrowUp"`, `"Shift"`, ...). Coordinates are framebuffer pixels relative to the
/// render surface origin.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),

    MouseDown { button: RawButton, x: i32, y: i32 },
    MouseUp { button: RawButton },
    MouseMove { x: i32, y: i32 },

    /// Vertical wheel delta; positive scrolls down.
    MouseWheel { delta_y: f64 },

    /// Pointer entered the render surface.
    PointerEnter,

    /// Pointer left the render surface, or the window lost focus.
    PointerLeave,
}

/// Outcome of dispatching one event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Dispatch {
    /// At least one compute-module entry point was called.
    Forwarded,
    /// Unsupported identifier; no module call was made.
    Dropped,
    /// Event is intentionally inert.
    Ignored,
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyDown(k) => write!(f, "keydown {k:?}"),
            Self::KeyUp(k) => write!(f, "keyup {k:?}"),
            Self::MouseDown { button, x, y } => write!(f, "mousedown {button} at ({x}, {y})"),
            Self::MouseUp { button } => write!(f, "mouseup {button}"),
            Self::MouseMove { x, y } => write!(f, "mousemove ({x}, {y})"),
            Self::MouseWheel { delta_y } => write!(f, "wheel {delta_y}"),
            Self::PointerEnter => f.write_str("pointerenter"),
            Self::PointerLeave => f.write_str("pointerleave"),
        }
    }
}
