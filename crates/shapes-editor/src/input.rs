//! Input abstraction layer.
//!
//! Normalizes host pointer and keyboard events into an `InputEvent` enum
//! consumed by the canvas controller. Coordinates are canvas-relative
//! pixels; the host subtracts the canvas element's offset before calling in.

use shapes_core::id::ShapeId;

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on Windows/Linux, ⌘ on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    /// Delivered from a document-level listener, so it arrives even when
    /// the pointer was released outside the canvas.
    PointerUp { x: f64, y: f64 },
}

impl InputEvent {
    pub fn position(&self) -> (f64, f64) {
        match self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                (*x, *y)
            }
        }
    }
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Empty canvas background.
    Canvas,
    /// A shape's body.
    Body(ShapeId),
    /// The bottom-right resize handle of the selected shape.
    ResizeHandle(ShapeId),
}

impl HitTarget {
    /// Parse the bridge form: `"canvas"`, `"shape:<id>"`, `"handle:<id>"`.
    pub fn parse(s: &str) -> Option<Self> {
        if s == "canvas" {
            return Some(Self::Canvas);
        }
        let (kind, id) = s.split_once(':')?;
        if id.is_empty() {
            return None;
        }
        match kind {
            "shape" => Some(Self::Body(ShapeId::intern(id))),
            "handle" => Some(Self::ResizeHandle(ShapeId::intern(id))),
            _ => None,
        }
    }
}
