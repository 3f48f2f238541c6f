//! Single-slot clipboard, scoped to one editor session.
//!
//! Every copy in or out is a deep, independent copy. Pasting offsets from
//! the stored snapshot, not from the previous paste, so repeated pastes
//! land on the same spot.

use crate::error::{EditError, EditResult};
use shapes_core::id::ShapeId;
use shapes_core::model::Shape;

#[derive(Debug, Default)]
pub struct Clipboard {
    slot: Option<Shape>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of `shape`, replacing whatever was there.
    pub fn copy(&mut self, shape: &Shape) {
        log::debug!("clipboard: copied {}", shape.id);
        self.slot = Some(shape.clone());
    }

    /// Store a copy of shape `id` and remove it from `shapes`.
    pub fn cut(&mut self, shapes: &mut Vec<Shape>, id: ShapeId) -> EditResult<Shape> {
        let pos = shapes
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| EditError::NotFound(format!("shape {id}")))?;
        let removed = shapes.remove(pos);
        self.copy(&removed);
        Ok(removed)
    }

    /// A fresh-id clone of the stored shape, shifted by `offset` on both axes.
    pub fn paste(&self, offset: f64) -> Option<Shape> {
        let stored = self.slot.as_ref()?;
        let mut shape = stored.duplicate();
        shape.x += offset;
        shape.y += offset;
        Some(shape)
    }

    pub fn peek(&self) -> Option<&Shape> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapes_core::model::ShapeKind;

    #[test]
    fn paste_from_empty_is_none() {
        assert!(Clipboard::new().paste(20.0).is_none());
    }

    #[test]
    fn copy_is_independent_of_source() {
        let mut shape = Shape::create_default(ShapeKind::Circle, 10.0, 10.0);
        let mut clipboard = Clipboard::new();
        clipboard.copy(&shape);
        shape.x = 300.0;
        assert_eq!(clipboard.peek().map(|s| s.x), Some(10.0));
    }

    #[test]
    fn repeated_paste_uses_stored_position() {
        let shape = Shape::create_default(ShapeKind::Star, 40.0, 60.0);
        let mut clipboard = Clipboard::new();
        clipboard.copy(&shape);

        let a = clipboard.paste(20.0).unwrap();
        let b = clipboard.paste(20.0).unwrap();
        assert_eq!((a.x, a.y), (60.0, 80.0));
        assert_eq!((b.x, b.y), (60.0, 80.0));
        assert_ne!(a.id, b.id);
        assert_ne!(a.id, shape.id);
    }

    #[test]
    fn cut_missing_shape_is_not_found() {
        let mut shapes = vec![Shape::create_default(ShapeKind::Square, 0.0, 0.0)];
        let mut clipboard = Clipboard::new();
        let err = clipboard
            .cut(&mut shapes, ShapeId::intern("missing"))
            .unwrap_err();
        assert!(matches!(err, EditError::NotFound(_)));
        assert_eq!(shapes.len(), 1);
        assert!(clipboard.is_empty());
    }
}
