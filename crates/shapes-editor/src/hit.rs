//! Hit testing: point → shape lookup.
//!
//! The selected shape's resize handle wins over every body; bodies are
//! then walked front-to-back (last in the list = topmost).

use crate::input::HitTarget;
use shapes_core::id::ShapeId;
use shapes_core::model::{Bounds, Shape};

/// Edge length of the square resize handle, centred on the bottom-right corner.
pub const HANDLE_SIZE: f64 = 16.0;

/// Bounds of the resize handle for `shape`.
pub fn handle_bounds(shape: &Shape) -> Bounds {
    let half = HANDLE_SIZE / 2.0;
    Bounds {
        x: shape.x + shape.width - half,
        y: shape.y + shape.height - half,
        width: HANDLE_SIZE,
        height: HANDLE_SIZE,
    }
}

/// Find what lies under `(px, py)`.
pub fn hit_test(shapes: &[Shape], selected: Option<ShapeId>, px: f64, py: f64) -> HitTarget {
    if let Some(id) = selected
        && let Some(shape) = shapes.iter().find(|s| s.id == id)
        && handle_bounds(shape).contains(px, py)
    {
        return HitTarget::ResizeHandle(id);
    }

    shapes
        .iter()
        .rev()
        .find(|s| s.bounds().contains(px, py))
        .map_or(HitTarget::Canvas, |s| HitTarget::Body(s.id))
}
