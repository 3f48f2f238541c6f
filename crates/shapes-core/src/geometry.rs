//! Outline geometry: the polygon catalog, rounded-corner clip paths, and
//! bounding boxes.
//!
//! Polygon points live in a 0–100 percentage space relative to the
//! shape's own box. Box-like kinds (rectangle, square, circle, ellipse)
//! have no polygon; their outline is a `border-radius` instead.

use crate::model::{Shape, ShapeKind};
use smallvec::SmallVec;
use std::fmt::Write;

/// A point in percentage space: `(x%, y%)`.
pub type Point = (f64, f64);

const TRIANGLE: &[Point] = &[(50.0, 0.0), (100.0, 100.0), (0.0, 100.0)];
const RIGHT_TRIANGLE: &[Point] = &[(0.0, 0.0), (0.0, 100.0), (100.0, 100.0)];
const DIAMOND: &[Point] = &[(50.0, 0.0), (100.0, 50.0), (50.0, 100.0), (0.0, 50.0)];
const PENTAGON: &[Point] = &[
    (50.0, 0.0),
    (100.0, 38.0),
    (82.0, 100.0),
    (18.0, 100.0),
    (0.0, 38.0),
];
const HEXAGON: &[Point] = &[
    (25.0, 0.0),
    (75.0, 0.0),
    (100.0, 50.0),
    (75.0, 100.0),
    (25.0, 100.0),
    (0.0, 50.0),
];
const STAR: &[Point] = &[
    (50.0, 0.0),
    (61.0, 35.0),
    (98.0, 35.0),
    (68.0, 57.0),
    (79.0, 91.0),
    (50.0, 70.0),
    (21.0, 91.0),
    (32.0, 57.0),
    (2.0, 35.0),
    (39.0, 35.0),
];
const ARROW: &[Point] = &[
    (50.0, 0.0),
    (100.0, 50.0),
    (70.0, 50.0),
    (70.0, 100.0),
    (30.0, 100.0),
    (30.0, 50.0),
    (0.0, 50.0),
];

/// Ordered outline of a polygon-backed kind, or `None` for box-like kinds.
pub fn polygon_for(kind: ShapeKind) -> Option<&'static [Point]> {
    match kind {
        ShapeKind::Triangle => Some(TRIANGLE),
        ShapeKind::RightTriangle => Some(RIGHT_TRIANGLE),
        ShapeKind::Diamond => Some(DIAMOND),
        ShapeKind::Pentagon => Some(PENTAGON),
        ShapeKind::Hexagon => Some(HEXAGON),
        ShapeKind::Star => Some(STAR),
        ShapeKind::Arrow => Some(ARROW),
        ShapeKind::Rectangle
        | ShapeKind::Square
        | ShapeKind::Circle
        | ShapeKind::Ellipse
        | ShapeKind::Text => None,
    }
}

/// `polygon(50% 0%, 100% 100%, 0% 100%)`.
pub fn polygon_css(points: &[Point]) -> String {
    let parts: SmallVec<[String; 10]> = points
        .iter()
        .map(|&(x, y)| format!("{}% {}%", format_num(x), format_num(y)))
        .collect();
    format!("polygon({})", parts.join(", "))
}

/// Rounded-corner outline for a polygon-backed kind, as a CSS `path('…')`.
///
/// Each vertex is replaced by a quadratic curve whose control point is the
/// vertex itself. The curve starts and ends on the two incident edges at
/// distance `r = min(curve * 0.3, 0.4 * shorter incident edge)` from the
/// vertex. Returns `None` when `curve <= 0` or the kind has no polygon.
pub fn rounded_clip_path(kind: ShapeKind, curve: f64) -> Option<String> {
    if !(curve > 0.0) {
        return None;
    }
    let points = polygon_for(kind)?;
    let radius = curve * 0.3;
    let n = points.len();
    let mut path = String::with_capacity(n * 48);

    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];

        let v1 = (prev.0 - curr.0, prev.1 - curr.1);
        let v2 = (next.0 - curr.0, next.1 - curr.1);
        let len1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
        let len2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

        let r = radius.min(len1.min(len2) * 0.4);
        let start = (curr.0 + (v1.0 / len1) * r, curr.1 + (v1.1 / len1) * r);
        let end = (curr.0 + (v2.0 / len2) * r, curr.1 + (v2.1 / len2) * r);

        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(
            path,
            "{cmd} {} {} Q {} {} {} {} ",
            format_num(start.0),
            format_num(start.1),
            format_num(curr.0),
            format_num(curr.1),
            format_num(end.0),
            format_num(end.1),
        );
    }
    path.push('Z');
    Some(format!("path('{path}')"))
}

/// The `clip-path` value for a shape, or `None` for box-like kinds.
///
/// Rounded only for kinds that carry a `curve`; the flat polygon otherwise.
pub fn clip_path_for(shape: &Shape) -> Option<String> {
    let points = polygon_for(shape.kind)?;
    if shape.kind.has_curve()
        && let Some(rounded) = rounded_clip_path(shape.kind, shape.curve_or_default())
    {
        return Some(rounded);
    }
    Some(polygon_css(points))
}

/// The `border-radius` value for a box-like shape, or `None` for
/// polygon-backed kinds and text.
pub fn border_radius_for(shape: &Shape) -> Option<String> {
    match shape.kind {
        ShapeKind::Circle | ShapeKind::Ellipse => Some("50%".to_string()),
        ShapeKind::Rectangle | ShapeKind::Square => {
            Some(format!("{}%", format_num(shape.border_radius_or_default())))
        }
        _ => None,
    }
}

/// Union of shape extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Union of all shape boxes; `None` for an empty composition.
pub fn bounding_box(shapes: &[Shape]) -> Option<BoundingBox> {
    let first = shapes.first()?.bounds();
    let init = BoundingBox {
        min_x: first.x,
        min_y: first.y,
        max_x: first.right(),
        max_y: first.bottom(),
    };
    Some(shapes[1..].iter().fold(init, |acc, s| {
        let b = s.bounds();
        BoundingBox {
            min_x: acc.min_x.min(b.x),
            min_y: acc.min_y.min(b.y),
            max_x: acc.max_x.max(b.right()),
            max_y: acc.max_y.max(b.bottom()),
        }
    }))
}

/// Round half toward +∞, matching the browser's `Math.round`.
pub fn round_half_up(v: f64) -> f64 {
    let floor = v.floor();
    if v - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Format a number the way the browser stringifies it: shortest
/// round-trip digits, no trailing `.0`, `0` for negative zero, and
/// exponent notation outside `[1e-6, 1e21)`.
pub fn format_num(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if !n.is_finite() {
        return if n.is_nan() {
            "NaN".to_string()
        } else if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    let abs = n.abs();
    if !(1e-6..1e21).contains(&abs) {
        let s = format!("{n:e}");
        // Rust writes `1e21`; browsers write `1e+21`
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => s,
        };
    }
    format!("{n}")
}
