//! Shape data model for canvas compositions.
//!
//! A composition is an ordered list of [`Shape`]s; list order is z-order
//! (later shapes paint on top). A shape is a top-left anchored box plus
//! styling, with a few fields that only exist for certain kinds.
//!
//! The serde representation of [`Shape`] is the persisted record format:
//! a flat camelCase object, stored and reloaded verbatim by the host.

use crate::id::ShapeId;
use serde::{Deserialize, Serialize};

/// Smallest width/height a shape may have, in pixels.
pub const MIN_SIZE: f64 = 20.0;

/// Fill colour of freshly created shapes.
pub const DEFAULT_COLOR: &str = "#004aad";

/// Default border radius (percent) for rectangles and squares.
pub const DEFAULT_BORDER_RADIUS: f64 = 0.0;

/// Upper bound of `borderRadius` (percent).
pub const MAX_BORDER_RADIUS: f64 = 50.0;

/// Upper bound of `curve` (corner rounding strength).
pub const MAX_CURVE: f64 = 100.0;

// ─── Shape kinds ─────────────────────────────────────────────────────────

/// The closed set of shape types the canvas can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Rectangle,
    Square,
    Circle,
    Ellipse,
    Triangle,
    RightTriangle,
    Diamond,
    Pentagon,
    Hexagon,
    Star,
    Arrow,
    Text,
}

impl ShapeKind {
    /// Every kind, in palette order.
    pub const ALL: [ShapeKind; 12] = [
        ShapeKind::Rectangle,
        ShapeKind::Square,
        ShapeKind::Circle,
        ShapeKind::Ellipse,
        ShapeKind::Triangle,
        ShapeKind::RightTriangle,
        ShapeKind::Diamond,
        ShapeKind::Pentagon,
        ShapeKind::Hexagon,
        ShapeKind::Star,
        ShapeKind::Arrow,
        ShapeKind::Text,
    ];

    /// The type tag used in persisted records (`"rightTriangle"`).
    pub fn tag(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Square => "square",
            ShapeKind::Circle => "circle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Triangle => "triangle",
            ShapeKind::RightTriangle => "rightTriangle",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Pentagon => "pentagon",
            ShapeKind::Hexagon => "hexagon",
            ShapeKind::Star => "star",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Text => "text",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }

    /// Human-readable name for palettes and notifications.
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Square => "Square",
            ShapeKind::Circle => "Circle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::RightTriangle => "Right Triangle",
            ShapeKind::Diamond => "Diamond",
            ShapeKind::Pentagon => "Pentagon",
            ShapeKind::Hexagon => "Hexagon",
            ShapeKind::Star => "Star",
            ShapeKind::Arrow => "Arrow",
            ShapeKind::Text => "Text",
        }
    }

    pub fn is_text(self) -> bool {
        self == ShapeKind::Text
    }

    /// Kinds whose outline is a `border-radius` box.
    pub fn has_border_radius(self) -> bool {
        matches!(self, ShapeKind::Rectangle | ShapeKind::Square)
    }

    /// Kinds whose polygon corners can be rounded with `curve`.
    pub fn has_curve(self) -> bool {
        matches!(
            self,
            ShapeKind::Triangle | ShapeKind::RightTriangle | ShapeKind::Diamond | ShapeKind::Star
        )
    }

    /// Default `(width, height)` for a freshly created shape.
    pub fn default_size(self) -> (f64, f64) {
        match self {
            ShapeKind::Ellipse => (120.0, 60.0),
            ShapeKind::Rectangle => (80.0, 50.0),
            ShapeKind::Text => (150.0, 40.0),
            _ => (80.0, 80.0),
        }
    }
}

// ─── Text styling ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "left" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" => Some(TextAlign::Right),
            _ => None,
        }
    }

    /// Flexbox main-axis alignment that reproduces this text alignment.
    pub fn justify_content(self) -> &'static str {
        match self {
            TextAlign::Left => "flex-start",
            TextAlign::Center => "center",
            TextAlign::Right => "flex-end",
        }
    }
}

fn default_font_size() -> f64 {
    24.0
}

fn default_font_family() -> String {
    "Arial".to_string()
}

fn default_normal() -> String {
    "normal".to_string()
}

/// Fields carried only by text shapes.
///
/// `text` is the one required field: its presence is what marks a
/// flattened record as carrying text styling at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_normal")]
    pub font_weight: String,
    #[serde(default = "default_normal")]
    pub font_style: String,
    #[serde(default)]
    pub text_align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            text: "Text".to_string(),
            font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_normal(),
            font_style: default_normal(),
            text_align: TextAlign::Center,
        }
    }
}

// ─── Geometry box ────────────────────────────────────────────────────────

/// Top-left anchored box in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

// ─── Shape ───────────────────────────────────────────────────────────────

fn default_opacity() -> f64 {
    100.0
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// One positioned, styled drawable on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(default = "ShapeId::anonymous")]
    pub id: ShapeId,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Solid colour or gradient string, emitted verbatim.
    #[serde(default = "default_color")]
    pub color: String,
    /// 0–100.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Degrees in `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub flip_x: bool,
    #[serde(default)]
    pub flip_y: bool,
    /// Rectangle/square corner radius, percent (0–50).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    /// Polygon corner rounding (0–100) for triangles, diamonds, and stars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<f64>,
    #[serde(flatten)]
    pub text: Option<TextStyle>,
}

impl Shape {
    /// Build a shape of `kind` at `(x, y)` with the kind's defaults and a
    /// fresh id.
    pub fn create_default(kind: ShapeKind, x: f64, y: f64) -> Self {
        let (width, height) = kind.default_size();
        Self {
            id: ShapeId::with_prefix(kind.tag()),
            kind,
            x,
            y,
            width,
            height,
            color: DEFAULT_COLOR.to_string(),
            opacity: 100.0,
            rotation: 0.0,
            flip_x: false,
            flip_y: false,
            border_radius: kind.has_border_radius().then_some(DEFAULT_BORDER_RADIUS),
            curve: kind.has_curve().then_some(0.0),
            text: kind.is_text().then(TextStyle::default),
        }
    }

    /// Deep copy with a fresh id. Used by paste and "save as new".
    pub fn duplicate(&self) -> Self {
        Self {
            id: ShapeId::with_prefix(self.kind.tag()),
            ..self.clone()
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn border_radius_or_default(&self) -> f64 {
        self.border_radius.unwrap_or(DEFAULT_BORDER_RADIUS)
    }

    pub fn curve_or_default(&self) -> f64 {
        self.curve.unwrap_or(0.0)
    }

    /// Bring a loaded record into the shape of its kind: drop fields the
    /// kind does not carry, supply the ones it is missing, and fold
    /// rotation into `[0, 360)`.
    pub fn normalize(&mut self) {
        if !self.kind.has_border_radius() && self.border_radius.take().is_some() {
            log::debug!("{}: dropped borderRadius from {}", self.id, self.kind.tag());
        }
        if !self.kind.has_curve() && self.curve.take().is_some() {
            log::debug!("{}: dropped curve from {}", self.id, self.kind.tag());
        }
        if self.kind.is_text() {
            if self.text.is_none() {
                self.text = Some(TextStyle::default());
            }
        } else if self.text.take().is_some() {
            log::debug!("{}: dropped text fields from {}", self.id, self.kind.tag());
        }
        if self.rotation.is_finite() {
            self.rotation = normalize_rotation(self.rotation);
        }
    }

    /// Check every invariant of the record.
    pub fn validate(&self) -> Result<(), String> {
        for (name, v) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
            ("opacity", self.opacity),
            ("rotation", self.rotation),
        ] {
            if !v.is_finite() {
                return Err(format!("{name} is not a finite number"));
            }
        }
        if self.width < MIN_SIZE || self.height < MIN_SIZE {
            return Err(format!(
                "size {}x{} below minimum {MIN_SIZE}",
                self.width, self.height
            ));
        }
        if !(0.0..=100.0).contains(&self.opacity) {
            return Err(format!("opacity {} outside 0–100", self.opacity));
        }
        if !(0.0..360.0).contains(&self.rotation) {
            return Err(format!("rotation {} outside [0, 360)", self.rotation));
        }
        if self.color.trim().is_empty() {
            return Err("color is empty".to_string());
        }
        match self.border_radius {
            Some(_) if !self.kind.has_border_radius() => {
                return Err(format!("{} has no border radius", self.kind.tag()));
            }
            Some(r) if !(0.0..=MAX_BORDER_RADIUS).contains(&r) => {
                return Err(format!("border radius {r} outside 0–{MAX_BORDER_RADIUS}"));
            }
            _ => {}
        }
        match self.curve {
            Some(_) if !self.kind.has_curve() => {
                return Err(format!("{} has no curve", self.kind.tag()));
            }
            Some(c) if !(0.0..=MAX_CURVE).contains(&c) => {
                return Err(format!("curve {c} outside 0–{MAX_CURVE}"));
            }
            _ => {}
        }
        match (&self.text, self.kind.is_text()) {
            (None, true) => return Err("text shape without text style".to_string()),
            (Some(_), false) => {
                return Err(format!("{} cannot carry text", self.kind.tag()));
            }
            (Some(style), true) if !(style.font_size.is_finite() && style.font_size > 0.0) => {
                return Err(format!("font size {} must be positive", style.font_size));
            }
            _ => {}
        }
        Ok(())
    }
}

/// Fold any finite angle into `[0, 360)`.
pub fn normalize_rotation(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if r >= 360.0 { 0.0 } else { r }
}

// ─── Property edits ──────────────────────────────────────────────────────

/// A single editable property and its new value.
///
/// This is the typed form of the host's `updateProperty(id, key, value)`;
/// [`ShapeProperty::key`] gives the record field name it writes.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeProperty {
    X(f64),
    Y(f64),
    Width(f64),
    Height(f64),
    Color(String),
    Opacity(f64),
    Rotation(f64),
    FlipX(bool),
    FlipY(bool),
    BorderRadius(f64),
    Curve(f64),
    Text(String),
    FontSize(f64),
    FontFamily(String),
    FontWeight(String),
    FontStyle(String),
    TextAlign(TextAlign),
}

impl ShapeProperty {
    pub fn key(&self) -> &'static str {
        match self {
            ShapeProperty::X(_) => "x",
            ShapeProperty::Y(_) => "y",
            ShapeProperty::Width(_) => "width",
            ShapeProperty::Height(_) => "height",
            ShapeProperty::Color(_) => "color",
            ShapeProperty::Opacity(_) => "opacity",
            ShapeProperty::Rotation(_) => "rotation",
            ShapeProperty::FlipX(_) => "flipX",
            ShapeProperty::FlipY(_) => "flipY",
            ShapeProperty::BorderRadius(_) => "borderRadius",
            ShapeProperty::Curve(_) => "curve",
            ShapeProperty::Text(_) => "text",
            ShapeProperty::FontSize(_) => "fontSize",
            ShapeProperty::FontFamily(_) => "fontFamily",
            ShapeProperty::FontWeight(_) => "fontWeight",
            ShapeProperty::FontStyle(_) => "fontStyle",
            ShapeProperty::TextAlign(_) => "textAlign",
        }
    }

    /// Apply to `shape`. On error the shape is left untouched.
    pub fn apply(&self, shape: &mut Shape) -> Result<(), String> {
        let mut next = shape.clone();
        match self {
            ShapeProperty::X(v) => next.x = *v,
            ShapeProperty::Y(v) => next.y = *v,
            ShapeProperty::Width(v) => next.width = *v,
            ShapeProperty::Height(v) => next.height = *v,
            ShapeProperty::Color(c) => next.color = c.clone(),
            ShapeProperty::Opacity(v) => next.opacity = *v,
            ShapeProperty::Rotation(v) => {
                if !v.is_finite() {
                    return Err("rotation is not a finite number".to_string());
                }
                next.rotation = normalize_rotation(*v);
            }
            ShapeProperty::FlipX(b) => next.flip_x = *b,
            ShapeProperty::FlipY(b) => next.flip_y = *b,
            ShapeProperty::BorderRadius(v) => next.border_radius = Some(*v),
            ShapeProperty::Curve(v) => next.curve = Some(*v),
            ShapeProperty::Text(t) => text_style_mut(&mut next)?.text = t.clone(),
            ShapeProperty::FontSize(v) => text_style_mut(&mut next)?.font_size = *v,
            ShapeProperty::FontFamily(f) => text_style_mut(&mut next)?.font_family = f.clone(),
            ShapeProperty::FontWeight(w) => text_style_mut(&mut next)?.font_weight = w.clone(),
            ShapeProperty::FontStyle(st) => text_style_mut(&mut next)?.font_style = st.clone(),
            ShapeProperty::TextAlign(a) => text_style_mut(&mut next)?.text_align = *a,
        }
        next.validate()?;
        *shape = next;
        Ok(())
    }
}

fn text_style_mut(shape: &mut Shape) -> Result<&mut TextStyle, String> {
    let tag = shape.kind.tag();
    shape
        .text
        .as_mut()
        .ok_or_else(|| format!("{tag} is not a text shape"))
}
