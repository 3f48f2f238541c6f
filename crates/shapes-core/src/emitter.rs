//! Emitter: shapes → CSS and HTML text.
//!
//! Pure and deterministic: identical shape lists produce byte-identical
//! output, so the host can offer the text for copying as-is. Shape `i`
//! (1-based, z-order) gets class `shape-<i>` in both outputs.

use crate::geometry::{border_radius_for, bounding_box, clip_path_for, format_num, round_half_up};
use crate::model::{Shape, TextStyle};
use std::fmt::Write;

/// CSS output for an empty canvas.
pub const EMPTY_CSS: &str = "/* Add shapes to the canvas to generate CSS */";

/// HTML output for an empty canvas.
pub const EMPTY_HTML: &str = "<!-- Add shapes to the canvas -->";

/// Knobs for the HTML container.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Class of the wrapping `<div>`.
    pub container_class: String,
    /// Pixels added past the right/bottom-most shape edge.
    pub margin: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            container_class: "canvas-container".to_string(),
            margin: 20.0,
        }
    }
}

/// Both exports of one composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub css: String,
    pub html: String,
}

/// Emit CSS and HTML together.
#[must_use]
pub fn generate(shapes: &[Shape], options: &ExportOptions) -> Export {
    Export {
        css: generate_css(shapes),
        html: generate_html(shapes, options),
    }
}

/// Emit one CSS rule per shape, in z-order, separated by blank lines.
#[must_use]
pub fn generate_css(shapes: &[Shape]) -> String {
    if shapes.is_empty() {
        return EMPTY_CSS.to_string();
    }
    let mut out = String::with_capacity(shapes.len() * 256);
    for (i, shape) in shapes.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        emit_shape_block(&mut out, shape, i + 1);
    }
    out
}

/// Emit the container and one child `<div>` per shape, in z-order.
#[must_use]
pub fn generate_html(shapes: &[Shape], options: &ExportOptions) -> String {
    let Some(bb) = bounding_box(shapes) else {
        return EMPTY_HTML.to_string();
    };
    let width = round_half_up(bb.max_x + options.margin);
    let height = round_half_up(bb.max_y + options.margin);

    let mut out = String::with_capacity(128 + shapes.len() * 48);
    let _ = writeln!(
        out,
        r#"<div class="{}" style="position: relative; width: {}px; height: {}px;">"#,
        escape_html(&options.container_class),
        format_num(width),
        format_num(height),
    );
    for (i, shape) in shapes.iter().enumerate() {
        match &shape.text {
            Some(style) => {
                let _ = writeln!(
                    out,
                    r#"  <div class="shape-{}">{}</div>"#,
                    i + 1,
                    escape_html(&style.text)
                );
            }
            None => {
                let _ = writeln!(out, r#"  <div class="shape-{}"></div>"#, i + 1);
            }
        }
    }
    out.push_str("</div>");
    out
}

fn prop(out: &mut String, name: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {name}: {value};");
}

fn px(v: f64) -> String {
    format!("{}px", format_num(round_half_up(v)))
}

fn emit_shape_block(out: &mut String, shape: &Shape, index: usize) {
    let _ = writeln!(out, ".shape-{index} {{");

    prop(out, "position", "absolute");
    prop(out, "left", px(shape.x));
    prop(out, "top", px(shape.y));
    prop(out, "width", px(shape.width));
    prop(out, "height", px(shape.height));

    match &shape.text {
        Some(style) => emit_text_props(out, &shape.color, style),
        None => {
            prop(out, "background", &shape.color);
            // clip-path and border-radius are mutually exclusive
            if let Some(clip) = clip_path_for(shape) {
                prop(out, "clip-path", clip);
            } else if let Some(radius) = border_radius_for(shape) {
                prop(out, "border-radius", radius);
            }
        }
    }

    if let Some(transform) = transform_value(shape) {
        prop(out, "transform", transform);
    }

    if shape.opacity != 100.0 {
        prop(out, "opacity", format_num(shape.opacity / 100.0));
    }

    out.push('}');
}

fn emit_text_props(out: &mut String, color: &str, style: &TextStyle) {
    prop(out, "color", color);
    prop(out, "font-size", format!("{}px", format_num(style.font_size)));
    prop(out, "font-family", &style.font_family);
    if style.font_weight != "normal" {
        prop(out, "font-weight", &style.font_weight);
    }
    if style.font_style != "normal" {
        prop(out, "font-style", &style.font_style);
    }
    prop(out, "text-align", style.text_align.as_str());
    prop(out, "display", "flex");
    prop(out, "align-items", "center");
    prop(out, "justify-content", style.text_align.justify_content());
    prop(out, "overflow", "hidden");
    prop(out, "white-space", "pre-wrap");
    prop(out, "word-break", "break-word");
}

/// `rotate(..) scaleX(-1) scaleY(-1)`; rotation always precedes the flips.
fn transform_value(shape: &Shape) -> Option<String> {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if shape.rotation != 0.0 {
        parts.push(format!("rotate({}deg)", format_num(shape.rotation)));
    }
    if shape.flip_x {
        parts.push("scaleX(-1)".to_string());
    }
    if shape.flip_y {
        parts.push("scaleY(-1)".to_string());
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}

/// Escape text for an HTML text node or attribute value.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ShapeId;
    use crate::model::{ShapeKind, TextAlign};
    use pretty_assertions::assert_eq;

    fn rect() -> Shape {
        let mut s = Shape::create_default(ShapeKind::Rectangle, 10.0, 10.0);
        s.id = ShapeId::intern("r1");
        s
    }

    #[test]
    fn rectangle_block() {
        let css = generate_css(&[rect()]);
        assert_eq!(
            css,
            ".shape-1 {
  position: absolute;
  left: 10px;
  top: 10px;
  width: 80px;
  height: 50px;
  background: #004aad;
  border-radius: 0%;
}"
        );
    }

    #[test]
    fn transform_order_is_fixed() {
        let mut s = rect();
        s.rotation = 45.0;
        s.flip_x = true;
        let css = generate_css(&[s.clone()]);
        assert!(css.contains("  transform: rotate(45deg) scaleX(-1);\n"), "{css}");

        s.flip_y = true;
        let css = generate_css(&[s]);
        assert!(
            css.contains("  transform: rotate(45deg) scaleX(-1) scaleY(-1);\n"),
            "{css}"
        );
    }

    #[test]
    fn flip_without_rotation() {
        let mut s = rect();
        s.flip_y = true;
        let css = generate_css(&[s]);
        assert!(css.contains("  transform: scaleY(-1);\n"), "{css}");
    }

    #[test]
    fn opacity_only_when_not_default() {
        let mut s = rect();
        assert!(!generate_css(&[s.clone()]).contains("opacity"));
        s.opacity = 35.0;
        assert!(generate_css(&[s]).contains("  opacity: 0.35;\n"));
    }

    #[test]
    fn positions_are_rounded() {
        let mut s = rect();
        s.x = 10.5;
        s.y = 7.49;
        s.width = 80.2;
        let css = generate_css(&[s]);
        assert!(css.contains("  left: 11px;\n"), "{css}");
        assert!(css.contains("  top: 7px;\n"), "{css}");
        assert!(css.contains("  width: 80px;\n"), "{css}");
    }

    #[test]
    fn polygon_kinds_use_clip_path_not_radius() {
        let tri = Shape::create_default(ShapeKind::Triangle, 0.0, 0.0);
        let css = generate_css(&[tri]);
        assert!(css.contains("  clip-path: polygon(50% 0%, 100% 100%, 0% 100%);\n"));
        assert!(!css.contains("border-radius"));

        let circle = Shape::create_default(ShapeKind::Circle, 0.0, 0.0);
        let css = generate_css(&[circle]);
        assert!(css.contains("  border-radius: 50%;\n"));
        assert!(!css.contains("clip-path"));
    }

    #[test]
    fn curved_star_uses_path() {
        let mut star = Shape::create_default(ShapeKind::Star, 0.0, 0.0);
        star.curve = Some(20.0);
        let css = generate_css(&[star]);
        assert!(css.contains("  clip-path: path('M "), "{css}");
    }

    #[test]
    fn text_block() {
        let mut t = Shape::create_default(ShapeKind::Text, 0.0, 0.0);
        if let Some(style) = t.text.as_mut() {
            style.font_weight = "bold".to_string();
            style.text_align = TextAlign::Right;
        }
        let css = generate_css(&[t]);
        assert_eq!(
            css,
            ".shape-1 {
  position: absolute;
  left: 0px;
  top: 0px;
  width: 150px;
  height: 40px;
  color: #004aad;
  font-size: 24px;
  font-family: Arial;
  font-weight: bold;
  text-align: right;
  display: flex;
  align-items: center;
  justify-content: flex-end;
  overflow: hidden;
  white-space: pre-wrap;
  word-break: break-word;
}"
        );
    }

    #[test]
    fn blocks_separated_by_blank_line() {
        let a = rect();
        let b = Shape::create_default(ShapeKind::Ellipse, 0.0, 0.0);
        let css = generate_css(&[a, b]);
        assert!(css.contains("}\n\n.shape-2 {\n"));
        assert!(!css.ends_with('\n'));
    }

    #[test]
    fn html_escapes_text_and_sizes_container() {
        let a = rect();
        let mut t = Shape::create_default(ShapeKind::Text, 100.0, 200.0);
        if let Some(style) = t.text.as_mut() {
            style.text = "<b>Tom & Jerry</b>".to_string();
        }
        let html = generate_html(&[a, t], &ExportOptions::default());
        assert_eq!(
            html,
            r#"<div class="canvas-container" style="position: relative; width: 270px; height: 260px;">
  <div class="shape-1"></div>
  <div class="shape-2">&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;</div>
</div>"#
        );
    }

    #[test]
    fn empty_canvas_placeholders() {
        let out = generate(&[], &ExportOptions::default());
        assert_eq!(out.css, EMPTY_CSS);
        assert_eq!(out.html, EMPTY_HTML);
    }
}
