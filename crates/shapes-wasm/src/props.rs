//! Property keys from the host's property panel → `ShapeProperty`.
//!
//! Keys are the record's JSON field names. Values arrive as JSON; numbers
//! may also come as numeric strings straight from `<input>` elements.

use serde_json::Value;
use shapes_core::model::{ShapeProperty, TextAlign};

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Parse one `key` / JSON `value` pair. `None` for unknown keys or
/// values of the wrong type.
pub fn parse_property(key: &str, value: &Value) -> Option<ShapeProperty> {
    let prop = match key {
        "x" => ShapeProperty::X(number(value)?),
        "y" => ShapeProperty::Y(number(value)?),
        "width" => ShapeProperty::Width(number(value)?),
        "height" => ShapeProperty::Height(number(value)?),
        "color" => ShapeProperty::Color(string(value)?),
        "opacity" => ShapeProperty::Opacity(number(value)?),
        "rotation" => ShapeProperty::Rotation(number(value)?),
        "flipX" => ShapeProperty::FlipX(boolean(value)?),
        "flipY" => ShapeProperty::FlipY(boolean(value)?),
        "borderRadius" => ShapeProperty::BorderRadius(number(value)?),
        "curve" => ShapeProperty::Curve(number(value)?),
        "text" => ShapeProperty::Text(string(value)?),
        "fontSize" => ShapeProperty::FontSize(number(value)?),
        "fontFamily" => ShapeProperty::FontFamily(string(value)?),
        "fontWeight" => ShapeProperty::FontWeight(string(value)?),
        "fontStyle" => ShapeProperty::FontStyle(string(value)?),
        "textAlign" => ShapeProperty::TextAlign(TextAlign::from_str_opt(value.as_str()?)?),
        _ => return None,
    };
    Some(prop)
}

/// Parse a raw JSON value string; bare words that are not valid JSON are
/// taken as strings.
pub fn parse_property_json(key: &str, raw: &str) -> Option<ShapeProperty> {
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    parse_property(key, &value)
}
