use lasso::{Spur, ThreadedRodeo};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for shape IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for shapes on the canvas.
/// Internally a 4-byte `Spur` index, so comparisons and hashing are O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(Spur);

impl ShapeId {
    /// Intern a string as a ShapeId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ShapeId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a unique anonymous ID (for records loaded without an id).
    pub fn anonymous() -> Self {
        Self::with_prefix("shape")
    }

    /// Generate a unique ID with a type prefix (e.g. `star_1`, `text_2`).
    ///
    /// Unique within the process. Callers holding shapes loaded from
    /// storage must still check for collisions with those records.
    pub fn with_prefix(prefix: &str) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("{prefix}_{n}"))
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ShapeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Accepts strings and integers: older saved compositions used numeric
/// timestamps as ids.
struct ShapeIdVisitor;

impl Visitor<'_> for ShapeIdVisitor {
    type Value = ShapeId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or integer shape id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ShapeId, E> {
        if v.is_empty() {
            return Err(E::custom("empty shape id"));
        }
        Ok(ShapeId::intern(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ShapeId, E> {
        Ok(ShapeId::intern(&v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ShapeId, E> {
        Ok(ShapeId::intern(&v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<ShapeId, E> {
        if v.fract() == 0.0 && v.is_finite() {
            Ok(ShapeId::intern(&format!("{v:.0}")))
        } else {
            Err(E::custom("fractional shape id"))
        }
    }
}

impl<'de> Deserialize<'de> for ShapeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ShapeIdVisitor)
    }
}
