pub mod emitter;
pub mod geometry;
pub mod id;
pub mod model;

pub use emitter::{Export, ExportOptions, generate, generate_css, generate_html};
pub use geometry::{BoundingBox, bounding_box, polygon_for, rounded_clip_path};
pub use id::ShapeId;
pub use model::*;
