//! Editor configuration supplied by the host.
//!
//! Every field has a default, so the host may pass a partial JSON object.

use serde::{Deserialize, Serialize};
use shapes_core::geometry::round_half_up;

const DEFAULT_GRID_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Drag clamp bounds, in pixels.
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub snap_to_grid: bool,
    /// Positive grid pitch in pixels. Zero falls back to the default.
    pub grid_size: u32,
    /// Cap on stored snapshots. `None` keeps every entry.
    pub history_limit: Option<usize>,
    /// Offset applied to both axes when pasting.
    pub paste_offset: f64,
    /// Margin past the bounding box for the exported container.
    pub export_margin: f64,
    pub container_class: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 400.0,
            snap_to_grid: false,
            grid_size: DEFAULT_GRID_SIZE,
            history_limit: None,
            paste_offset: 20.0,
            export_margin: 20.0,
            container_class: "canvas-container".to_string(),
        }
    }
}

impl EditorConfig {
    /// Replace out-of-range values with defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.grid_size == 0 {
            log::warn!("grid size 0 rejected, using {DEFAULT_GRID_SIZE}");
            self.grid_size = DEFAULT_GRID_SIZE;
        }
        if !(self.canvas_width.is_finite() && self.canvas_width > 0.0) {
            self.canvas_width = defaults.canvas_width;
        }
        if !(self.canvas_height.is_finite() && self.canvas_height > 0.0) {
            self.canvas_height = defaults.canvas_height;
        }
        if !self.paste_offset.is_finite() {
            self.paste_offset = defaults.paste_offset;
        }
        if !(self.export_margin.is_finite() && self.export_margin >= 0.0) {
            self.export_margin = defaults.export_margin;
        }
        if self.history_limit == Some(0) {
            self.history_limit = Some(1);
        }
        self
    }

    pub fn grid(&self) -> GridSnap {
        GridSnap {
            enabled: self.snap_to_grid,
            size: self.grid_size.max(1),
        }
    }
}

/// Snap-to-grid rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSnap {
    pub enabled: bool,
    pub size: u32,
}

impl GridSnap {
    pub const OFF: Self = Self {
        enabled: false,
        size: DEFAULT_GRID_SIZE,
    };

    /// Nearest multiple of the grid size, or `v` unchanged when disabled.
    pub fn snap(&self, v: f64) -> f64 {
        if !self.enabled {
            return v;
        }
        let g = f64::from(self.size);
        round_half_up(v / g) * g
    }

    /// Snap a position that must stay within `[0, max]`: falls back to the
    /// next grid line inward when rounding would cross `max`.
    pub fn snap_within(&self, v: f64, max: f64) -> f64 {
        let snapped = self.snap(v);
        if snapped > max {
            let g = f64::from(self.size);
            ((max / g).floor() * g).max(0.0)
        } else {
            snapped.max(0.0)
        }
    }

    /// Snap a size that must stay at least `min`: falls back to the first
    /// grid line at or above `min` when rounding would drop below it.
    pub fn snap_at_least(&self, v: f64, min: f64) -> f64 {
        let snapped = self.snap(v);
        if snapped < min {
            let g = f64::from(self.size);
            (min / g).ceil() * g
        } else {
            snapped
        }
    }
}
