//! Canvas controller: the pointer gesture state machine.
//!
//! Translates pointer events into `CanvasMutation`s that the session
//! applies to its live shapes. Live moves and resizes are not recorded;
//! the single `Commit` emitted when a gesture ends is what reaches history.
//!
//! ```text
//!   Idle ──down on body──────────▶ Dragging ──up──▶ Idle (+Commit)
//!   Idle ──down on sel. handle───▶ Resizing ──up──▶ Idle (+Commit)
//!   Idle ──down on canvas────────▶ Idle (deselect)
//! ```

use crate::config::GridSnap;
use crate::input::{HitTarget, InputEvent};
use shapes_core::id::ShapeId;
use shapes_core::model::{MIN_SIZE, Shape};
use smallvec::SmallVec;

/// What the controller is in the middle of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Dragging {
        id: ShapeId,
        /// Pointer position minus shape origin at pointer-down.
        offset_x: f64,
        offset_y: f64,
    },
    Resizing {
        id: ShapeId,
        origin_width: f64,
        origin_height: f64,
        /// Pointer position at pointer-down.
        origin_x: f64,
        origin_y: f64,
    },
}

impl GestureState {
    pub fn shape_id(&self) -> Option<ShapeId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
        }
    }
}

/// A change the session should apply.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasMutation {
    Select(Option<ShapeId>),
    /// Live position during a drag. Not recorded.
    Move { id: ShapeId, x: f64, y: f64 },
    /// Live size during a resize. Not recorded.
    Resize {
        id: ShapeId,
        width: f64,
        height: f64,
    },
    /// A gesture ended: record the current shapes as one history entry.
    Commit,
}

/// Read-only view of the session the controller needs per event.
#[derive(Debug, Clone, Copy)]
pub struct CanvasContext<'a> {
    pub shapes: &'a [Shape],
    pub selected: Option<ShapeId>,
    pub grid: GridSnap,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl CanvasContext<'_> {
    fn find(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }
}

pub type Mutations = SmallVec<[CanvasMutation; 2]>;

#[derive(Debug)]
pub struct CanvasController {
    state: GestureState,
}

impl Default for CanvasController {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasController {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != GestureState::Idle
    }

    /// Handle one pointer event. `target` only matters for pointer-down.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        target: HitTarget,
        ctx: &CanvasContext<'_>,
    ) -> Mutations {
        match *event {
            InputEvent::PointerDown { x, y } => self.pointer_down(x, y, target, ctx),
            InputEvent::PointerMove { x, y } => self.pointer_move(x, y, ctx),
            InputEvent::PointerUp { .. } => self.finish(ctx),
        }
    }

    /// End the active gesture, if any. Emits `Commit` when the gesture's
    /// shape is still live.
    pub fn finish(&mut self, ctx: &CanvasContext<'_>) -> Mutations {
        let mut out = Mutations::new();
        let previous = std::mem::replace(&mut self.state, GestureState::Idle);
        if let Some(id) = previous.shape_id() {
            if ctx.find(id).is_some() {
                log::debug!("gesture on {id} finished");
                out.push(CanvasMutation::Commit);
            } else {
                log::warn!("gesture target {id} vanished; nothing to commit");
            }
        }
        out
    }

    fn pointer_down(
        &mut self,
        px: f64,
        py: f64,
        target: HitTarget,
        ctx: &CanvasContext<'_>,
    ) -> Mutations {
        // a missed pointer-up must not swallow the previous gesture's commit
        let mut out = self.finish(ctx);

        match target {
            HitTarget::Canvas => out.push(CanvasMutation::Select(None)),
            HitTarget::ResizeHandle(id) if ctx.selected == Some(id) && ctx.find(id).is_some() => {
                if let Some(shape) = ctx.find(id) {
                    self.state = GestureState::Resizing {
                        id,
                        origin_width: shape.width,
                        origin_height: shape.height,
                        origin_x: px,
                        origin_y: py,
                    };
                    log::debug!("resize started on {id}");
                }
            }
            HitTarget::Body(id) | HitTarget::ResizeHandle(id) => match ctx.find(id) {
                Some(shape) => {
                    self.state = GestureState::Dragging {
                        id,
                        offset_x: px - shape.x,
                        offset_y: py - shape.y,
                    };
                    out.push(CanvasMutation::Select(Some(id)));
                    log::debug!("drag started on {id}");
                }
                None => {
                    log::warn!("pointer-down on unknown shape {id}");
                    out.push(CanvasMutation::Select(None));
                }
            },
        }
        out
    }

    fn pointer_move(&mut self, px: f64, py: f64, ctx: &CanvasContext<'_>) -> Mutations {
        let mut out = Mutations::new();
        match self.state {
            GestureState::Idle => {}
            GestureState::Dragging {
                id,
                offset_x,
                offset_y,
            } => {
                let Some(shape) = ctx.find(id) else {
                    self.state = GestureState::Idle;
                    return out;
                };
                let max_x = (ctx.canvas_width - shape.width).max(0.0);
                let max_y = (ctx.canvas_height - shape.height).max(0.0);
                let x = ctx
                    .grid
                    .snap_within((px - offset_x).clamp(0.0, max_x), max_x);
                let y = ctx
                    .grid
                    .snap_within((py - offset_y).clamp(0.0, max_y), max_y);
                log::trace!("drag {id} → ({x}, {y})");
                out.push(CanvasMutation::Move { id, x, y });
            }
            GestureState::Resizing {
                id,
                origin_width,
                origin_height,
                origin_x,
                origin_y,
            } => {
                if ctx.find(id).is_none() {
                    self.state = GestureState::Idle;
                    return out;
                }
                let width = ctx
                    .grid
                    .snap_at_least((origin_width + (px - origin_x)).max(MIN_SIZE), MIN_SIZE);
                let height = ctx
                    .grid
                    .snap_at_least((origin_height + (py - origin_y)).max(MIN_SIZE), MIN_SIZE);
                log::trace!("resize {id} → {width}x{height}");
                out.push(CanvasMutation::Resize { id, width, height });
            }
        }
        out
    }
}
