//! Editor session: the single mutation surface the host calls.
//!
//! Owns the live shapes, the selection, the history log, the clipboard
//! and the gesture controller. Every mutating call either applies a
//! validated change (and records history where it is a discrete edit) or
//! leaves state untouched and logs the rejection at `warn`.
//!
//! Structural edits issued while a drag or resize is in progress first
//! finish that gesture, so its commit is never lost.

use crate::canvas::{CanvasContext, CanvasController, CanvasMutation, GestureState, Mutations};
use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::error::{EditError, EditResult};
use crate::history::{History, Snapshot};
use crate::hit::hit_test;
use crate::host::{
    CommitAction, CommitMode, DefaultShapeFactory, LogNotifier, Notifier, NotifyKind,
    ShapeFactory, SnapshotStore,
};
use crate::input::{HitTarget, InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use shapes_core::emitter::{self, Export, ExportOptions};
use shapes_core::id::ShapeId;
use shapes_core::model::{MIN_SIZE, Shape, ShapeKind, ShapeProperty};
use std::collections::HashSet;

/// Where the first added shape lands; later ones cascade from here.
const ADD_ORIGIN: (f64, f64) = (200.0, 150.0);
const ADD_STEP: f64 = 20.0;
const ADD_CASCADE: usize = 5;

pub struct EditorSession {
    shapes: Vec<Shape>,
    selected: Option<ShapeId>,
    history: History,
    clipboard: Clipboard,
    controller: CanvasController,
    config: EditorConfig,
    factory: Box<dyn ShapeFactory>,
    notifier: Box<dyn Notifier>,
    revision: u64,
}

fn context<'a>(
    shapes: &'a [Shape],
    selected: Option<ShapeId>,
    config: &EditorConfig,
) -> CanvasContext<'a> {
    CanvasContext {
        shapes,
        selected,
        grid: config.grid(),
        canvas_width: config.canvas_width,
        canvas_height: config.canvas_height,
    }
}

fn finite(name: &str, v: f64) -> EditResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EditError::Validation(format!("{name} is not a finite number")))
    }
}

impl EditorSession {
    /// Start a session on `initial`. Records that fail validation are
    /// dropped; duplicate ids are replaced with fresh ones.
    pub fn new(initial: Vec<Shape>, config: EditorConfig) -> Self {
        let config = config.sanitized();
        let mut shapes: Vec<Shape> = Vec::with_capacity(initial.len());
        for mut shape in initial {
            shape.normalize();
            if let Err(reason) = shape.validate() {
                log::warn!("dropping initial shape {}: {reason}", shape.id);
                continue;
            }
            while shapes.iter().any(|s| s.id == shape.id) {
                shape.id = ShapeId::with_prefix(shape.kind.tag());
            }
            shapes.push(shape);
        }
        let history = History::new(&shapes, config.history_limit);
        log::debug!("session started with {} shapes", shapes.len());
        Self {
            shapes,
            selected: None,
            history,
            clipboard: Clipboard::new(),
            controller: CanvasController::new(),
            config,
            factory: Box::new(DefaultShapeFactory),
            notifier: Box::new(LogNotifier),
            revision: 0,
        }
    }

    #[must_use]
    pub fn with_factory(mut self, factory: impl ShapeFactory + 'static) -> Self {
        self.factory = Box::new(factory);
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.set_notifier(notifier);
        self
    }

    pub fn set_notifier(&mut self, notifier: impl Notifier + 'static) {
        self.notifier = Box::new(notifier);
    }

    // ─── Reads ───────────────────────────────────────────────────────────

    /// Live shapes in z-order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.shape(id))
    }

    /// Bumped on every applied change, live gesture frames included.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn gesture(&self) -> &GestureState {
        self.controller.state()
    }

    /// Deep copy of the live shapes.
    pub fn snapshot(&self) -> Snapshot {
        self.shapes.clone()
    }

    // ─── Export ──────────────────────────────────────────────────────────

    fn export_options(&self) -> ExportOptions {
        ExportOptions {
            container_class: self.config.container_class.clone(),
            margin: self.config.export_margin,
        }
    }

    pub fn generate_css(&self) -> String {
        emitter::generate_css(&self.shapes)
    }

    pub fn generate_html(&self) -> String {
        emitter::generate_html(&self.shapes, &self.export_options())
    }

    pub fn export(&self) -> Export {
        emitter::generate(&self.shapes, &self.export_options())
    }

    // ─── Discrete edits ──────────────────────────────────────────────────

    /// Insert a default shape of `kind`, select it and record history.
    pub fn add_shape(&mut self, kind: ShapeKind) -> Option<ShapeId> {
        let result = self.try_add_shape(kind);
        self.settle("add shape", result)
    }

    /// Remove the selected shape and clear the selection.
    pub fn delete_selected(&mut self) -> bool {
        let result = self.try_delete_selected();
        self.settle("delete", result).is_some()
    }

    /// Set one property on shape `id`. Position and size go through the
    /// same clamping as [`move_to`](Self::move_to) and [`resize`](Self::resize).
    pub fn update_property(&mut self, id: ShapeId, property: ShapeProperty) -> bool {
        let result = self.try_update_property(id, property);
        self.settle("update property", result).is_some()
    }

    /// Move shape `id` so its top-left lands at `(x, y)`, clamped to the canvas.
    pub fn move_to(&mut self, id: ShapeId, x: f64, y: f64) -> bool {
        let result = self.try_move_to(id, x, y);
        self.settle("move", result).is_some()
    }

    /// Resize shape `id` from its top-left corner; sizes below the minimum
    /// are raised to it.
    pub fn resize(&mut self, id: ShapeId, width: f64, height: f64) -> bool {
        let result = self.try_resize(id, width, height);
        self.settle("resize", result).is_some()
    }

    /// Select `id`, or clear the selection with `None`. Not recorded.
    pub fn select(&mut self, id: Option<ShapeId>) -> bool {
        let result = self.try_select(id);
        self.settle("select", result).is_some()
    }

    pub fn copy(&mut self) -> bool {
        let result = self.try_copy();
        self.settle("copy", result).is_some()
    }

    pub fn cut(&mut self) -> bool {
        let result = self.try_cut();
        self.settle("cut", result).is_some()
    }

    /// Insert a fresh-id clone of the clipboard shape, offset by the
    /// configured paste offset, and select it.
    pub fn paste(&mut self) -> Option<ShapeId> {
        let result = self.try_paste();
        self.settle("paste", result)
    }

    pub fn undo(&mut self) -> bool {
        self.finish_gesture();
        let result = self
            .history
            .undo()
            .ok_or_else(|| EditError::NotFound("nothing to undo".to_string()))
            .map(|snapshot| self.restore(snapshot));
        self.settle("undo", result).is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.finish_gesture();
        let result = self
            .history
            .redo()
            .ok_or_else(|| EditError::NotFound("nothing to redo".to_string()))
            .map(|snapshot| self.restore(snapshot));
        self.settle("redo", result).is_some()
    }

    /// Remove every shape. No-op on an empty canvas.
    pub fn clear(&mut self) -> bool {
        self.finish_gesture();
        let result = if self.shapes.is_empty() {
            Err(EditError::NotFound("shapes to clear".to_string()))
        } else {
            self.shapes.clear();
            self.selected = None;
            self.record("clear");
            Ok(())
        };
        self.settle("clear", result).is_some()
    }

    /// Replace the composition with `shapes`. Rejected as a whole if any
    /// record is invalid or two records share an id.
    pub fn load_snapshot(&mut self, shapes: Vec<Shape>) -> bool {
        let result = self.try_load_snapshot(shapes);
        self.settle("load snapshot", result).is_some()
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Pointer-down at canvas coordinates, hit-tested against the live shapes.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let target = hit_test(&self.shapes, self.selected, x, y);
        self.pointer_down_on(target, x, y);
    }

    /// Pointer-down on a target the host already resolved.
    pub fn pointer_down_on(&mut self, target: HitTarget, x: f64, y: f64) {
        self.handle_event(&InputEvent::PointerDown { x, y }, target);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.handle_event(&InputEvent::PointerMove { x, y }, HitTarget::Canvas);
    }

    /// Call from a document-level listener so releases outside the canvas
    /// still end the gesture.
    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.handle_event(&InputEvent::PointerUp { x, y }, HitTarget::Canvas);
    }

    pub fn handle_event(&mut self, event: &InputEvent, target: HitTarget) {
        let ctx = context(&self.shapes, self.selected, &self.config);
        let mutations = self.controller.handle(event, target, &ctx);
        self.apply(mutations);
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Resolve and run a keyboard shortcut. Returns the action when the key
    /// is bound, whether or not it changed anything, so the host can
    /// suppress the browser default.
    pub fn handle_key(
        &mut self,
        key: &str,
        mods: Modifiers,
        input_focused: bool,
    ) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve_with_focus(key, mods, input_focused)?;
        log::debug!("shortcut {key} → {action:?}");
        match action {
            ShortcutAction::Undo => {
                self.undo();
            }
            ShortcutAction::Redo => {
                self.redo();
            }
            ShortcutAction::Copy => {
                self.copy();
            }
            ShortcutAction::Cut => {
                self.cut();
            }
            ShortcutAction::Paste => {
                self.paste();
            }
            ShortcutAction::Delete => {
                self.delete_selected();
            }
        }
        Some(action)
    }

    // ─── Settings ────────────────────────────────────────────────────────

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.config.snap_to_grid = enabled;
    }

    /// Rejects zero.
    pub fn set_grid_size(&mut self, size: u32) -> bool {
        if size == 0 {
            log::warn!("grid size 0 rejected");
            return false;
        }
        self.config.grid_size = size;
        true
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> bool {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            log::warn!("canvas size {width}x{height} rejected");
            return false;
        }
        self.config.canvas_width = width;
        self.config.canvas_height = height;
        true
    }

    // ─── Host collaborators ──────────────────────────────────────────────

    /// Hand the composition to `action`. `SaveAsNew` gives every shape a
    /// fresh id; `Overwrite` keeps them.
    pub fn commit(&mut self, mode: CommitMode, action: &mut dyn CommitAction) -> bool {
        self.finish_gesture();
        let shapes: Vec<Shape> = match mode {
            CommitMode::SaveAsNew => self.shapes.iter().map(Shape::duplicate).collect(),
            CommitMode::Overwrite => self.shapes.clone(),
        };
        match action.commit(shapes, mode) {
            Ok(()) => {
                log::debug!("committed {} shapes ({mode:?})", self.shapes.len());
                self.notifier.notify("Shapes saved", NotifyKind::Success);
                true
            }
            Err(reason) => {
                self.notifier
                    .notify(&format!("Failed to save shapes: {reason}"), NotifyKind::Error);
                false
            }
        }
    }

    pub fn save_to(&mut self, store: &mut dyn SnapshotStore) -> bool {
        self.finish_gesture();
        match store.save(&self.shapes) {
            Ok(()) => {
                self.notifier
                    .notify("Shapes saved to storage", NotifyKind::Success);
                true
            }
            Err(reason) => {
                self.notifier
                    .notify(&format!("Failed to save shapes: {reason}"), NotifyKind::Error);
                false
            }
        }
    }

    pub fn load_from(&mut self, store: &mut dyn SnapshotStore) -> bool {
        match store.load() {
            Ok(Some(shapes)) => {
                if self.load_snapshot(shapes) {
                    self.notifier
                        .notify("Shapes loaded from storage", NotifyKind::Success);
                    true
                } else {
                    self.notifier
                        .notify("Saved shapes are invalid", NotifyKind::Error);
                    false
                }
            }
            Ok(None) => {
                self.notifier
                    .notify("No saved shapes found", NotifyKind::Error);
                false
            }
            Err(reason) => {
                self.notifier
                    .notify(&format!("Failed to load shapes: {reason}"), NotifyKind::Error);
                false
            }
        }
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn settle<T>(&self, op: &str, result: EditResult<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("{op} ignored: {e}");
                None
            }
        }
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    fn record(&mut self, what: &str) {
        self.history.record(&self.shapes);
        self.bump();
        log::debug!("recorded {what}");
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.shapes = snapshot;
        self.selected = None;
        self.bump();
    }

    fn index_of(&self, id: ShapeId) -> EditResult<usize> {
        self.shapes
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| EditError::NotFound(format!("shape {id}")))
    }

    fn selected_index(&self) -> EditResult<usize> {
        let id = self
            .selected
            .ok_or_else(|| EditError::NotFound("selection".to_string()))?;
        self.index_of(id)
    }

    fn ensure_unique_id(&self, shape: &mut Shape) {
        while self.shapes.iter().any(|s| s.id == shape.id) {
            shape.id = ShapeId::with_prefix(shape.kind.tag());
        }
    }

    fn finish_gesture(&mut self) {
        if !self.controller.is_active() {
            return;
        }
        let ctx = context(&self.shapes, self.selected, &self.config);
        let mutations = self.controller.finish(&ctx);
        self.apply(mutations);
    }

    fn apply(&mut self, mutations: Mutations) {
        for mutation in mutations {
            match mutation {
                CanvasMutation::Select(id) => {
                    if self.selected != id {
                        self.selected = id;
                        self.bump();
                    }
                }
                CanvasMutation::Move { id, x, y } => {
                    if let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) {
                        shape.x = x;
                        shape.y = y;
                        self.bump();
                    }
                }
                CanvasMutation::Resize { id, width, height } => {
                    if let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) {
                        shape.width = width;
                        shape.height = height;
                        self.bump();
                    }
                }
                CanvasMutation::Commit => self.record("gesture"),
            }
        }
    }

    fn clamped_position(&self, shape: &Shape, x: f64, y: f64) -> (f64, f64) {
        let max_x = (self.config.canvas_width - shape.width).max(0.0);
        let max_y = (self.config.canvas_height - shape.height).max(0.0);
        (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
    }

    fn try_add_shape(&mut self, kind: ShapeKind) -> EditResult<ShapeId> {
        self.finish_gesture();
        let step = (self.shapes.len() % ADD_CASCADE) as f64 * ADD_STEP;
        let mut shape = self
            .factory
            .create(kind, ADD_ORIGIN.0 + step, ADD_ORIGIN.1 + step);
        shape.normalize();
        shape.validate()?;
        let (x, y) = self.clamped_position(&shape, shape.x, shape.y);
        shape.x = x;
        shape.y = y;
        self.ensure_unique_id(&mut shape);

        let id = shape.id;
        self.shapes.push(shape);
        self.selected = Some(id);
        self.record("add");
        Ok(id)
    }

    fn try_delete_selected(&mut self) -> EditResult<()> {
        self.finish_gesture();
        let index = self.selected_index()?;
        let removed = self.shapes.remove(index);
        self.selected = None;
        self.record("delete");
        log::debug!("deleted {}", removed.id);
        Ok(())
    }

    fn try_update_property(&mut self, id: ShapeId, property: ShapeProperty) -> EditResult<()> {
        self.finish_gesture();
        let index = self.index_of(id)?;
        let (x, y, width, height) = {
            let s = &self.shapes[index];
            (s.x, s.y, s.width, s.height)
        };
        match property {
            ShapeProperty::X(v) => self.try_move_to(id, v, y),
            ShapeProperty::Y(v) => self.try_move_to(id, x, v),
            ShapeProperty::Width(v) => self.try_resize(id, v, height),
            ShapeProperty::Height(v) => self.try_resize(id, width, v),
            other => {
                other.apply(&mut self.shapes[index])?;
                self.record(other.key());
                Ok(())
            }
        }
    }

    fn try_move_to(&mut self, id: ShapeId, x: f64, y: f64) -> EditResult<()> {
        self.finish_gesture();
        let (x, y) = (finite("x", x)?, finite("y", y)?);
        let index = self.index_of(id)?;
        let (x, y) = self.clamped_position(&self.shapes[index], x, y);
        let shape = &mut self.shapes[index];
        shape.x = x;
        shape.y = y;
        self.record("move");
        Ok(())
    }

    fn try_resize(&mut self, id: ShapeId, width: f64, height: f64) -> EditResult<()> {
        self.finish_gesture();
        let (width, height) = (finite("width", width)?, finite("height", height)?);
        let index = self.index_of(id)?;
        let shape = &mut self.shapes[index];
        shape.width = width.max(MIN_SIZE);
        shape.height = height.max(MIN_SIZE);
        self.record("resize");
        Ok(())
    }

    fn try_select(&mut self, id: Option<ShapeId>) -> EditResult<()> {
        if let Some(id) = id {
            self.index_of(id)?;
        }
        if self.selected != id {
            self.selected = id;
            self.bump();
        }
        Ok(())
    }

    fn try_copy(&mut self) -> EditResult<()> {
        let index = self.selected_index()?;
        self.clipboard.copy(&self.shapes[index]);
        Ok(())
    }

    fn try_cut(&mut self) -> EditResult<()> {
        self.finish_gesture();
        let id = self
            .selected
            .ok_or_else(|| EditError::NotFound("selection".to_string()))?;
        self.clipboard.cut(&mut self.shapes, id)?;
        self.selected = None;
        self.record("cut");
        Ok(())
    }

    fn try_paste(&mut self) -> EditResult<ShapeId> {
        self.finish_gesture();
        let mut shape = self
            .clipboard
            .paste(self.config.paste_offset)
            .ok_or_else(|| EditError::NotFound("clipboard is empty".to_string()))?;
        self.ensure_unique_id(&mut shape);

        let id = shape.id;
        self.shapes.push(shape);
        self.selected = Some(id);
        self.record("paste");
        Ok(id)
    }

    fn try_load_snapshot(&mut self, mut shapes: Vec<Shape>) -> EditResult<()> {
        self.finish_gesture();
        let mut seen = HashSet::with_capacity(shapes.len());
        for shape in &mut shapes {
            shape.normalize();
            shape
                .validate()
                .map_err(|reason| EditError::Validation(format!("shape {}: {reason}", shape.id)))?;
            if !seen.insert(shape.id) {
                return Err(EditError::Validation(format!("duplicate id {}", shape.id)));
            }
        }
        self.shapes = shapes;
        self.selected = None;
        self.record("load");
        Ok(())
    }
}
