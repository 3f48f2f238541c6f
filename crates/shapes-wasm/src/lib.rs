//! WASM bridge for CSS Shapes: exposes the editing engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page renders shapes
//! from `get_shapes_json()` after any call that reports a change.

mod host;
mod props;

use host::{DEFAULT_STORAGE_KEY, JsCommit, JsNotifier, LocalStorageStore, parse_mode};
use serde::Serialize;
use shapes_core::id::ShapeId;
use shapes_core::model::{Shape, ShapeKind};
use shapes_editor::config::EditorConfig;
use shapes_editor::input::{HitTarget, Modifiers};
use shapes_editor::session::EditorSession;
use shapes_editor::shortcuts::ShortcutAction;
use wasm_bindgen::prelude::*;

pub use props::{parse_property, parse_property_json};

/// The main WASM-facing editor.
///
/// Wraps one editor session; every interaction from the page goes
/// through this struct.
#[wasm_bindgen]
pub struct ShapesCanvas {
    session: EditorSession,
    storage_key: String,
}

#[derive(Serialize)]
struct KeyOutcome {
    changed: bool,
    action: &'static str,
}

#[wasm_bindgen]
impl ShapesCanvas {
    /// Create an editor. `config_json` is a (possibly partial) editor
    /// config object, `shapes_json` the initial shape records; either may
    /// be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, shapes_json: &str) -> Self {
        console_error_panic_hook_setup();
        host::init_logging(log::LevelFilter::Warn);

        let config = parse_or_default::<EditorConfig>("config", config_json);
        let shapes = parse_or_default::<Vec<Shape>>("shapes", shapes_json);
        Self {
            session: EditorSession::new(shapes, config),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Install `callback(message, kind)` for user-facing notifications.
    pub fn set_notifier(&mut self, callback: js_sys::Function) {
        self.session.set_notifier(JsNotifier::new(callback));
    }

    pub fn set_storage_key(&mut self, key: &str) {
        self.storage_key = key.to_string();
    }

    /// `"error"`, `"warn"`, `"info"`, `"debug"` or `"trace"`.
    pub fn set_log_level(&mut self, level: &str) {
        let filter = level.parse().unwrap_or(log::LevelFilter::Warn);
        host::init_logging(filter);
    }

    /// Monotonic change counter, for cheap re-render checks.
    pub fn revision(&self) -> f64 {
        self.session.revision() as f64
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Pointer-down at canvas coordinates. `target` is `"shape:<id>"`,
    /// `"handle:<id>"`, `"canvas"`, or empty to hit-test in Rust.
    /// Returns `true` if anything changed.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64, target: &str) -> bool {
        let before = self.session.revision();
        match HitTarget::parse(target) {
            Some(target) => self.session.pointer_down_on(target, x, y),
            None => self.session.pointer_down(x, y),
        }
        self.session.revision() != before
    }

    /// Returns `true` if a dragged or resized shape changed.
    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        let before = self.session.revision();
        self.session.pointer_move(x, y);
        self.session.revision() != before
    }

    /// Wire to a document-level `pointerup` listener. Returns `true` if a
    /// gesture was committed.
    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        let before = self.session.revision();
        self.session.pointer_up(x, y);
        self.session.revision() != before
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a keydown. Returns JSON `{"changed":bool,"action":"<name>"}`;
    /// `action` is `"none"` when the key is unbound, in which case the page
    /// should let the browser handle it.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
        input_focused: bool,
    ) -> String {
        let mods = Modifiers {
            ctrl,
            shift,
            alt,
            meta,
        };
        let before = self.session.revision();
        let action = self.session.handle_key(key, mods, input_focused);
        let outcome = KeyOutcome {
            changed: self.session.revision() != before,
            action: action.map_or("none", action_to_name),
        };
        serde_json::to_string(&outcome)
            .unwrap_or_else(|_| r#"{"changed":false,"action":"none"}"#.to_string())
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    /// Add a shape by type tag (e.g. `"rightTriangle"`). Returns the new
    /// id, or an empty string if the tag is unknown.
    pub fn add_shape(&mut self, kind: &str) -> String {
        let Some(kind) = ShapeKind::from_tag(kind) else {
            log::warn!("unknown shape type {kind:?}");
            return String::new();
        };
        id_or_empty(self.session.add_shape(kind))
    }

    pub fn delete_selected(&mut self) -> bool {
        self.session.delete_selected()
    }

    /// Set property `key` on shape `id`. `value` is JSON; bare strings
    /// such as `#ff0000` are accepted as-is.
    pub fn set_shape_prop(&mut self, id: &str, key: &str, value: &str) -> bool {
        let Some(prop) = props::parse_property_json(key, value) else {
            log::warn!("unsupported property {key}={value}");
            return false;
        };
        self.session.update_property(ShapeId::intern(id), prop)
    }

    pub fn move_shape(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.session.move_to(ShapeId::intern(id), x, y)
    }

    pub fn resize_shape(&mut self, id: &str, width: f64, height: f64) -> bool {
        self.session.resize(ShapeId::intern(id), width, height)
    }

    /// Select by id; an empty string clears the selection.
    pub fn select(&mut self, id: &str) -> bool {
        let id = (!id.is_empty()).then(|| ShapeId::intern(id));
        self.session.select(id)
    }

    /// Selected shape id, or empty string if none.
    pub fn get_selected_id(&self) -> String {
        id_or_empty(self.session.selected_id())
    }

    pub fn copy(&mut self) -> bool {
        self.session.copy()
    }

    pub fn cut(&mut self) -> bool {
        self.session.cut()
    }

    /// Returns the pasted shape's id, or an empty string.
    pub fn paste(&mut self) -> String {
        id_or_empty(self.session.paste())
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.session.can_redo()
    }

    pub fn clear(&mut self) -> bool {
        self.session.clear()
    }

    // ─── Snapshot / export ───────────────────────────────────────────────

    /// Current shapes as a JSON array of records.
    pub fn get_shapes_json(&self) -> String {
        serde_json::to_string(self.session.shapes()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Replace the composition. Returns `false` on malformed JSON or
    /// invalid records.
    pub fn load_shapes_json(&mut self, json: &str) -> bool {
        match serde_json::from_str::<Vec<Shape>>(json) {
            Ok(shapes) => self.session.load_snapshot(shapes),
            Err(e) => {
                log::warn!("load ignored: {e}");
                false
            }
        }
    }

    pub fn generate_css(&self) -> String {
        self.session.generate_css()
    }

    pub fn generate_html(&self) -> String {
        self.session.generate_html()
    }

    // ─── Settings ────────────────────────────────────────────────────────

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.session.set_snap_to_grid(enabled);
    }

    pub fn set_grid_size(&mut self, size: u32) -> bool {
        self.session.set_grid_size(size)
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) -> bool {
        self.session.set_canvas_size(width, height)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn save_to_storage(&mut self) -> bool {
        let mut store = LocalStorageStore::new(self.storage_key.as_str());
        self.session.save_to(&mut store)
    }

    pub fn load_from_storage(&mut self) -> bool {
        let mut store = LocalStorageStore::new(self.storage_key.as_str());
        self.session.load_from(&mut store)
    }

    /// Hand the composition to `callback(shapesJson, mode)`. `mode` is
    /// `"new"` (fresh ids) or `"overwrite"` (ids kept).
    pub fn commit(&mut self, mode: &str, callback: js_sys::Function) -> bool {
        let Some(mode) = parse_mode(mode) else {
            log::warn!("unknown commit mode {mode:?}");
            return false;
        };
        let mut action = JsCommit::new(callback);
        self.session.commit(mode, &mut action)
    }
}

fn parse_or_default<T: serde::de::DeserializeOwned + Default>(what: &str, json: &str) -> T {
    if json.trim().is_empty() {
        return T::default();
    }
    serde_json::from_str(json).unwrap_or_else(|e| {
        log::warn!("ignoring malformed {what}: {e}");
        T::default()
    })
}

fn id_or_empty(id: Option<ShapeId>) -> String {
    id.map(|id| id.as_str().to_string()).unwrap_or_default()
}

fn action_to_name(action: ShortcutAction) -> &'static str {
    match action {
        ShortcutAction::Undo => "undo",
        ShortcutAction::Redo => "redo",
        ShortcutAction::Copy => "copy",
        ShortcutAction::Cut => "cut",
        ShortcutAction::Paste => "paste",
        ShortcutAction::Delete => "delete",
    }
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("CSS Shapes WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone functions (no editor needed) ─────────────────────────────

/// Generate CSS for a JSON array of shape records.
#[wasm_bindgen]
pub fn css_for_shapes(shapes_json: &str) -> String {
    let shapes = parse_or_default::<Vec<Shape>>("shapes", shapes_json);
    shapes_core::emitter::generate_css(&shapes)
}

/// List the supported shape type tags as a JSON array.
#[wasm_bindgen]
pub fn shape_types() -> String {
    let tags: Vec<&str> = ShapeKind::ALL.iter().map(|k| k.tag()).collect();
    serde_json::to_string(&tags).unwrap_or_else(|_| "[]".to_string())
}
