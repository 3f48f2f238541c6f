//! Browser-side collaborators: localStorage persistence, a JS callback
//! for notifications, and a `log` sink that writes to the console.

use shapes_core::model::Shape;
use shapes_editor::host::{CommitAction, CommitMode, Notifier, NotifyKind, SnapshotStore};
use wasm_bindgen::JsValue;

/// localStorage key for saved compositions.
pub const DEFAULT_STORAGE_KEY: &str = "savedShapes";

pub fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .ok_or("no window")?
        .local_storage()
        .map_err(js_error)?
        .ok_or_else(|| "localStorage unavailable".to_string())
}

/// Shape records as one JSON array under a single localStorage key.
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl SnapshotStore for LocalStorageStore {
    fn save(&mut self, shapes: &[Shape]) -> Result<(), String> {
        let json = serde_json::to_string(shapes).map_err(|e| e.to_string())?;
        local_storage()?
            .set_item(&self.key, &json)
            .map_err(js_error)
    }

    fn load(&mut self) -> Result<Option<Vec<Shape>>, String> {
        let Some(json) = local_storage()?.get_item(&self.key).map_err(js_error)? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| e.to_string())
    }
}

/// Calls `callback(message, kind)` with `kind` = `"success"` | `"error"`.
pub struct JsNotifier {
    callback: js_sys::Function,
}

impl JsNotifier {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

impl Notifier for JsNotifier {
    fn notify(&mut self, message: &str, kind: NotifyKind) {
        if let Err(e) = self.callback.call2(
            &JsValue::NULL,
            &JsValue::from_str(message),
            &JsValue::from_str(kind.as_str()),
        ) {
            log::warn!("notify callback threw: {}", js_error(e));
        }
    }
}

/// Calls `callback(shapesJson, mode)` with `mode` = `"new"` | `"overwrite"`.
/// A thrown exception fails the commit.
pub struct JsCommit {
    callback: js_sys::Function,
}

impl JsCommit {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

pub fn mode_name(mode: CommitMode) -> &'static str {
    match mode {
        CommitMode::SaveAsNew => "new",
        CommitMode::Overwrite => "overwrite",
    }
}

pub fn parse_mode(name: &str) -> Option<CommitMode> {
    match name {
        "new" => Some(CommitMode::SaveAsNew),
        "overwrite" => Some(CommitMode::Overwrite),
        _ => None,
    }
}

impl CommitAction for JsCommit {
    fn commit(&mut self, shapes: Vec<Shape>, mode: CommitMode) -> Result<(), String> {
        let json = serde_json::to_string(&shapes).map_err(|e| e.to_string())?;
        self.callback
            .call2(
                &JsValue::NULL,
                &JsValue::from_str(&json),
                &JsValue::from_str(mode_name(mode)),
            )
            .map(|_| ())
            .map_err(js_error)
    }
}

/// Routes the `log` facade to the browser console.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install the console logger once. Later calls only change the level.
pub fn init_logging(level: log::LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
