//! Collaborators supplied by the host application.
//!
//! The engine never touches storage, the DOM or toast widgets itself; it
//! talks to them through these traits.

use shapes_core::model::{Shape, ShapeKind};

/// Tone of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
}

impl NotifyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Notification sink (toasts, status bar).
pub trait Notifier {
    fn notify(&mut self, message: &str, kind: NotifyKind);
}

/// Forwards notifications to the `log` facade. Used when the host
/// supplies no sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str, kind: NotifyKind) {
        match kind {
            NotifyKind::Success => log::info!("{message}"),
            NotifyKind::Error => log::error!("{message}"),
        }
    }
}

/// Builds the shape inserted by "add shape".
pub trait ShapeFactory {
    fn create(&self, kind: ShapeKind, x: f64, y: f64) -> Shape;
}

/// Builds shapes with the model's per-kind defaults.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultShapeFactory;

impl ShapeFactory for DefaultShapeFactory {
    fn create(&self, kind: ShapeKind, x: f64, y: f64) -> Shape {
        Shape::create_default(kind, x, y)
    }
}

/// Stores and retrieves a plain list of shape records.
pub trait SnapshotStore {
    fn save(&mut self, shapes: &[Shape]) -> Result<(), String>;
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&mut self) -> Result<Option<Vec<Shape>>, String>;
}

/// In-process store, for tests and native hosts.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    saved: Option<Vec<Shape>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, shapes: &[Shape]) -> Result<(), String> {
        self.saved = Some(shapes.to_vec());
        Ok(())
    }

    fn load(&mut self) -> Result<Option<Vec<Shape>>, String> {
        Ok(self.saved.clone())
    }
}

/// How `commit` hands the composition to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Every shape gets a fresh id; the result is a new composition.
    SaveAsNew,
    /// Ids are kept; the result replaces the composition being edited.
    Overwrite,
}

/// Receives the committed composition.
pub trait CommitAction {
    fn commit(&mut self, shapes: Vec<Shape>, mode: CommitMode) -> Result<(), String>;
}

impl<F> CommitAction for F
where
    F: FnMut(Vec<Shape>, CommitMode) -> Result<(), String>,
{
    fn commit(&mut self, shapes: Vec<Shape>, mode: CommitMode) -> Result<(), String> {
        self(shapes, mode)
    }
}
