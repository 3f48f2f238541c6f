pub mod canvas;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod history;
pub mod hit;
pub mod host;
pub mod input;
pub mod session;
pub mod shortcuts;

pub use canvas::{CanvasController, CanvasMutation, GestureState};
pub use config::{EditorConfig, GridSnap};
pub use error::{EditError, EditResult};
pub use history::{History, Snapshot};
pub use hit::hit_test;
pub use host::{
    CommitAction, CommitMode, DefaultShapeFactory, LogNotifier, MemoryStore, Notifier, NotifyKind,
    ShapeFactory, SnapshotStore,
};
pub use input::{HitTarget, InputEvent, Modifiers};
pub use session::EditorSession;
pub use shortcuts::{ShortcutAction, ShortcutMap};
