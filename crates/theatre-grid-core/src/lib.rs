//! theatre-grid-core - UI-agnostic template document model, editing
//! controllers and storage.

pub mod clipboard;
pub mod document;
pub mod editor;
pub mod error;
pub mod history;
pub mod resize;
pub mod selection;
pub mod settings;
pub mod storage;

pub use clipboard::{ClipEntry, Clipboard};
pub use document::TemplateDocument;
pub use editor::{Editor, Interaction};
pub use error::{PartitionError, Result, TemplateError, ValidationError};
pub use history::History;
pub use resize::{Axis, ResizeSession, ResizeTarget};
pub use selection::{Modifiers, SelectionController};
pub use settings::EditorSettings;

pub use theatre_grid_model::{
    Cell, CellId, CellKind, CellRange, CellRef, CellStyle, CustomFieldDef, HAlign, Rect,
    StylePatch, VAlign,
};
