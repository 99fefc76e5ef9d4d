//! Template document state and structural logic (UI-agnostic).

mod io;
mod merge;
mod ops;
mod partition;
mod state;

pub use state::TemplateDocument;
