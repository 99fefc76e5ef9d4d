//! theatre_grid_model - value types shared by the template editor.
//!
//! Nothing in here knows about the partition invariant; that lives in
//! `theatre-grid-core`. These are the plain serializable pieces a template is
//! made of.

mod cell;
mod cell_ref;
mod field;
mod rect;
mod style;

pub use cell::{Cell, CellId, CellKind};
pub use cell_ref::{CellRange, CellRef};
pub use field::{CustomFieldDef, field_tokens, placeholder};
pub use rect::Rect;
pub use style::{CellStyle, HAlign, StylePatch, VAlign};
