//! Error types for the template editor core.

use theatre_grid_model::{CellId, Rect};
use thiserror::Error;

/// A rejected edit. The document is unchanged when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("insufficient selection")]
    InsufficientSelection,

    #[error("non-rectangular selection")]
    NonRectangularSelection,

    #[error("not merged")]
    NotMerged,

    #[error("cannot delete the last remaining row")]
    LastRow,

    #[error("cannot delete the last remaining column")]
    LastColumn,

    #[error("index {index} is out of bounds (size {size})")]
    OutOfBounds { index: usize, size: usize },

    #[error("unknown cell {0}")]
    UnknownCell(CellId),

    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },
}

/// Why an imported document is not a valid template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("expected {expected} {what}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("duplicate cell id {0}")]
    DuplicateId(CellId),

    #[error("cell {id} at ({row}, {col}) is outside the grid")]
    CellOutOfBounds { id: CellId, row: usize, col: usize },

    #[error("more than one cell stored at ({row}, {col})")]
    DuplicatePosition { row: usize, col: usize },

    #[error("cell {id} has invalid span {row_span}x{col_span}")]
    InvalidSpan {
        id: CellId,
        row_span: usize,
        col_span: usize,
    },

    #[error("merge of cell {id} ({rect:?}) extends past the grid")]
    SpanOutOfBounds { id: CellId, rect: Rect },

    #[error("position ({row}, {col}) is covered by more than one cell")]
    Overlap { row: usize, col: usize },

    #[error("position ({row}, {col}) is not covered by any cell")]
    Gap { row: usize, col: usize },

    #[error("no cell stored at ({row}, {col})")]
    MissingCell { row: usize, col: usize },
}

/// Errors that can occur in the template editor core.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid template: {0}")]
    InvalidTemplate(#[from] PartitionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
