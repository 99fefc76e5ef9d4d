//! Errors raised while running template commands.

use theatre_grid_core::{CellRef, TemplateError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: {source}")]
    Failed {
        line: usize,
        #[source]
        source: Box<CommandError>,
    },

    #[error("{cell} is outside the {rows}x{cols} grid")]
    OutOfGrid {
        cell: CellRef,
        rows: usize,
        cols: usize,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CommandError>;
