//! Editor tunables.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_COLUMN_WIDTH: u32 = 50;
pub const DEFAULT_MIN_ROW_HEIGHT: u32 = 30;
pub const DEFAULT_COLUMN_WIDTH: u32 = 120;
pub const DEFAULT_ROW_HEIGHT: u32 = 40;
/// Maximum number of undo snapshots to keep.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Resizing never makes a column or cell narrower than this.
    pub min_column_width: u32,
    /// Resizing never makes a row or cell shorter than this.
    pub min_row_height: u32,
    pub default_column_width: u32,
    pub default_row_height: u32,
    pub history_limit: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            min_row_height: DEFAULT_MIN_ROW_HEIGHT,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            default_row_height: DEFAULT_ROW_HEIGHT,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}
