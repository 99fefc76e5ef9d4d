use crate::rect::Rect;
use crate::style::CellStyle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a cell inside one document.
///
/// Ids are allocated by the document and never reused, so a stale id held by
/// a selection or clipboard simply stops resolving.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub u64);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of a cell in the template.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Header,
    #[default]
    Data,
    Static,
    /// Covered by another cell's merge rectangle.
    Merged,
}

impl CellKind {
    /// Kind a fresh cell gets on the given row.
    pub fn default_for_row(row: usize) -> CellKind {
        if row == 0 {
            CellKind::Header
        } else {
            CellKind::Data
        }
    }
}

/// One addressable cell of a template grid.
///
/// A cell with `row_span == 0 && col_span == 0` is hidden: it sits inside
/// another cell's merge rectangle and only keeps its `(row, col)` so it can be
/// restored by a split.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub id: CellId,
    pub row: usize,
    pub col: usize,
    pub row_span: usize,
    pub col_span: usize,
    #[serde(rename = "type")]
    pub kind: CellKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub style: CellStyle,
    /// Width override in pixels; `None` follows the column widths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height override in pixels; `None` follows the row heights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Cell {
    /// A fresh single-span cell with the default kind and style for its row.
    pub fn new(id: CellId, row: usize, col: usize) -> Cell {
        let kind = CellKind::default_for_row(row);
        Cell {
            id,
            row,
            col,
            row_span: 1,
            col_span: 1,
            kind,
            content: String::new(),
            style: CellStyle::default_for(kind),
            width: None,
            height: None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.row_span == 0 && self.col_span == 0
    }

    pub fn is_anchor(&self) -> bool {
        !self.is_hidden()
    }

    pub fn is_merged(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }

    /// Rectangle this cell covers. Hidden cells cover nothing.
    pub fn rect(&self) -> Option<Rect> {
        if self.is_hidden() {
            return None;
        }
        Some(Rect::new(self.row, self.col, self.row_span, self.col_span))
    }

    pub fn hide(&mut self) {
        self.row_span = 0;
        self.col_span = 0;
        self.kind = CellKind::Merged;
    }

    /// Reset to a plain single-span cell: no content, default style and kind.
    pub fn reset(&mut self) {
        self.row_span = 1;
        self.col_span = 1;
        self.kind = CellKind::default_for_row(self.row);
        self.content.clear();
        self.style = CellStyle::default_for(self.kind);
    }

    /// Clear content and style only, leaving spans and kind alone.
    pub fn clear_content_and_style(&mut self) {
        self.content.clear();
        self.style = CellStyle::default_for(self.kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_kind_follows_row() {
        assert_eq!(Cell::new(CellId(1), 0, 3).kind, CellKind::Header);
        assert_eq!(Cell::new(CellId(2), 1, 3).kind, CellKind::Data);
    }

    #[test]
    fn test_hidden_cell_has_no_rect() {
        let mut cell = Cell::new(CellId(1), 2, 2);
        assert_eq!(cell.rect(), Some(Rect::new(2, 2, 1, 1)));
        cell.hide();
        assert!(cell.is_hidden());
        assert_eq!(cell.kind, CellKind::Merged);
        assert_eq!(cell.rect(), None);
    }

    #[test]
    fn test_reset_restores_defaults_for_row() {
        let mut cell = Cell::new(CellId(7), 0, 1);
        cell.content = "Theatre".to_string();
        cell.style.bold = false;
        cell.hide();
        cell.reset();
        assert_eq!(cell.row_span, 1);
        assert_eq!(cell.col_span, 1);
        assert_eq!(cell.kind, CellKind::Header);
        assert!(cell.content.is_empty());
        assert_eq!(cell.style, CellStyle::default_for(CellKind::Header));
    }

    #[test]
    fn test_cell_serializes_camel_case_with_type_field() {
        let cell = Cell::new(CellId(4), 1, 0);
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["rowSpan"], 1);
        assert_eq!(json["colSpan"], 1);
        assert_eq!(json["type"], "data");
        assert!(json.get("width").is_none());
    }
}
