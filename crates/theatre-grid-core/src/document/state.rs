use crate::error::ValidationError;
use crate::settings::EditorSettings;
use serde::{Deserialize, Serialize};
use theatre_grid_model::{Cell, CellId, CustomFieldDef};

/// A grid template: the cell arena plus line dimensions.
///
/// Every grid position has exactly one stored cell, and `cells` is kept in
/// scan order, so the cell stored at `(row, col)` is `cells[row * cols + col]`.
/// Whether that cell is visible is expressed purely through its spans: anchors
/// carry `row_span, col_span >= 1`, covered cells carry `(0, 0)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDocument {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) cells: Vec<Cell>,
    pub(crate) column_widths: Vec<u32>,
    pub(crate) row_heights: Vec<u32>,
    #[serde(default)]
    pub(crate) custom_fields: Vec<CustomFieldDef>,
    #[serde(default)]
    pub(crate) next_id: u64,
}

impl TemplateDocument {
    /// Create a `rows x cols` grid with default sizes.
    pub fn new(rows: usize, cols: usize) -> Result<Self, ValidationError> {
        Self::with_settings(rows, cols, &EditorSettings::default())
    }

    /// Create a `rows x cols` grid; every cell is its own anchor, row 0 holds
    /// headers and the rest data cells.
    pub fn with_settings(
        rows: usize,
        cols: usize,
        settings: &EditorSettings,
    ) -> Result<Self, ValidationError> {
        if rows == 0 || cols == 0 {
            return Err(ValidationError::InvalidDimensions { rows, cols });
        }
        let mut doc = TemplateDocument {
            rows,
            cols,
            cells: Vec::with_capacity(rows * cols),
            column_widths: vec![settings.default_column_width; cols],
            row_heights: vec![settings.default_row_height; rows],
            custom_fields: Vec::new(),
            next_id: 0,
        };
        for row in 0..rows {
            for col in 0..cols {
                let id = doc.allocate_id();
                doc.cells.push(Cell::new(id, row, col));
            }
        }
        Ok(doc)
    }

    pub(crate) fn allocate_id(&mut self) -> CellId {
        let id = CellId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All cells, visible and hidden, in scan order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn column_widths(&self) -> &[u32] {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &[u32] {
        &self.row_heights
    }

    pub fn custom_fields(&self) -> &[CustomFieldDef] {
        &self.custom_fields
    }

    /// Visible cells in scan order.
    pub fn anchors(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| cell.is_anchor())
    }

    pub(crate) fn index_of(&self, id: CellId) -> Option<usize> {
        self.cells.iter().position(|cell| cell.id == id)
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.index_of(id).map(|idx| &self.cells[idx])
    }

    pub(crate) fn position_index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// The cell stored at exactly `(row, col)`, whether visible or hidden.
    pub fn cell_at_position(&self, row: usize, col: usize) -> Option<&Cell> {
        self.position_index(row, col).map(|idx| &self.cells[idx])
    }

    pub(crate) fn anchor_index_at(&self, row: usize, col: usize) -> Option<usize> {
        let idx = self.position_index(row, col)?;
        if self.cells[idx].is_anchor() {
            return Some(idx);
        }
        // Covered: the anchor sits above and/or left of this position.
        (0..=idx)
            .rev()
            .find(|&i| self.cells[i].rect().is_some_and(|rect| rect.contains(row, col)))
    }

    /// The anchor covering `(row, col)`, or `None` when out of bounds.
    pub fn get_cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.anchor_index_at(row, col).map(|idx| &self.cells[idx])
    }

    /// Index of the anchor for `id`: the cell itself when visible, the anchor
    /// covering it when hidden.
    pub(crate) fn resolve_anchor_index(&self, id: CellId) -> Option<usize> {
        let idx = self.index_of(id)?;
        let cell = &self.cells[idx];
        if cell.is_anchor() {
            Some(idx)
        } else {
            self.anchor_index_at(cell.row, cell.col)
        }
    }

    pub fn resolve_anchor(&self, id: CellId) -> Option<&Cell> {
        self.resolve_anchor_index(id).map(|idx| &self.cells[idx])
    }

    /// Width the cell is drawn with: its own override, or the sum of the
    /// columns it spans. `None` for unknown or hidden cells.
    pub fn rendered_width(&self, id: CellId) -> Option<u32> {
        let cell = self.cell(id)?;
        let rect = cell.rect()?;
        let spanned = &self.column_widths[rect.col..rect.end_col()];
        Some(cell.width.unwrap_or_else(|| saturating_total(spanned)))
    }

    /// Height the cell is drawn with: its own override, or the sum of the rows
    /// it spans. `None` for unknown or hidden cells.
    pub fn rendered_height(&self, id: CellId) -> Option<u32> {
        let cell = self.cell(id)?;
        let rect = cell.rect()?;
        let spanned = &self.row_heights[rect.row..rect.end_row()];
        Some(cell.height.unwrap_or_else(|| saturating_total(spanned)))
    }

    /// Re-establish scan order after structural edits.
    pub(crate) fn normalize(&mut self) {
        self.cells.sort_by_key(|cell| (cell.row, cell.col));
        debug_assert!(
            self.validate().is_ok(),
            "partition broken: {:?}",
            self.validate()
        );
    }
}

/// Sum of line sizes, pinned at `u32::MAX` instead of wrapping.
fn saturating_total(sizes: &[u32]) -> u32 {
    sizes.iter().fold(0u32, |total, &size| total.saturating_add(size))
}

#[cfg(test)]
mod tests {
    use super::TemplateDocument;
    use crate::error::ValidationError;
    use theatre_grid_model::CellKind;

    #[test]
    fn test_new_allocates_every_position() {
        let doc = TemplateDocument::new(3, 4).unwrap();
        assert_eq!(doc.cells().len(), 12);
        assert_eq!(doc.column_widths(), &[120; 4]);
        assert_eq!(doc.row_heights(), &[40; 3]);
        for cell in doc.cells() {
            assert_eq!((cell.row_span, cell.col_span), (1, 1));
            let expected = if cell.row == 0 {
                CellKind::Header
            } else {
                CellKind::Data
            };
            assert_eq!(cell.kind, expected);
        }
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_new_rejects_empty_grid() {
        assert_eq!(
            TemplateDocument::new(0, 3),
            Err(ValidationError::InvalidDimensions { rows: 0, cols: 3 })
        );
    }

    #[test]
    fn test_ids_are_unique() {
        let doc = TemplateDocument::new(4, 4).unwrap();
        let mut ids: Vec<_> = doc.cells().iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[test]
    fn test_get_cell_at_out_of_bounds() {
        let doc = TemplateDocument::new(2, 2).unwrap();
        assert!(doc.get_cell_at(2, 0).is_none());
        assert!(doc.get_cell_at(0, 2).is_none());
        assert_eq!(doc.get_cell_at(1, 1).map(|c| (c.row, c.col)), Some((1, 1)));
    }

    #[test]
    fn test_rendered_size_follows_lines() {
        let doc = TemplateDocument::new(2, 2).unwrap();
        let id = doc.cell_at_position(1, 1).unwrap().id;
        assert_eq!(doc.rendered_width(id), Some(120));
        assert_eq!(doc.rendered_height(id), Some(40));
    }

    #[test]
    fn test_rendered_size_of_huge_merge_saturates() {
        let mut doc = TemplateDocument::new(2, 2).unwrap();
        doc.column_widths = vec![u32::MAX; 2];
        doc.row_heights = vec![u32::MAX - 1, 5];
        let corners = [
            doc.cell_at_position(0, 0).unwrap().id,
            doc.cell_at_position(1, 1).unwrap().id,
        ];
        let anchor = doc.merge(corners).unwrap();
        assert_eq!(doc.rendered_width(anchor), Some(u32::MAX));
        assert_eq!(doc.rendered_height(anchor), Some(u32::MAX));
    }
}
