use super::TemplateDocument;
use crate::error::ValidationError;
use std::collections::BTreeSet;
use theatre_grid_model::{CellId, Rect};

impl TemplateDocument {
    /// Merge the selected cells into one anchor.
    ///
    /// The target is the bounding rectangle of the selected anchors' top-left
    /// positions. Every merge already inside it must lie entirely inside it.
    /// The top-left cell becomes the anchor and receives the non-empty
    /// contents of the merged anchors, space-joined in scan order. Returns the
    /// anchor's id.
    pub fn merge<I>(&mut self, ids: I) -> Result<CellId, ValidationError>
    where
        I: IntoIterator<Item = CellId>,
    {
        let selected: BTreeSet<usize> = ids
            .into_iter()
            .filter_map(|id| self.index_of(id))
            .filter(|&idx| self.cells[idx].is_anchor())
            .collect();
        if selected.len() < 2 {
            log::debug!("merge rejected: {} anchor(s) selected", selected.len());
            return Err(ValidationError::InsufficientSelection);
        }

        let (mut r1, mut c1, mut r2, mut c2) = (usize::MAX, usize::MAX, 0, 0);
        for &idx in &selected {
            let cell = &self.cells[idx];
            r1 = r1.min(cell.row);
            c1 = c1.min(cell.col);
            r2 = r2.max(cell.row);
            c2 = c2.max(cell.col);
        }
        let bounds = Rect::spanning((r1, c1), (r2, c2));

        let poking_out = self.cells.iter().filter_map(|cell| cell.rect()).any(|rect| {
            rect.intersects(&bounds) && !bounds.encloses(&rect)
        });
        if poking_out {
            log::debug!("merge rejected: {:?} cuts through an existing merge", bounds);
            return Err(ValidationError::NonRectangularSelection);
        }

        let content = self
            .anchors()
            .filter(|cell| bounds.contains(cell.row, cell.col))
            .map(|cell| cell.content.as_str())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let anchor_idx = self
            .position_index(bounds.row, bounds.col)
            .ok_or(ValidationError::NonRectangularSelection)?;
        for (row, col) in bounds.positions() {
            if let Some(idx) = self.position_index(row, col)
                && idx != anchor_idx
            {
                self.cells[idx].hide();
            }
        }
        let anchor = &mut self.cells[anchor_idx];
        anchor.row_span = bounds.rows;
        anchor.col_span = bounds.cols;
        anchor.content = content;
        let anchor_id = anchor.id;
        debug_assert!(self.validate().is_ok());

        log::debug!("merged {:?} into {}", bounds, anchor_id);
        Ok(anchor_id)
    }

    /// Split a merged anchor back into single cells.
    ///
    /// The anchor keeps its content and style. Every formerly covered cell is
    /// restored with empty content and the default style for its row; what
    /// those cells held before the merge is not brought back. Returns the ids
    /// of all cells of the former rectangle in scan order.
    pub fn split(&mut self, id: CellId) -> Result<Vec<CellId>, ValidationError> {
        let idx = self.index_of(id).ok_or(ValidationError::UnknownCell(id))?;
        let cell = &self.cells[idx];
        if cell.row_span <= 1 && cell.col_span <= 1 {
            log::debug!("split rejected: {} is not merged", id);
            return Err(ValidationError::NotMerged);
        }
        let rect = Rect::new(cell.row, cell.col, cell.row_span, cell.col_span);

        let mut restored = Vec::with_capacity(rect.area());
        for (row, col) in rect.positions() {
            let Some(pos) = self.position_index(row, col) else {
                continue;
            };
            let cell = &mut self.cells[pos];
            if pos == idx {
                cell.row_span = 1;
                cell.col_span = 1;
            } else {
                cell.reset();
            }
            restored.push(cell.id);
        }
        debug_assert!(self.validate().is_ok());
        Ok(restored)
    }
}
