use super::TemplateDocument;
use crate::error::ValidationError;
use std::collections::BTreeSet;
use theatre_grid_model::{Cell, CellId, CustomFieldDef, StylePatch, field_tokens, placeholder};

/// Dimension for row/column operations
#[derive(Copy, Clone, Debug)]
enum Dimension {
    Row,
    Column,
}

impl Dimension {
    /// Get the coordinate of a cell along this dimension
    fn coord(&self, cell: &Cell) -> usize {
        match self {
            Dimension::Row => cell.row,
            Dimension::Column => cell.col,
        }
    }

    fn coord_mut<'a>(&self, cell: &'a mut Cell) -> &'a mut usize {
        match self {
            Dimension::Row => &mut cell.row,
            Dimension::Column => &mut cell.col,
        }
    }

    fn span(&self, cell: &Cell) -> usize {
        match self {
            Dimension::Row => cell.row_span,
            Dimension::Column => cell.col_span,
        }
    }

    fn span_mut<'a>(&self, cell: &'a mut Cell) -> &'a mut usize {
        match self {
            Dimension::Row => &mut cell.row_span,
            Dimension::Column => &mut cell.col_span,
        }
    }

    /// Position of the cell one step further along this dimension
    fn next_position(&self, cell: &Cell) -> (usize, usize) {
        match self {
            Dimension::Row => (cell.row + 1, cell.col),
            Dimension::Column => (cell.row, cell.col + 1),
        }
    }

    fn size(&self, doc: &TemplateDocument) -> usize {
        match self {
            Dimension::Row => doc.rows,
            Dimension::Column => doc.cols,
        }
    }

    fn last_line_error(&self) -> ValidationError {
        match self {
            Dimension::Row => ValidationError::LastRow,
            Dimension::Column => ValidationError::LastColumn,
        }
    }
}

impl TemplateDocument {
    /// Append a row of default cells; returns its index.
    pub fn add_row(&mut self, height: u32) -> usize {
        let row = self.rows;
        for col in 0..self.cols {
            let id = self.allocate_id();
            self.cells.push(Cell::new(id, row, col));
        }
        self.rows += 1;
        self.row_heights.push(height);
        self.normalize();
        row
    }

    /// Append a column of default cells; returns its index.
    pub fn add_column(&mut self, width: u32) -> usize {
        let col = self.cols;
        for row in 0..self.rows {
            let id = self.allocate_id();
            self.cells.push(Cell::new(id, row, col));
        }
        self.cols += 1;
        self.column_widths.push(width);
        self.normalize();
        col
    }

    /// Generic delete operation for row or column
    fn delete_dimension(&mut self, dim: Dimension, at: usize) -> Result<(), ValidationError> {
        let size = dim.size(self);
        if size <= 1 {
            return Err(dim.last_line_error());
        }
        if at >= size {
            return Err(ValidationError::OutOfBounds { index: at, size });
        }

        // Merges crossing the deleted line shrink by one; an anchor sitting on
        // the line hands its rectangle to the next covered cell.
        let mut shrink = Vec::new();
        let mut promote = Vec::new();
        for (idx, cell) in self.cells.iter().enumerate() {
            let span = dim.span(cell);
            if span <= 1 {
                continue;
            }
            let start = dim.coord(cell);
            if start == at {
                let (row, col) = dim.next_position(cell);
                if let Some(next) = self.position_index(row, col) {
                    promote.push((idx, next));
                }
            } else if start < at && at < start + span {
                shrink.push(idx);
            }
        }

        for idx in shrink {
            let span = dim.span_mut(&mut self.cells[idx]);
            *span = span.saturating_sub(1).max(1);
        }
        for (from, to) in promote {
            let removed = self.cells[from].clone();
            let heir = &mut self.cells[to];
            heir.row_span = removed.row_span;
            heir.col_span = removed.col_span;
            let span = dim.span_mut(heir);
            *span = span.saturating_sub(1).max(1);
            heir.kind = removed.kind;
            heir.content = removed.content;
            heir.style = removed.style;
            heir.width = removed.width;
            heir.height = removed.height;
        }

        self.cells.retain(|cell| dim.coord(cell) != at);
        for cell in &mut self.cells {
            let coord = dim.coord_mut(cell);
            if *coord > at {
                *coord -= 1;
            }
        }

        match dim {
            Dimension::Row => {
                self.rows -= 1;
                self.row_heights.remove(at);
            }
            Dimension::Column => {
                self.cols -= 1;
                self.column_widths.remove(at);
            }
        }
        self.normalize();
        Ok(())
    }

    /// Delete the specified row.
    pub fn delete_row(&mut self, at_row: usize) -> Result<(), ValidationError> {
        self.delete_dimension(Dimension::Row, at_row)
    }

    /// Delete the specified column.
    pub fn delete_column(&mut self, at_col: usize) -> Result<(), ValidationError> {
        self.delete_dimension(Dimension::Column, at_col)
    }

    /// Replace a cell's content. Writing to a covered cell writes its anchor.
    pub fn set_content(&mut self, id: CellId, content: &str) -> Result<(), ValidationError> {
        let idx = self
            .resolve_anchor_index(id)
            .ok_or(ValidationError::UnknownCell(id))?;
        self.cells[idx].content = content.to_string();
        Ok(())
    }

    /// Append a `{{key}}` placeholder to a cell's content.
    pub fn insert_field_token(&mut self, id: CellId, key: &str) -> Result<(), ValidationError> {
        let idx = self
            .resolve_anchor_index(id)
            .ok_or(ValidationError::UnknownCell(id))?;
        let content = &mut self.cells[idx].content;
        if !content.is_empty() && !content.ends_with(char::is_whitespace) {
            content.push(' ');
        }
        content.push_str(&placeholder(key));
        Ok(())
    }

    /// Apply a style patch to every listed cell (covered cells resolve to
    /// their anchor). Unknown ids are skipped. Returns the number of cells
    /// styled.
    pub fn apply_style<I>(&mut self, ids: I, patch: &StylePatch) -> usize
    where
        I: IntoIterator<Item = CellId>,
    {
        let targets: BTreeSet<usize> = ids
            .into_iter()
            .filter_map(|id| self.resolve_anchor_index(id))
            .collect();
        for &idx in &targets {
            self.cells[idx].style.apply(patch);
        }
        targets.len()
    }

    /// Add or replace a template-local field definition.
    pub fn add_custom_field(&mut self, field: CustomFieldDef) {
        match self.custom_fields.iter_mut().find(|f| f.key == field.key) {
            Some(existing) => *existing = field,
            None => self.custom_fields.push(field),
        }
    }

    pub fn remove_custom_field(&mut self, key: &str) -> Option<CustomFieldDef> {
        let idx = self.custom_fields.iter().position(|f| f.key == key)?;
        Some(self.custom_fields.remove(idx))
    }

    /// Every field token referenced by a visible cell.
    pub fn field_tokens(&self) -> BTreeSet<String> {
        self.anchors()
            .flat_map(|cell| field_tokens(&cell.content))
            .collect()
    }

    pub fn set_column_width(&mut self, col: usize, width: u32) -> Result<(), ValidationError> {
        let size = self.cols;
        let slot = self
            .column_widths
            .get_mut(col)
            .ok_or(ValidationError::OutOfBounds { index: col, size })?;
        *slot = width;
        Ok(())
    }

    pub fn set_row_height(&mut self, row: usize, height: u32) -> Result<(), ValidationError> {
        let size = self.rows;
        let slot = self
            .row_heights
            .get_mut(row)
            .ok_or(ValidationError::OutOfBounds { index: row, size })?;
        *slot = height;
        Ok(())
    }

    /// Override one cell's width without touching its column.
    pub fn set_cell_width(&mut self, id: CellId, width: u32) -> Result<(), ValidationError> {
        let idx = self
            .resolve_anchor_index(id)
            .ok_or(ValidationError::UnknownCell(id))?;
        self.cells[idx].width = Some(width);
        Ok(())
    }

    /// Override one cell's height without touching its row.
    pub fn set_cell_height(&mut self, id: CellId, height: u32) -> Result<(), ValidationError> {
        let idx = self
            .resolve_anchor_index(id)
            .ok_or(ValidationError::UnknownCell(id))?;
        self.cells[idx].height = Some(height);
        Ok(())
    }
}
