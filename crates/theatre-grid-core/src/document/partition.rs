use super::TemplateDocument;
use crate::error::PartitionError;
use std::collections::HashSet;

impl TemplateDocument {
    /// Check that the document is a valid template: line arrays match the
    /// dimensions, every position stores exactly one cell, and the anchors'
    /// rectangles tile the grid with no overlaps and no gaps.
    pub fn validate(&self) -> Result<(), PartitionError> {
        let (rows, cols) = (self.rows, self.cols);
        if rows == 0 || cols == 0 {
            return Err(PartitionError::EmptyGrid { rows, cols });
        }
        if self.column_widths.len() != cols {
            return Err(PartitionError::LengthMismatch {
                what: "column widths",
                expected: cols,
                found: self.column_widths.len(),
            });
        }
        if self.row_heights.len() != rows {
            return Err(PartitionError::LengthMismatch {
                what: "row heights",
                expected: rows,
                found: self.row_heights.len(),
            });
        }

        let mut ids = HashSet::with_capacity(self.cells.len());
        let mut stored = vec![false; rows * cols];
        for cell in &self.cells {
            if !ids.insert(cell.id) {
                return Err(PartitionError::DuplicateId(cell.id));
            }
            if cell.row >= rows || cell.col >= cols {
                return Err(PartitionError::CellOutOfBounds {
                    id: cell.id,
                    row: cell.row,
                    col: cell.col,
                });
            }
            let slot = &mut stored[cell.row * cols + cell.col];
            if *slot {
                return Err(PartitionError::DuplicatePosition {
                    row: cell.row,
                    col: cell.col,
                });
            }
            *slot = true;
        }
        if let Some(missing) = stored.iter().position(|present| !present) {
            return Err(PartitionError::MissingCell {
                row: missing / cols,
                col: missing % cols,
            });
        }

        let mut covered = vec![false; rows * cols];
        for cell in &self.cells {
            if cell.is_hidden() {
                continue;
            }
            if cell.row_span == 0 || cell.col_span == 0 {
                return Err(PartitionError::InvalidSpan {
                    id: cell.id,
                    row_span: cell.row_span,
                    col_span: cell.col_span,
                });
            }
            let Some(rect) = cell.rect() else {
                continue;
            };
            if rect.end_row() > rows || rect.end_col() > cols {
                return Err(PartitionError::SpanOutOfBounds { id: cell.id, rect });
            }
            for (row, col) in rect.positions() {
                let slot = &mut covered[row * cols + col];
                if *slot {
                    return Err(PartitionError::Overlap { row, col });
                }
                *slot = true;
            }
        }
        if let Some(gap) = covered.iter().position(|hit| !hit) {
            return Err(PartitionError::Gap {
                row: gap / cols,
                col: gap % cols,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::TemplateDocument;
    use crate::error::PartitionError;

    #[test]
    fn test_fresh_and_merged_documents_are_valid() {
        let mut doc = TemplateDocument::new(3, 3).unwrap();
        assert_eq!(doc.validate(), Ok(()));
        let a = doc.cell_at_position(1, 1).unwrap().id;
        let b = doc.cell_at_position(2, 2).unwrap().id;
        doc.merge([a, b]).unwrap();
        assert_eq!(doc.validate(), Ok(()));
    }

    #[test]
    fn test_overlap_is_detected() {
        let mut doc = TemplateDocument::new(2, 2).unwrap();
        doc.cells[0].col_span = 2;
        assert_eq!(doc.validate(), Err(PartitionError::Overlap { row: 0, col: 1 }));
    }

    #[test]
    fn test_gap_is_detected() {
        let mut doc = TemplateDocument::new(2, 2).unwrap();
        doc.cells[3].hide();
        assert_eq!(doc.validate(), Err(PartitionError::Gap { row: 1, col: 1 }));
    }

    #[test]
    fn test_span_past_edge_is_detected() {
        let mut doc = TemplateDocument::new(2, 2).unwrap();
        doc.cells[3].row_span = 2;
        assert!(matches!(
            doc.validate(),
            Err(PartitionError::SpanOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_half_hidden_span_is_rejected() {
        let mut doc = TemplateDocument::new(2, 2).unwrap();
        doc.cells[1].row_span = 0;
        assert!(matches!(
            doc.validate(),
            Err(PartitionError::InvalidSpan { .. })
        ));
    }

    #[test]
    fn test_line_lengths_must_match() {
        let mut doc = TemplateDocument::new(2, 2).unwrap();
        doc.column_widths.pop();
        assert_eq!(
            doc.validate(),
            Err(PartitionError::LengthMismatch {
                what: "column widths",
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_missing_and_duplicate_cells() {
        let mut doc = TemplateDocument::new(2, 2).unwrap();
        let dup = doc.cells[0].clone();
        doc.cells.push(dup.clone());
        assert_eq!(doc.validate(), Err(PartitionError::DuplicateId(dup.id)));

        doc.cells.pop();
        doc.cells.remove(2);
        assert_eq!(
            doc.validate(),
            Err(PartitionError::MissingCell { row: 1, col: 0 })
        );
    }
}
