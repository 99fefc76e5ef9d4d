use serde::{Deserialize, Serialize};

/// Half-open rectangle of grid positions: `[row, row + rows) x [col, col + cols)`.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Rect {
    pub fn new(row: usize, col: usize, rows: usize, cols: usize) -> Rect {
        Rect {
            row,
            col,
            rows,
            cols,
        }
    }

    /// Smallest rectangle containing both positions, inclusive.
    pub fn spanning(a: (usize, usize), b: (usize, usize)) -> Rect {
        let r1 = a.0.min(b.0);
        let c1 = a.1.min(b.1);
        let r2 = a.0.max(b.0);
        let c2 = a.1.max(b.1);
        Rect::new(r1, c1, r2 - r1 + 1, c2 - c1 + 1)
    }

    pub fn end_row(&self) -> usize {
        self.row + self.rows
    }

    pub fn end_col(&self) -> usize {
        self.col + self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row && row < self.end_row() && col >= self.col && col < self.end_col()
    }

    /// True if `other` lies entirely inside `self`.
    pub fn encloses(&self, other: &Rect) -> bool {
        other.row >= self.row
            && other.col >= self.col
            && other.end_row() <= self.end_row()
            && other.end_col() <= self.end_col()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.row < other.end_row()
            && other.row < self.end_row()
            && self.col < other.end_col()
            && other.col < self.end_col()
    }

    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    /// Positions in scan order (row-major).
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.row..self.end_row()).flat_map(move |r| (self.col..self.end_col()).map(move |c| (r, c)))
    }
}
