//! In-memory clipboard for template cells.
//!
//! Copies carry content and style only. Paste replays every entry at the
//! offset between the clipboard's top-left entry and the target cell.

use crate::document::TemplateDocument;
use std::collections::HashSet;
use theatre_grid_model::{CellId, CellStyle};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipEntry {
    pub row: usize,
    pub col: usize,
    pub content: String,
    pub style: CellStyle,
    source: CellId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clipboard {
    entries: Vec<ClipEntry>,
    is_cut: bool,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.is_cut = false;
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_cut(&self) -> bool {
        self.is_cut
    }

    /// Entries in scan order of their source positions.
    pub fn entries(&self) -> &[ClipEntry] {
        &self.entries
    }

    /// Snapshot the visible cells among `ids`. Covered or unknown ids are
    /// ignored. Returns the number of cells captured.
    pub fn copy<I>(&mut self, doc: &TemplateDocument, ids: I) -> usize
    where
        I: IntoIterator<Item = CellId>,
    {
        self.capture(doc, ids, false)
    }

    /// Like [`Clipboard::copy`], but the sources are cleared by the next paste.
    pub fn cut<I>(&mut self, doc: &TemplateDocument, ids: I) -> usize
    where
        I: IntoIterator<Item = CellId>,
    {
        self.capture(doc, ids, true)
    }

    fn capture<I>(&mut self, doc: &TemplateDocument, ids: I, is_cut: bool) -> usize
    where
        I: IntoIterator<Item = CellId>,
    {
        let wanted: HashSet<CellId> = ids.into_iter().collect();
        self.entries = doc
            .anchors()
            .filter(|cell| wanted.contains(&cell.id))
            .map(|cell| ClipEntry {
                row: cell.row,
                col: cell.col,
                content: cell.content.clone(),
                style: cell.style.clone(),
                source: cell.id,
            })
            .collect();
        self.is_cut = is_cut && !self.entries.is_empty();
        self.entries.len()
    }

    /// Replay the clipboard so its top-left entry lands on `target`.
    ///
    /// Only content and style are written; spans, kinds and sizes stay as
    /// they are. Destinations outside the grid are skipped. After a cut, every
    /// source cell is cleared once the paste has been applied, including any
    /// the paste itself landed on, and the clipboard is emptied. Returns the
    /// number of cells written.
    pub fn paste(&mut self, doc: &mut TemplateDocument, target: CellId) -> usize {
        let Some(origin) = self.entries.first() else {
            return 0;
        };
        let Some(target_cell) = doc.cell(target) else {
            return 0;
        };
        let d_row = target_cell.row as isize - origin.row as isize;
        let d_col = target_cell.col as isize - origin.col as isize;

        let mut written = HashSet::new();
        for entry in &self.entries {
            let dest_row = entry.row as isize + d_row;
            let dest_col = entry.col as isize + d_col;
            if dest_row < 0 || dest_col < 0 {
                continue;
            }
            let Some(idx) = doc.position_index(dest_row as usize, dest_col as usize) else {
                log::trace!("paste skipped ({}, {}): outside grid", dest_row, dest_col);
                continue;
            };
            let cell = &mut doc.cells[idx];
            cell.content = entry.content.clone();
            cell.style = entry.style.clone();
            written.insert(cell.id);
        }

        if self.is_cut {
            for entry in &self.entries {
                if let Some(idx) = doc.index_of(entry.source) {
                    doc.cells[idx].clear_content_and_style();
                }
            }
            self.clear();
        }
        written.len()
    }
}
