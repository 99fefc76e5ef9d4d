//! Which cells an edit targets.
//!
//! The controller only ever holds ids of visible anchors. Pointer gestures
//! (range, row and column drags) are driven by [`crate::Editor`], which feeds
//! rectangles into [`SelectionController::select_rect`].

use crate::document::TemplateDocument;
use std::collections::BTreeSet;
use theatre_grid_model::{CellId, Rect};

/// Keyboard modifiers held during a click. `ctrl` also stands for cmd.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
    };
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionController {
    primary: Option<CellId>,
    selected: BTreeSet<CellId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell range selections extend from.
    pub fn primary(&self) -> Option<CellId> {
        self.primary
    }

    pub fn selected(&self) -> &BTreeSet<CellId> {
        &self.selected
    }

    pub fn contains(&self, id: CellId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in scan order of the cells they name.
    pub fn ids_in_scan_order(&self, doc: &TemplateDocument) -> Vec<CellId> {
        doc.anchors()
            .map(|cell| cell.id)
            .filter(|id| self.selected.contains(id))
            .collect()
    }

    /// Apply a click on a cell. Clicking a covered cell targets its anchor.
    pub fn click(&mut self, doc: &TemplateDocument, id: CellId, modifiers: Modifiers) {
        let Some(cell) = doc.resolve_anchor(id) else {
            return;
        };
        let id = cell.id;

        if modifiers.shift {
            let origin = self
                .primary
                .and_then(|primary| doc.cell(primary))
                .filter(|primary| primary.is_anchor());
            if let Some(origin) = origin {
                let rect = Rect::spanning((origin.row, origin.col), (cell.row, cell.col));
                let primary = self.primary;
                self.select_rect(doc, rect);
                self.primary = primary;
                return;
            }
        } else if modifiers.ctrl {
            if self.selected.remove(&id) {
                if self.primary == Some(id) {
                    self.primary = None;
                }
            } else {
                self.selected.insert(id);
                self.primary = Some(id);
            }
            return;
        }

        self.select_single(id);
    }

    pub fn select_single(&mut self, id: CellId) {
        self.selected.clear();
        self.selected.insert(id);
        self.primary = Some(id);
    }

    /// Select every anchor whose rectangle intersects `rect`. The primary
    /// becomes the anchor at the rectangle's top-left.
    pub fn select_rect(&mut self, doc: &TemplateDocument, rect: Rect) {
        self.selected = doc
            .anchors()
            .filter(|cell| cell.rect().is_some_and(|r| r.intersects(&rect)))
            .map(|cell| cell.id)
            .collect();
        self.primary = doc.get_cell_at(rect.row, rect.col).map(|cell| cell.id);
    }

    /// Select whole rows `a..=b` (either order).
    pub fn select_rows(&mut self, doc: &TemplateDocument, a: usize, b: usize) {
        let (lo, hi) = (a.min(b), a.max(b));
        self.select_rect(doc, Rect::new(lo, 0, hi - lo + 1, doc.cols()));
    }

    /// Select whole columns `a..=b` (either order).
    pub fn select_columns(&mut self, doc: &TemplateDocument, a: usize, b: usize) {
        let (lo, hi) = (a.min(b), a.max(b));
        self.select_rect(doc, Rect::new(0, lo, doc.rows(), hi - lo + 1));
    }

    pub fn select_all(&mut self, doc: &TemplateDocument) {
        self.selected = doc.anchors().map(|cell| cell.id).collect();
        self.primary = doc.get_cell_at(0, 0).map(|cell| cell.id);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.primary = None;
    }

    /// Drop ids that no longer name a visible cell.
    pub fn prune(&mut self, doc: &TemplateDocument) {
        let before = self.selected.len();
        self.selected
            .retain(|id| doc.cell(*id).is_some_and(|cell| cell.is_anchor()));
        if self
            .primary
            .is_some_and(|id| !doc.cell(id).is_some_and(|cell| cell.is_anchor()))
        {
            self.primary = None;
        }
        if self.selected.len() != before {
            log::trace!("pruned {} stale selection id(s)", before - self.selected.len());
        }
    }
}
