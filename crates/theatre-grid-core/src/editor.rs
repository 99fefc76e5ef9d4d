//! The editing session: one document plus everything that acts on it.
//!
//! Pointer gestures run through a single [`Interaction`] state machine, so
//! at most one drag or resize is ever live. Document mutations record a
//! history entry only when the document actually changed, and prune the
//! selection afterwards.

use crate::clipboard::Clipboard;
use crate::document::TemplateDocument;
use crate::error::{Result, ValidationError};
use crate::history::History;
use crate::resize::{ResizeSession, ResizeTarget};
use crate::selection::{Modifiers, SelectionController};
use crate::settings::EditorSettings;
use theatre_grid_model::{CellId, CustomFieldDef, Rect, StylePatch};

type EditResult<T> = std::result::Result<T, ValidationError>;

/// The pointer gesture in progress.
///
/// Selection drags record only the latest pointer position in `pending`;
/// [`Editor::frame`] applies it, so many pointer events between two frames
/// cost one selection update.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    SelectingRange {
        origin: (usize, usize),
        pending: Option<(usize, usize)>,
    },
    SelectingRows {
        origin: usize,
        pending: Option<usize>,
    },
    SelectingColumns {
        origin: usize,
        pending: Option<usize>,
    },
    ResizingCell(ResizeSession),
    ResizingColumn(ResizeSession),
    ResizingRow(ResizeSession),
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "idle",
            Interaction::SelectingRange { .. } => "range selection",
            Interaction::SelectingRows { .. } => "row selection",
            Interaction::SelectingColumns { .. } => "column selection",
            Interaction::ResizingCell(_) => "cell resize",
            Interaction::ResizingColumn(_) => "column resize",
            Interaction::ResizingRow(_) => "row resize",
        }
    }

    fn resize_session(&self) -> Option<&ResizeSession> {
        match self {
            Interaction::ResizingCell(session)
            | Interaction::ResizingColumn(session)
            | Interaction::ResizingRow(session) => Some(session),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Editor {
    document: TemplateDocument,
    selection: SelectionController,
    clipboard: Clipboard,
    history: History,
    settings: EditorSettings,
    interaction: Interaction,
}

impl Editor {
    pub fn new(rows: usize, cols: usize) -> EditResult<Self> {
        Self::with_settings(rows, cols, EditorSettings::default())
    }

    pub fn with_settings(
        rows: usize,
        cols: usize,
        settings: EditorSettings,
    ) -> EditResult<Self> {
        let document = TemplateDocument::with_settings(rows, cols, &settings)?;
        Ok(Self::from_document(document, settings))
    }

    pub fn from_document(document: TemplateDocument, settings: EditorSettings) -> Self {
        Self {
            document,
            selection: SelectionController::new(),
            clipboard: Clipboard::new(),
            history: History::new(settings.history_limit),
            settings,
            interaction: Interaction::Idle,
        }
    }

    pub fn document(&self) -> &TemplateDocument {
        &self.document
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    // ---- selection -------------------------------------------------------

    pub fn click(&mut self, id: CellId, modifiers: Modifiers) {
        self.release_session();
        self.selection.click(&self.document, id, modifiers);
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.document);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Select every anchor intersecting `rect`.
    pub fn select_rect(&mut self, rect: Rect) {
        self.selection.select_rect(&self.document, rect);
    }

    fn clamp_row(&self, row: usize) -> usize {
        row.min(self.document.rows() - 1)
    }

    fn clamp_col(&self, col: usize) -> usize {
        col.min(self.document.cols() - 1)
    }

    /// Pointer-down on a cell: select it and start a range drag.
    pub fn begin_drag(&mut self, row: usize, col: usize) {
        self.release_session();
        let origin = (self.clamp_row(row), self.clamp_col(col));
        self.selection
            .select_rect(&self.document, Rect::new(origin.0, origin.1, 1, 1));
        self.interaction = Interaction::SelectingRange {
            origin,
            pending: None,
        };
    }

    /// Record the pointer over `(row, col)`. Applied on the next frame.
    pub fn drag_over(&mut self, row: usize, col: usize) {
        let at = (self.clamp_row(row), self.clamp_col(col));
        if let Interaction::SelectingRange { pending, .. } = &mut self.interaction {
            *pending = Some(at);
        }
    }

    /// Pointer-down on a row header.
    pub fn begin_row_drag(&mut self, row: usize) {
        self.release_session();
        let origin = self.clamp_row(row);
        self.selection.select_rows(&self.document, origin, origin);
        self.interaction = Interaction::SelectingRows {
            origin,
            pending: None,
        };
    }

    pub fn row_drag_over(&mut self, row: usize) {
        let at = self.clamp_row(row);
        if let Interaction::SelectingRows { pending, .. } = &mut self.interaction {
            *pending = Some(at);
        }
    }

    /// Pointer-down on a column header.
    pub fn begin_column_drag(&mut self, col: usize) {
        self.release_session();
        let origin = self.clamp_col(col);
        self.selection.select_columns(&self.document, origin, origin);
        self.interaction = Interaction::SelectingColumns {
            origin,
            pending: None,
        };
    }

    pub fn column_drag_over(&mut self, col: usize) {
        let at = self.clamp_col(col);
        if let Interaction::SelectingColumns { pending, .. } = &mut self.interaction {
            *pending = Some(at);
        }
    }

    /// Apply the latest pending drag position, if any. Call once per
    /// rendered frame. Returns whether the selection was updated.
    pub fn frame(&mut self) -> bool {
        match &mut self.interaction {
            Interaction::SelectingRange { origin, pending } => match pending.take() {
                Some(at) => {
                    let rect = Rect::spanning(*origin, at);
                    self.selection.select_rect(&self.document, rect);
                    true
                }
                None => false,
            },
            Interaction::SelectingRows { origin, pending } => match pending.take() {
                Some(at) => {
                    self.selection.select_rows(&self.document, *origin, at);
                    true
                }
                None => false,
            },
            Interaction::SelectingColumns { origin, pending } => match pending.take() {
                Some(at) => {
                    self.selection.select_columns(&self.document, *origin, at);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Finish a selection drag, applying the final pointer position even if
    /// no frame ran since it was recorded.
    pub fn end_drag(&mut self) {
        if matches!(
            self.interaction,
            Interaction::SelectingRange { .. }
                | Interaction::SelectingRows { .. }
                | Interaction::SelectingColumns { .. }
        ) {
            self.frame();
            self.interaction = Interaction::Idle;
        }
    }

    /// Pointer-up: ends whatever gesture is live.
    pub fn pointer_up(&mut self) {
        match self.interaction {
            Interaction::Idle => {}
            Interaction::SelectingRange { .. }
            | Interaction::SelectingRows { .. }
            | Interaction::SelectingColumns { .. } => self.end_drag(),
            Interaction::ResizingCell(_)
            | Interaction::ResizingColumn(_)
            | Interaction::ResizingRow(_) => self.end_resize(),
        }
    }

    /// A new pointer-down arrived while a gesture is still live (its
    /// pointer-up was lost). Finish it as if the pointer had been released.
    fn release_session(&mut self) {
        if self.interaction.is_idle() {
            return;
        }
        log::debug!("releasing stale {} session", self.interaction.name());
        self.pointer_up();
    }

    // ---- resize ----------------------------------------------------------

    /// Pointer-down on a resize handle. Records one history entry for the
    /// whole gesture.
    pub fn begin_resize(
        &mut self,
        target: ResizeTarget,
        pointer: (f64, f64),
    ) -> EditResult<()> {
        self.release_session();
        let session = ResizeSession::begin(&self.document, target, pointer)?;
        self.history.save(&self.document);
        self.interaction = match session.target() {
            ResizeTarget::Cell { .. } => Interaction::ResizingCell(session),
            ResizeTarget::Column(_) => Interaction::ResizingColumn(session),
            ResizeTarget::Row(_) => Interaction::ResizingRow(session),
        };
        Ok(())
    }

    /// Pointer move during a resize. Returns the applied size.
    pub fn resize_move(&mut self, pointer: (f64, f64)) -> Option<u32> {
        let session = self.interaction.resize_session()?;
        Some(session.update(&mut self.document, pointer, &self.settings))
    }

    /// Pointer-up on a resize. A gesture that changed nothing leaves no
    /// history entry behind.
    pub fn end_resize(&mut self) {
        let Some(session) = self.interaction.resize_session() else {
            return;
        };
        if session.is_unchanged(&self.document) {
            self.history.discard_last_save();
        }
        self.interaction = Interaction::Idle;
    }

    /// Abort a resize, restoring the size from pointer-down.
    pub fn cancel_resize(&mut self) {
        let Some(session) = self.interaction.resize_session() else {
            return;
        };
        session.cancel(&mut self.document);
        self.history.discard_last_save();
        self.interaction = Interaction::Idle;
    }

    /// Set a column width in one step, clamped to the minimum.
    pub fn resize_column(&mut self, col: usize, width: u32) -> EditResult<()> {
        let width = width.max(self.settings.min_column_width);
        let before = self.begin_edit();
        let result = self.document.set_column_width(col, width);
        self.finish_edit(before);
        result
    }

    /// Set a row height in one step, clamped to the minimum.
    pub fn resize_row(&mut self, row: usize, height: u32) -> EditResult<()> {
        let height = height.max(self.settings.min_row_height);
        let before = self.begin_edit();
        let result = self.document.set_row_height(row, height);
        self.finish_edit(before);
        result
    }

    /// Override one cell's size in one step, clamped to the minimums.
    pub fn resize_cell(
        &mut self,
        id: CellId,
        width: u32,
        height: u32,
    ) -> EditResult<()> {
        let width = width.max(self.settings.min_column_width);
        let height = height.max(self.settings.min_row_height);
        let before = self.begin_edit();
        let result = self
            .document
            .set_cell_width(id, width)
            .and_then(|()| self.document.set_cell_height(id, height));
        self.finish_edit(before);
        result
    }

    // ---- document edits --------------------------------------------------

    fn begin_edit(&mut self) -> TemplateDocument {
        self.release_session();
        self.document.clone()
    }

    fn finish_edit(&mut self, before: TemplateDocument) {
        if self.document != before {
            self.history.push(before);
        }
        self.selection.prune(&self.document);
    }

    /// Merge the selection. On success the selection becomes the new anchor.
    pub fn merge_selection(&mut self) -> EditResult<CellId> {
        let ids = self.selection.ids_in_scan_order(&self.document);
        let before = self.begin_edit();
        let result = self.document.merge(ids);
        self.finish_edit(before);
        if let Ok(anchor) = result {
            self.selection.select_single(anchor);
        }
        result
    }

    pub fn split(&mut self, id: CellId) -> EditResult<Vec<CellId>> {
        let before = self.begin_edit();
        let result = self.document.split(id);
        self.finish_edit(before);
        result
    }

    pub fn copy_selection(&mut self) -> usize {
        let ids = self.selection.ids_in_scan_order(&self.document);
        self.clipboard.copy(&self.document, ids)
    }

    /// Cut the selection. Nothing changes until the next paste.
    pub fn cut_selection(&mut self) -> usize {
        let ids = self.selection.ids_in_scan_order(&self.document);
        self.clipboard.cut(&self.document, ids)
    }

    pub fn paste(&mut self, target: CellId) -> usize {
        let before = self.begin_edit();
        let written = self.clipboard.paste(&mut self.document, target);
        self.finish_edit(before);
        written
    }

    pub fn add_row(&mut self) -> usize {
        let before = self.begin_edit();
        let row = self.document.add_row(self.settings.default_row_height);
        self.finish_edit(before);
        row
    }

    pub fn add_column(&mut self) -> usize {
        let before = self.begin_edit();
        let col = self.document.add_column(self.settings.default_column_width);
        self.finish_edit(before);
        col
    }

    pub fn delete_row(&mut self, row: usize) -> EditResult<()> {
        let before = self.begin_edit();
        let result = self.document.delete_row(row);
        self.finish_edit(before);
        result
    }

    pub fn delete_column(&mut self, col: usize) -> EditResult<()> {
        let before = self.begin_edit();
        let result = self.document.delete_column(col);
        self.finish_edit(before);
        result
    }

    pub fn set_content(&mut self, id: CellId, content: &str) -> EditResult<()> {
        let before = self.begin_edit();
        let result = self.document.set_content(id, content);
        self.finish_edit(before);
        result
    }

    pub fn insert_field_token(&mut self, id: CellId, key: &str) -> EditResult<()> {
        let before = self.begin_edit();
        let result = self.document.insert_field_token(id, key);
        self.finish_edit(before);
        result
    }

    pub fn apply_style<I>(&mut self, ids: I, patch: &StylePatch) -> usize
    where
        I: IntoIterator<Item = CellId>,
    {
        let before = self.begin_edit();
        let styled = self.document.apply_style(ids, patch);
        self.finish_edit(before);
        styled
    }

    pub fn apply_style_to_selection(&mut self, patch: &StylePatch) -> usize {
        let ids = self.selection.ids_in_scan_order(&self.document);
        self.apply_style(ids, patch)
    }

    pub fn add_custom_field(&mut self, field: CustomFieldDef) {
        let before = self.begin_edit();
        self.document.add_custom_field(field);
        self.finish_edit(before);
    }

    pub fn remove_custom_field(&mut self, key: &str) -> Option<CustomFieldDef> {
        let before = self.begin_edit();
        let removed = self.document.remove_custom_field(key);
        self.finish_edit(before);
        removed
    }

    // ---- history ---------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        self.release_session();
        let undone = self.history.undo(&mut self.document);
        self.selection.prune(&self.document);
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.release_session();
        let redone = self.history.redo(&mut self.document);
        self.selection.prune(&self.document);
        redone
    }

    // ---- import ----------------------------------------------------------

    /// Replace the document with a validated import. History, selection and
    /// clipboard start over.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let document = TemplateDocument::from_json(json)?;
        self.replace_document(document);
        Ok(())
    }

    pub fn replace_document(&mut self, document: TemplateDocument) {
        if let Some(session) = self.interaction.resize_session() {
            session.cancel(&mut self.document);
        }
        self.interaction = Interaction::Idle;
        self.document = document;
        self.history.clear();
        self.selection.clear();
        self.clipboard.clear();
    }
}
