//! Snapshot-based undo/redo.
//!
//! Each entry is a full clone of the document taken just before a mutation.
//! `cursor` counts the snapshots that are "behind" the live document; anything
//! past it is the redo branch.

use crate::document::TemplateDocument;
use crate::settings::DEFAULT_HISTORY_LIMIT;

#[derive(Clone, Debug)]
pub struct History {
    snapshots: Vec<TemplateDocument>,
    cursor: usize,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Record `doc` as the state before a mutation. Discards the redo branch.
    pub fn save(&mut self, doc: &TemplateDocument) {
        self.push(doc.clone());
    }

    pub(crate) fn push(&mut self, snapshot: TemplateDocument) {
        self.snapshots.truncate(self.cursor);
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.limit {
            self.snapshots.remove(0);
            log::trace!("history full, dropped oldest snapshot");
        }
        self.cursor = self.snapshots.len();
    }

    /// Forget the most recent [`History::save`], e.g. when a gesture ends
    /// without changing anything.
    pub fn discard_last_save(&mut self) -> Option<TemplateDocument> {
        if self.cursor == 0 || self.cursor != self.snapshots.len() {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.pop()
    }

    /// Step back one snapshot. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self, doc: &mut TemplateDocument) -> bool {
        if self.cursor == 0 {
            return false;
        }
        if self.cursor == self.snapshots.len() {
            // Keep the live state so redo can return to it.
            self.snapshots.push(doc.clone());
        }
        self.cursor -= 1;
        *doc = self.snapshots[self.cursor].clone();
        true
    }

    /// Step forward one snapshot. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self, doc: &mut TemplateDocument) -> bool {
        if self.cursor + 1 >= self.snapshots.len() {
            return false;
        }
        self.cursor += 1;
        *doc = self.snapshots[self.cursor].clone();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::History;
    use crate::document::TemplateDocument;
    use pretty_assertions::assert_eq;

    fn set(doc: &mut TemplateDocument, text: &str) {
        let id = doc.cell_at_position(0, 0).unwrap().id;
        doc.set_content(id, text).unwrap();
    }

    fn get(doc: &TemplateDocument) -> String {
        doc.cell_at_position(0, 0).unwrap().content.clone()
    }

    #[test]
    fn test_undo_restores_exact_snapshot_and_redo_returns() {
        let mut doc = TemplateDocument::new(2, 2).unwrap();
        let mut history = History::default();
        let original = doc.clone();

        history.save(&doc);
        set(&mut doc, "after");
        let mutated = doc.clone();

        assert!(history.undo(&mut doc));
        assert_eq!(doc, original);
        assert!(history.can_redo());
        assert!(history.redo(&mut doc));
        assert_eq!(doc, mutated);
        assert!(!history.redo(&mut doc));
    }

    #[test]
    fn test_new_save_discards_redo_branch() {
        let mut doc = TemplateDocument::new(1, 1).unwrap();
        let mut history = History::default();

        history.save(&doc);
        set(&mut doc, "one");
        history.undo(&mut doc);

        history.save(&doc);
        set(&mut doc, "two");

        assert!(!history.can_redo());
        assert!(!history.redo(&mut doc));
        assert_eq!(get(&doc), "two");
        assert!(history.undo(&mut doc));
        assert_eq!(get(&doc), "");
        assert!(!history.undo(&mut doc));
    }

    #[test]
    fn test_multiple_steps_walk_back_and_forth() {
        let mut doc = TemplateDocument::new(1, 1).unwrap();
        let mut history = History::default();
        for text in ["a", "b", "c"] {
            history.save(&doc);
            set(&mut doc, text);
        }
        assert_eq!(history.undo_depth(), 3);

        history.undo(&mut doc);
        history.undo(&mut doc);
        assert_eq!(get(&doc), "a");
        history.redo(&mut doc);
        assert_eq!(get(&doc), "b");
        history.redo(&mut doc);
        assert_eq!(get(&doc), "c");
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut doc = TemplateDocument::new(1, 1).unwrap();
        let mut history = History::new(2);
        for text in ["a", "b", "c"] {
            history.save(&doc);
            set(&mut doc, text);
        }
        assert!(history.undo(&mut doc));
        assert!(history.undo(&mut doc));
        assert!(!history.undo(&mut doc));
        assert_eq!(get(&doc), "a");
    }

    #[test]
    fn test_discard_last_save() {
        let mut doc = TemplateDocument::new(1, 1).unwrap();
        let mut history = History::default();
        history.save(&doc);
        assert!(history.discard_last_save().is_some());
        assert!(!history.can_undo());
        assert!(!history.undo(&mut doc));
    }
}
