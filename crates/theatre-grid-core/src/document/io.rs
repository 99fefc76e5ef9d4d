use super::TemplateDocument;
use crate::error::Result;

impl TemplateDocument {
    /// Parse and validate a template. Nothing is accepted unless it passes
    /// [`TemplateDocument::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let mut doc: TemplateDocument = serde_json::from_str(json)?;
        if let Err(err) = doc.validate() {
            log::warn!("rejecting template import: {}", err);
            return Err(err.into());
        }
        let min_next = doc.cells.iter().map(|cell| cell.id.0 + 1).max().unwrap_or(0);
        doc.next_id = doc.next_id.max(min_next);
        doc.normalize();
        Ok(doc)
    }

    /// Serialize in the import shape.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One field per visible cell for every row, in column order. A merged
    /// cell yields a single field on its anchor's row; covered positions
    /// yield nothing.
    pub fn flatten(&self) -> Vec<Vec<String>> {
        let mut rows = vec![Vec::new(); self.rows];
        for cell in self.anchors() {
            rows[cell.row].push(cell.content.clone());
        }
        rows
    }
}
