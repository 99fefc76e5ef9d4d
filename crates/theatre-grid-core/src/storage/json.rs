//! Template files in the JSON import/export shape.

use crate::document::TemplateDocument;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Load and validate a template file.
pub fn read_template(path: &Path) -> Result<TemplateDocument> {
    let content = fs::read_to_string(path)?;
    let doc = TemplateDocument::from_json(&content)?;
    log::debug!(
        "loaded {}x{} template from {}",
        doc.rows(),
        doc.cols(),
        path.display()
    );
    Ok(doc)
}

pub fn write_template(path: &Path, doc: &TemplateDocument) -> Result<()> {
    let mut content = doc.to_json()?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}
