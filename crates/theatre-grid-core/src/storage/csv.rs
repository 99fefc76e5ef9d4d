//! CSV export of the flattened grid.

use crate::document::TemplateDocument;
use crate::error::Result;
use std::borrow::Cow;
use std::path::Path;

/// Render [`TemplateDocument::flatten`] as CSV, one line per row.
pub fn to_csv_string(doc: &TemplateDocument) -> String {
    let mut out = String::new();
    for row in doc.flatten() {
        let fields: Vec<Cow<'_, str>> = row.iter().map(|field| escape_csv_field(field)).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

pub fn write_csv(path: &Path, doc: &TemplateDocument) -> Result<()> {
    std::fs::write(path, to_csv_string(doc))?;
    Ok(())
}

/// Cells a spreadsheet would read as a formula when the sheet is opened.
const FORMULA_LEADS: [char; 4] = ['=', '+', '-', '@'];

/// Quote one flattened cell for CSV.
///
/// A cell whose first non-blank character starts a formula is prefixed with
/// `'` so the export opens as text. `{{field}}` placeholders contain none of
/// the quoting triggers and come through borrowed and unchanged.
fn escape_csv_field(field: &str) -> Cow<'_, str> {
    let leads_formula = field
        .trim_start_matches([' ', '\t'])
        .starts_with(FORMULA_LEADS);
    let field: Cow<'_, str> = if leads_formula {
        Cow::Owned(format!("'{}", field))
    } else {
        Cow::Borrowed(field)
    };

    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        field
    }
}
