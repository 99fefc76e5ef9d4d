//! Line-oriented editing commands for scripting templates.
//!
//! Cells use A1 references, rows are 1-based and columns are letters:
//!
//! ```text
//! set A1 Theatre {{theatre}}
//! merge A1:B1
//! style A1:B1 bold align=center bg=#dbeafe
//! delete-col C
//! save theatre-list.json
//! print
//! ```

use crate::error::{CommandError, Result};
use std::io::Write;
use std::path::PathBuf;
use theatre_grid_core::{
    CellId, CellRange, CellRef, CustomFieldDef, Editor, HAlign, StylePatch, VAlign, storage,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Set { cell: CellRef, text: String },
    Merge(CellRange),
    Split(CellRef),
    AddRow,
    AddColumn,
    DeleteRow(usize),
    DeleteColumn(usize),
    Width { col: usize, px: u32 },
    Height { row: usize, px: u32 },
    ResizeCell { cell: CellRef, width: u32, height: u32 },
    Copy(CellRange),
    Cut(CellRange),
    Paste(CellRef),
    Style { range: CellRange, patch: StylePatch },
    Field { cell: CellRef, key: String },
    Define { key: String, label: String },
    Undefine(String),
    Tokens,
    Undo,
    Redo,
    Print,
    Load(PathBuf),
    Save(PathBuf),
}

fn parse_row(token: &str) -> std::result::Result<usize, String> {
    match token.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Invalid row number: {}", token)),
    }
}

fn parse_col(token: &str) -> std::result::Result<usize, String> {
    CellRef::letters_to_col(token).ok_or_else(|| format!("Invalid column: {}", token))
}

fn parse_px(token: &str) -> std::result::Result<u32, String> {
    token
        .parse::<u32>()
        .map_err(|_| format!("Invalid size: {}", token))
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(format!("Expected on/off, got {}", other)),
    }
}

fn parse_style(attrs: &[&str]) -> std::result::Result<StylePatch, String> {
    let mut patch = StylePatch::default();
    for attr in attrs {
        let (key, value) = match attr.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (*attr, None),
        };
        match (key.to_ascii_lowercase().as_str(), value) {
            ("bold", None) => patch.bold = Some(true),
            ("italic", None) => patch.italic = Some(true),
            ("underline", None) => patch.underline = Some(true),
            ("plain", None) => {
                patch.bold = Some(false);
                patch.italic = Some(false);
                patch.underline = Some(false);
            }
            ("bold", Some(v)) => patch.bold = Some(parse_bool(v)?),
            ("italic", Some(v)) => patch.italic = Some(parse_bool(v)?),
            ("underline", Some(v)) => patch.underline = Some(parse_bool(v)?),
            ("border", Some(v)) => patch.border = Some(parse_bool(v)?),
            ("align", Some(v)) => {
                patch.align = Some(match v.to_ascii_lowercase().as_str() {
                    "left" => HAlign::Left,
                    "center" => HAlign::Center,
                    "right" => HAlign::Right,
                    other => return Err(format!("Invalid align: {}", other)),
                })
            }
            ("valign", Some(v)) => {
                patch.vertical_align = Some(match v.to_ascii_lowercase().as_str() {
                    "top" => VAlign::Top,
                    "middle" => VAlign::Middle,
                    "bottom" => VAlign::Bottom,
                    other => return Err(format!("Invalid valign: {}", other)),
                })
            }
            ("bg", Some(v)) => {
                patch.background = Some(if v.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(v.to_string())
                })
            }
            ("color", Some(v)) => patch.text_color = Some(v.to_string()),
            ("font", Some(v)) => patch.font_family = Some(v.to_string()),
            ("size", Some(v)) => patch.font_size = Some(parse_px(v)?),
            _ => return Err(format!("Unknown style attribute: {}", attr)),
        }
    }
    if patch.is_empty() {
        return Err("style needs at least one attribute".to_string());
    }
    Ok(patch)
}

/// Parse one command line. Blank lines and `#` comments are not commands;
/// callers skip them.
pub fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();
    let arity = |n: usize| {
        if args.len() == n {
            Ok(())
        } else {
            Err(format!(
                "{} takes {} argument(s), got {}",
                name,
                n,
                args.len()
            ))
        }
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "set" => {
            let Some((cell, text)) = rest
                .split_once(char::is_whitespace)
                .map(|(cell, text)| (cell, text.trim()))
                .or_else(|| (!rest.is_empty()).then_some((rest, "")))
            else {
                return Err("set takes a cell and text".to_string());
            };
            Command::Set {
                cell: cell.parse()?,
                text: text.to_string(),
            }
        }
        "merge" => {
            arity(1)?;
            Command::Merge(args[0].parse()?)
        }
        "split" => {
            arity(1)?;
            Command::Split(args[0].parse()?)
        }
        "add-row" => {
            arity(0)?;
            Command::AddRow
        }
        "add-col" => {
            arity(0)?;
            Command::AddColumn
        }
        "delete-row" => {
            arity(1)?;
            Command::DeleteRow(parse_row(args[0])?)
        }
        "delete-col" => {
            arity(1)?;
            Command::DeleteColumn(parse_col(args[0])?)
        }
        "width" => {
            arity(2)?;
            Command::Width {
                col: parse_col(args[0])?,
                px: parse_px(args[1])?,
            }
        }
        "height" => {
            arity(2)?;
            Command::Height {
                row: parse_row(args[0])?,
                px: parse_px(args[1])?,
            }
        }
        "resize-cell" => {
            arity(3)?;
            Command::ResizeCell {
                cell: args[0].parse()?,
                width: parse_px(args[1])?,
                height: parse_px(args[2])?,
            }
        }
        "copy" => {
            arity(1)?;
            Command::Copy(args[0].parse()?)
        }
        "cut" => {
            arity(1)?;
            Command::Cut(args[0].parse()?)
        }
        "paste" => {
            arity(1)?;
            Command::Paste(args[0].parse()?)
        }
        "style" => {
            let Some((range, attrs)) = args.split_first() else {
                return Err("style takes a range and attributes".to_string());
            };
            Command::Style {
                range: range.parse()?,
                patch: parse_style(attrs)?,
            }
        }
        "field" => {
            arity(2)?;
            Command::Field {
                cell: args[0].parse()?,
                key: args[1].to_string(),
            }
        }
        "define" => {
            if args.len() < 2 {
                return Err("define takes a key and a label".to_string());
            }
            Command::Define {
                key: args[0].to_string(),
                label: args[1..].join(" "),
            }
        }
        "undefine" => {
            arity(1)?;
            Command::Undefine(args[0].to_string())
        }
        "tokens" => Command::Tokens,
        "undo" => Command::Undo,
        "redo" => Command::Redo,
        "print" => Command::Print,
        "load" | "save" if rest.is_empty() => {
            return Err(format!("{} takes a file path", name));
        }
        "load" => Command::Load(PathBuf::from(rest)),
        "save" => Command::Save(PathBuf::from(rest)),
        other => return Err(format!("Unknown command: {}", other)),
    };
    Ok(command)
}

fn cell_id(editor: &Editor, cell: CellRef) -> Result<CellId> {
    let doc = editor.document();
    doc.cell_at_position(cell.row, cell.col)
        .map(|c| c.id)
        .ok_or(CommandError::OutOfGrid {
            cell,
            rows: doc.rows(),
            cols: doc.cols(),
        })
}

fn select_range(editor: &mut Editor, range: &CellRange) -> Result<()> {
    cell_id(editor, range.start)?;
    cell_id(editor, range.end)?;
    editor.select_rect(range.rect());
    Ok(())
}

pub fn execute(editor: &mut Editor, command: &Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Set { cell, text } => {
            let id = cell_id(editor, *cell)?;
            editor.set_content(id, text)?;
        }
        Command::Merge(range) => {
            select_range(editor, range)?;
            editor.merge_selection()?;
        }
        Command::Split(cell) => {
            let id = cell_id(editor, *cell)?;
            editor.split(id)?;
        }
        Command::AddRow => {
            editor.add_row();
        }
        Command::AddColumn => {
            editor.add_column();
        }
        Command::DeleteRow(row) => editor.delete_row(*row)?,
        Command::DeleteColumn(col) => editor.delete_column(*col)?,
        Command::Width { col, px } => editor.resize_column(*col, *px)?,
        Command::Height { row, px } => editor.resize_row(*row, *px)?,
        Command::ResizeCell {
            cell,
            width,
            height,
        } => {
            let id = cell_id(editor, *cell)?;
            editor.resize_cell(id, *width, *height)?;
        }
        Command::Copy(range) => {
            select_range(editor, range)?;
            let copied = editor.copy_selection();
            log::info!("copied {} cell(s)", copied);
        }
        Command::Cut(range) => {
            select_range(editor, range)?;
            let cut = editor.cut_selection();
            log::info!("cut {} cell(s)", cut);
        }
        Command::Paste(cell) => {
            let id = cell_id(editor, *cell)?;
            let written = editor.paste(id);
            log::info!("pasted {} cell(s)", written);
        }
        Command::Style { range, patch } => {
            select_range(editor, range)?;
            editor.apply_style_to_selection(patch);
        }
        Command::Field { cell, key } => {
            let id = cell_id(editor, *cell)?;
            editor.insert_field_token(id, key)?;
        }
        Command::Define { key, label } => {
            editor.add_custom_field(CustomFieldDef::new(key, label));
        }
        Command::Undefine(key) => {
            if editor.remove_custom_field(key).is_none() {
                log::warn!("no custom field named {}", key);
            }
        }
        Command::Tokens => {
            for token in editor.document().field_tokens() {
                writeln!(out, "{}", token)?;
            }
        }
        Command::Undo => {
            if !editor.undo() {
                log::info!("nothing to undo");
            }
        }
        Command::Redo => {
            if !editor.redo() {
                log::info!("nothing to redo");
            }
        }
        Command::Print => print_grid(editor, out)?,
        Command::Load(path) => {
            let document = storage::read_template(path)?;
            editor.replace_document(document);
            log::info!("loaded {}", path.display());
        }
        Command::Save(path) => {
            storage::write_template(path, editor.document())?;
            log::info!("saved {}", path.display());
        }
    }
    Ok(())
}

/// One line per row: each visible cell as `REF[:END] content`.
fn print_grid(editor: &Editor, out: &mut dyn Write) -> Result<()> {
    let doc = editor.document();
    for row in 0..doc.rows() {
        let fields: Vec<String> = doc
            .anchors()
            .filter(|cell| cell.row == row)
            .map(|cell| {
                let start = CellRef::new(cell.row, cell.col);
                let label = if cell.is_merged() {
                    let end = CellRef::new(
                        cell.row + cell.row_span - 1,
                        cell.col + cell.col_span - 1,
                    );
                    format!("{}:{}", start, end)
                } else {
                    start.to_string()
                };
                if cell.content.is_empty() {
                    label
                } else {
                    format!("{} {}", label, cell.content)
                }
            })
            .collect();
        writeln!(out, "{}", fields.join(" | "))?;
    }
    Ok(())
}

/// Run numbered command lines, stopping at the first failure.
pub fn run_lines<'a, I>(editor: &mut Editor, lines: I, out: &mut dyn Write) -> Result<()>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    for (line, text) in lines {
        let text = text.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let command =
            parse_command(text).map_err(|message| CommandError::Parse { line, message })?;
        log::debug!("line {}: {:?}", line, command);
        execute(editor, &command, out).map_err(|err| CommandError::Failed {
            line,
            source: Box::new(err),
        })?;
    }
    Ok(())
}

/// Run a whole script; line numbers are 1-based.
pub fn run_script(editor: &mut Editor, script: &str, out: &mut dyn Write) -> Result<()> {
    run_lines(
        editor,
        script.lines().enumerate().map(|(i, line)| (i + 1, line)),
        out,
    )
}
