//! theatre-grid - build and check theatre-list grid templates from the shell.

mod commands;
mod config;
mod error;
mod logger;

use anyhow::{Context, bail};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use theatre_grid_core::{Editor, TemplateDocument, storage};

fn print_usage() {
    eprintln!("Usage: theatre-grid [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Template to open (.json)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --new <RxC>               Start from an empty grid, e.g. 4x6");
    eprintln!("  -c, --command <CMD>       Run an editing command (can be repeated)");
    eprintln!("  --script <FILE>           Run editing commands from a file");
    eprintln!("  -o, --output <FILE>       Write the result (.json or .csv)");
    eprintln!("  --check                   Validate FILE and print a summary");
    eprintln!("  --settings <FILE>         Load editor settings from TOML file");
    eprintln!("  -v, --verbose             More log output (can be repeated)");
    eprintln!("  -h, --help                Print help");
}

struct Options {
    file_path: Option<PathBuf>,
    new_size: Option<(usize, usize)>,
    commands: Vec<String>,
    script: Option<PathBuf>,
    output_file: Option<PathBuf>,
    check: bool,
    settings_file: Option<PathBuf>,
    verbosity: u8,
}

fn parse_size(value: &str) -> Option<(usize, usize)> {
    let (rows, cols) = value.split_once(['x', 'X'])?;
    Some((rows.trim().parse().ok()?, cols.trim().parse().ok()?))
}

fn next_value<'a>(args: &'a [String], i: &mut usize, what: &str) -> &'a str {
    *i += 1;
    if *i >= args.len() {
        eprintln!("Error: {}", what);
        std::process::exit(1);
    }
    &args[*i]
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        file_path: None,
        new_size: None,
        commands: Vec::new(),
        script: None,
        output_file: None,
        check: false,
        settings_file: None,
        verbosity: 0,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "--new" => {
                let value = next_value(args, &mut i, "--new requires a size like 4x6");
                match parse_size(value) {
                    Some(size) => options.new_size = Some(size),
                    None => {
                        eprintln!("Error: Invalid size: {}", value);
                        std::process::exit(1);
                    }
                }
            }
            "-c" | "--command" => {
                let value = next_value(args, &mut i, "--command requires a command");
                options.commands.push(value.to_string());
            }
            "--script" => {
                let value = next_value(args, &mut i, "--script requires a file path");
                options.script = Some(PathBuf::from(value));
            }
            "-o" | "--output" => {
                let value = next_value(args, &mut i, "--output requires a file path");
                options.output_file = Some(PathBuf::from(value));
            }
            "--settings" => {
                let value = next_value(args, &mut i, "--settings requires a file path");
                options.settings_file = Some(PathBuf::from(value));
            }
            "--check" => options.check = true,
            "-v" | "--verbose" => options.verbosity = options.verbosity.saturating_add(1),
            "-vv" => options.verbosity = options.verbosity.saturating_add(2),
            arg if arg.starts_with('-') => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => {
                if options.file_path.is_none() {
                    options.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
        i += 1;
    }
    options
}

fn write_output(path: &Path, doc: &TemplateDocument) -> anyhow::Result<()> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("json") => storage::write_template(path, doc)?,
        Some("csv") => storage::write_csv(path, doc)?,
        _ => bail!(
            "Unsupported output format: {} (use .json or .csv)",
            path.display()
        ),
    }
    Ok(())
}

fn print_summary(doc: &TemplateDocument, out: &mut dyn Write) -> std::io::Result<()> {
    let merges = doc.anchors().filter(|cell| cell.is_merged()).count();
    writeln!(
        out,
        "ok: {}x{} template, {} visible cell(s), {} merge(s)",
        doc.rows(),
        doc.cols(),
        doc.anchors().count(),
        merges
    )?;
    let tokens = doc.field_tokens();
    if !tokens.is_empty() {
        let tokens: Vec<String> = tokens.into_iter().collect();
        writeln!(out, "fields: {}", tokens.join(", "))?;
    }
    Ok(())
}

fn run(options: Options) -> anyhow::Result<()> {
    let (settings, warnings) = config::load_settings(options.settings_file.as_deref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let mut editor = match (&options.file_path, options.new_size) {
        (Some(path), None) => {
            let doc = storage::read_template(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            Editor::from_document(doc, settings)
        }
        (None, Some((rows, cols))) => Editor::with_settings(rows, cols, settings)?,
        (Some(_), Some(_)) => bail!("Pass either FILE or --new, not both"),
        (None, None) => bail!("No template: pass FILE or --new RxC"),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if options.check {
        print_summary(editor.document(), &mut out)?;
        return Ok(());
    }

    if let Some(script_path) = &options.script {
        let script = std::fs::read_to_string(script_path)
            .with_context(|| format!("Failed to read {}", script_path.display()))?;
        commands::run_script(&mut editor, &script, &mut out)
            .with_context(|| format!("in {}", script_path.display()))?;
    }
    commands::run_lines(
        &mut editor,
        options
            .commands
            .iter()
            .enumerate()
            .map(|(i, command)| (i + 1, command.as_str())),
        &mut out,
    )?;

    if let Some(output_path) = &options.output_file {
        write_output(output_path, editor.document())?;
        log::info!("wrote {}", output_path.display());
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);
    logger::init(options.verbosity);

    if let Err(e) = run(options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("4x6"), Some((4, 6)));
        assert_eq!(parse_size("10X2"), Some((10, 2)));
        assert_eq!(parse_size("4"), None);
        assert_eq!(parse_size("axb"), None);
    }

    #[test]
    fn test_summary_lists_fields() {
        let mut doc = TemplateDocument::new(2, 2).unwrap();
        let a = doc.cell_at_position(1, 0).unwrap().id;
        let b = doc.cell_at_position(1, 1).unwrap().id;
        doc.set_content(a, "{{surgeon}} / {{anaesthetist}}").unwrap();
        doc.merge([a, b]).unwrap();

        let mut out = Vec::new();
        print_summary(&doc, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ok: 2x2 template, 3 visible cell(s), 1 merge(s)\nfields: anaesthetist, surgeon\n"
        );
    }
}
