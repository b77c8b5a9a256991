//! Cellsheet - a formula spreadsheet on the command line

mod config;

use anyhow::{Context, Result};
use cellsheet_core::Spreadsheet;
use cellsheet_engine::engine::format_value;
use config::Settings;
use std::env;
use std::path::PathBuf;

fn print_usage() {
    eprintln!("Usage: cellsheet [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Spreadsheet file to open (.sheet)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <NAME=CONTENTS> Set a cell (can be repeated, applied in order)");
    eprintln!("  -o, --output <FILE>       Save the resulting sheet");
    eprintln!("  --config <FILE>           Load settings from TOML file");
    eprintln!("  -h, --help                Print help");
}

struct Options {
    file_path: Option<PathBuf>,
    edits: Vec<(String, String)>,
    output_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut options = Options {
        file_path: None,
        edits: Vec::new(),
        output_file: None,
        config_file: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "-s" | "--set" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --set requires NAME=CONTENTS");
                    std::process::exit(1);
                }
                let Some((name, contents)) = args[i].split_once('=') else {
                    eprintln!("Error: Expected NAME=CONTENTS, got: {}", args[i]);
                    std::process::exit(1);
                };
                options.edits.push((name.to_string(), contents.to_string()));
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires a file path");
                    std::process::exit(1);
                }
                options.output_file = Some(PathBuf::from(&args[i]));
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                options.config_file = Some(PathBuf::from(&args[i]));
            }
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

    let (settings, warnings) = config::load_settings(options.config_file.as_ref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    if let Err(e) = run(options, &settings) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(options: Options, settings: &Settings) -> Result<()> {
    let mut sheet = match &options.file_path {
        Some(path) => Spreadsheet::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?,
        None => Spreadsheet::new(),
    };

    for (name, contents) in &options.edits {
        sheet
            .set_contents(name, contents)
            .with_context(|| format!("Failed to set {}", name))?;
    }

    print_sheet(&sheet, settings)?;

    if let Some(output_path) = &options.output_file {
        sheet
            .save(output_path)
            .with_context(|| format!("Failed to save {}", output_path.display()))?;
        eprintln!("Saved to {}", output_path.display());
    }
    Ok(())
}

/// Print one `NAME<TAB>VALUE` line per non-empty cell, by row then column.
fn print_sheet(sheet: &Spreadsheet, settings: &Settings) -> Result<()> {
    for name in sheet.names_by_position() {
        let value = format_value(
            sheet.get_value(name)?,
            settings.precision,
            &settings.error_marker,
        );
        if settings.show_contents {
            println!("{}\t{}\t{}", name, sheet.get_contents(name)?, value);
        } else {
            println!("{}\t{}", name, value);
        }
    }
    Ok(())
}
