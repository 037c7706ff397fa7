use clap::{Arg, ArgAction, Command};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};

use neoscribe::formatting::{self, Identity, Terminal};
use neoscribe::output::{self, Settings, DEFAULT_ENCODER};
use neoscribe::parsing;
use neoscribe::tables::Tables;

mod problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("scribe2neoscribe")
        .version(VERSION)
        .about("Convert Scribe encoded chant and trecento polyphony to MEI.")
        .arg(
            Arg::new("encoder")
                .short('e')
                .long("encoder")
                .default_value(DEFAULT_ENCODER)
                .help("Name of the person who encoded the Scribe files, recorded in the MEI header."),
        )
        .arg(
            Arg::new("data")
                .short('d')
                .long("data")
                .default_value("data")
                .help("Directory containing the code tables neumcode_chant.csv and neumcode_trecento.csv, and the source key sourcekey.tab."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Directory to write converted files into. The default is alongside each input file."),
        )
        .arg(
            Arg::new("print")
                .short('p')
                .long("print")
                .action(ArgAction::SetTrue)
                .help("Print the rows as parsed rather than converting."),
        )
        .arg(
            Arg::new("raw-control-chars")
                .short('R')
                .long("raw-control-chars")
                .action(ArgAction::SetTrue)
                .help("Emit ANSI escape codes for syntax highlighting even if output is redirected to a pipe or file."),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Report files read and written."),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Report details of parsing and conversion."),
        )
        .arg(
            Arg::new("filenames")
                .required(true)
                .num_args(1..)
                .value_name("FILE")
                .help("The Scribe files to convert."),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else if matches.get_flag("verbose") {
        Level::INFO
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let data = matches
        .get_one::<String>("data")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let tables = match Tables::from_directory(&data) {
        Ok(tables) => tables,
        Err(error) => {
            eprintln!("{}", problem::concise_table_error(&error));
            std::process::exit(1);
        }
    };

    let settings = Settings {
        encoder: matches
            .get_one::<String>("encoder")
            .cloned()
            .unwrap_or_else(|| DEFAULT_ENCODER.to_string()),
        output: matches
            .get_one::<String>("output")
            .map(PathBuf::from),
    };
    debug!(?settings);

    let print = matches.get_flag("print");
    let raw = matches.get_flag("raw-control-chars");

    let filenames: Vec<&String> = matches
        .get_many::<String>("filenames")
        .map(|values| values.collect())
        .unwrap_or_default();

    let mut pieces = 0;
    let mut failures = 0;

    for filename in filenames {
        let filename = Path::new(filename);

        match process(filename, &settings, &tables, print, raw) {
            Some(count) => pieces += count,
            None => failures += 1,
        }
    }

    if !print {
        println!(
            "{} piece{} converted",
            pieces,
            if pieces == 1 { "" } else { "s" }
        );
    }

    if failures > 0 {
        eprintln!(
            "{}: {} file{} could not be converted",
            "error".bright_red(),
            failures,
            if failures == 1 { "" } else { "s" }
        );
        std::process::exit(1);
    }
}

/// Convert (or print) one file, reporting any problem. Returns the number
/// of pieces written, or None if the file failed.
fn process(
    filename: &Path,
    settings: &Settings,
    tables: &Tables,
    print: bool,
    raw: bool,
) -> Option<usize> {
    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            return None;
        }
    };

    let document = match parsing::parse(&content, tables) {
        Ok(document) => document,
        Err(error) => {
            if std::io::stderr().is_terminal() || raw {
                eprintln!(
                    "{}",
                    problem::full_parsing_error(&error, filename, &content, &Terminal)
                );
            } else {
                eprintln!(
                    "{}",
                    problem::concise_parsing_error(&error, filename, &Identity)
                );
            }
            return None;
        }
    };

    if print {
        let result = if std::io::stdout().is_terminal() || raw {
            formatting::render(&Terminal, &document)
        } else {
            formatting::render(&Identity, &document)
        };
        print!("{}", result);
        return Some(document.piece_count);
    }

    match output::write_document(&document, filename, settings, tables) {
        Ok(written) => Some(written.len()),
        Err(error) => {
            eprintln!(
                "{}",
                problem::concise_conversion_error(&error, filename)
            );
            None
        }
    }
}
