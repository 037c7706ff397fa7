//! Writing converted documents to disk
//!
//! A Scribe file holding a single piece becomes one MEI file named after
//! the input. A file holding several pieces is cut up, one MEI file per
//! piece, named after the piece's repertory number (trecento) or its
//! manuscript, part number and CAO number (chant).

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tinytemplate::TinyTemplate;
use tracing::{debug, info, warn};

use crate::language::{Document, LoadingError, Part, ScribeType};
use crate::parsing::{self, ParsingError};
use crate::rendering;
use crate::tables::Tables;

static TRECENTO_NAME: &str = "{repertory}";
static CHANT_NAME: &str = "{manuscript}{sequence} ({cao})";
static SINGLE_NAME: &str = "{filename}.xml";

pub const DEFAULT_ENCODER: &str = "Unknown";

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error(transparent)]
    Loading(#[from] LoadingError),

    #[error(transparent)]
    Parsing(#[from] ParsingError),

    #[error("unable to produce XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("unable to write {}: {source}", path.display())]
    Writing {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to name output file: {0}")]
    Naming(#[from] tinytemplate::error::Error),
}

/// Options affecting how converted files are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Name of the person who encoded the original Scribe file.
    pub encoder: String,
    /// Where to put output files; alongside the input if not given.
    pub output: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            encoder: DEFAULT_ENCODER.to_string(),
            output: None,
        }
    }
}

#[derive(Serialize)]
struct Context {
    filename: String,
    repertory: String,
    manuscript: String,
    sequence: String,
    cao: i32,
}

impl Context {
    fn new(filename: &Path, part: &Part) -> Context {
        Context {
            filename: filename
                .file_name()
                .map(|name| {
                    name.to_string_lossy()
                        .to_string()
                })
                .unwrap_or_default(),
            repertory: part
                .repertory()
                .unwrap_or_default()
                .to_string(),
            manuscript: part
                .manuscript
                .clone(),
            sequence: format!("{:04}", part.id),
            cao: part
                .cao()
                .unwrap_or_default(),
        }
    }
}

/// Load, parse, and convert one Scribe file, returning the paths of the
/// files written.
pub fn convert_file(
    filename: &Path,
    settings: &Settings,
    tables: &Tables,
) -> Result<Vec<PathBuf>, ConversionError> {
    let content = parsing::load(filename)?;
    let document = parsing::parse(&content, tables)?;
    write_document(&document, filename, settings, tables)
}

/// Convert a parsed Document to MEI and write it out, as a single file or
/// one per piece.
pub fn write_document(
    document: &Document,
    filename: &Path,
    settings: &Settings,
    tables: &Tables,
) -> Result<Vec<PathBuf>, ConversionError> {
    if document
        .parts
        .is_empty()
    {
        warn!("No parts found in {}", filename.display());
        return Ok(Vec::new());
    }

    let directory = output_directory(filename, settings);

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("trecento", TRECENTO_NAME)?;
    tt.add_template("chant", CHANT_NAME)?;
    tt.add_template("single", SINGLE_NAME)?;

    if document.piece_count < 2 {
        let name = tt.render("single", &Context::new(filename, &document.parts[0]))?;
        let target = directory.join(name);
        let bytes = rendering::render(
            document.kind,
            &document.parts,
            tables,
            &settings.encoder,
            false,
        )?;
        write(&target, &bytes)?;
        return Ok(vec![target]);
    }

    let mut written = Vec::new();
    let mut used = HashSet::new();

    for piece in document.pieces() {
        let first = &piece[0];
        let template = match document.kind {
            ScribeType::Trecento => "trecento",
            ScribeType::Chant => "chant",
        };

        let name = tt.render(template, &Context::new(filename, first))?;
        let name = unique_name(name, &mut used);
        debug!("Piece of {} parts named {:?}", piece.len(), name);

        let target = directory.join(format!("{}.xml", name));
        let bytes = rendering::render(document.kind, piece, tables, &settings.encoder, true)?;
        write(&target, &bytes)?;
        written.push(target);
    }

    Ok(written)
}

fn output_directory(filename: &Path, settings: &Settings) -> PathBuf {
    match &settings.output {
        Some(directory) => directory.clone(),
        None => filename
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    }
}

// repeated repertory numbers are distinguished by suffixes
fn unique_name(mut name: String, used: &mut HashSet<String>) -> String {
    while used.contains(&name) {
        name.push_str(" copy");
    }
    used.insert(name.clone());
    name
}

fn write(target: &Path, bytes: &[u8]) -> Result<(), ConversionError> {
    info!("Writing {}", target.display());
    std::fs::write(target, bytes).map_err(|source| ConversionError::Writing {
        path: target.to_path_buf(),
        source,
    })
}
