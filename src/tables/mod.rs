//! Lookup tables consulted while reading and converting Scribe files.
//!
//! These are loaded once by the driver and handed by reference to whatever
//! needs them.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::language::ScribeType;

mod codes;
mod sources;

pub use codes::{CodeTable, CodeType};
pub use sources::SourceKey;

pub const TRECENTO_CODES: &str = "neumcode_trecento.csv";
pub const CHANT_CODES: &str = "neumcode_chant.csv";
pub const SOURCE_KEY: &str = "sourcekey.tab";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("could not read table {}: {details}", path.display())]
    Unreadable { path: PathBuf, details: String },

    #[error("no entries found in table {}", .0.display())]
    Empty(PathBuf),

    #[error("unknown code \"{0}\"")]
    UnknownCode(String),

    #[error("unknown manuscript siglum \"{0}\"")]
    UnknownSiglum(String),
}

/// The three tables a conversion needs.
#[derive(Debug, Clone)]
pub struct Tables {
    pub chant: CodeTable,
    pub trecento: CodeTable,
    pub sources: SourceKey,
}

impl Tables {
    /// Load the tables from their conventional file names in the given
    /// directory.
    pub fn from_directory(directory: &Path) -> Result<Tables, TableError> {
        info!("Loading tables from {}", directory.display());

        Ok(Tables {
            chant: CodeTable::from_path(&directory.join(CHANT_CODES))?,
            trecento: CodeTable::from_path(&directory.join(TRECENTO_CODES))?,
            sources: SourceKey::from_path(&directory.join(SOURCE_KEY))?,
        })
    }

    /// The code table appropriate to a dialect.
    pub fn codes(&self, kind: ScribeType) -> &CodeTable {
        match kind {
            ScribeType::Chant => &self.chant,
            ScribeType::Trecento => &self.trecento,
        }
    }
}

fn read_table(path: &Path) -> Result<String, TableError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(crate::parsing::decode(bytes)),
        Err(error) => Err(TableError::Unreadable {
            path: path.to_path_buf(),
            details: error
                .kind()
                .to_string(),
        }),
    }
}
