//! The table of Scribe codes.
//!
//! The neumcode files are comma separated with a header row. Of their
//! columns we use:
//!
//!   3  code - the Scribe code used when entering data
//!   4  pitchcode - TRUE if the code takes staff positions; formatting codes
//!      such as `@` or `WBAR` do not
//!   7  name - the name of the element
//!   15 type - the kind of output element the code becomes
//!
//! The other columns (font glyphs, Score codes, lilypond equivalents,
//! durations) are of no use when converting and are ignored.

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use super::{read_table, TableError};
use crate::parsing::lines;

const CODE: usize = 3;
const PITCHED: usize = 4;
const NAME: usize = 7;
const KIND: usize = 15;

/// Classification of a code by the element it becomes in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeType {
    Note,
    Rest,
    Ligature,
    Uneume,
    Ineume,
    Mensuration,
    Clef,
    Barline,
    Dot,
    Accidental,
    Other,
}

impl CodeType {
    fn from_name(name: &str) -> CodeType {
        match name.trim() {
            "note" => CodeType::Note,
            "rest" => CodeType::Rest,
            "ligature" => CodeType::Ligature,
            "uneume" => CodeType::Uneume,
            "ineume" => CodeType::Ineume,
            "mensuration" => CodeType::Mensuration,
            "clef" => CodeType::Clef,
            "barline" => CodeType::Barline,
            "dot" => CodeType::Dot,
            "accidental" => CodeType::Accidental,
            _ => CodeType::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    name: String,
    pitched: bool,
    kind: CodeType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    entries: HashMap<String, Entry>,
}

impl CodeTable {
    pub fn from_path(path: &Path) -> Result<CodeTable, TableError> {
        let content = read_table(path)?;
        CodeTable::parse(&content).map_err(|error| match error {
            TableError::Empty(_) => TableError::Empty(path.to_path_buf()),
            other => other,
        })
    }

    /// Build a table from the text of a neumcode file. The first line is a
    /// header and is skipped.
    pub fn parse(content: &str) -> Result<CodeTable, TableError> {
        let mut entries = HashMap::new();

        for line in lines(content).skip(1) {
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line
                .split(',')
                .collect();

            let code = match fields.get(CODE) {
                Some(code) if !code.is_empty() => *code,
                _ => {
                    debug!("Skipping row without a code: {:?}", line);
                    continue;
                }
            };

            let kind = match fields.get(KIND) {
                Some(kind) if !kind.is_empty() => CodeType::from_name(kind),
                _ => {
                    warn!("Code {} has no element type", code);
                    CodeType::Other
                }
            };

            let entry = Entry {
                name: fields
                    .get(NAME)
                    .map(|name| name.to_string())
                    .unwrap_or_default(),
                pitched: fields.get(PITCHED) == Some(&"TRUE"),
                kind,
            };

            // first definition wins
            entries
                .entry(code.to_string())
                .or_insert(entry);
        }

        if entries.is_empty() {
            return Err(TableError::Empty(Default::default()));
        }

        debug!("Loaded {} codes", entries.len());
        Ok(CodeTable { entries })
    }

    pub fn len(&self) -> usize {
        self.entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.entries
            .contains_key(code)
    }

    /// Name of the element a code represents.
    pub fn name(&self, code: &str) -> Result<&str, TableError> {
        self.entries
            .get(code)
            .map(|entry| entry.name.as_str())
            .ok_or_else(|| TableError::UnknownCode(code.to_string()))
    }

    /// Whether the numbers following this code are staff positions.
    pub fn is_pitched(&self, code: &str) -> Result<bool, TableError> {
        self.entries
            .get(code)
            .map(|entry| entry.pitched)
            .ok_or_else(|| TableError::UnknownCode(code.to_string()))
    }

    /// Classification of a code; unknown codes are Other.
    pub fn kind(&self, code: &str) -> CodeType {
        self.entries
            .get(code)
            .map(|entry| entry.kind)
            .unwrap_or(CodeType::Other)
    }
}
