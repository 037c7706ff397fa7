//! Reader for Scribe files

use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::language::{Document, LoadingError};
use crate::tables::Tables;

mod loader;
mod row;

pub use loader::read_document;
pub use row::parse_row;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("not a Scribe file, unrecognized signature \"{found}\"")]
    UnrecognizedSignature { found: String },

    #[error("metadata not present, expected a part header beginning with '>'")]
    MissingMetadata { line: usize },
}

impl ParsingError {
    /// Zero-origin number of the line at fault.
    pub fn line(&self) -> usize {
        match self {
            ParsingError::UnrecognizedSignature { .. } => 0,
            ParsingError::MissingMetadata { line } => *line,
        }
    }
}

/// Read a file and return an owned String. Scribe files predate Unicode, so
/// anything that is not valid UTF-8 is taken to be Latin-1.
pub fn load(filename: &Path) -> Result<String, LoadingError> {
    match std::fs::read(filename) {
        Ok(bytes) => Ok(decode(bytes)),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename: filename.to_path_buf(),
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename: filename.to_path_buf(),
                }),
            }
        }
    }
}

/// Parse the text of a Scribe file into a Document, or fail if the file
/// is not structured as one.
pub fn parse(content: &str, tables: &Tables) -> Result<Document, ParsingError> {
    let result = read_document(content, tables);

    match result {
        Ok(document) => {
            debug!(
                "Found {} part{} in {} piece{}",
                document
                    .parts
                    .len(),
                if document
                    .parts
                    .len()
                    == 1
                {
                    ""
                } else {
                    "s"
                },
                document.piece_count,
                if document.piece_count == 1 { "" } else { "s" }
            );
            Ok(document)
        }
        Err(error) => {
            debug!("error: {}", error);
            Err(error)
        }
    }
}

/// Convert raw bytes to text. Each byte of a non UTF-8 file becomes the
/// code point of the same number, which keeps one character per column.
pub fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(error) => error
            .into_bytes()
            .into_iter()
            .map(|b| b as char)
            .collect(),
    }
}

/// Iterate over lines terminated by any of LF, CR, or CRLF. A final line
/// without a terminator is still returned; a trailing terminator does not
/// produce an extra empty line.
pub fn lines(content: &str) -> Lines<'_> {
    Lines { remaining: content }
}

pub struct Lines<'i> {
    remaining: &'i str,
}

impl<'i> Iterator for Lines<'i> {
    type Item = &'i str;

    fn next(&mut self) -> Option<&'i str> {
        if self
            .remaining
            .is_empty()
        {
            return None;
        }

        match self
            .remaining
            .find(&['\r', '\n'][..])
        {
            Some(i) => {
                let line = &self.remaining[..i];
                let width = if self.remaining[i..].starts_with("\r\n") {
                    2
                } else {
                    1
                };
                self.remaining = &self.remaining[i + width..];
                Some(line)
            }
            None => {
                let line = self.remaining;
                self.remaining = "";
                Some(line)
            }
        }
    }
}

/// Interpret text as an integer the forgiving way: leading whitespace and a
/// sign are allowed, parsing stops at the first non-digit, and anything
/// without digits is zero.
pub fn lenient_number(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let mut value: i32 = 0;
    for c in digits.chars() {
        match c.to_digit(10) {
            Some(d) => {
                value = value
                    .saturating_mul(10)
                    .saturating_add(d as i32)
            }
            None => break,
        }
    }

    if negative {
        -value
    } else {
        value
    }
}
