//! The key of manuscript sigla.
//!
//! A tab separated file with a header row; each line holds a siglum, the
//! quoted name of the source, and its RISM abbreviation.

use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use super::{read_table, TableError};
use crate::parsing::lines;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Source {
    name: String,
    rism: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceKey {
    sources: HashMap<String, Source>,
}

impl SourceKey {
    pub fn from_path(path: &Path) -> Result<SourceKey, TableError> {
        let content = read_table(path)?;
        SourceKey::parse(&content).map_err(|error| match error {
            TableError::Empty(_) => TableError::Empty(path.to_path_buf()),
            other => other,
        })
    }

    pub fn parse(content: &str) -> Result<SourceKey, TableError> {
        let mut sources = HashMap::new();

        for line in lines(content).skip(1) {
            let mut fields = line.split('\t');

            let siglum = match fields.next() {
                Some(siglum) if !siglum.is_empty() => siglum,
                _ => continue,
            };
            let name = fields
                .next()
                .map(unquote)
                .unwrap_or_default();
            let rism = fields
                .next()
                .unwrap_or_default();

            sources
                .entry(siglum.to_string())
                .or_insert(Source {
                    name: name.to_string(),
                    rism: rism.to_string(),
                });
        }

        if sources.is_empty() {
            return Err(TableError::Empty(Default::default()));
        }

        debug!("Loaded {} sources", sources.len());
        Ok(SourceKey { sources })
    }

    pub fn len(&self) -> usize {
        self.sources
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources
            .is_empty()
    }

    pub fn contains(&self, siglum: &str) -> bool {
        self.sources
            .contains_key(siglum)
    }

    /// Descriptive name of the manuscript, eg city, library and shelfmark.
    pub fn source_name(&self, siglum: &str) -> Result<&str, TableError> {
        self.sources
            .get(siglum)
            .map(|source| source.name.as_str())
            .ok_or_else(|| TableError::UnknownSiglum(siglum.to_string()))
    }

    pub fn rism(&self, siglum: &str) -> Result<&str, TableError> {
        self.sources
            .get(siglum)
            .map(|source| source.rism.as_str())
            .ok_or_else(|| TableError::UnknownSiglum(siglum.to_string()))
    }
}

// names are stored wrapped in double quotes
fn unquote(field: &str) -> &str {
    let field = field
        .strip_prefix('"')
        .unwrap_or(field);
    field
        .strip_suffix('"')
        .unwrap_or(field)
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn loading_sources() {
        let content = "Siglum\tSource\tRISM\r\n\
            Sq\t\"Florence, Biblioteca Medicea Laurenziana, Med. Pal. 87\"\tI-Fl 87\r\n\
            Pit\t\"Paris, Bibliothèque nationale, f. it. 568\"\tF-Pn 568\r\n";

        let key = SourceKey::parse(content).unwrap();
        assert_eq!(key.len(), 2);
        assert!(key.contains("Sq"));
        assert!(!key.contains("Siglum"));
        assert_eq!(
            key.source_name("Sq"),
            Ok("Florence, Biblioteca Medicea Laurenziana, Med. Pal. 87")
        );
        assert_eq!(key.rism("Pit"), Ok("F-Pn 568"));
        assert_eq!(
            key.rism("Rs"),
            Err(TableError::UnknownSiglum("Rs".to_string()))
        );
    }

    #[test]
    fn unquoting() {
        assert_eq!(unquote("\"Faenza\""), "Faenza");
        assert_eq!(unquote("Faenza"), "Faenza");
        assert_eq!(unquote("\""), "");
    }
}
