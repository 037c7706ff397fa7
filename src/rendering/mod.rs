//! Conversion of parsed Scribe documents into MEI encoded XML

pub mod mei;
pub mod signs;
pub mod xml;

pub use mei::Builder;

use crate::language::{Part, ScribeType};
use crate::tables::Tables;

/// Build and serialize one MEI document holding the given parts.
pub fn render(
    kind: ScribeType,
    parts: &[Part],
    tables: &Tables,
    encoder: &str,
    segmented: bool,
) -> Result<Vec<u8>, quick_xml::Error> {
    let builder = Builder::new(kind, tables, encoder);
    let root = builder.build(parts, segmented);
    xml::serialize(&root)
}
