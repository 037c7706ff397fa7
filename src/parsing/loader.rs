//! Reading a whole Scribe file into parts.
//!
//! After the signature line, each part begins with a `>` line of fixed
//! width metadata fields (not tab delimited). An optional `LINE` row giving
//! the number of staff lines may follow; then come the rows of the part up
//! to the next `>` line, an empty line, or the end of the file.

use std::iter::Peekable;
use tracing::{debug, warn};

use super::{lenient_number, lines, parse_row, Lines, ParsingError};
use crate::language::{Clef, Document, Metadata, Part, Row, ScribeType, StaffState, VoiceType};
use crate::tables::{CodeTable, Tables};

const REPERTORY_WIDTH: usize = 10;
const TITLE_WIDTH: usize = 40;
const COMPOSER_WIDTH: usize = 20;
const GENRE_WIDTH: usize = 10;
const VOICES_WIDTH: usize = 1;
const MANUSCRIPT_WIDTH: usize = 10;
const FOLIO_WIDTH: usize = 20;
const OFFICE_WIDTH: usize = 20;
const CHANT_TYPE_WIDTH: usize = 20;
const CAO_WIDTH: usize = 8;

// chant titles are taken from the opening syllables until at least this long
const TITLE_LENGTH: usize = 16;

/// Read the text of a Scribe file into a Document. Fails if the signature is
/// not recognized or a part header is missing; anything else that is
/// malformed is tolerated.
pub fn read_document(content: &str, tables: &Tables) -> Result<Document, ParsingError> {
    let mut input = lines(content)
        .enumerate()
        .peekable();

    let signature = match input.next() {
        Some((_, line)) => line,
        None => "",
    };

    let kind = ScribeType::from_signature(signature).ok_or_else(|| {
        ParsingError::UnrecognizedSignature {
            found: signature.to_string(),
        }
    })?;
    debug!("Reading {} file", kind);

    let mut loader = Loader {
        kind,
        codes: tables.codes(kind),
        input,
    };

    loader.read_parts()
}

struct Loader<'i> {
    kind: ScribeType,
    codes: &'i CodeTable,
    input: Peekable<std::iter::Enumerate<Lines<'i>>>,
}

impl<'i> Loader<'i> {
    fn read_parts(&mut self) -> Result<Document, ParsingError> {
        let mut parts: Vec<Part> = Vec::new();
        let mut piece_count = 0;

        while let Some((number, line)) = self.next_header_line() {
            let header = line
                .strip_prefix('>')
                .ok_or(ParsingError::MissingMetadata { line: number })?;

            let mut part = self.read_header(header);
            part.id = parts.len() + 1;

            self.read_staff_lines(&mut part);
            self.read_rows(&mut part);
            self.find_initial_clef(&mut part);

            if self.kind == ScribeType::Chant {
                part.title = assemble_title(&part.rows);
            }

            let boundary = match parts.last() {
                None => true,
                Some(previous) => match self.kind {
                    ScribeType::Chant => previous.title != part.title,
                    ScribeType::Trecento => previous.repertory() != part.repertory(),
                },
            };
            if boundary {
                piece_count += 1;
            }

            debug!(
                "Part {} \"{}\" has {} rows",
                part.id,
                part.title,
                part.rows
                    .len()
            );
            parts.push(part);
        }

        Ok(Document {
            kind: self.kind,
            parts,
            piece_count,
        })
    }

    // blank lines between parts are passed over
    fn next_header_line(&mut self) -> Option<(usize, &'i str)> {
        for (number, line) in self
            .input
            .by_ref()
        {
            if !line
                .trim()
                .is_empty()
            {
                return Some((number, line));
            }
        }
        None
    }

    fn read_header(&self, header: &str) -> Part {
        let mut fields = Fields::new(header);

        match self.kind {
            ScribeType::Trecento => {
                let repertory = fields.take(REPERTORY_WIDTH);
                let title = fields.take(TITLE_WIDTH);
                let composer = fields.take(COMPOSER_WIDTH);
                let genre = fields.take(GENRE_WIDTH);
                let voices = lenient_number(&fields.take(VOICES_WIDTH));
                let manuscript = fields.take(MANUSCRIPT_WIDTH);
                let folios = fields.take(FOLIO_WIDTH);
                let voice = VoiceType::from_code(
                    fields
                        .take(1)
                        .chars()
                        .next(),
                );

                Part {
                    id: 0,
                    title,
                    genre,
                    manuscript,
                    folios,
                    metadata: Metadata::Trecento {
                        repertory,
                        composer,
                        voices,
                        voice,
                    },
                    rows: Vec::new(),
                    initial: StaffState::default(),
                }
            }
            ScribeType::Chant => {
                let manuscript = fields.take(MANUSCRIPT_WIDTH);
                let feast = fields.take(TITLE_WIDTH);
                let office = fields.take(OFFICE_WIDTH);
                // genre holds the item type for chant
                let genre = fields.take(CHANT_TYPE_WIDTH);
                let folios = fields.take(FOLIO_WIDTH);
                let cao = lenient_number(&fields.take(CAO_WIDTH));

                Part {
                    id: 0,
                    title: String::new(),
                    genre,
                    manuscript,
                    folios,
                    metadata: Metadata::Chant { feast, office, cao },
                    rows: Vec::new(),
                    initial: StaffState::default(),
                }
            }
        }
    }

    // staffs with other than four lines announce it first
    fn read_staff_lines(&mut self, part: &mut Part) {
        let line = match self
            .input
            .peek()
        {
            Some((_, line)) if line.contains("LINE") => *line,
            _ => return,
        };
        self.input
            .next();

        let row = parse_row(line, self.codes);
        match row
            .events()
            .first()
            .and_then(|event| event.first_pitch())
        {
            Some(count) if count > 0 => part.initial.lines = count as u32,
            _ => warn!("Part {} has a LINE row without a count", part.id),
        }
    }

    fn read_rows(&mut self, part: &mut Part) {
        while let Some((_, line)) = self
            .input
            .peek()
        {
            if line.is_empty() || line.starts_with('>') {
                break;
            }

            let row = parse_row(line, self.codes);
            self.input
                .next();

            if row.is_retained() {
                part.rows
                    .push(row);
            }
        }
    }

    fn find_initial_clef(&self, part: &mut Part) {
        let clef = part
            .rows
            .iter()
            .find_map(|row| {
                row.opening_clef()
                    .and_then(Clef::from_event)
            });

        match clef {
            Some(clef) => {
                part.initial.clef = clef.letter;
                part.initial.clef_line = clef.line;
            }
            None => warn!("No clef found in part {}", part.id),
        }
    }
}

/// Slices consecutive fixed width fields from a header line, trimming
/// trailing whitespace. Fields running past the end of the line are short
/// or empty.
struct Fields {
    chars: Vec<char>,
    position: usize,
}

impl Fields {
    fn new(header: &str) -> Fields {
        Fields {
            chars: header
                .chars()
                .collect(),
            position: 0,
        }
    }

    fn take(&mut self, width: usize) -> String {
        let start = self
            .position
            .min(
                self.chars
                    .len(),
            );
        let end = (self.position + width).min(
            self.chars
                .len(),
        );
        self.position += width;

        let field: String = self.chars[start..end]
            .iter()
            .collect();
        field
            .trim_end()
            .to_string()
    }
}

/// Chant parts have no title field, so one is made from the opening
/// syllables of text: hyphenated syllables are joined into words, and
/// words accumulate until a full stop or until the title is long enough.
pub(crate) fn assemble_title(rows: &[Row]) -> String {
    let syllables: Vec<&str> = rows
        .iter()
        .filter_map(Row::syllable)
        .filter(|syllable| !syllable.is_empty())
        .collect();

    let mut title = String::new();
    let mut i = 0;

    while i < syllables.len()
        && title
            .chars()
            .count()
            < TITLE_LENGTH
    {
        title.push_str(syllables[i]);

        while title.ends_with('-') && i + 1 < syllables.len() {
            title.pop();
            i += 1;
            title.push_str(syllables[i]);
        }

        if title.ends_with('.') {
            title.pop();
            break;
        }

        title.push(' ');
        i += 1;
    }

    title
        .trim_end_matches(|c: char| c == '.' || c == '-' || c.is_whitespace())
        .to_string()
}
