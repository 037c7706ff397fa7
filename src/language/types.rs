//! Types representing a Scribe file once it has been read into memory

use std::fmt;

/// Which of the two Scribe dialects a file is written in. The first line of
/// every file is a signature selecting one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScribeType {
    Chant,
    Trecento,
}

pub const CHANT_SIGNATURE: &str = "S^C^R^I^B^E^L";
pub const TRECENTO_SIGNATURE: &str = "S^C^R^I^B^E^S";

impl ScribeType {
    /// Identify the dialect from the signature line, or None if the line is
    /// not one of the two recognized signatures.
    pub fn from_signature(line: &str) -> Option<ScribeType> {
        match line {
            CHANT_SIGNATURE => Some(ScribeType::Chant),
            TRECENTO_SIGNATURE => Some(ScribeType::Trecento),
            _ => None,
        }
    }

    pub fn signature(&self) -> &'static str {
        match self {
            ScribeType::Chant => CHANT_SIGNATURE,
            ScribeType::Trecento => TRECENTO_SIGNATURE,
        }
    }
}

impl fmt::Display for ScribeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScribeType::Chant => write!(f, "chant"),
            ScribeType::Trecento => write!(f, "trecento"),
        }
    }
}

/// Colour of the notation. The numeric codes are those used in the first
/// character of a row's prefix and suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coloration {
    Default,
    #[default]
    FullBlack,
    FullRed,
    VoidRed,
    VoidBlack,
    FullBlue,
    // prefix character outside the known codes, kept so it can be reported
    Unrecognized(char),
}

impl Coloration {
    pub fn from_code(c: char) -> Coloration {
        match c {
            '0' => Coloration::Default,
            '3' => Coloration::FullBlack,
            '4' => Coloration::FullRed,
            '5' => Coloration::VoidRed,
            '6' => Coloration::VoidBlack,
            '7' => Coloration::FullBlue,
            other => Coloration::Unrecognized(other),
        }
    }

    pub fn code(&self) -> char {
        match self {
            Coloration::Default => '0',
            Coloration::FullBlack => '3',
            Coloration::FullRed => '4',
            Coloration::VoidRed => '5',
            Coloration::VoidBlack => '6',
            Coloration::FullBlue => '7',
            Coloration::Unrecognized(c) => *c,
        }
    }

    pub fn is_red(&self) -> bool {
        matches!(self, Coloration::FullRed | Coloration::VoidRed)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Coloration::VoidRed | Coloration::VoidBlack)
    }
}

/// The four characters at either end of every music row: colour of the
/// notation, number of staff lines, the clef, and the staff position the clef
/// sits on. Lines are numbered from 1 below the staff, so a four line staff
/// has its lines at 3, 5, 7 and 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaffState {
    pub coloration: Coloration,
    pub lines: u32,
    pub clef: char,
    pub clef_line: i32,
}

impl Default for StaffState {
    fn default() -> Self {
        StaffState {
            coloration: Coloration::FullBlack,
            lines: 4,
            clef: 'C',
            clef_line: 0,
        }
    }
}

impl StaffState {
    /// Decode a four character prefix or suffix. Digits that fail to parse
    /// become zero.
    pub fn from_chars(chars: &[char]) -> StaffState {
        let at = |i: usize| {
            chars
                .get(i)
                .copied()
                .unwrap_or(' ')
        };

        StaffState {
            coloration: Coloration::from_code(at(0)),
            lines: at(1)
                .to_digit(10)
                .unwrap_or(0),
            clef: at(2),
            clef_line: at(3)
                .to_digit(10)
                .map(|d| d as i32)
                .unwrap_or(0),
        }
    }

    /// Encode back to the four character form used in the file.
    pub fn to_code(&self) -> String {
        let mut result = String::with_capacity(4);
        result.push(self.coloration.code());
        result.push_str(&self.lines.to_string());
        result.push(self.clef);
        result.push_str(&self.clef_line.to_string());
        result
    }
}

/// A single notational sign. Codes can be followed by several numbers: for a
/// simple note the same kind of note appears at each position, for a
/// ligature or neume the numbers are the respective pitches in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub code: String,
    pub gap: bool,
    pub coloration: Coloration,
    pub pitches: Vec<i32>,
}

impl Event {
    pub fn new(coloration: Coloration) -> Event {
        Event {
            code: String::new(),
            gap: true,
            coloration,
            pitches: Vec::new(),
        }
    }

    pub fn first_pitch(&self) -> Option<i32> {
        self.pitches
            .first()
            .copied()
    }

    pub fn is_clef(&self) -> bool {
        matches!(self.code.as_str(), "C" | "F" | "G")
    }
}

/// The content of a music row between its prefix and suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub prefix: StaffState,
    pub events: Vec<Event>,
    pub syllable: Option<String>,
    pub suffix: StaffState,
}

/// One line of a Scribe file body: either a comment (introduced by `*`) or
/// a set of events with at most one syllable of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Comment(String),
    Music(Line),
}

impl Row {
    pub fn is_comment(&self) -> bool {
        matches!(self, Row::Comment(_))
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            Row::Comment(text) => Some(text),
            Row::Music(_) => None,
        }
    }

    pub fn events(&self) -> &[Event] {
        match self {
            Row::Comment(_) => &[],
            Row::Music(line) => &line.events,
        }
    }

    pub fn syllable(&self) -> Option<&str> {
        match self {
            Row::Comment(_) => None,
            Row::Music(line) => line
                .syllable
                .as_deref(),
        }
    }

    /// The first event, if this row opens with a clef.
    pub fn opening_clef(&self) -> Option<&Event> {
        self.events()
            .first()
            .filter(|event| event.is_clef())
    }

    /// Rows are worth keeping if they are comments or carry at least one
    /// recognized event.
    pub fn is_retained(&self) -> bool {
        match self {
            Row::Comment(_) => true,
            Row::Music(line) => !line
                .events
                .is_empty(),
        }
    }
}

/// Voice designation in a trecento part header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceType {
    #[default]
    Unlabelled,
    Cantus,
    Triplum,
    Contratenor,
    Tenor,
    Tenor2,
}

impl VoiceType {
    pub fn from_code(c: Option<char>) -> VoiceType {
        match c {
            Some('1') => VoiceType::Cantus,
            Some('2') => VoiceType::Triplum,
            Some('3') => VoiceType::Contratenor,
            Some('4') => VoiceType::Tenor,
            Some('5') => VoiceType::Tenor2,
            _ => VoiceType::Unlabelled,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VoiceType::Unlabelled => "unlabelled",
            VoiceType::Cantus => "cantus",
            VoiceType::Triplum => "triplum",
            VoiceType::Contratenor => "contratenor",
            VoiceType::Tenor => "tenor",
            VoiceType::Tenor2 => "tenor 2",
        }
    }
}

/// Header fields only present in one dialect or the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metadata {
    Trecento {
        // a string, as repertory numbers can have leading zeros
        repertory: String,
        composer: String,
        voices: i32,
        voice: VoiceType,
    },
    Chant {
        feast: String,
        office: String,
        cao: i32,
    },
}

/// One voice or section of a piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub id: usize,
    pub title: String,
    pub genre: String,
    pub manuscript: String,
    pub folios: String,
    pub metadata: Metadata,
    pub rows: Vec<Row>,
    pub initial: StaffState,
}

impl Part {
    pub fn repertory(&self) -> Option<&str> {
        match &self.metadata {
            Metadata::Trecento { repertory, .. } => Some(repertory),
            Metadata::Chant { .. } => None,
        }
    }

    pub fn composer(&self) -> Option<&str> {
        match &self.metadata {
            Metadata::Trecento { composer, .. } => Some(composer),
            Metadata::Chant { .. } => None,
        }
    }

    pub fn cao(&self) -> Option<i32> {
        match &self.metadata {
            Metadata::Chant { cao, .. } => Some(*cao),
            Metadata::Trecento { .. } => None,
        }
    }

    pub fn voice(&self) -> VoiceType {
        match &self.metadata {
            Metadata::Trecento { voice, .. } => *voice,
            Metadata::Chant { .. } => VoiceType::Unlabelled,
        }
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.rows
            .iter()
            .flat_map(|row| row.events())
    }
}

/// Everything read from one Scribe file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub kind: ScribeType,
    pub parts: Vec<Part>,
    pub piece_count: usize,
}

impl Document {
    /// Group the parts into pieces. Contiguous trecento parts sharing a
    /// repertory number form one piece; contiguous chant parts sharing a
    /// title likewise.
    pub fn pieces(&self) -> Vec<&[Part]> {
        let mut result = Vec::new();
        let mut start = 0;

        for i in 1..=self
            .parts
            .len()
        {
            if i == self
                .parts
                .len()
                || !self.same_piece(&self.parts[i - 1], &self.parts[i])
            {
                result.push(&self.parts[start..i]);
                start = i;
            }
        }

        result
    }

    pub fn same_piece(&self, previous: &Part, next: &Part) -> bool {
        match self.kind {
            ScribeType::Trecento => previous.repertory() == next.repertory(),
            ScribeType::Chant => previous.title == next.title,
        }
    }
}
