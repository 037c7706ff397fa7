//! Parser for a single row of a Scribe file.
//!
//! Notes on the four character row prefix and suffix (after John A.
//! Stinson): the first and last four characters of each line are
//!
//!   1. the colour of the notation
//!   2. the number of staff lines (four being the default)
//!   3. the clef
//!   4. the line on which the clef appears.
//!
//! The suffix should be the same as the prefix unless a change occurs within
//! the line. Between them lies the body: codes, each optionally followed by
//! numbers, interspersed with sigils that switch the gap and colouring of
//! the following event, and perhaps a syllable of text after a `;`.

use tracing::debug;

use super::lenient_number;
use crate::language::{Coloration, Event, Line, Row, StaffState};
use crate::tables::CodeTable;

const STAFF_WIDTH: usize = 4;

/// Parse one line of a Scribe file body. Codes not present in the table are
/// dropped; everything else about a malformed row degrades rather than
/// failing.
pub fn parse_row(line: &str, codes: &CodeTable) -> Row {
    if let Some(comment) = line.strip_prefix('*') {
        return Row::Comment(comment.to_string());
    }

    let chars: Vec<char> = line
        .chars()
        .collect();

    // the suffix is found by position, not by searching
    let suffix_start = chars
        .len()
        .saturating_sub(STAFF_WIDTH);
    let body_start = STAFF_WIDTH.min(suffix_start);

    let prefix = StaffState::from_chars(&chars[..STAFF_WIDTH.min(chars.len())]);
    let suffix = StaffState::from_chars(&chars[suffix_start..]);

    let mut scanner = Scanner::new(&chars[body_start..suffix_start], codes);
    scanner.scan();

    Row::Music(Line {
        prefix,
        events: scanner.events,
        syllable: scanner.syllable,
        suffix,
    })
}

struct Scanner<'a> {
    body: &'a [char],
    codes: &'a CodeTable,
    position: usize,
    gap: bool,
    coloration: Coloration,
    events: Vec<Event>,
    syllable: Option<String>,
}

impl<'a> Scanner<'a> {
    fn new(body: &'a [char], codes: &'a CodeTable) -> Scanner<'a> {
        Scanner {
            body,
            codes,
            position: 0,
            gap: true,
            coloration: Coloration::FullBlack,
            events: Vec::new(),
            syllable: None,
        }
    }

    fn peek(&self) -> Option<char> {
        self.body
            .get(self.position)
            .copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_space(&mut self) {
        if self
            .peek()
            .is_some_and(char::is_whitespace)
        {
            self.advance();
        }
    }

    fn scan(&mut self) {
        while let Some(c) = self.peek() {
            let start = self.position;

            // event attributes first
            match c {
                '!' => {
                    self.gap = true;
                    self.advance();
                    // sometimes doubled
                    self.advance_if('!');
                    self.skip_space();
                }
                '@' => {
                    self.gap = false;
                    self.advance();
                    self.skip_space();
                }
                '+' => {
                    self.advance();
                    if self.advance_if('-') {
                        self.coloration = Coloration::VoidRed;
                    } else {
                        self.coloration = Coloration::FullRed;
                    }
                }
                '-' => {
                    self.advance();
                    if self.advance_if('+') {
                        self.coloration = Coloration::VoidRed;
                    } else {
                        self.coloration = Coloration::VoidBlack;
                    }
                }
                '=' => {
                    self.coloration = Coloration::FullBlack;
                    self.advance();
                    self.skip_space();
                }
                ';' => {
                    self.advance();
                    self.read_syllable();
                    break;
                }
                _ => self.skip_space(),
            }

            self.read_event();

            // a character that is neither sigil nor code
            if self.position == start {
                self.advance();
            }
        }
    }

    fn read_event(&mut self) {
        let token = self.read_token();
        if token.is_empty() {
            return;
        }

        let (pitches, position) = read_numbers(self.body, self.position);
        self.position = position;

        if self
            .codes
            .contains(&token)
        {
            self.events
                .push(Event {
                    code: token,
                    gap: self.gap,
                    coloration: self.coloration,
                    pitches,
                });
        } else {
            debug!("Dropping unrecognized code {:?}", token);
        }

        self.gap = true;
    }

    // codes are upper case letters and a few punctuation marks
    fn read_token(&mut self) -> String {
        let mut token = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_uppercase() || c == '.' || c == '\'' || c == '#' {
                token.push(c);
                self.advance();
            } else {
                break;
            }
        }
        token
    }

    // everything up to the suffix, verbatim
    fn read_syllable(&mut self) {
        let text: String = self.body[self.position..]
            .iter()
            .collect();
        self.position = self
            .body
            .len();
        self.syllable = Some(text);
    }
}

/// Read the numbers following a code: a run of digits, perhaps negative,
/// then further runs separated by one (occasionally two) spaces. Returns the
/// numbers in order together with the position after the last one. If no
/// number is present the position is returned unchanged.
pub(crate) fn read_numbers(body: &[char], position: usize) -> (Vec<i32>, usize) {
    let at = |i: usize| {
        body.get(i)
            .copied()
    };
    let is_digit = |i: usize| at(i).is_some_and(|c| c.is_ascii_digit());
    let is_space = |i: usize| at(i).is_some_and(char::is_whitespace);

    let begins = is_digit(position)
        || (at(position) == Some('-') && is_digit(position + 1))
        // a stray space between code and number
        || (is_space(position) && is_digit(position + 1));

    if !begins {
        return (Vec::new(), position);
    }

    let mut end = position + 1;
    while is_digit(end) {
        end += 1;
    }

    let text: String = body[position..end]
        .iter()
        .collect();
    let mut numbers = vec![lenient_number(&text)];

    if is_space(end) {
        let mut next = end + 1;
        if is_space(next) {
            next += 1;
        }

        let (more, after) = read_numbers(body, next);
        if !more.is_empty() {
            numbers.extend(more);
            return (numbers, after);
        }
    }

    (numbers, end)
}
