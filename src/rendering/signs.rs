//! Interpretation of parsed events as notational signs.
//!
//! Each event is classified by the code table and becomes one or more
//! signs. Pitches are resolved against the clef in force, which the
//! Interpreter carries along and updates whenever a clef sign goes by.

use tracing::debug;

use crate::language::{Clef, Coloration, Event, ScribeType};
use crate::tables::{CodeTable, CodeType};

/// A pitch name with its octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Place {
    pub name: char,
    pub octave: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub duration: Option<String>,
    pub place: Place,
    // staff position relative to the bottom line
    pub location: i32,
    pub coloration: Coloration,
}

/// A simple neume, either standing alone or as a component of a compound
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uneume {
    pub name: String,
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Barline {
    Quarter,
    Half,
    Single,
    Double,
    Modern,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sign {
    Note(Note),
    Uneume(Uneume),
    Ineume {
        // continues the preceding compound neume rather than starting one
        joined: bool,
        parts: Vec<Uneume>,
    },
    Ligature {
        name: String,
        coloration: Coloration,
        notes: Vec<Note>,
    },
    Rest {
        kind: Option<String>,
        place: Option<Place>,
    },
    Dot {
        place: Option<Place>,
        offset: Option<String>,
    },
    Mensuration {
        sign: Option<String>,
        dot: bool,
    },
    Barline(Barline),
    Clef(Clef),
    Accidental {
        name: String,
        place: Option<Place>,
    },
}

/// Walks the events of one part in order, turning them into signs.
pub struct Interpreter<'t> {
    kind: ScribeType,
    codes: &'t CodeTable,
    clef: Clef,
}

impl<'t> Interpreter<'t> {
    pub fn new(kind: ScribeType, codes: &'t CodeTable, clef: Clef) -> Interpreter<'t> {
        Interpreter { kind, codes, clef }
    }

    pub fn clef(&self) -> Clef {
        self.clef
    }

    fn place(&self, position: i32) -> Place {
        Place {
            name: self
                .clef
                .pitch_name(position),
            octave: self
                .clef
                .octave(position),
        }
    }

    fn name_of(&self, code: &str) -> String {
        self.codes
            .name(code)
            .unwrap_or(code)
            .to_string()
    }

    fn note(&self, duration: Option<String>, position: i32, coloration: Coloration) -> Note {
        Note {
            duration,
            place: self.place(position),
            location: position.saturating_sub(3),
            coloration,
        }
    }

    pub fn interpret(&mut self, event: &Event) -> Vec<Sign> {
        let code = event
            .code
            .as_str();

        match self
            .codes
            .kind(code)
        {
            CodeType::Note => {
                let duration = self.name_of(code);
                event
                    .pitches
                    .iter()
                    .map(|&p| Sign::Note(self.note(Some(duration.clone()), p, event.coloration)))
                    .collect()
            }
            CodeType::Uneume => self.uneumes(event),
            CodeType::Ineume => vec![Sign::Ineume {
                joined: !event.gap,
                parts: self.ineume_parts(event),
            }],
            CodeType::Ligature => {
                let notes = event
                    .pitches
                    .iter()
                    .enumerate()
                    .map(|(i, &p)| {
                        let duration = self.ligature_duration(code, i);
                        self.note(Some(duration), p, event.coloration)
                    })
                    .collect();
                vec![Sign::Ligature {
                    name: self.name_of(code),
                    coloration: event.coloration,
                    notes,
                }]
            }
            CodeType::Rest => vec![self.rest(event)],
            CodeType::Dot => vec![Sign::Dot {
                place: event
                    .first_pitch()
                    .map(|p| self.place(p)),
                offset: event
                    .pitches
                    .get(1)
                    .copied()
                    .filter(|&v| v != 0)
                    .map(vertical_offset),
            }],
            CodeType::Mensuration => vec![mensuration(code)],
            CodeType::Barline => vec![Sign::Barline(barline(code))],
            CodeType::Clef => match Clef::from_event(event) {
                Some(clef) => {
                    self.clef = clef;
                    vec![Sign::Clef(clef)]
                }
                None => {
                    debug!("Clef {} without a position", code);
                    Vec::new()
                }
            },
            CodeType::Accidental => vec![Sign::Accidental {
                name: self.name_of(code),
                place: event
                    .first_pitch()
                    .map(|p| self.place(p)),
            }],
            CodeType::Other => Vec::new(),
        }
    }

    // in chant a punctum, virga or liquescent over several pitches is a
    // run of simple neumes, one per pitch
    fn uneumes(&self, event: &Event) -> Vec<Sign> {
        let name = self.name_of(&event.code);
        let separate = self.kind == ScribeType::Chant
            && matches!(event.code.as_str(), "B" | "V" | "L")
            && event
                .pitches
                .len()
                > 1;

        if separate {
            event
                .pitches
                .iter()
                .map(|&p| {
                    Sign::Uneume(Uneume {
                        name: name.clone(),
                        notes: vec![self.note(None, p, event.coloration)],
                    })
                })
                .collect()
        } else {
            vec![Sign::Uneume(Uneume {
                name,
                notes: event
                    .pitches
                    .iter()
                    .map(|&p| self.note(None, p, event.coloration))
                    .collect(),
            })]
        }
    }

    fn ineume_parts(&self, event: &Event) -> Vec<Uneume> {
        let mut parts = Vec::new();
        let mut i = 0;

        while i < event
            .pitches
            .len()
        {
            let (name, count) = ineume_part(&event.code, i);
            let end = (i + count).min(
                event
                    .pitches
                    .len(),
            );
            let notes = event.pitches[i..end]
                .iter()
                .map(|&p| self.note(None, p, event.coloration))
                .collect();
            parts.push(Uneume {
                name: name.to_string(),
                notes,
            });
            i = end;
        }

        parts
    }

    /// Duration of the note at the given index within a ligature, named as
    /// the code table names the longa, brevis and semibrevis.
    fn ligature_duration(&self, code: &str, index: usize) -> String {
        let longa = match code {
            "LL" | "VL" => true,
            "PD" | "CL" => index == 1,
            "OB" => index == 0,
            "TQ" => index == 2,
            "PR" | "PR'" => index == 0 || index == 2,
            _ => false,
        };

        if longa {
            self.name_of("L")
        } else if matches!(code, "COB" | "OP") {
            self.name_of("S")
        } else {
            self.name_of("B")
        }
    }

    fn rest(&self, event: &Event) -> Sign {
        if event
            .code
            .starts_with('R')
            && event
                .pitches
                .len()
                >= 2
        {
            let end = event.pitches[0];
            let start = event.pitches[1];
            let kind = match i64::from(start) - i64::from(end) {
                1 => Some("minima"),
                -1 => Some("semibrevis"),
                2 => Some("brevis"),
                4 => Some("longa imperfecta"),
                6 => Some("longa perfecta"),
                other => {
                    debug!("Rest spanning {} positions", other);
                    None
                }
            };
            return Sign::Rest {
                kind: kind.map(str::to_string),
                place: Some(self.place(start)),
            };
        }

        Sign::Rest {
            kind: Some(self.name_of(&event.code)),
            place: event
                .first_pitch()
                .map(|p| self.place(p)),
        }
    }
}

/// Name and note count of the component neume starting at the given pitch
/// index of a compound neume.
fn ineume_part(code: &str, index: usize) -> (&'static str, usize) {
    match code {
        "CM" | "CMS" | "CMSS" | "CM6" | "CM7" | "CM8" if index == 0 => ("virga", 1),
        "PS" | "PSS" | "PSSS" if index < 2 => ("podatus", 2),
        "SC'" if index < 2 => ("podatus", 2),
        "SC'" if index == 2 => ("virga", 1),
        "SQ" if index == 1 => ("quilisma", 1),
        "TQ4" if index < 3 => ("torculus", 3),
        _ => ("rhomboid", 1),
    }
}

// the adjustment is in tenths of a space, the output counts half spaces
fn vertical_offset(value: i32) -> String {
    format!("{:.1}", value as f64 / 10.0 * 2.0)
}

fn mensuration(code: &str) -> Sign {
    match code {
        "MO" | "MC" | "MO." | "MC." => Sign::Mensuration {
            sign: code
                .chars()
                .nth(1)
                .map(|c| c.to_string()),
            dot: code.ends_with('.'),
        },
        ".D." | ".Q." | ".SI." | ".P." | ".N." | ".O." | ".I." => Sign::Mensuration {
            sign: Some(code.to_string()),
            dot: false,
        },
        _ => Sign::Mensuration {
            sign: None,
            dot: false,
        },
    }
}

fn barline(code: &str) -> Barline {
    match code {
        "QBAR" => Barline::Quarter,
        "HBAR" => Barline::Half,
        "WBAR" => Barline::Single,
        "DBAR" => Barline::Double,
        "MBAR" => Barline::Modern,
        _ => Barline::Plain,
    }
}
