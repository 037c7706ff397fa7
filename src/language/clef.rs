//! Pitch naming relative to the clef in force.
//!
//! Staff positions count from 1 below the bottom line of a four line staff,
//! odd numbers being lines and even numbers spaces. A clef letter placed on
//! a given position fixes where `a` and middle `c` fall; everything else is
//! modular arithmetic over the seven natural letter names. Octaves follow
//! scientific pitch notation, middle C being C4.

use crate::language::{Event, StaffState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clef {
    pub letter: char,
    pub line: i32,
}

impl Clef {
    pub fn new(letter: char, line: i32) -> Clef {
        Clef { letter, line }
    }

    /// Take up a clef change event. Returns None if the event is not a clef
    /// or carries no position.
    pub fn from_event(event: &Event) -> Option<Clef> {
        if !event.is_clef() {
            return None;
        }
        let letter = event
            .code
            .chars()
            .next()?;
        Some(Clef::new(letter, event.first_pitch()?))
    }

    // the staff position of the note a; wide so that any clef line and
    // position can be subtracted
    fn a_position(&self) -> i64 {
        let line = i64::from(self.line);
        match self.letter {
            'C' => line - 2,
            'F' => line + 2,
            'G' => line - 6,
            _ => 0,
        }
    }

    // the staff position of middle c
    fn c_position(&self) -> i64 {
        let line = i64::from(self.line);
        match self.letter {
            'C' => line,
            'F' => line + 4,
            'G' => line - 4,
            _ => 0,
        }
    }

    /// Letter name, lower case, of the note at the given staff position.
    pub fn pitch_name(&self, position: i32) -> char {
        let displacement = (i64::from(position) - self.a_position()).rem_euclid(7);
        (b'a' + displacement as u8) as char
    }

    /// Octave number of the note at the given staff position.
    pub fn octave(&self, position: i32) -> i32 {
        // floored, so the c a whole octave below middle c is octave 3
        let octave = 4 + (i64::from(position) - self.c_position()).div_euclid(7);
        octave as i32
    }

    /// Line number in the convention of the output encoding, where the
    /// bottom line of the staff is 1.
    pub fn staff_line(&self) -> i32 {
        (i64::from(self.line) - 1).div_euclid(2) as i32
    }
}

impl From<&StaffState> for Clef {
    fn from(state: &StaffState) -> Clef {
        Clef::new(state.clef, state.clef_line)
    }
}
