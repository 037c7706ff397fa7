//! Printer for parsed Scribe documents
//!
//! Rows come back out in much the form they were read: staff codes at
//! either end, codes followed by their numbers, sigils where the gap or
//! colouring changes, and the syllable after a `;`.

use crate::formatting::*;
use crate::language::*;

pub fn format_with_renderer(document: &Document) -> Vec<(Syntax, String)> {
    let mut output = Formatter::new();

    output.append(
        Syntax::Signature,
        document
            .kind
            .signature(),
    );
    output.append_char('\n');

    for part in &document.parts {
        output.format_part(part);
    }

    output.flush_current();
    output.fragments
}

struct Formatter {
    fragments: Vec<(Syntax, String)>,
    buffer: String,
}

impl Formatter {
    fn new() -> Formatter {
        Formatter {
            fragments: Vec::new(),
            buffer: String::new(),
        }
    }

    /// Append content with specific syntax tagging, maintaining order
    fn append(&mut self, syntax: Syntax, content: &str) {
        self.flush_current();
        if !content.is_empty() {
            self.fragments
                .push((syntax, content.to_string()));
        }
    }

    fn append_char(&mut self, c: char) {
        if c == '\n' {
            self.flush_current();
            self.fragments
                .push((Syntax::Newline, "\n".to_string()));
        } else {
            self.buffer
                .push(c);
        }
    }

    fn flush_current(&mut self) {
        if !self
            .buffer
            .is_empty()
        {
            self.fragments
                .push((
                    Syntax::Neutral,
                    self.buffer
                        .clone(),
                ));
            self.buffer
                .clear();
        }
    }

    fn append_field(&mut self, label: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.append(Syntax::Label, " | ");
        self.append(Syntax::Label, label);
        self.append(Syntax::Label, " ");
        self.append(Syntax::Header, value);
    }

    fn format_part(&mut self, part: &Part) {
        self.append_char('\n');
        self.append(Syntax::Header, ">");
        self.append(Syntax::Numeric, &part.id.to_string());

        match &part.metadata {
            Metadata::Trecento {
                repertory,
                composer,
                voices,
                voice,
            } => {
                self.append_field("repertory", repertory);
                self.append_field("title", &part.title);
                self.append_field("composer", composer);
                self.append_field("genre", &part.genre);
                self.append_field("voices", &voices.to_string());
                self.append_field("voice", voice.label());
            }
            Metadata::Chant { feast, office, cao } => {
                self.append_field("title", &part.title);
                self.append_field("feast", feast);
                self.append_field("office", office);
                self.append_field("genre", &part.genre);
                self.append_field("cao", &cao.to_string());
            }
        }
        self.append_field("manuscript", &part.manuscript);
        self.append_field("folios", &part.folios);
        self.append_char('\n');

        self.append(Syntax::Label, "staff ");
        self.append(
            Syntax::Staff,
            &part
                .initial
                .to_code(),
        );
        self.append_char('\n');

        for row in &part.rows {
            self.format_row(row);
        }
    }

    fn format_row(&mut self, row: &Row) {
        match row {
            Row::Comment(text) => {
                self.append(Syntax::Comment, "*");
                self.append(Syntax::Comment, text);
            }
            Row::Music(line) => {
                self.append(
                    Syntax::Staff,
                    &line
                        .prefix
                        .to_code(),
                );

                let mut coloration = Coloration::FullBlack;
                for event in &line.events {
                    self.append_char(' ');
                    if !event.gap {
                        self.append(Syntax::Sigil, "@");
                    }
                    if event.coloration != coloration {
                        self.append(Syntax::Sigil, sigil(event.coloration));
                        coloration = event.coloration;
                    }
                    self.format_event(event);
                }

                // a syllable runs verbatim up to the suffix
                match &line.syllable {
                    Some(syllable) => {
                        self.append_char(' ');
                        self.append(Syntax::Sigil, ";");
                        self.append(Syntax::Syllable, syllable);
                    }
                    None => self.append_char(' '),
                }

                self.append(
                    Syntax::Staff,
                    &line
                        .suffix
                        .to_code(),
                );
            }
        }
        self.append_char('\n');
    }

    fn format_event(&mut self, event: &Event) {
        self.append(Syntax::Code, &event.code);
        for pitch in &event.pitches {
            self.append_char(' ');
            self.append(Syntax::Numeric, &pitch.to_string());
        }
    }
}

fn sigil(coloration: Coloration) -> &'static str {
    match coloration {
        Coloration::FullBlack => "=",
        Coloration::FullRed => "+",
        Coloration::VoidRed => "+-",
        Coloration::VoidBlack => "-",
        _ => "",
    }
}
