//! Construction of MEI documents from parsed Scribe parts.
//!
//! The header describes the piece from the metadata of its first part; the
//! music has one section per part, each holding a single staff whose
//! children are the syllables of the part with their neumes, notes and
//! ligatures.

use tracing::debug;

use super::signs::{Barline, Interpreter, Note, Place, Sign, Uneume};
use super::xml::Element;
use crate::language::{Clef, Coloration, Part, Row, ScribeType};
use crate::tables::Tables;

pub const MEI_NAMESPACE: &str = "http://www.music-encoding.org/ns/mei";
pub const MEI_VERSION: &str = "2013";

const PUBLISHER_URL: &str = "http://www.lib.latrobe.edu.au/MMDB/";
const PUBLISHER: &str = "Scribe Software";
const PUBLICATION_DATE: &str = "1984-2014";
const USE_RESTRICTION: &str = "©1984–2014, Scribe Software";

const APPLICATION_ID: &str = "xsl_scribe2neoscribexml";
const APPLICATION_VERSION: &str = "0.1";
const APPLICATION_NAME: &str = "Scribe2NeoScribeXML";

// not encoded in Scribe
const UNKNOWN: &str = "TBC";

pub struct Builder<'t> {
    kind: ScribeType,
    tables: &'t Tables,
    encoder: &'t str,
}

impl<'t> Builder<'t> {
    pub fn new(kind: ScribeType, tables: &'t Tables, encoder: &'t str) -> Builder<'t> {
        Builder {
            kind,
            tables,
            encoder,
        }
    }

    /// Build one MEI document holding the given parts. Documents that are
    /// one of several cut from the same file carry an alternate identifier
    /// naming the piece.
    pub fn build(&self, parts: &[Part], segmented: bool) -> Element {
        let mut head = Element::new("meiHead");
        if let Some(first) = parts.first() {
            if segmented {
                head.push(self.alternate_id(first));
            }
            head.push(self.file_description(first));
        }
        head.push(encoding_description());
        head.push(
            Element::new("workDesc").with_child(
                parts
                    .first()
                    .map(work)
                    .unwrap_or_else(|| Element::new("work")),
            ),
        );

        let mut group = Element::new("staffGrp").with_attribute("xml:id", "all");
        let mut score = Element::new("score");
        let mut sections = Vec::new();

        for (i, part) in parts
            .iter()
            .enumerate()
        {
            let number = i + 1;
            group.push(staff_definition(part, number));
            sections.push(Element::new("section").with_child(self.staff(part, number)));
        }

        score.push(Element::new("scoreDef").with_child(group));
        for section in sections {
            score.push(section);
        }

        let music = Element::new("music")
            .with_child(Element::new("mdiv").with_child(score));

        Element::new("mei")
            .with_attribute("xmlns", MEI_NAMESPACE)
            .with_attribute("meiversion", MEI_VERSION)
            .with_child(head)
            .with_child(music)
    }

    fn alternate_id(&self, part: &Part) -> Element {
        match self.kind {
            ScribeType::Trecento => Element::new("altId")
                .with_attribute("type", "repnum")
                .with_text(
                    part.repertory()
                        .unwrap_or_default(),
                ),
            ScribeType::Chant => Element::new("altId")
                .with_attribute("type", "cao")
                .with_text(
                    part.cao()
                        .unwrap_or_default()
                        .to_string(),
                ),
        }
    }

    fn file_description(&self, part: &Part) -> Element {
        let composer = part
            .composer()
            .unwrap_or_default();

        let title = Element::new("titleStmt")
            .with_child(Element::new("title").with_text(&part.title))
            .with_child(
                Element::new("respStmt")
                    .with_child(person("creator", composer))
                    .with_child(person("encoder", self.encoder)),
            );

        let publication = Element::new("pubStmt")
            .with_child(Element::new("respStmt").with_text(PUBLISHER_URL))
            .with_child(
                Element::new("publisher")
                    .with_child(Element::new("corpName").with_text(PUBLISHER)),
            )
            .with_child(Element::new("date").with_text(PUBLICATION_DATE))
            .with_child(
                Element::new("availability")
                    .with_child(Element::new("useRestrict").with_text(USE_RESTRICTION)),
            );

        Element::new("fileDesc")
            .with_child(title)
            .with_child(publication)
            .with_child(Element::new("seriesStmt"))
            .with_child(Element::new("sourceDesc").with_child(self.source(part)))
    }

    fn source(&self, part: &Part) -> Element {
        let sources = &self
            .tables
            .sources;
        let siglum = part
            .manuscript
            .as_str();

        let mut item = Element::new("item").with_attribute("type", "manuscript");
        let mut location = Element::new("physLoc");

        match (sources.source_name(siglum), sources.rism(siglum)) {
            (Ok(name), Ok(rism)) => {
                item = item.with_text(format!("{}{}", name, folio_reference(&part.folios)));
                location.push(
                    Element::new("repository")
                        .with_child(
                            Element::new("abbr")
                                .with_attribute("label", "RISM siglum")
                                .with_text(rism),
                        )
                        .with_child(
                            Element::new("expan")
                                .with_attribute("label", "library")
                                .with_text(name),
                        ),
                );
            }
            _ => debug!("Manuscript {:?} not in the source key", siglum),
        }

        let responsibility = Element::new("respStmt")
            .with_child(person(
                "composer",
                part.composer()
                    .unwrap_or_default(),
            ))
            .with_child(person("poet", UNKNOWN))
            .with_child(person("dedicatee", UNKNOWN));

        Element::new("source")
            .with_attribute("n", siglum)
            .with_attribute("label", "manuscript")
            .with_child(Element::new("titleStmt").with_child(Element::new("title").with_text(&part.title)))
            .with_child(Element::new("itemList").with_child(item))
            .with_child(responsibility)
            .with_child(location)
    }

    fn staff(&self, part: &Part, number: usize) -> Element {
        let mut staff = Element::new("staff")
            .with_attribute("n", number.to_string())
            .with_attribute("def", format!("#s{}", number))
            .with_attribute("source", &part.manuscript)
            .with_child(Element::new("pb").with_attribute("n", &part.folios))
            .with_child(Element::new("sb").with_attribute("n", "0"));

        let mut interpreter = Interpreter::new(
            self.kind,
            self.tables
                .codes(self.kind),
            Clef::from(&part.initial),
        );

        for row in &part.rows {
            match row {
                Row::Comment(text) => staff.push_comment(text),
                Row::Music(line) => {
                    let mut syllable = Element::new("syllable");
                    if let Some(text) = line
                        .syllable
                        .as_deref()
                        .filter(|text| !text.is_empty())
                    {
                        syllable.push(Element::new("syl").with_text(text));
                    }
                    for event in &line.events {
                        for sign in interpreter.interpret(event) {
                            add_sign(&mut syllable, sign);
                        }
                    }
                    staff.push(syllable);
                }
            }
        }

        staff
    }
}

fn person(role: &str, name: &str) -> Element {
    Element::new("persName")
        .with_attribute("role", role)
        .with_text(name)
}

fn folio_reference(folios: &str) -> String {
    if folios.contains('-') {
        format!(", fols. {}", folios)
    } else {
        format!(", fol. {}", folios)
    }
}

fn encoding_description() -> Element {
    Element::new("encodingDesc").with_child(
        Element::new("appInfo").with_child(
            Element::new("application")
                .with_attribute("xml:id", APPLICATION_ID)
                .with_attribute("version", APPLICATION_VERSION)
                .with_text(APPLICATION_NAME),
        ),
    )
}

fn work(part: &Part) -> Element {
    Element::new("work").with_child(
        Element::new("classification").with_child(
            Element::new("termList")
                .with_attribute("classcode", "genre")
                .with_child(Element::new("genre").with_text(&part.genre)),
        ),
    )
}

fn staff_definition(part: &Part, number: usize) -> Element {
    let clef = Clef::from(&part.initial);

    Element::new("staffDef")
        .with_attribute("xml:id", format!("s{}", number))
        .with_attribute("n", number.to_string())
        .with_attribute(
            "lines",
            part.initial
                .lines
                .to_string(),
        )
        .with_attribute(
            "label",
            part.voice()
                .label(),
        )
        .with_child(clef_element(clef))
}

fn clef_element(clef: Clef) -> Element {
    Element::new("clef")
        .with_attribute(
            "line",
            clef.staff_line()
                .to_string(),
        )
        .with_attribute("shape", clef.letter.to_string())
}

fn colour(element: &mut Element, coloration: Coloration) {
    if coloration.is_red() {
        element.set_attribute("color", "red");
    }
    if coloration == Coloration::FullBlue {
        element.set_attribute("color", "blue");
    }
    if coloration.is_void() {
        element.set_attribute("void", "true");
    }
}

fn place_attributes(element: &mut Element, place: Option<Place>) {
    if let Some(place) = place {
        element.set_attribute("ploc", place.name.to_string());
        element.set_attribute(
            "oloc",
            place
                .octave
                .to_string(),
        );
    }
}

fn note_element(note: Note) -> Element {
    let mut element = Element::new("note");
    if let Some(duration) = note.duration {
        element.set_attribute("dur", duration);
    }
    element.set_attribute(
        "pname",
        note.place
            .name
            .to_string(),
    );
    element.set_attribute(
        "oct",
        note.place
            .octave
            .to_string(),
    );
    element.set_attribute(
        "loc",
        note.location
            .to_string(),
    );
    colour(&mut element, note.coloration);
    element
}

fn uneume_element(uneume: Uneume) -> Element {
    let mut element = Element::new("uneume").with_attribute("name", uneume.name);
    for note in uneume.notes {
        element.push(note_element(note));
    }
    element
}

/// Append the element for a sign to a syllable.
fn add_sign(syllable: &mut Element, sign: Sign) {
    let element = match sign {
        Sign::Note(note) => note_element(note),
        Sign::Uneume(uneume) => uneume_element(uneume),
        Sign::Ineume { joined, parts } => {
            if joined {
                if let Some(previous) = syllable
                    .last_child_mut()
                    .filter(|element| element.name() == "ineume")
                {
                    for part in parts {
                        previous.push(uneume_element(part));
                    }
                    return;
                }
            }
            let mut ineume = Element::new("ineume");
            for part in parts {
                ineume.push(uneume_element(part));
            }
            ineume
        }
        Sign::Ligature {
            name,
            coloration,
            notes,
        } => {
            let mut ligature = Element::new("ligature").with_attribute("name", name);
            colour(&mut ligature, coloration);
            for note in notes {
                ligature.push(note_element(note));
            }
            ligature
        }
        Sign::Rest { kind, place } => {
            let mut rest = Element::new("rest");
            if let Some(kind) = kind {
                rest.set_attribute("type", kind);
            }
            place_attributes(&mut rest, place);
            rest
        }
        Sign::Dot { place, offset } => {
            let mut dot = Element::new("dot");
            place_attributes(&mut dot, place);
            if let Some(offset) = offset {
                dot.set_attribute("vo", offset);
            }
            dot
        }
        Sign::Mensuration { sign, dot } => {
            let mut mensur = Element::new("mensur");
            if let Some(sign) = sign {
                mensur.set_attribute("sign", sign);
            }
            if dot {
                mensur.set_attribute("dot", "true");
            }
            mensur
        }
        Sign::Barline(barline) => {
            let element = Element::new("barLine");
            match barline {
                Barline::Quarter => element.with_attribute("rend", "quarter"),
                Barline::Half => element.with_attribute("rend", "half"),
                Barline::Single => element.with_attribute("rend", "single"),
                Barline::Double => element.with_attribute("rend", "dbl"),
                Barline::Modern => element
                    .with_attribute("barplace", "takt")
                    .with_attribute("taktplace", "9"),
                Barline::Plain => element,
            }
        }
        Sign::Clef(clef) => clef_element(clef),
        Sign::Accidental { name, place } => {
            let mut accid = Element::new("accid").with_attribute("accid", name);
            place_attributes(&mut accid, place);
            accid
        }
    };

    syllable.push(element);
}
