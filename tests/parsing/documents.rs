use std::path::Path;

use neoscribe::language::{Coloration, Metadata, ScribeType, VoiceType};
use neoscribe::parsing::{self, ParsingError};
use neoscribe::rendering;
use neoscribe::tables::Tables;

fn tables() -> Tables {
    Tables::from_directory(Path::new("tests/data/")).expect("Failed to load tables")
}

fn trecento_header(repertory: &str, title: &str, voices: u32, manuscript: &str, voice: char) -> String {
    format!(
        ">{:<10}{:<40}{:<20}{:<10}{}{:<10}{:<20}{}",
        repertory, title, "Jacopo da Bologna", "madrigal", voices, manuscript, "87v-88", voice
    )
}

fn sample(name: &str) -> String {
    parsing::load(&Path::new("tests/samples/").join(name)).expect("Failed to load sample")
}

#[test]
fn single_trecento_part() {
    let content = format!(
        "S^C^R^I^B^E^S\n{}\n34C5C5 34C5\n34C5B5 S4;Al-34C5\n",
        trecento_header("017", "Aquila altera", 3, "Sq", '1')
    );

    let document = parsing::parse(&content, &tables()).unwrap();
    assert_eq!(document.kind, ScribeType::Trecento);
    assert_eq!(
        document
            .parts
            .len(),
        1
    );
    assert_eq!(document.piece_count, 1);

    let part = &document.parts[0];
    assert_eq!(part.id, 1);
    assert_eq!(part.title, "Aquila altera");
    assert_eq!(part.genre, "madrigal");
    assert_eq!(part.manuscript, "Sq");
    assert_eq!(part.folios, "87v-88");
    assert_eq!(
        part.metadata,
        Metadata::Trecento {
            repertory: "017".to_string(),
            composer: "Jacopo da Bologna".to_string(),
            voices: 3,
            voice: VoiceType::Cantus,
        }
    );

    assert_eq!(part.initial.clef, 'C');
    assert_eq!(part.initial.clef_line, 5);
    assert_eq!(part.initial.lines, 4);

    // the clef row is kept as well
    assert_eq!(
        part.rows
            .len(),
        2
    );
    assert_eq!(
        part.rows[1]
            .events()
            .len(),
        2
    );
    assert_eq!(part.rows[1].syllable(), Some("Al-"));
}

#[test]
fn trecento_pieces_by_repertory() {
    let document = parsing::parse(&sample("madrigals.scr"), &tables()).unwrap();

    assert_eq!(
        document
            .parts
            .len(),
        3
    );
    assert_eq!(document.piece_count, 2);

    let lengths: Vec<usize> = document
        .pieces()
        .iter()
        .map(|piece| piece.len())
        .collect();
    assert_eq!(lengths, vec![2, 1]);

    let first = &document.parts[0];
    assert_eq!(
        first.rows[0].comment(),
        Some("Cantus, beginning on fol. 87v")
    );
    assert_eq!(
        first
            .rows
            .len(),
        5
    );

    let second = &document.parts[1];
    assert_eq!(second.voice(), VoiceType::Triplum);
    assert_eq!(second.initial.clef, 'F');
    assert_eq!(second.initial.clef_line, 7);

    let third = &document.parts[2];
    assert_eq!(third.id, 3);
    assert_eq!(third.repertory(), Some("018"));
    assert_eq!(third.manuscript, "Pit");
    assert_eq!(third.folios, "2");
}

#[test]
fn colouring_within_rows() {
    let document = parsing::parse(&sample("madrigals.scr"), &tables()).unwrap();

    // "+B7 L6 -S5 = R1 -1 LL5 4"
    let events = document.parts[0].rows[3].events();
    let colorations: Vec<Coloration> = events
        .iter()
        .map(|event| event.coloration)
        .collect();
    assert_eq!(
        colorations,
        vec![
            Coloration::FullRed,
            Coloration::FullRed,
            Coloration::VoidBlack,
            Coloration::FullBlack,
            Coloration::FullBlack,
        ]
    );
    assert_eq!(events[3].code, "R");
    assert_eq!(events[3].pitches, vec![1, -1]);
}

#[test]
fn chant_pieces_by_title() {
    // this sample has CRLF line endings
    let document = parsing::parse(&sample("advent.scr"), &tables()).unwrap();

    assert_eq!(document.kind, ScribeType::Chant);
    assert_eq!(
        document
            .parts
            .len(),
        3
    );

    let titles: Vec<&str> = document
        .parts
        .iter()
        .map(|part| part.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Ad te levavi", "Ad te levavi", "In illa die"]);
    assert_eq!(document.piece_count, 2);

    let first = &document.parts[0];
    assert_eq!(first.manuscript, "Poi");
    assert_eq!(first.genre, "Responsory");
    assert_eq!(
        first.metadata,
        Metadata::Chant {
            feast: "Dominica prima Adventus".to_string(),
            office: "Matins".to_string(),
            cao: 6856,
        }
    );
    assert_eq!(
        first
            .rows
            .len(),
        6
    );

    // its title begins on the clef row
    let third = &document.parts[2];
    assert!(third.rows[0]
        .opening_clef()
        .is_some());
    assert_eq!(third.rows[0].syllable(), Some("In"));
    assert_eq!(third.cao(), Some(1234));
    assert_eq!(third.folios, "2v");
    assert_eq!(third.initial.clef, 'F');
    assert_eq!(third.initial.clef_line, 5);
}

#[test]
fn staff_line_override() {
    let document = parsing::parse(&sample("advent.scr"), &tables()).unwrap();

    assert_eq!(document.parts[0].initial.lines, 4);

    let second = &document.parts[1];
    assert_eq!(second.initial.lines, 3);
    // the LINE row itself is not one of the part's rows
    assert!(second
        .events()
        .all(|event| event.code != "LINE"));
    assert_eq!(
        second
            .rows
            .len(),
        6
    );
}

#[test]
fn unrecognized_signature() {
    let result = parsing::parse("SCRIBE\n>001\n", &tables());
    let error = result.unwrap_err();
    assert_eq!(
        error,
        ParsingError::UnrecognizedSignature {
            found: "SCRIBE".to_string()
        }
    );
    assert_eq!(error.line(), 0);

    let result = parsing::parse("", &tables());
    assert!(matches!(
        result,
        Err(ParsingError::UnrecognizedSignature { .. })
    ));
}

#[test]
fn missing_metadata() {
    let result = parsing::parse("S^C^R^I^B^E^S\n34C5C5 34C5\n", &tables());
    let error = result.unwrap_err();
    assert_eq!(error, ParsingError::MissingMetadata { line: 1 });
    assert_eq!(error.line(), 1);
}

#[test]
fn signature_only() {
    let document = parsing::parse("S^C^R^I^B^E^L\n", &tables()).unwrap();
    assert_eq!(document.kind, ScribeType::Chant);
    assert!(document
        .parts
        .is_empty());
    assert_eq!(document.piece_count, 0);
}

#[test]
fn unknown_codes_dropped() {
    let content = format!(
        "S^C^R^I^B^E^S\n{}\n34C5C5 34C5\n34C5ZZZ5 34C5\n34C5ZZZ5 B4 34C5\n",
        trecento_header("001", "Title", 1, "Sq", '4')
    );

    let document = parsing::parse(&content, &tables()).unwrap();
    let part = &document.parts[0];
    assert_eq!(part.voice(), VoiceType::Tenor);

    // a row left with no events is not kept
    assert_eq!(
        part.rows
            .len(),
        2
    );
    assert_eq!(part.rows[1].events()[0].code, "B");
}

#[test]
fn oversized_numbers() {
    let content = format!(
        "S^C^R^I^B^E^S\n{}\n34C5C5 34C5\n34C5B-99999999999 R99999999999 -99999999999 34C5\n",
        trecento_header("001", "Title", 1, "Sq", '1')
    );

    let tables = tables();
    let document = parsing::parse(&content, &tables).unwrap();
    let part = &document.parts[0];
    let events = part.rows[1].events();
    assert_eq!(events[0].pitches, vec![-2147483647]);
    assert_eq!(events[1].pitches, vec![2147483647, -2147483647]);

    // converting such a part degrades rather than aborting
    let bytes = rendering::render(document.kind, &document.parts, &tables, "Unknown", false).unwrap();
    let result = String::from_utf8(bytes).unwrap();
    assert!(result.contains("loc=\"-2147483648\""));
}
