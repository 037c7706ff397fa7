use std::fs;
use std::path::Path;

use neoscribe::formatting::{self, Identity};
use neoscribe::language::Event;
use neoscribe::parsing::{self, parse_row};
use neoscribe::tables::Tables;

#[test]
fn printed_rows_read_back() {
    let tables = Tables::from_directory(Path::new("tests/data/")).expect("Failed to load tables");
    let entries = fs::read_dir("tests/samples/").expect("Failed to read samples directory");

    for entry in entries {
        let path = entry
            .expect("Failed to read directory entry")
            .path();
        if path
            .extension()
            .and_then(|s| s.to_str())
            != Some("scr")
        {
            continue;
        }

        let content = parsing::load(&path).expect("Failed to load file");
        let document = parsing::parse(&content, &tables).expect("Failed to parse file");
        let codes = tables.codes(document.kind);

        let expected: Vec<&Event> = document
            .parts
            .iter()
            .flat_map(|part| part.events())
            .collect();
        let syllables: Vec<Option<&str>> = document
            .parts
            .iter()
            .flat_map(|part| part.rows.iter())
            .filter(|row| !row.is_comment())
            .map(|row| row.syllable())
            .collect();

        let output = formatting::render(&Identity, &document);
        let rows: Vec<_> = output
            .lines()
            .filter(|line| {
                line.starts_with(|c: char| c.is_ascii_digit())
            })
            .map(|line| parse_row(line, codes))
            .collect();
        let actual: Vec<&Event> = rows
            .iter()
            .flat_map(|row| row.events())
            .collect();

        assert_eq!(actual, expected, "events differ after printing {:?}", path);

        // syllables come back verbatim, with nothing added before the suffix
        let printed: Vec<Option<&str>> = rows
            .iter()
            .map(|row| row.syllable())
            .collect();
        assert_eq!(printed, syllables, "syllables differ after printing {:?}", path);
    }
}

#[test]
fn part_headers() {
    let tables = Tables::from_directory(Path::new("tests/data/")).expect("Failed to load tables");
    let content = parsing::load(Path::new("tests/samples/madrigals.scr")).unwrap();
    let document = parsing::parse(&content, &tables).unwrap();

    let output = formatting::render(&Identity, &document);
    let lines: Vec<&str> = output
        .lines()
        .collect();

    assert_eq!(lines[0], "S^C^R^I^B^E^S");
    assert_eq!(
        lines[2],
        ">1 | repertory 017 | title Aquila altera | composer Jacopo da Bologna | genre madrigal | voices 3 | voice cantus | manuscript Sq | folios 87v-88"
    );
    assert_eq!(lines[3], "staff 34C5");
    assert_eq!(lines[4], "*Cantus, beginning on fol. 87v");
    assert_eq!(lines[5], "34C5 C 5 34C5");
    assert_eq!(lines[6], "34C5 MO. B 5 S 6 S 7 @S 8 M 7 M 6 DOT 6 2 B 5 ;A-34C5");
}
