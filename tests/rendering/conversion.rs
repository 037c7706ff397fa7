use std::fs;
use std::path::{Path, PathBuf};

use neoscribe::output::{self, ConversionError, Settings};
use neoscribe::tables::Tables;

fn tables() -> Tables {
    Tables::from_directory(Path::new("tests/data/")).expect("Failed to load tables")
}

fn settings(directory: &Path) -> Settings {
    Settings {
        encoder: "Test Encoder".to_string(),
        output: Some(directory.to_path_buf()),
    }
}

fn names(written: &[PathBuf]) -> Vec<String> {
    written
        .iter()
        .map(|path| {
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .to_string()
        })
        .collect()
}

fn trecento_header(repertory: &str, folios: &str) -> String {
    format!(
        ">{:<10}{:<40}{:<20}{:<10}{}{:<10}{:<20}{}",
        repertory, "Aquila altera", "Jacopo da Bologna", "madrigal", 1, "Sq", folios, '1'
    )
}

#[test]
fn trecento_pieces_written_separately() {
    let dir = tempfile::tempdir().unwrap();

    let written = output::convert_file(
        Path::new("tests/samples/madrigals.scr"),
        &settings(dir.path()),
        &tables(),
    )
    .unwrap();
    assert_eq!(names(&written), vec!["017.xml", "018.xml"]);

    let first = fs::read_to_string(dir.path().join("017.xml")).unwrap();
    assert!(first.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(first.contains("meiversion=\"2013\""));
    assert!(first.contains("<altId type=\"repnum\">017</altId>"));
    assert!(first.contains("<persName role=\"encoder\">Test Encoder</persName>"));
    assert!(first.contains("<persName role=\"creator\">Jacopo da Bologna</persName>"));
    assert!(first.contains(
        "Florence, Biblioteca Medicea Laurenziana, Med. Pal. 87 (Squarcialupi Codex), fols. 87v-88"
    ));
    assert!(first.contains("<abbr label=\"RISM siglum\">I-Fl</abbr>"));
    assert!(first.contains("<genre>madrigal</genre>"));

    // both voices, each with its own staff
    assert!(first.contains("<staffDef xml:id=\"s1\""));
    assert!(first.contains("<staffDef xml:id=\"s2\""));
    assert!(first.contains("label=\"triplum\""));
    assert!(first.contains("<staff n=\"2\" def=\"#s2\""));
    assert!(first.contains("<!--Cantus, beginning on fol. 87v-->"));
    assert!(first.contains("<syl>A-</syl>"));
    assert!(first.contains("<ligature"));

    let second = fs::read_to_string(dir.path().join("018.xml")).unwrap();
    assert!(second.contains("<altId type=\"repnum\">018</altId>"));
    assert!(!second.contains("xml:id=\"s2\""));
    assert!(second.contains("taktplace=\"9\""));
}

#[test]
fn chant_pieces_named_by_source() {
    let dir = tempfile::tempdir().unwrap();

    let written = output::convert_file(
        Path::new("tests/samples/advent.scr"),
        &settings(dir.path()),
        &tables(),
    )
    .unwrap();
    assert_eq!(names(&written), vec!["Poi0001 (6856).xml", "Poi0003 (1234).xml"]);

    let first = fs::read_to_string(&written[0]).unwrap();
    assert!(first.contains("<altId type=\"cao\">6856</altId>"));
    assert!(first.contains("<title>Ad te levavi</title>"));
    assert!(first.contains("<genre>Responsory</genre>"));
    assert!(first.contains("lines=\"3\""));
    assert!(first.contains("<ineume>"));
    assert!(first.contains("<uneume name=\"virga\">"));
    assert!(first.contains(", fol. 1<"));

    let second = fs::read_to_string(&written[1]).unwrap();
    assert!(second.contains("<title>In illa die</title>"));
    assert!(second.contains("<accid"));
}

#[test]
fn single_piece_named_after_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir
        .path()
        .join("aquila.scr");
    fs::write(
        &input,
        format!(
            "S^C^R^I^B^E^S\n{}\n34C5C5 34C5\n34C5B5 S4 S3;A-34C5\n",
            trecento_header("017", "87v")
        ),
    )
    .unwrap();

    let settings = Settings::default();
    let written = output::convert_file(&input, &settings, &tables()).unwrap();

    // written alongside the input
    assert_eq!(
        written,
        vec![dir
            .path()
            .join("aquila.scr.xml")]
    );

    let result = fs::read_to_string(&written[0]).unwrap();
    assert!(!result.contains("altId"));
    assert!(result.contains("<persName role=\"encoder\">Unknown</persName>"));
    assert!(result.contains(", fol. 87v<"));
}

#[test]
fn repeated_repertory_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir
        .path()
        .join("repeats.scr");
    fs::write(
        &input,
        format!(
            "S^C^R^I^B^E^S\n{}\n34C5C5 34C5\n{}\n34C5C5 34C5\n{}\n34C5C5 34C5\n",
            trecento_header("017", "1"),
            trecento_header("018", "2"),
            trecento_header("017", "3"),
        ),
    )
    .unwrap();

    let written = output::convert_file(&input, &settings(dir.path()), &tables()).unwrap();
    assert_eq!(names(&written), vec!["017.xml", "018.xml", "017 copy.xml"]);
}

#[test]
fn unknown_manuscript() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir
        .path()
        .join("unknown.scr");
    let header = format!(
        ">{:<10}{:<40}{:<20}{:<10}{}{:<10}{:<20}{}",
        "001", "Title", "", "ballata", 1, "XYZ", "1", '1'
    );
    fs::write(&input, format!("S^C^R^I^B^E^S\n{}\n34C5C5 34C5\n", header)).unwrap();

    let written = output::convert_file(&input, &settings(dir.path()), &tables()).unwrap();
    let result = fs::read_to_string(&written[0]).unwrap();
    assert!(!result.contains("RISM siglum"));
    assert!(result.contains("<source n=\"XYZ\""));
}

#[test]
fn failures_write_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let result = output::convert_file(
        Path::new("tests/broken/signature.scr"),
        &settings(dir.path()),
        &tables(),
    );
    assert!(matches!(result, Err(ConversionError::Parsing(_))));

    let result = output::convert_file(
        Path::new("tests/samples/nonexistent.scr"),
        &settings(dir.path()),
        &tables(),
    );
    assert!(matches!(result, Err(ConversionError::Loading(_))));

    let result = output::convert_file(
        Path::new("tests/samples/madrigals.scr"),
        &settings(&dir
            .path()
            .join("missing")),
        &tables(),
    );
    assert!(matches!(result, Err(ConversionError::Writing { .. })));

    assert_eq!(
        fs::read_dir(dir.path())
            .unwrap()
            .count(),
        0
    );
}
