use std::fs;
use std::path::{Path, PathBuf};

use neoscribe::parsing;
use neoscribe::tables::Tables;

fn scribe_files(dir: &Path) -> Vec<PathBuf> {
    let entries = fs::read_dir(dir).expect("Failed to read directory");

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if path
            .extension()
            .and_then(|s| s.to_str())
            == Some("scr")
        {
            files.push(path);
        }
    }
    files
}

#[test]
fn ensure_samples_parse() {
    let dir = Path::new("tests/samples/");

    assert!(dir.exists(), "samples directory missing");

    let tables = Tables::from_directory(Path::new("tests/data/")).expect("Failed to load tables");
    let files = scribe_files(dir);

    assert!(!files.is_empty(), "No .scr files found in samples directory");

    let mut failures = Vec::new();

    for file in &files {
        let content = parsing::load(file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

        match parsing::parse(&content, &tables) {
            Ok(document) => {
                if document
                    .parts
                    .is_empty()
                {
                    println!("File {:?} has no parts", file);
                    failures.push(file.clone());
                }
            }
            Err(e) => {
                println!("File {:?} failed to parse: {:?}", file, e);
                failures.push(file.clone());
            }
        }
    }

    if !failures.is_empty() {
        panic!(
            "Sample files should parse successfully, but {} files failed",
            failures.len()
        );
    }
}

#[test]
fn ensure_samples_have_clefs() {
    let tables = Tables::from_directory(Path::new("tests/data/")).expect("Failed to load tables");

    for file in scribe_files(Path::new("tests/samples/")) {
        let content = parsing::load(&file).expect("Failed to load file");
        let document = parsing::parse(&content, &tables).expect("Failed to parse file");

        for part in &document.parts {
            assert!(
                part.rows
                    .iter()
                    .any(|row| row
                        .opening_clef()
                        .is_some()),
                "Part {} of {:?} has no opening clef",
                part.id,
                file
            );
        }
    }
}
