use std::fs;
use std::path::Path;

use neoscribe::parsing;
use neoscribe::tables::Tables;

#[test]
fn ensure_fail() {
    let dir = Path::new("tests/broken/");

    assert!(dir.exists(), "broken directory missing");

    let tables = Tables::from_directory(Path::new("tests/data/")).expect("Failed to load tables");
    let entries = fs::read_dir(dir).expect("Failed to read broken directory");

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

    assert!(!files.is_empty(), "No .scr files found in broken directory");

    let mut unexpected_successes = Vec::new();

    for file in &files {
        let content = parsing::load(file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

        match parsing::parse(&content, &tables) {
            Ok(_) => {
                println!("File {:?} unexpectedly parsed successfully", file);
                unexpected_successes.push(file.clone());
            }
            Err(_) => {}
        }
    }

    if !unexpected_successes.is_empty() {
        panic!(
            "Broken files should not parse successfully, but {} files passed",
            unexpected_successes.len()
        );
    }
}

#[test]
fn missing_files() {
    let error = parsing::load(Path::new("tests/broken/nonexistent.scr")).unwrap_err();
    assert_eq!(error.problem, "File not found");
}
