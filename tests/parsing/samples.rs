use std::fs;
use std::path::{Path, PathBuf};

use notifyi::{parsing, transcript};

fn log_files(dir: &Path) -> Vec<PathBuf> {
    let entries = fs::read_dir(dir).expect("Failed to read samples directory");

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if path
            .extension()
            .and_then(|s| s.to_str())
            == Some("log")
        {
            files.push(path);
        }
    }
    files
}

#[test]
fn ensure_samples_classify() {
    let dir = Path::new("tests/samples/");

    assert!(dir.exists(), "samples directory missing");

    let files = log_files(dir);

    assert!(!files.is_empty(), "No .log files found in samples directory");

    let mut failures = Vec::new();

    for file in &files {
        let lines = transcript::open(&file)
            .unwrap_or_else(|e| panic!("Failed to open file {:?}: {:?}", file, e));

        for line in lines {
            let line = line.unwrap_or_else(|e| panic!("Failed reading {:?}: {:?}", file, e));
            if line
                .trim()
                .is_empty()
            {
                continue;
            }

            match parsing::classify(&line) {
                Ok(_) => {}
                Err(e) => {
                    println!("File {:?}: {}", file, e);
                    failures.push(line.clone());
                }
            }
        }
    }

    if !failures.is_empty() {
        panic!(
            "Sample lines should classify successfully, but {} lines failed",
            failures.len()
        );
    }
}

#[test]
fn escapes_are_cleaned() {
    let file = Path::new("tests/samples/escapes.log");
    let mut lines = transcript::open(file).expect("Failed to open escapes sample");

    let mut cleaned = Vec::new();
    while let Some(line) = lines
        .read_line()
        .expect("Failed reading escapes sample")
    {
        cleaned.push(line);
    }

    assert_eq!(
        cleaned,
        vec![
            "chris: hello",
            "voldyman: colours everywhere",
            " * gurken joined. (Connected: 3)",
            "shazow: window titles too",
        ]
    );
}
