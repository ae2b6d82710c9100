use std::fs;
use std::path::Path;

use notifyi::{parsing, transcript};

#[test]
fn ensure_fail() {
    let dir = Path::new("tests/broken/");

    assert!(dir.exists(), "broken directory missing");

    let entries = fs::read_dir(dir).expect("Failed to read broken directory");

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

    assert!(!files.is_empty(), "No .log files found in broken directory");

    let mut unexpected_successes = Vec::new();

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
                Ok(message) => {
                    println!("Line {:?} unexpectedly classified as {:?}", line, message);
                    unexpected_successes.push(line.clone());
                }
                Err(failure) => assert_eq!(failure.line, line),
            }
        }
    }

    if !unexpected_successes.is_empty() {
        panic!(
            "Broken lines should not classify, but {} lines did",
            unexpected_successes.len()
        );
    }
}
