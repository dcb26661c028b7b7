// src/wordlist.rs
use crate::error::Result;
use crate::types::SubprobeError;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Reads candidate labels from a newline-delimited wordlist.
///
/// Lines are trimmed and blank lines dropped. Order and duplicates are kept
/// exactly as they appear in the file.
pub fn load_candidates(path: &Path) -> Result<Vec<String>> {
    let unreadable = |source| SubprobeError::WordlistUnreadable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unreadable)?;
    parse_candidates(file).map_err(unreadable)
}

pub fn parse_candidates<R: Read>(reader: R) -> std::io::Result<Vec<String>> {
    let mut candidates = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let label = line.trim();
        if !label.is_empty() {
            candidates.push(label.to_string());
        }
    }
    Ok(candidates)
}

/// Builds the fully-qualified name probed for `label`.
pub fn target_for(label: &str, domain: &str) -> String {
    format!("{}.{}", label, domain)
}
