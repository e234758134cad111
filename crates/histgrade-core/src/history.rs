//! History file collection.
//!
//! Gathers a student's primary history file plus any rotated siblings into one
//! corpus, dropping bash `HISTTIMEFORMAT` timestamp markers. Nothing in here
//! fails the run: a missing or unreadable file just contributes nothing.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::config::GradeConfig;
use crate::model::HistoryCorpus;

/// Timestamp marker: a lone `#` followed by a 9-or-more digit epoch.
fn timestamp_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#\d{9,}$").expect("timestamp marker regex is valid"))
}

/// Primary history file plus rotated siblings (`.1`, `.2`, ...), primary
/// first, then ascending rotation number.
fn history_files(home: &Path, history_file: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let primary = home.join(history_file);
    if primary.is_file() {
        files.push(primary);
    }

    let mut rotated: Vec<(u32, PathBuf)> = Vec::new();
    let prefix = format!("{history_file}.");
    if let Ok(entries) = std::fs::read_dir(home) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(suffix) = name.strip_prefix(&prefix) else {
                continue;
            };
            if let Ok(n) = suffix.parse::<u32>() {
                rotated.push((n, entry.path()));
            }
        }
    }
    rotated.sort_by_key(|(n, _)| *n);
    files.extend(rotated.into_iter().map(|(_, p)| p));

    files
}

/// Read and clean all history files under a home directory.
pub fn read_history(home: &Path, config: &GradeConfig) -> HistoryCorpus {
    let mut corpus = HistoryCorpus::default();

    for path in history_files(home, &config.history_file) {
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("skipping unreadable history file {}: {e}", path.display());
                continue;
            }
        };
        corpus.files_read += 1;
        for line in content.lines() {
            if timestamp_marker().is_match(line) {
                continue;
            }
            corpus.text.push_str(line);
            corpus.text.push('\n');
        }
    }

    tracing::debug!(
        "collected {} history file(s) under {}",
        corpus.files_read,
        home.display()
    );
    corpus
}
