//! Fuzzy command matching.
//!
//! Turns a literal required command into a regex that tolerates whitespace
//! variation in the student's typed history, while refusing to match inside a
//! longer token (`ls` must not count when the student only ran `lscpu`).

use regex::Regex;

/// Compile a literal command into its history-matching pattern.
///
/// The command is split on whitespace runs, each token metacharacter-escaped,
/// and the tokens rejoined with `\s+`. The whole pattern is anchored so the
/// occurrence must be delimited by start/end of text, `;`, or whitespace on
/// both sides. Matching is case-sensitive and spans the whole corpus.
pub fn command_pattern(command: &str) -> Result<Regex, regex::Error> {
    let body = command
        .split_whitespace()
        .map(|token| regex::escape(token))
        .collect::<Vec<_>>()
        .join(r"\s+");

    Regex::new(&format!(r"(?:\A|[\s;]){body}(?:[\s;]|\z)"))
}

/// Presence test: does the command occur anywhere in the corpus?
pub fn corpus_contains(pattern: &Regex, corpus: &str) -> bool {
    pattern.is_match(corpus)
}
