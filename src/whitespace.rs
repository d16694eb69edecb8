//! Whitespace normalization pass, applied last.

use regex::Regex;
use std::sync::LazyLock;

static RE_HORIZONTAL_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

static RE_EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Collapses horizontal whitespace runs to one space, newline runs of three
/// or more to exactly two, and trims trailing whitespace from every line.
///
/// Leading whitespace survives (indentation is meaningful) and newlines are
/// never moved, only deduplicated. Trimming a whitespace-only line can butt
/// two newline runs together, so the excess-newline collapse runs once more
/// after the join.
pub fn normalize_whitespace(input: &str) -> String {
    let collapsed = RE_HORIZONTAL_WS.replace_all(input, " ");
    let collapsed = RE_EXCESS_NEWLINES.replace_all(&collapsed, "\n\n");

    let trimmed = collapsed
        .split('\n')
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect::<Vec<_>>()
        .join("\n");

    RE_EXCESS_NEWLINES.replace_all(&trimmed, "\n\n").into_owned()
}
