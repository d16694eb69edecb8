//! Artifact pattern pass.
//!
//! Strips the structural noise that generative tools leave in plain text:
//! markdown header and bold runs, `[INST]`/`[SEP]` instruction tags, and
//! code fences. The patterns match anywhere, not just at line starts, and
//! there is no escape mechanism: ordinary text containing `##` or `**`
//! (preprocessor lines, multiplication) loses those runs too. That
//! over-removal is a documented tradeoff of the fixed rule table, not a bug.

use crate::rules::{Matcher, RuleSet};

/// Applies the pattern and literal rules of `rules` in their fixed order.
///
/// Code-point rules are skipped here; [`crate::rules::substitute`] has
/// already consumed them by the time this pass runs.
pub fn strip_artifacts(input: &str, rules: &RuleSet) -> String {
    let mut text = input.to_string();

    for rule in rules.rules() {
        match rule.matcher {
            Matcher::Pattern(re) => {
                text = re.replace_all(&text, rule.replacement).into_owned();
            }
            Matcher::Literal(literal) => {
                if text.contains(literal) {
                    text = text.replace(literal, rule.replacement);
                }
            }
            Matcher::Codepoint(_) => {}
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> String {
        strip_artifacts(input, RuleSet::builtin())
    }

    #[test]
    fn test_header_runs_removed() {
        assert_eq!(run("## Title"), " Title");
        assert_eq!(run("#### Deep"), " Deep");
    }

    #[test]
    fn test_single_hash_kept() {
        assert_eq!(run("issue #42"), "issue #42");
    }

    #[test]
    fn test_bold_markers_removed() {
        assert_eq!(run("**bold** and ***strong***"), "bold and strong");
    }

    #[test]
    fn test_single_asterisk_kept() {
        assert_eq!(run("a * b"), "a * b");
    }

    #[test]
    fn test_instruction_tags_removed() {
        assert_eq!(run("[INST]do the thing[SEP]now"), "do the thingnow");
    }

    #[test]
    fn test_code_fences_removed() {
        assert_eq!(run("```rust\nlet x = 1;\n```"), "rust\nlet x = 1;\n");
    }

    #[test]
    fn test_double_backtick_kept() {
        assert_eq!(run("``inline``"), "``inline``");
    }

    #[test]
    fn test_mid_line_matches() {
        // Not anchored to line start.
        assert_eq!(run("text ## more"), "text  more");
    }

    #[test]
    fn test_known_over_removal() {
        // The deliberate lossy cases: preprocessor and multiplication runs.
        assert_eq!(run("x **= 2"), "x = 2");
        assert_eq!(run("a ## b"), "a  b");
    }
}
