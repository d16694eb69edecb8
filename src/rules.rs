//! Replacement rule table and the character substitution pass.
//!
//! The built-in [`RuleSet`] is an immutable, ordered sequence of
//! [`ReplacementRule`]s constructed once at first use and shared by every
//! caller. It is partitioned into three groups (visible typographic fixes,
//! invisible character fixes, AI-artifact fixes) but executes as a single
//! flattened sequence: later rules see text already rewritten by earlier
//! ones, which is why the generic whitespace sweep in
//! [`crate::whitespace`] must run after everything here.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// What a rule matches against.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// A single Unicode code point.
    Codepoint(char),
    /// A fixed literal substring.
    Literal(&'static str),
    /// A compiled pattern for multi-character artifacts.
    Pattern(&'static Regex),
}

/// An ordered pair of matcher and literal replacement.
#[derive(Debug, Clone, Copy)]
pub struct ReplacementRule {
    pub matcher: Matcher,
    pub replacement: &'static str,
}

impl ReplacementRule {
    fn codepoint(c: char, replacement: &'static str) -> Self {
        Self {
            matcher: Matcher::Codepoint(c),
            replacement,
        }
    }

    fn literal(literal: &'static str, replacement: &'static str) -> Self {
        Self {
            matcher: Matcher::Literal(literal),
            replacement,
        }
    }

    fn pattern(pattern: &'static Regex, replacement: &'static str) -> Self {
        Self {
            matcher: Matcher::Pattern(pattern),
            replacement,
        }
    }
}

/// Visible typographic lookalikes mapped to ASCII equivalents.
const VISIBLE_FIXES: &[(char, &str)] = &[
    ('\u{2012}', "-"),        // Figure Dash
    ('\u{2013}', "-"),        // En Dash
    ('\u{2014}', "-"),        // Em Dash
    ('\u{2015}', "-"),        // Horizontal Bar
    ('\u{2018}', "'"),        // Left Single Quotation Mark
    ('\u{2019}', "'"),        // Right Single Quotation Mark
    ('\u{201A}', "'"),        // Single Low-9 Quotation Mark
    ('\u{201B}', "'"),        // Single High-Reversed-9 Quotation Mark
    ('\u{201C}', "\""),       // Left Double Quotation Mark
    ('\u{201D}', "\""),       // Right Double Quotation Mark
    ('\u{201E}', "\""),       // Double Low-9 Quotation Mark
    ('\u{201F}', "\""),       // Double High-Reversed-9 Quotation Mark
    ('\u{2026}', "..."),      // Horizontal Ellipsis
    ('\u{00A0}', " "),        // No-Break Space
    ('\u{1680}', " "),        // Ogham Space Mark
    ('\u{2000}', " "),        // En Quad
    ('\u{2001}', " "),        // Em Quad
    ('\u{2002}', " "),        // En Space
    ('\u{2003}', " "),        // Em Space
    ('\u{2004}', " "),        // Three-Per-Em Space
    ('\u{2005}', " "),        // Four-Per-Em Space
    ('\u{2006}', " "),        // Six-Per-Em Space
    ('\u{2007}', " "),        // Figure Space
    ('\u{2008}', " "),        // Punctuation Space
    ('\u{2009}', " "),        // Thin Space
    ('\u{200A}', " "),        // Hair Space
    ('\u{202F}', " "),        // Narrow No-Break Space
    ('\u{205F}', " "),        // Medium Mathematical Space
    ('\u{3000}', " "),        // Ideographic Space
    ('\u{FFFC}', "[OBJECT]"), // Object Replacement Character
];

/// Invisible, formatting, and control characters. Most are removed outright;
/// the invisible mathematical operators get a visible ASCII stand-in, and the
/// Unicode line/paragraph separators become real newlines.
const INVISIBLE_FIXES: &[(char, &str)] = &[
    ('\u{200B}', ""),     // Zero-Width Space
    ('\u{200C}', ""),     // Zero-Width Non-Joiner
    ('\u{200D}', ""),     // Zero-Width Joiner
    ('\u{200E}', ""),     // Left-To-Right Mark
    ('\u{200F}', ""),     // Right-To-Left Mark
    ('\u{202A}', ""),     // Left-To-Right Embedding
    ('\u{202B}', ""),     // Right-To-Left Embedding
    ('\u{202C}', ""),     // Pop Directional Formatting
    ('\u{202D}', ""),     // Left-To-Right Override
    ('\u{202E}', ""),     // Right-To-Left Override
    ('\u{2060}', ""),     // Word Joiner
    ('\u{2061}', ""),     // Function Application
    ('\u{2062}', "x"),    // Invisible Times
    ('\u{2063}', ","),    // Invisible Separator
    ('\u{2064}', "+"),    // Invisible Plus
    ('\u{2066}', ""),     // Left-To-Right Isolate
    ('\u{2067}', ""),     // Right-To-Left Isolate
    ('\u{2068}', ""),     // First Strong Isolate
    ('\u{2069}', ""),     // Pop Directional Isolate
    ('\u{061C}', ""),     // Arabic Letter Mark
    ('\u{00AD}', ""),     // Soft Hyphen
    ('\u{034F}', ""),     // Combining Grapheme Joiner
    ('\u{FEFF}', ""),     // Zero-Width No-Break Space / BOM
    ('\u{180E}', ""),     // Mongolian Vowel Separator
    ('\u{17B4}', ""),     // Khmer Vowel Inherent Aq
    ('\u{17B5}', ""),     // Khmer Vowel Inherent Aa
    ('\u{115F}', ""),     // Hangul Choseong Filler
    ('\u{1160}', ""),     // Hangul Jungseong Filler
    ('\u{3164}', ""),     // Hangul Filler
    ('\u{FFA0}', ""),     // Halfwidth Hangul Filler
    ('\u{2028}', "\n"),   // Line Separator
    ('\u{2029}', "\n\n"), // Paragraph Separator
];

// Artifact patterns (see crate::artifacts for the pass that applies them).
static RE_HEADER_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#{2,}").unwrap());
static RE_BOLD_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*{2,}").unwrap());
static RE_FENCE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`{3,}").unwrap());

static BUILTIN: LazyLock<RuleSet> = LazyLock::new(|| {
    let mut rules = Vec::new();

    for &(c, replacement) in VISIBLE_FIXES {
        rules.push(ReplacementRule::codepoint(c, replacement));
    }

    for &(c, replacement) in INVISIBLE_FIXES {
        rules.push(ReplacementRule::codepoint(c, replacement));
    }

    // Variation selectors (U+FE00..U+FE0F) and Mongolian free variation
    // selectors (U+180B..U+180D) never render on their own; strip the ranges.
    for cp in (0xFE00..=0xFE0F).chain(0x180B..=0x180D) {
        let c = char::from_u32(cp).unwrap();
        rules.push(ReplacementRule::codepoint(c, ""));
    }

    // AI-artifact fixes, in the order they fire.
    rules.push(ReplacementRule::pattern(LazyLock::force(&RE_HEADER_RUN), ""));
    rules.push(ReplacementRule::pattern(LazyLock::force(&RE_BOLD_RUN), ""));
    rules.push(ReplacementRule::literal("[INST]", ""));
    rules.push(ReplacementRule::literal("[SEP]", ""));
    rules.push(ReplacementRule::pattern(LazyLock::force(&RE_FENCE_RUN), ""));

    RuleSet::new(rules)
});

/// An immutable, ordered sequence of replacement rules.
///
/// Constructed once per process and shared read-only across threads, so
/// concurrent callers need no locking.
pub struct RuleSet {
    rules: Vec<ReplacementRule>,
    char_map: HashMap<char, &'static str>,
}

impl RuleSet {
    fn new(rules: Vec<ReplacementRule>) -> Self {
        let char_map = rules
            .iter()
            .filter_map(|rule| match rule.matcher {
                Matcher::Codepoint(c) => Some((c, rule.replacement)),
                _ => None,
            })
            .collect();
        Self { rules, char_map }
    }

    /// The built-in rule table, constructed on first use.
    pub fn builtin() -> &'static RuleSet {
        &BUILTIN
    }

    /// All rules in application order.
    pub fn rules(&self) -> &[ReplacementRule] {
        &self.rules
    }

    fn char_replacement(&self, c: char) -> Option<&'static str> {
        self.char_map.get(&c).copied()
    }
}

/// Applies the code-point rules of `rules` to `input`, then the control and
/// residual whitespace sweeps.
///
/// Because every code-point matcher is a distinct single character and no
/// replacement string contains another rule's matcher, applying them in one
/// classification scan is equivalent to the rule-at-a-time order. The sweeps
/// run last within the pass:
///
/// - C0/C1 control characters other than `\t` and `\n` are dropped (the
///   repair pass has already folded `\r` into `\n`);
/// - any remaining Unicode whitespace that is not a plain space, tab, or
///   newline is coerced to a plain space.
pub fn substitute(input: &str, rules: &RuleSet) -> String {
    let mut result = String::with_capacity(input.len());

    for c in input.chars() {
        if let Some(replacement) = rules.char_replacement(c) {
            result.push_str(replacement);
            continue;
        }

        if c.is_control() && c != '\t' && c != '\n' {
            continue;
        }

        if c.is_whitespace() && !matches!(c, ' ' | '\t' | '\n') {
            result.push(' ');
            continue;
        }

        result.push(c);
    }

    result
}
