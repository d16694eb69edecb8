//! Mojibake repair pass.
//!
//! Undoes the damage left behind by lossy decoding pipelines before the
//! substitution table runs: ANSI terminal escapes, HTML/XML entities, stray
//! carriage returns, UTF-8 bytes that were misread as Windows-1252/Latin-1,
//! and decomposed Unicode. The pass is best-effort and idempotent; anything
//! it cannot repair safely passes through unchanged, and it never fails the
//! pipeline.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// ANSI/VT escape sequences in CSI form, e.g. `\x1b[31m`.
static RE_ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").unwrap());

/// Windows and classic Mac line endings.
static RE_LEGACY_LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r").unwrap());

/// A plausible UTF-8 lead byte misread as Windows-1252 (`Â`..`ô`), followed
/// by a character that a continuation byte would have decoded to: either the
/// raw 0x80..0xBF range or the Windows-1252 punctuation that occupies
/// 0x80..0x9F. Cheap gate before attempting the byte-level round trip.
static RE_MOJIBAKE_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "[\u{00C2}-\u{00F4}]",
        "[\u{0080}-\u{00BF}",
        "\u{20AC}\u{201A}\u{0192}\u{201E}\u{2026}\u{2020}\u{2021}\u{02C6}",
        "\u{2030}\u{0160}\u{2039}\u{0152}\u{017D}\u{2018}\u{2019}\u{201C}",
        "\u{201D}\u{2022}\u{2013}\u{2014}\u{02DC}\u{2122}\u{0161}\u{203A}",
        "\u{0153}\u{017E}\u{0178}]",
    ))
    .unwrap()
});

/// Double-encoded text unwraps one layer per round; three rounds covers
/// anything seen in the wild.
const MAX_ENCODING_ROUNDS: usize = 3;

/// Repairs `input` and returns the normalized result.
///
/// Steps, in order: strip terminal escapes, decode HTML/XML entities, fold
/// CRLF/CR line endings to `\n`, reverse encoding round-trip corruption, and
/// normalize to NFC.
pub fn repair(input: &str) -> String {
    let text = RE_ANSI_ESCAPE.replace_all(input, "");
    let text = html_escape::decode_html_entities(&text).into_owned();
    let text = RE_LEGACY_LINE_BREAKS.replace_all(&text, "\n").into_owned();
    let text = fix_encoding(&text);
    text.nfc().collect()
}

/// The 27 code points Windows-1252 maps into 0x80..0x9F.
const WINDOWS_1252_EXTRAS: &[char] = &[
    '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}',
    '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}',
    '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{017E}', '\u{0178}',
];

fn is_windows_1252(c: char) -> bool {
    (c as u32) < 0x100 || WINDOWS_1252_EXTRAS.contains(&c)
}

/// Reverses UTF-8-read-as-Windows-1252 corruption.
///
/// The text is split into maximal runs of Windows-1252-representable
/// characters; each run is repaired independently, so mojibake survives
/// alongside characters (CJK, zero-width controls) that could never have
/// come from a single-byte decode. Each run iterates until stable so that
/// double-encoded text repairs fully in one call.
fn fix_encoding(input: &str) -> String {
    if !RE_MOJIBAKE_HINT.is_match(input) {
        return input.to_string();
    }

    let mut result = String::with_capacity(input.len());
    let mut segment = String::new();

    for c in input.chars() {
        if is_windows_1252(c) {
            segment.push(c);
        } else {
            flush_segment(&mut result, &mut segment);
            result.push(c);
        }
    }
    flush_segment(&mut result, &mut segment);

    result
}

fn flush_segment(result: &mut String, segment: &mut String) {
    if segment.is_empty() {
        return;
    }

    let mut current = std::mem::take(segment);
    for _ in 0..MAX_ENCODING_ROUNDS {
        if !RE_MOJIBAKE_HINT.is_match(&current) {
            break;
        }
        match reencode_windows_1252(&current) {
            Some(fixed) if fixed != current => current = fixed,
            _ => break,
        }
    }

    result.push_str(&current);
}

/// Encodes the text back to the Windows-1252 bytes it would have come from
/// and re-reads them as UTF-8.
///
/// Returns `None` when the text holds characters outside Windows-1252 (it
/// cannot be whole-string mojibake), when the bytes are not valid UTF-8, or
/// when the decoded result still contains C1 controls (the bytes decoded,
/// but not to anything a human typed).
fn reencode_windows_1252(text: &str) -> Option<String> {
    let (bytes, _, had_unmappable) = encoding_rs::WINDOWS_1252.encode(text);
    if had_unmappable {
        return None;
    }

    let candidate = std::str::from_utf8(&bytes).ok()?;
    if candidate
        .chars()
        .any(|c| matches!(c as u32, 0x80..=0x9F))
    {
        return None;
    }

    Some(candidate.to_string())
}
