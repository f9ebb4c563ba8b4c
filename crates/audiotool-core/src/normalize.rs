//! Word-boundary-safe capitalization normalizer
//!
//! Fixes over-capitalized small words in tag values and path segments
//! ("Control The Storm" -> "Control the Storm") without touching words
//! that legitimately start a title fragment, e.g. after a colon or as
//! part of a stylized compound ("Build It Up - Tear It Down").

use std::path::MAIN_SEPARATOR;

/// Small words subject to lowercasing, in application order.
///
/// Articles, conjunctions, short prepositions and a few auxiliary verb
/// forms. The list and its order are fixed configuration; they are not
/// mutated at runtime.
pub const SMALL_WORDS: &[&str] = &[
    "a", "an", "the",
    "and", "or",
    "as", "at", "but", "by", "for", "in", "of", "off", "on", "per", "to", "up", "via", "yet",
    "am", "was", "is", "are",
];

/// A match is skipped when the character immediately before its leading
/// space is one of these.
pub const GUARD_BEFORE: &[char] = &['-', '.', '_', ':', '&'];

/// A match is skipped when the character immediately after its trailing
/// space is one of these.
pub const GUARD_AFTER: &[char] = &['(', '-'];

/// Lowercase every space-delimited `Capitalized(word)` occurrence of
/// each small word, left to right, non-overlapping, honoring the
/// boundary guards. Idempotent; empty input comes back unchanged.
pub fn normalize_string(s: &str) -> String {
    let mut out = s.to_string();
    for word in SMALL_WORDS {
        out = replace_word(&out, word);
    }
    out
}

/// Apply [`normalize_string`] to every path segment independently, so
/// the boundary guards never span a separator.
pub fn normalize_path(path: &str) -> String {
    path.split(MAIN_SEPARATOR)
        .map(normalize_string)
        .collect::<Vec<_>>()
        .join(&MAIN_SEPARATOR.to_string())
}

/// Replace ` Word ` with ` word ` throughout `s` for one small word.
///
/// Scans left to right. A replaced match resumes after its trailing
/// space; a guarded match resumes just past its leading space, so an
/// overlapping later occurrence is still considered.
fn replace_word(s: &str, word: &str) -> String {
    let needle = format!(" {} ", capitalize(word));
    let replacement = format!(" {} ", word);

    let mut out = String::with_capacity(s.len());
    let mut idx = 0;

    while let Some(pos) = s[idx..].find(&needle) {
        let start = idx + pos;
        let end = start + needle.len();

        let guarded = s[..start]
            .chars()
            .next_back()
            .is_some_and(|c| GUARD_BEFORE.contains(&c))
            || s[end..].chars().next().is_some_and(|c| GUARD_AFTER.contains(&c));

        if guarded {
            // Keep the match; the needle starts with an ASCII space, so
            // start + 1 is a valid char boundary.
            out.push_str(&s[idx..start + 1]);
            idx = start + 1;
        } else {
            out.push_str(&s[idx..start]);
            out.push_str(&replacement);
            idx = end;
        }
    }

    out.push_str(&s[idx..]);
    out
}

/// Uppercase the first letter of an (ASCII, lowercase) small word.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
