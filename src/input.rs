//! Raw input splitting
//!
//! Users may type or paste several tags at once, separated by ASCII or
//! full-width separators. Alternate separators are normalized to
//! [`CANONICAL_DELIMITER`] before the input is split into candidates.

use smallvec::SmallVec;

/// The separator every alternate delimiter is normalized to.
pub const CANONICAL_DELIMITER: char = ',';

/// Separators rewritten to [`CANONICAL_DELIMITER`]: full-width semicolon,
/// full-width comma and ASCII semicolon.
pub const ALTERNATE_DELIMITERS: [char; 3] = ['\u{FF1B}', '\u{FF0C}', ';'];

/// Replace every alternate delimiter in `raw` with [`CANONICAL_DELIMITER`].
pub fn normalize_delimiters(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if ALTERNATE_DELIMITERS.contains(&c) {
                CANONICAL_DELIMITER
            } else {
                c
            }
        })
        .collect()
}

/// Split `raw` into trimmed candidate tokens, in input order.
///
/// Empty candidates (for example from `"a,,b"` or a trailing separator) are
/// kept as empty strings; callers decide whether to skip them.
pub fn split_candidates(raw: &str) -> SmallVec<[String; 5]> {
    normalize_delimiters(raw)
        .split(CANONICAL_DELIMITER)
        .map(|candidate| candidate.trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_all_alternate_delimiters() {
        assert_eq!(normalize_delimiters("a；b，c;d,e"), "a,b,c,d,e");
    }

    #[test]
    fn normalization_leaves_other_text_alone() {
        assert_eq!(normalize_delimiters("日本語 tag"), "日本語 tag");
    }

    #[test]
    fn splits_mixed_delimiters_in_order() {
        let candidates = split_candidates("x；y,z");

        assert_eq!(candidates.as_slice(), ["x", "y", "z"]);
    }

    #[test]
    fn trims_each_candidate() {
        let candidates = split_candidates("  rust ;  cargo ，clippy ");

        assert_eq!(candidates.as_slice(), ["rust", "cargo", "clippy"]);
    }

    #[test]
    fn keeps_empty_candidates() {
        let candidates = split_candidates("a,, ;b;");

        assert_eq!(candidates.as_slice(), ["a", "", "", "b", ""]);
    }

    #[test]
    fn input_without_delimiters_is_one_candidate() {
        let candidates = split_candidates("single tag");

        assert_eq!(candidates.as_slice(), ["single tag"]);
    }
}
