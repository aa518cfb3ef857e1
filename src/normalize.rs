use std::collections::HashSet;

use once_cell::sync::Lazy;
use unicode_normalization::UnicodeNormalization;

use crate::blocking::BlockKey;

static GENERATIONAL_SUFFIXES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["jr", "sr", "ii", "iii", "iv", "v"].into_iter().collect());

/// Canonical comparable form of a display name. Derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedName {
    /// Lowercase suffix-stripped tokens rejoined with single spaces.
    pub canonical: String,
    pub first: String,
    /// Empty for single-token names (no distinct last token).
    pub last: String,
    pub first_initial: String,
}

impl NormalizedName {
    pub fn block_key(&self) -> BlockKey {
        BlockKey {
            last: self.last.clone(),
            first_initial: self.first_initial.clone(),
        }
    }
}

/// Normalize a raw display name so independently-sourced spellings of the
/// same player compare equal.
///
/// NFKD-decomposes the input, maps `.`/`,` to spaces and curly or backtick
/// apostrophes to `'`, deletes everything that is not an ASCII letter,
/// whitespace, apostrophe, or hyphen (this is what drops combining marks, so
/// "José García" and "Jose Garcia" agree), lowercases, splits on
/// space/hyphen/apostrophe, and strips a trailing generational suffix.
/// Empty or absent input yields an all-empty result, not an error.
pub fn normalize_name(raw: &str) -> NormalizedName {
    let mut cleaned = String::with_capacity(raw.len());
    for ch in raw.nfkd() {
        let ch = match ch {
            '.' | ',' => ' ',
            '\u{2019}' | '`' => '\'',
            other => other,
        };
        if ch.is_ascii_alphabetic() {
            cleaned.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '\'' || ch == '-' {
            cleaned.push(ch);
        }
    }

    let mut tokens: Vec<&str> = cleaned
        .split(|c: char| c.is_whitespace() || c == '\'' || c == '-')
        .filter(|token| !token.is_empty())
        .collect();
    if let Some(last) = tokens.last() {
        if GENERATIONAL_SUFFIXES.contains(last) {
            tokens.pop();
        }
    }

    let canonical = tokens.join(" ");
    let first = tokens.first().copied().unwrap_or_default().to_string();
    let last = if tokens.len() >= 2 {
        tokens.last().copied().unwrap_or_default().to_string()
    } else {
        String::new()
    };
    let first_initial = first.chars().next().map(String::from).unwrap_or_default();

    NormalizedName {
        canonical,
        first,
        last,
        first_initial,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_canonical_names_pass_through() {
        let norm = normalize_name("jose garcia");
        assert_eq!(norm.canonical, "jose garcia");
        let again = normalize_name(&norm.canonical);
        assert_eq!(again, norm);
    }

    #[test]
    fn diacritics_are_stripped() {
        assert_eq!(normalize_name("José García").canonical, "jose garcia");
        assert_eq!(
            normalize_name("José García").canonical,
            normalize_name("Jose Garcia").canonical
        );
    }

    #[test]
    fn punctuation_becomes_token_breaks() {
        let norm = normalize_name("Jon A. Smith");
        assert_eq!(norm.canonical, "jon a smith");
        assert_eq!(norm.first, "jon");
        assert_eq!(norm.last, "smith");
        assert_eq!(norm.first_initial, "j");
    }

    #[test]
    fn curly_apostrophes_and_hyphens_split_tokens() {
        assert_eq!(normalize_name("D\u{2019}Angelo O`Neill").canonical, "d angelo o neill");
        assert_eq!(normalize_name("Mary-Jane Smith").canonical, "mary jane smith");
    }

    #[test]
    fn generational_suffix_is_dropped() {
        let plain = normalize_name("Ken Griffey");
        let suffixed = normalize_name("Ken Griffey Jr.");
        assert_eq!(suffixed.canonical, plain.canonical);
        assert_eq!(suffixed.last, "griffey");
    }

    #[test]
    fn lone_suffix_normalizes_to_empty() {
        let norm = normalize_name("Jr");
        assert_eq!(norm.canonical, "");
        assert_eq!(norm.first, "");
        assert_eq!(norm.first_initial, "");
    }

    #[test]
    fn single_token_has_no_last() {
        let norm = normalize_name("Ichiro");
        assert_eq!(norm.first, "ichiro");
        assert_eq!(norm.last, "");
        assert_eq!(norm.first_initial, "i");
    }

    #[test]
    fn empty_input_yields_empty_name() {
        assert_eq!(normalize_name(""), NormalizedName::default());
        assert_eq!(normalize_name("  .  "), NormalizedName::default());
    }

    #[test]
    fn digits_and_symbols_are_deleted() {
        assert_eq!(normalize_name("Jon Smith #34").canonical, "jon smith");
    }
}
