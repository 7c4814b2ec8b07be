//! Utility helpers.
use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;

/// Normalize input strings (NFC) and trim whitespace.
pub fn normalize(s: &str) -> String {
    s.nfc().collect::<String>().trim().to_string()
}

/// Lowercase a unit, borrowing when it has no uppercase characters.
pub fn fold_case(s: &str) -> Cow<'_, str> {
    if s.chars().any(char::is_uppercase) {
        Cow::Owned(s.to_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

/// Lowercase a single character without changing the character count.
///
/// Characters whose lowercase form expands to several chars (`İ`) are kept
/// as they are, so aligned positions stay in step.
pub fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// True if the first character is uppercase.
pub fn starts_uppercase(s: &str) -> bool {
    s.chars().next().map_or(false, char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_case_borrows_lowercase_input() {
        assert!(matches!(fold_case("chat"), Cow::Borrowed(_)));
        assert_eq!(fold_case("CHÂTEAU"), "château");
    }

    #[test]
    fn fold_char_keeps_width() {
        assert_eq!(fold_char('É'), 'é');
        assert_eq!(fold_char('ſ'), 'ſ');
        assert_eq!(fold_char('¤'), '¤');
        assert_eq!(fold_char('İ'), 'İ');
    }

    #[test]
    fn normalize_composes_and_trims() {
        // e + combining acute
        assert_eq!(normalize(" e\u{301}te "), "éte");
    }
}
