//! Case-insensitive comparison under Unicode simple case folding.

/// Dotless `ı` and dotted `İ` only fold to themselves.
const TURKIC_I: [char; 2] = ['\u{0131}', '\u{0130}'];

/// Reports whether `a` and `b` are equal under simple case folding.
///
/// Characters are compared one to one, so mappings that expand (`ß` to
/// `SS`) never match, while `ſ` matches `s` and the Kelvin sign matches `k`.
pub fn equal_fold(a: &str, b: &str) -> bool {
    let mut a_chars = a.chars();
    let mut b_chars = b.chars();
    loop {
        match (a_chars.next(), b_chars.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if chars_fold(x, y) => {}
            _ => return false,
        }
    }
}

fn chars_fold(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(&b);
    }
    if TURKIC_I.contains(&a) || TURKIC_I.contains(&b) {
        return false;
    }

    let same = |x: Option<char>, y: Option<char>| {
        matches!((x, y), (Some(x), Some(y)) if x == y)
    };
    same(single(a.to_uppercase()), single(b.to_uppercase()))
        || same(single(a.to_lowercase()), single(b.to_lowercase()))
}

fn single(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    let first = mapped.next()?;
    mapped.next().is_none().then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_case_is_ignored() {
        assert!(equal_fold("KerFuffle", "kerfuffle"));
        assert!(equal_fold("BODY", "body"));
        assert!(equal_fold("", ""));
    }

    #[test]
    fn test_different_words_or_lengths() {
        assert!(!equal_fold("kerfuffled", "kerfuffle"));
        assert!(!equal_fold("kerfuffle", "kerfuffled"));
        assert!(!equal_fold("fornax", "fornix"));
    }

    #[test]
    fn test_non_ascii_folds() {
        assert!(equal_fold("ſharbert", "sharbert"));
        assert!(equal_fold("\u{212A}erfuffle", "kerfuffle"));
        assert!(equal_fold("ΣΊΣΥΦΟΣ", "σίσυφος"));
        assert!(equal_fold("ς", "σ"));
        assert!(equal_fold("ẞ", "ß"));
    }

    #[test]
    fn test_expanding_and_turkic_mappings_do_not_fold() {
        assert!(!equal_fold("ß", "ss"));
        assert!(!equal_fold("ı", "i"));
        assert!(!equal_fold("ı", "I"));
        assert!(!equal_fold("İ", "i"));
    }
}
