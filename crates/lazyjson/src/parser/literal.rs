//! Classification of bare words in value position.

/// What a bare run of `[A-Za-z0-9._]` turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BareWord {
    Null,
    True,
    False,
    /// Not a keyword: an unquoted string.
    Text,
}

/// The bytes expected after the first letter of each keyword.
///
/// The first letter may be either case unless `strict`; the rest must be
/// lower case.
fn expected_tail(first: u8, strict: bool) -> Option<(&'static [u8], BareWord)> {
    let first = if strict { first } else { first.to_ascii_lowercase() };
    match first {
        b'n' => Some((b"ull", BareWord::Null)),
        b't' => Some((b"rue", BareWord::True)),
        b'f' => Some((b"alse", BareWord::False)),
        _ => None,
    }
}

/// Matches the whole run against the keywords.
pub(super) fn classify(word: &[u8], strict: bool) -> BareWord {
    let Some((&first, rest)) = word.split_first() else {
        return BareWord::Text;
    };
    match expected_tail(first, strict) {
        Some((tail, keyword)) if rest == tail => keyword,
        _ => BareWord::Text,
    }
}
