/// Configuration options for the document parser.
///
/// The parser is lenient by default: it accepts single-quoted strings, bare
/// words as keys and values, and ignores anything after the root container.
///
/// # Default
///
/// All flags default to `false` and there is no depth limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Reject the lenient extensions and accept only standard JSON syntax.
    ///
    /// When `true`, single-quoted strings are rejected, keys must be quoted,
    /// and the only bare words accepted as values are `null`, `true` and
    /// `false` in lower case.
    ///
    /// # Examples
    ///
    /// Accepted only when `strict` is `false`:
    ///
    /// ```json
    /// {name: 'value', flag: True, kind: unquoted}
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub strict: bool,

    /// Fail when non-whitespace text follows the root container.
    ///
    /// # Default
    ///
    /// `false`
    pub reject_trailing_characters: bool,

    /// Maximum number of nested containers, counting the root.
    ///
    /// Parsing is iterative, so deep documents cannot overflow the call stack,
    /// but this bounds the memory an adversarial input can claim.
    ///
    /// # Default
    ///
    /// `None`
    pub max_depth: Option<usize>,
}

impl ParserOptions {
    /// Options accepting only standard JSON.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            strict: true,
            reject_trailing_characters: true,
            max_depth: None,
        }
    }

    /// Returns these options with the given depth limit.
    #[must_use]
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..self
        }
    }
}
