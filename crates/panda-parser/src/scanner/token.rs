use std::fmt;

use crate::bamboo::BambooString;
use crate::grammar::Lexeme;

/// A single consumed match with its position metadata.
///
/// Tokens are created by [`Scanner::eat`](crate::Scanner::eat) and are
/// immutable afterwards. The value is a slice into the shared source text,
/// so `input[token.start()..token.end()] == token.value()` holds by
/// construction.
#[derive(Clone)]
pub struct Token {
    text: BambooString,
    lexeme: Option<Lexeme>,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) line: usize,
    pub(crate) col: usize,
    pub(crate) indent: usize,
    pub(crate) missing: bool,
    pub(crate) expected: Option<BambooString>,
    prefix: Option<BambooString>,
    suffix: Option<BambooString>,
}

impl Token {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        text: BambooString,
        lexeme: Option<Lexeme>,
        start: usize,
        end: usize,
        line: usize,
        col: usize,
        indent: usize,
        missing: bool,
    ) -> Self {
        Self {
            text,
            lexeme,
            start,
            end,
            line,
            col,
            indent,
            missing,
            expected: None,
            prefix: None,
            suffix: None,
        }
    }

    /// The matched substring of the input. Empty only for the synthetic
    /// missing sentinel.
    pub fn value(&self) -> &str {
        self.text.slice(self.start, self.end)
    }

    /// Byte offset of the first matched character.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last matched character.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Zero-based line containing `start`.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Zero-based column of `start` within its line.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Leading-space count of the line containing this token.
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// The literal or pattern that produced this token. `None` for
    /// whitespace runs and missing sentinels.
    pub fn lexeme(&self) -> Option<&Lexeme> {
        self.lexeme.as_ref()
    }

    /// Whether this is a synthetic placeholder for a grammar expression
    /// that failed during an incomplete parse.
    pub fn is_missing(&self) -> bool {
        self.missing
    }

    /// Whether this token carries only whitespace.
    pub fn is_whitespace(&self) -> bool {
        !self.missing && self.value().trim().is_empty()
    }

    /// Expectation label of the grammar expression this token came from,
    /// if the grammar author provided one.
    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    /// Decoration slot for downstream formatters.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Decoration slot for downstream formatters.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(BambooString::new(prefix));
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = Some(BambooString::new(suffix));
        self
    }

    pub(crate) fn set_expected(&mut self, expected: &BambooString) {
        self.expected = Some(expected.clone());
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.missing == other.missing
            && self.value() == other.value()
    }
}

impl Eq for Token {}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.missing {
            write!(f, "MISSING@{}..{}", self.start, self.end)
        } else if self.is_whitespace() {
            write!(
                f,
                "WHITESPACE@{}..{} {:?}",
                self.start,
                self.end,
                self.value()
            )
        } else {
            write!(f, "TOKEN@{}..{} {:?}", self.start, self.end, self.value())
        }
    }
}
