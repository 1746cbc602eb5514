use std::fmt;

/// A diagnostic produced by [`Node::validate`](crate::Node::validate).
///
/// Diagnostics are collected alongside the tree rather than thrown: a
/// partial parse still returns a usable `Node`, and callers decide whether
/// the missing pieces matter.
///
/// ## Example
/// ```rust
/// use panda_parser::{kind, pat, shape, NodeKind, Scanner};
///
/// let number = NodeKind::new("Number", shape![pat(r"\d+")]).build();
/// let sum = NodeKind::new(
///     "Sum",
///     shape![kind(number.clone()), "+", kind(number.clone())],
/// )
/// .allow_incomplete_parse(true)
/// .incomplete_parse_threshold(2)
/// .build();
///
/// let mut scanner = Scanner::new("1 +");
/// let node = sum.parse(&mut scanner).unwrap();
/// let diagnostics = node.validate();
///
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(diagnostics[0].line(), 0);
/// ```
#[derive(PartialEq, Eq, Clone)]
pub struct Diagnostic {
    pub(crate) message: String,
    pub(crate) line: usize,
    pub(crate) col: usize,
}

impl Diagnostic {
    /// Create a new instance of `Diagnostic`.
    pub fn new<S: Into<String>>(message: S, line: usize, col: usize) -> Self {
        Self {
            message: message.into(),
            line,
            col,
        }
    }

    /// Get a reference to the diagnostic's message.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Zero-based line the diagnostic points at.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Zero-based column within that line.
    pub fn col(&self) -> usize {
        self.col
    }
}

impl fmt::Debug for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MISSING@{}:{} {:?}", self.line, self.col, self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.col, self.message)
    }
}

/// An error constructing a grammar, returned by
/// [`Pattern::new`](crate::Pattern::new).
///
/// These surface programming mistakes in grammar definitions; they are never
/// produced while parsing input.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    /// The pattern source did not compile.
    #[error("invalid pattern /{pattern}/: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// The pattern matches the empty string, which would let a repetition
    /// loop without consuming input.
    #[error("pattern /{pattern}/ matches the empty string")]
    EmptyPattern { pattern: String },
}
