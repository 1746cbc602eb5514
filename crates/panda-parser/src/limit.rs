use std::fmt;

/// A LimitTracker bounds how deeply node-kind parses may nest. It keeps
/// track of utilization so that we can report how close to the limit a
/// parse came over the lifetime of the tracker.
///
/// ```rust
/// use panda_parser::{kind, lazy, lit, shape, NodeKind, Scanner};
///
/// let number = NodeKind::new("Number", shape![panda_parser::pat(r"\d+")]).build();
/// let group = {
///     let number = number.clone();
///     NodeKind::new("Group", shape![lit("("), lazy(move || kind(number.clone())), lit(")")])
///         .build()
/// };
///
/// let mut scanner = Scanner::new("(1)").recursion_limit(64);
/// let node = group.parse(&mut scanner).unwrap();
/// assert_eq!(node.text(), "(1)");
///
/// // `high` is the high-water mark of nesting reached during the parse.
/// let usage = scanner.recursion_tracker();
/// assert!(usage.high <= usage.limit);
/// ```
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct LimitTracker {
    current: usize,
    /// High water mark for this limit.
    pub high: usize,
    /// Limit.
    pub limit: usize,
}

impl LimitTracker {
    pub fn new(limit: usize) -> Self {
        Self {
            current: 0,
            high: 0,
            limit,
        }
    }

    pub fn limited(&self) -> bool {
        self.current > self.limit
    }

    pub fn consume(&mut self) {
        self.current += 1;
        if self.current > self.high {
            self.high = self.current;
        }
    }

    /// Undo one `consume`. The driver backtracks out of parse frames, so
    /// depth must be released on exit rather than only reset at the top.
    pub fn release(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

impl fmt::Debug for LimitTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recursion limit: {}, high: {}", self.limit, self.high)
    }
}
