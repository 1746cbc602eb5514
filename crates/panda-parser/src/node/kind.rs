use std::fmt;
use std::ops::Deref;
use std::sync::OnceLock;

use crate::bamboo::BambooString;
use crate::grammar::Shape;
use crate::node::Node;
use crate::scanner::Scanner;

/// How a kind drives its shape against the scanner.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Strategy {
    /// Walk the shape left to right (the base driver).
    Shape,
    /// Fold a delimiter-separated chain left-associatively.
    LeftRecursive,
    /// Parse children subordinate to the indent of the controlling token.
    IndentBlock,
}

/// A user-defined grammar rule: a name, a [`Shape`], and parse policies.
///
/// Kinds are configured builder-style and frozen into a cheap clonable
/// [`KindRef`] handle, which is what shapes reference and what parse trees
/// point back at.
///
/// ## Example
///
/// ```rust
/// use panda_parser::{kind, pat, shape, NodeKind, Scanner};
///
/// let number = NodeKind::new("Number", shape![pat(r"\d+")]).build();
/// let pair = NodeKind::new(
///     "Pair",
///     shape![kind(number.clone()), ",", kind(number)],
/// )
/// .build();
///
/// let mut scanner = Scanner::new("3, 4");
/// let node = pair.parse(&mut scanner).unwrap();
/// assert_eq!(node.text(), "3, 4");
/// ```
pub struct NodeKind {
    name: BambooString,
    shape: Shape,
    pub(crate) fallback_to_first_exp: bool,
    pub(crate) allow_incomplete_parse: bool,
    pub(crate) incomplete_parse_threshold: usize,
    pub(crate) strategy: Strategy,
    pub(crate) anonymous: bool,
    /// Synthesized left-recursion tail, resolved on first use.
    tail: OnceLock<KindRef>,
}

impl NodeKind {
    /// Create a new instance of `NodeKind` with the default policies:
    /// fallback to the first sub-expression on, incomplete parses off.
    pub fn new(name: &str, shape: Shape) -> Self {
        Self {
            name: BambooString::new(name),
            shape,
            fallback_to_first_exp: true,
            allow_incomplete_parse: false,
            incomplete_parse_threshold: 1,
            strategy: Strategy::Shape,
            anonymous: false,
            tail: OnceLock::new(),
        }
    }

    /// An unnamed kind used for inline groups and synthesized tails. Its
    /// children splice into the surrounding shape, so a partial match must
    /// fail cleanly rather than fall back to its first child.
    pub(crate) fn anonymous(shape: Shape) -> KindRef {
        let mut kind = NodeKind::new("(group)", shape);
        kind.fallback_to_first_exp = false;
        kind.anonymous = true;
        kind.build()
    }

    /// When the shape cannot complete but its first expression produced a
    /// node, return that node instead of failing. Defaults to `true`.
    pub fn fallback_to_first_exp(mut self, fallback: bool) -> Self {
        self.fallback_to_first_exp = fallback;
        self
    }

    /// Accept shapes that fail partway once enough content matched,
    /// leaving missing-token placeholders behind. Defaults to `false`.
    pub fn allow_incomplete_parse(mut self, allow: bool) -> Self {
        self.allow_incomplete_parse = allow;
        self
    }

    /// How many content children (nodes, or tokens with non-blank values)
    /// must have matched before an incomplete parse is accepted.
    /// Defaults to `1`.
    pub fn incomplete_parse_threshold(mut self, threshold: usize) -> Self {
        self.incomplete_parse_threshold = threshold;
        self
    }

    /// Parse this kind as a left-associative chain: the first expression,
    /// then one tail per sighting of its right delimiter.
    pub fn left_recursive(mut self) -> Self {
        self.strategy = Strategy::LeftRecursive;
        self
    }

    /// Parse this kind as an indentation block subordinate to the token
    /// preceding the cursor.
    pub fn indent_block(mut self) -> Self {
        self.strategy = Strategy::IndentBlock;
        self
    }

    /// Freeze into a shareable handle.
    pub fn build(self) -> KindRef {
        KindRef {
            kind: triomphe::Arc::new(self),
        }
    }

    /// The kind's name, as shown in tree dumps.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this kind was synthesized for an inline group or a chain
    /// tail. Anonymous kinds never appear in returned trees — their
    /// children splice into the parent.
    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// The kind's body.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeKind")
            .field("name", &self.name)
            .field("shape", &self.shape.len())
            .field("strategy", &self.strategy)
            .finish()
    }
}

/// A shared handle to a [`NodeKind`].
///
/// Grammars are cyclic graphs — kinds reference each other, often mutually
/// — so kinds live behind reference-counted handles. Cloning is cheap.
#[derive(Clone)]
pub struct KindRef {
    kind: triomphe::Arc<NodeKind>,
}

impl KindRef {
    /// Parse this kind against `scanner`.
    ///
    /// On success the cursor rests just past the matched region; on
    /// failure it is restored to where it was.
    pub fn parse(&self, scanner: &mut Scanner) -> Option<Node> {
        crate::parser::parse(self, scanner)
    }

    /// Identity comparison: two handles to the same kind.
    pub fn ptr_eq(&self, other: &KindRef) -> bool {
        triomphe::Arc::ptr_eq(&self.kind, &other.kind)
    }

    /// The synthesized kind that parses one chain tail (`SHAPE[1..]`, with
    /// self-references swapped for a copy of `SHAPE[0]` so the chain folds
    /// from the left). Memoized on the kind.
    pub(crate) fn tail_kind(&self) -> KindRef {
        self.kind
            .tail
            .get_or_init(|| {
                let exprs = self.shape().exprs();
                let first = exprs[0].clone();
                let rest = exprs[1..]
                    .iter()
                    .map(|expr| {
                        if expr.resolves_to_kind(self) {
                            first.clone()
                        } else {
                            expr.clone()
                        }
                    })
                    .collect();
                NodeKind::anonymous(Shape::from_exprs(rest))
            })
            .clone()
    }
}

impl Deref for KindRef {
    type Target = NodeKind;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

impl PartialEq for KindRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for KindRef {}

impl fmt::Debug for KindRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KindRef({})", self.name())
    }
}
