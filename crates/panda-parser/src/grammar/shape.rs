use crate::grammar::expr::Variant;
use crate::grammar::{alt, group, kind, lit, GrammarExpr, Lexeme, Pattern};
use crate::node::kind::KindRef;

/// Repetition bounds for the preceding shape item.
///
/// In a shape, a `Limits` value binds to the expression just before it:
///
/// ```rust
/// use panda_parser::{limits, pat, shape};
///
/// // One or more digits, then up to three words.
/// let shape = shape![pat(r"\d+"), pat(r"[a-z]+"), limits(0, 3)];
/// assert_eq!(shape.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Limits {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

/// One entry of the flat author list a [`Shape`] is built from: either an
/// expression, or a [`Limits`] descriptor for the previous one.
pub enum ShapeItem {
    Expr(GrammarExpr),
    Limits(Limits),
}

/// An ordered sequence of grammar expressions — the body of a node kind.
///
/// Construction folds two sugars out of the flat author list:
///
/// * a [`Limits`] descriptor applies to the expression before it;
/// * a literal/pattern expression that follows another expression (looking
///   through a descriptor) is additionally recorded as that expression's
///   right delimiter, while keeping its own place in the sequence.
#[derive(Clone, Debug)]
pub struct Shape {
    exprs: Vec<GrammarExpr>,
}

impl Shape {
    pub fn new(items: Vec<ShapeItem>) -> Self {
        let mut exprs: Vec<GrammarExpr> = Vec::new();

        for item in items {
            match item {
                ShapeItem::Expr(expr) => exprs.push(expr),
                ShapeItem::Limits(limits) => {
                    if let Some(previous) = exprs.last_mut() {
                        if let Some(min) = limits.min {
                            previous.min = min;
                        }
                        if let Some(max) = limits.max {
                            previous.max = max;
                        }
                    }
                }
            }
        }

        for position in 1..exprs.len() {
            let delimiter = exprs[position].as_lexeme().cloned();
            if let Some(delimiter) = delimiter {
                exprs[position - 1].right_delimiter = Some(delimiter);
            }
        }

        Self { exprs }
    }

    /// Build from already-normalized expressions, bypassing the sugar
    /// folding. Used for synthesized shapes (left-recursion tails).
    pub(crate) fn from_exprs(exprs: Vec<GrammarExpr>) -> Self {
        Self { exprs }
    }

    pub fn exprs(&self) -> &[GrammarExpr] {
        &self.exprs
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// The leading literal/pattern, when the shape starts with one. Drives
    /// the descent short-circuit for kind references and sub-shapes.
    pub(crate) fn lead_lexeme(&self) -> Option<&Lexeme> {
        self.exprs.first().and_then(GrammarExpr::as_lexeme)
    }
}

impl From<GrammarExpr> for ShapeItem {
    fn from(expr: GrammarExpr) -> Self {
        ShapeItem::Expr(expr)
    }
}

impl From<&str> for ShapeItem {
    fn from(literal: &str) -> Self {
        ShapeItem::Expr(lit(literal))
    }
}

impl From<Pattern> for ShapeItem {
    fn from(pattern: Pattern) -> Self {
        ShapeItem::Expr(GrammarExpr::new(Variant::Lexeme(Lexeme::Pattern(pattern))))
    }
}

/// A bare list is ordered choice, per the authoring format.
impl From<Vec<GrammarExpr>> for ShapeItem {
    fn from(branches: Vec<GrammarExpr>) -> Self {
        ShapeItem::Expr(alt(branches))
    }
}

/// A `Shape` value embeds as an inline sub-shape.
impl From<Shape> for ShapeItem {
    fn from(shape: Shape) -> Self {
        ShapeItem::Expr(group(shape))
    }
}

impl From<KindRef> for ShapeItem {
    fn from(referenced: KindRef) -> Self {
        ShapeItem::Expr(kind(referenced))
    }
}

impl From<Limits> for ShapeItem {
    fn from(limits: Limits) -> Self {
        ShapeItem::Limits(limits)
    }
}

/// Build a [`Shape`] from a comma-separated list of items.
///
/// Items are anything `ShapeItem: From` accepts: grammar expressions, bare
/// `&str` literals, [`Pattern`]s, kind handles, `Vec<GrammarExpr>`
/// alternations, nested `Shape` groups, and [`Limits`] descriptors.
///
/// ```rust
/// use panda_parser::{limits, pat, shape};
///
/// let list = shape![pat(r"\d+"), limits(1, 8), ","];
/// assert_eq!(list.len(), 2);
/// ```
#[macro_export]
macro_rules! shape {
    () => {
        $crate::Shape::new(::std::vec::Vec::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Shape::new(::std::vec![$($crate::ShapeItem::from($item)),+])
    };
}
