//! Grammar authoring: the building blocks shapes are made of.
//!
//! A node kind's body is a [`Shape`] — an ordered list of [`GrammarExpr`]s.
//! The helpers here construct the expression variants; the [`shape!`]
//! macro assembles them.
//!
//! [`shape!`]: crate::shape

pub(crate) mod expr;
mod lexeme;
mod shape;

use std::sync::Arc;

pub use expr::GrammarExpr;
pub use lexeme::{Lexeme, Pattern};
pub use shape::{Limits, Shape, ShapeItem};

use crate::node::kind::{KindRef, NodeKind};
use expr::{LazyExpr, Variant};

/// A literal expression. Panics on an empty literal — the scanner cannot
/// make progress on one.
pub fn lit(value: &str) -> GrammarExpr {
    GrammarExpr::new(Variant::Lexeme(Lexeme::from(value)))
}

/// An anchored pattern expression.
///
/// Panics when the pattern does not compile or can match the empty string;
/// use [`Pattern::new`] for the fallible form.
pub fn pat(src: &str) -> GrammarExpr {
    let pattern = Pattern::new(src).unwrap_or_else(|error| panic!("{error}"));
    GrammarExpr::new(Variant::Lexeme(Lexeme::Pattern(pattern)))
}

/// A reference to a node kind.
pub fn kind(referenced: KindRef) -> GrammarExpr {
    GrammarExpr::new(Variant::NodeRef(referenced))
}

/// A forward reference: the thunk runs once, at first use, and its result
/// is memoized. This is the escape hatch for recursive grammars, where a
/// kind must be mentioned before (or while) it is defined.
pub fn lazy<F>(thunk: F) -> GrammarExpr
where
    F: Fn() -> GrammarExpr + Send + Sync + 'static,
{
    GrammarExpr::new(Variant::Lazy(LazyExpr::new(Arc::new(thunk))))
}

/// Ordered choice: branches are tried left to right and the first match
/// wins. Panics on an empty branch list.
pub fn alt<I>(branches: I) -> GrammarExpr
where
    I: IntoIterator<Item = GrammarExpr>,
{
    let branches: Vec<GrammarExpr> = branches.into_iter().collect();
    assert!(!branches.is_empty(), "alternations must have a branch");
    GrammarExpr::new(Variant::Alternation(branches))
}

/// An inline grouped sequence. Unlike an alternation, every expression of
/// the group must match, and the matched children splice into the
/// enclosing shape.
pub fn group(shape: Shape) -> GrammarExpr {
    GrammarExpr::new(Variant::SubShape(NodeKind::anonymous(shape)))
}

/// Repetition bounds for the preceding shape item.
pub fn limits(min: usize, max: usize) -> Limits {
    Limits {
        min: Some(min),
        max: Some(max),
    }
}
