use std::sync::{Arc, OnceLock};

use crate::bamboo::BambooString;
use crate::grammar::{Lexeme, Shape};
use crate::node::kind::KindRef;
use crate::node::{Element, Node};
use crate::scanner::Scanner;

/// One unit of grammar composition: something matchable, plus repetition
/// bounds and an optional right delimiter.
///
/// Authors rarely build these directly — the authoring helpers
/// ([`lit`](crate::lit), [`pat`](crate::pat), [`kind`](crate::kind),
/// [`alt`](crate::alt), [`group`](crate::group), [`lazy`](crate::lazy))
/// and the [`shape!`](crate::shape) macro do.
#[derive(Clone)]
pub struct GrammarExpr {
    pub(crate) variant: Variant,
    pub(crate) min: usize,
    pub(crate) max: usize,
    pub(crate) right_delimiter: Option<Lexeme>,
    pub(crate) label: Option<BambooString>,
}

#[derive(Clone)]
pub(crate) enum Variant {
    /// A literal or anchored pattern, matched by the scanner directly.
    Lexeme(Lexeme),
    /// A reference to a user-defined node kind.
    NodeRef(KindRef),
    /// Ordered choice; first branch to match wins.
    Alternation(Vec<GrammarExpr>),
    /// An inline grouped sequence, carried by an anonymous kind whose
    /// children splice into the enclosing shape.
    SubShape(KindRef),
    /// A thunk resolved on first use, for forward and recursive references.
    Lazy(LazyExpr),
}

#[derive(Clone)]
pub(crate) struct LazyExpr {
    thunk: Arc<dyn Fn() -> GrammarExpr + Send + Sync>,
    resolved: Arc<OnceLock<Box<Variant>>>,
}

impl LazyExpr {
    pub(crate) fn new(thunk: Arc<dyn Fn() -> GrammarExpr + Send + Sync>) -> Self {
        Self {
            thunk,
            resolved: Arc::new(OnceLock::new()),
        }
    }

    /// Run the thunk once and memoize its classification; clones share the
    /// memo.
    fn resolve(&self) -> &Variant {
        let resolved = self.resolved.get_or_init(|| {
            let expr = (self.thunk)();
            Box::new(match expr.variant {
                Variant::Lazy(inner) => inner.resolve().clone(),
                variant => variant,
            })
        });
        resolved.as_ref()
    }
}

impl GrammarExpr {
    pub(crate) fn new(variant: Variant) -> Self {
        Self {
            variant,
            min: 1,
            max: 1,
            right_delimiter: None,
            label: None,
        }
    }

    /// Lower repetition bound. Zero makes the expression optional.
    pub fn min(mut self, min: usize) -> Self {
        self.min = min;
        self
    }

    /// Upper repetition bound; `1` means non-repeating.
    pub fn max(mut self, max: usize) -> Self {
        self.max = max;
        self
    }

    /// Expectation message carried into missing-element diagnostics when
    /// this expression fails under an incomplete parse.
    pub fn labeled(mut self, label: &str) -> Self {
        self.label = Some(BambooString::new(label));
        self
    }

    pub(crate) fn label(&self) -> Option<&BambooString> {
        self.label.as_ref()
    }

    pub(crate) fn right_delimiter(&self) -> Option<&Lexeme> {
        self.right_delimiter.as_ref()
    }

    /// The literal/pattern payload, when this expression is one statically
    /// (lazy thunks are not forced).
    pub(crate) fn as_lexeme(&self) -> Option<&Lexeme> {
        match &self.variant {
            Variant::Lexeme(lexeme) => Some(lexeme),
            _ => None,
        }
    }

    pub(crate) fn is_lexeme(&self) -> bool {
        matches!(self.variant, Variant::Lexeme(_))
    }

    /// Whether this expression refers back to `kind`, directly or through
    /// a lazy thunk (which gets forced).
    pub(crate) fn resolves_to_kind(&self, kind: &KindRef) -> bool {
        match self.resolved() {
            Variant::NodeRef(referenced) => referenced.ptr_eq(kind),
            _ => false,
        }
    }

    fn resolved(&self) -> &Variant {
        match &self.variant {
            Variant::Lazy(lazy) => lazy.resolve(),
            variant => variant,
        }
    }

    /// Parse one occurrence-run of this expression: up to `max` matches,
    /// whitespace captured between them, stopped early by a sighted right
    /// delimiter. Fails (restoring the cursor) only when fewer than `min`
    /// occurrences matched.
    pub(crate) fn parse(&self, scanner: &mut Scanner) -> Option<Vec<Element>> {
        let start_cursor = scanner.cursor();
        let mut results: Vec<Element> = Vec::new();
        let mut occurrences = 0;

        while occurrences < self.max {
            // The delimiter check is skipped on the first iteration so at
            // least one attempt is made even with the terminator already at
            // the cursor.
            if occurrences > 0 {
                if let Some(delimiter) = &self.right_delimiter {
                    if scanner.taste(delimiter).is_some() {
                        break;
                    }
                }
            }

            while let Some(whitespace) = scanner.eat_whitespace() {
                results.push(Element::Token(whitespace));
            }

            let before = scanner.cursor();
            match self.produce(scanner) {
                Some(mut children) => {
                    // A zero-width success would repeat forever.
                    if children.is_empty() && scanner.cursor() == before {
                        break;
                    }
                    if let Some(label) = &self.label {
                        for element in &mut children {
                            if let Element::Token(token) = element {
                                if !token.is_whitespace() {
                                    token.set_expected(label);
                                }
                            }
                        }
                    }
                    results.extend(children);
                    occurrences += 1;
                }
                None if occurrences >= self.min => break,
                None => {
                    scanner.set_cursor(start_cursor);
                    return None;
                }
            }
        }

        Some(results)
    }

    /// Match a single occurrence according to this expression's
    /// classification. Alternation branches recurse here, each matched by
    /// its own classification — composite structures never reach the
    /// scanner.
    fn produce(&self, scanner: &mut Scanner) -> Option<Vec<Element>> {
        match self.resolved() {
            Variant::Lexeme(lexeme) => scanner
                .eat(lexeme)
                .map(|token| vec![Element::Token(token)]),
            Variant::NodeRef(kind) => {
                if !lead_matches(kind.shape(), scanner) {
                    return None;
                }
                kind.parse(scanner).map(|node| vec![Element::Node(node)])
            }
            Variant::Alternation(branches) => {
                branches.iter().find_map(|branch| branch.produce(scanner))
            }
            Variant::SubShape(kind) => {
                if !lead_matches(kind.shape(), scanner) {
                    return None;
                }
                kind.parse(scanner).map(Node::into_exps)
            }
            Variant::Lazy(_) => unreachable!("resolved() never yields a lazy variant"),
        }
    }
}

/// Short-circuit for kind references and sub-shapes: when the target shape
/// leads with a literal/pattern, a failed lookahead on it skips the whole
/// descent.
fn lead_matches(shape: &Shape, scanner: &mut Scanner) -> bool {
    match shape.lead_lexeme() {
        Some(lexeme) => scanner.taste(lexeme).is_some(),
        None => true,
    }
}

impl std::fmt::Debug for GrammarExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut debug = f.debug_struct("GrammarExpr");
        match &self.variant {
            Variant::Lexeme(lexeme) => debug.field("lexeme", lexeme),
            Variant::NodeRef(kind) => debug.field("kind", &kind.name()),
            Variant::Alternation(branches) => debug.field("alternation", &branches.len()),
            Variant::SubShape(kind) => debug.field("group", &kind.shape().len()),
            Variant::Lazy(_) => debug.field("lazy", &".."),
        };
        if self.min != 1 || self.max != 1 {
            debug.field("min", &self.min).field("max", &self.max);
        }
        if let Some(delimiter) = &self.right_delimiter {
            debug.field("right_delimiter", delimiter);
        }
        debug.finish()
    }
}
