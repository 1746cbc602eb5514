//! The parse drivers.
//!
//! [`parse`] is the single entry point behind
//! [`KindRef::parse`](crate::KindRef::parse): it accounts for recursion
//! depth and dispatches on the kind's strategy. The base driver walks the
//! shape left to right; the specialized drivers handle left-recursive
//! chains and indentation blocks.

mod indent_block;
mod left_recursive;

use crate::node::kind::{KindRef, Strategy};
use crate::node::{Element, Node};
use crate::scanner::Scanner;

pub(crate) fn parse(kind: &KindRef, scanner: &mut Scanner) -> Option<Node> {
    scanner.recursion.consume();
    if scanner.recursion.limited() {
        scanner.recursion.release();
        return None;
    }

    let node = match kind.strategy {
        Strategy::Shape => parse_shape(kind, scanner),
        Strategy::LeftRecursive => left_recursive::parse(kind, scanner),
        Strategy::IndentBlock => indent_block::parse(kind, scanner),
    };

    scanner.recursion.release();
    node
}

/// The base driver: drive every shape position against the scanner.
///
/// Failure handling, in order of precedence:
///
/// 1. With `allow_incomplete_parse` and enough content already matched, a
///    failed position leaves a missing-token placeholder and the walk
///    continues.
/// 2. With `fallback_to_first_exp` and a sub-node from position zero in
///    hand, that node is returned alone, the cursor rewound to just after
///    it.
/// 3. Otherwise the parse fails and the cursor returns to its entry
///    position.
pub(crate) fn parse_shape(kind: &KindRef, scanner: &mut Scanner) -> Option<Node> {
    let start_cursor = scanner.cursor();
    let mut first_exp_cursor = None;
    let mut exps: Vec<Element> = Vec::new();

    for (position, expr) in kind.shape().exprs().iter().enumerate() {
        match expr.parse(scanner) {
            Some(children) => {
                if position == 0 && !expr.is_lexeme() && children.iter().any(Element::is_node) {
                    first_exp_cursor = Some(scanner.cursor());
                }
                exps.extend(children);
            }
            None => {
                if kind.allow_incomplete_parse
                    && content_count(&exps) >= kind.incomplete_parse_threshold
                {
                    exps.push(Element::Token(
                        scanner.missing_token(expr.label()),
                    ));
                    continue;
                }

                if kind.fallback_to_first_exp {
                    if let Some(cursor) = first_exp_cursor {
                        if let Some(node) = exps.into_iter().find_map(Element::into_node) {
                            scanner.set_cursor(cursor);
                            return Some(node);
                        }
                    }
                }

                scanner.set_cursor(start_cursor);
                return None;
            }
        }
    }

    Some(Node::new(kind.clone(), exps))
}

/// Children that count toward the incomplete-parse threshold: nodes, and
/// tokens carrying more than whitespace.
fn content_count(exps: &[Element]) -> usize {
    exps.iter()
        .filter(|element| match element {
            Element::Node(_) => true,
            Element::Token(token) => !token.value().trim().is_empty(),
        })
        .count()
}
