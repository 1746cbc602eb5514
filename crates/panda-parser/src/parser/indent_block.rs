//! Indentation-block driver.
//!
//! Parses children subordinate to the token just before the cursor (the
//! *controlling* token). When the next content sits on the controlling
//! token's own line, exactly one child is parsed inline; otherwise children
//! are accumulated while their lines are indented strictly deeper than the
//! controlling line.

use crate::node::kind::KindRef;
use crate::node::{Element, Node};
use crate::parser::parse_shape;
use crate::scanner::Scanner;

pub(crate) fn parse(kind: &KindRef, scanner: &mut Scanner) -> Option<Node> {
    let entry = scanner.cursor();

    let controlling = scanner.previous_content_offset(entry)?;
    let controlling_line = scanner.line_at(controlling);
    let controlling_indent = scanner.line_indent(controlling_line);

    let next = scanner.next_content_offset(entry)?;
    let next_line = scanner.line_at(next);

    if next_line == controlling_line {
        // Inline: one child on the controlling token's line.
        return parse_shape(kind, scanner);
    }

    if scanner.line_indent(next_line) <= controlling_indent {
        return None;
    }

    let mut exps: Vec<Element> = Vec::new();
    loop {
        let Some(peek) = scanner.next_content_offset(scanner.cursor()) else {
            break;
        };
        if scanner.line_indent(scanner.line_at(peek)) <= controlling_indent {
            break;
        }

        let before = scanner.cursor();
        match parse_shape(kind, scanner) {
            Some(child) => {
                exps.extend(child.into_exps());
                if scanner.cursor() == before {
                    break;
                }
            }
            None => break,
        }
    }

    if exps.is_empty() {
        scanner.set_cursor(entry);
        return None;
    }
    Some(Node::new(kind.clone(), exps))
}
