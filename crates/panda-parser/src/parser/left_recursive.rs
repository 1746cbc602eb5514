//! Left-associative chain driver.
//!
//! A left-recursive kind has a shape of the form `[operand, delimiter, …]`:
//! the shape sugar makes the delimiter the operand's right delimiter. The
//! driver parses the operand once, then folds one tail per delimiter
//! sighting, so `1+2+3` becomes `((1+2)+3)` without unbounded recursion.

use crate::node::kind::KindRef;
use crate::node::{Element, Node};
use crate::scanner::Scanner;

pub(crate) fn parse(kind: &KindRef, scanner: &mut Scanner) -> Option<Node> {
    let exprs = kind.shape().exprs();
    let first = exprs.first()?;

    let entry = scanner.cursor();
    let children = first.parse(scanner)?;
    let Some(mut left) = children.into_iter().find_map(Element::into_node) else {
        scanner.set_cursor(entry);
        return None;
    };

    let Some(delimiter) = first.right_delimiter() else {
        return Some(left);
    };
    let tail_kind = kind.tail_kind();

    loop {
        let before = scanner.cursor();
        if scanner.taste(delimiter).is_none() {
            break;
        }

        match tail_kind.parse(scanner) {
            Some(tail) => {
                let advanced = scanner.cursor() > before;
                let mut exps = vec![Element::Node(left)];
                exps.extend(tail.into_exps());
                left = Node::new(kind.clone(), exps);
                // An all-optional tail can succeed without consuming; one
                // more sighting of the delimiter would then loop forever.
                if !advanced {
                    break;
                }
            }
            None => {
                scanner.set_cursor(before);
                break;
            }
        }
    }

    Some(left)
}
