//! End-to-end scenarios over a small arithmetic grammar.

use std::sync::{Arc, OnceLock};

use expect_test::expect;
use pretty_assertions::assert_eq;

use crate::{group, kind, lazy, limits, lit, pat, shape, KindRef, NodeKind, Scanner};

struct Arithmetic {
    number: KindRef,
    add: KindRef,
    expr: KindRef,
}

/// `Expr` is an ordered choice over `Group | Add | Multiply | Number`;
/// `Group` recurses back into `Expr` through a lazy thunk.
fn arithmetic() -> Arithmetic {
    let number = NodeKind::new("Number", shape![pat(r"\d+")]).build();

    let expr_cell = Arc::new(OnceLock::<KindRef>::new());
    let group = {
        let cell = expr_cell.clone();
        NodeKind::new(
            "Group",
            shape![
                lit("("),
                lazy(move || kind(cell.get().unwrap().clone())),
                lit(")")
            ],
        )
        .build()
    };

    let add = NodeKind::new(
        "Add",
        shape![kind(number.clone()), "+", kind(number.clone())],
    )
    .build();
    let multiply = NodeKind::new(
        "Multiply",
        shape![kind(number.clone()), "*", kind(number.clone())],
    )
    .build();

    let expr = NodeKind::new(
        "Expr",
        shape![vec![
            kind(group),
            kind(add.clone()),
            kind(multiply),
            kind(number.clone()),
        ]],
    )
    .build();
    expr_cell.set(expr.clone()).ok().unwrap();

    Arithmetic { number, add, expr }
}

#[test]
fn number_has_exact_positions() {
    let grammar = arithmetic();
    let mut scanner = Scanner::new("42");
    let node = grammar.number.parse(&mut scanner).unwrap();

    assert_eq!(node.text(), "42");
    assert_eq!((node.line(), node.col()), (0, 0));
    assert_eq!((node.start(), node.end()), (0, 2));
    assert_eq!(scanner.cursor(), 2);
}

#[test]
fn add_tree_snapshot() {
    let grammar = arithmetic();
    let mut scanner = Scanner::new("2+3");
    let node = grammar.add.parse(&mut scanner).unwrap();

    expect![[r#"
        - Add@0..3
            - Number@0..1
                - TOKEN@0..1 "2"
            - TOKEN@1..2 "+"
            - Number@2..3
                - TOKEN@2..3 "3"
    "#]]
    .assert_eq(&format!("{node:?}"));
}

#[test]
fn whitespace_tokens_are_part_of_the_tree() {
    let grammar = arithmetic();
    let mut scanner = Scanner::new(" 2  +   3 ");
    let node = grammar.add.parse(&mut scanner).unwrap();

    expect![[r#"
        - Add@0..9
            - WHITESPACE@0..1 " "
            - Number@1..2
                - TOKEN@1..2 "2"
            - WHITESPACE@2..4 "  "
            - TOKEN@4..5 "+"
            - WHITESPACE@5..8 "   "
            - Number@8..9
                - TOKEN@8..9 "3"
    "#]]
    .assert_eq(&format!("{node:?}"));

    let values: Vec<_> = node
        .content_tokens()
        .iter()
        .map(|token| token.value())
        .collect();
    assert_eq!(values, ["2", "+", "3"]);
    assert_eq!(node.text(), &scanner.text()[node.start()..node.end()]);
    assert_eq!(scanner.cursor(), 9);
}

#[test]
fn ordered_choice_commits_to_the_first_branch() {
    let grammar = arithmetic();
    let mut scanner = Scanner::new("(1 + 2) * 3");
    let node = grammar.expr.parse(&mut scanner).unwrap();

    // Group wins the alternation and the top level is not left-recursive,
    // so the parse covers "(1 + 2)" and stops before "* 3". Multiplying a
    // group requires a grammar layered for it.
    assert_eq!(node.text(), "(1 + 2)");
    let inner = node.exps()[0].as_node().unwrap();
    assert_eq!(inner.name(), "Group");
    assert_eq!(scanner.cursor(), 7);
}

#[test]
fn nested_groups_resolve_through_the_lazy_reference() {
    let grammar = arithmetic();
    let mut scanner = Scanner::new("((7))");
    let node = grammar.expr.parse(&mut scanner).unwrap();
    assert_eq!(node.text(), "((7))");
    assert_eq!(scanner.cursor(), 5);
}

#[test]
fn repetition_with_an_inferred_delimiter() {
    let number = NodeKind::new("Number", shape![pat(r"\d+")]).build();
    // "]" doubles as the repetition's right delimiter and the closing
    // literal of the shape.
    let list = NodeKind::new(
        "List",
        shape![lit("["), kind(number), limits(0, usize::MAX), lit("]")],
    )
    .build();

    let mut scanner = Scanner::new("[1 2 3]");
    let node = list.parse(&mut scanner).unwrap();
    let values: Vec<_> = node
        .content_tokens()
        .iter()
        .map(|token| token.value())
        .collect();
    assert_eq!(values, ["[", "1", "2", "3", "]"]);

    let mut scanner = Scanner::new("[]");
    let node = list.parse(&mut scanner).unwrap();
    assert_eq!(node.text(), "[]");
}

#[test]
fn groups_splice_into_the_parent() {
    let number = NodeKind::new("Number", shape![pat(r"\d+")]).build();
    let binding = NodeKind::new(
        "Binding",
        shape![
            lit("let"),
            pat(r"[a-z]+"),
            group(shape![lit("="), kind(number)]).min(0)
        ],
    )
    .build();

    let mut scanner = Scanner::new("let x = 5");
    let node = binding.parse(&mut scanner).unwrap();
    let values: Vec<_> = node
        .content_tokens()
        .iter()
        .map(|token| token.value())
        .collect();
    // The group's children sit directly in the Binding node; the only
    // nested node is the Number, not a wrapper for the group.
    assert_eq!(values, ["let", "x", "=", "5"]);
    assert!(node
        .exps()
        .iter()
        .filter_map(|element| element.as_node())
        .all(|child| child.name() == "Number"));

    let mut scanner = Scanner::new("let x");
    let node = binding.parse(&mut scanner).unwrap();
    let values: Vec<_> = node
        .content_tokens()
        .iter()
        .map(|token| token.value())
        .collect();
    assert_eq!(values, ["let", "x"]);
}

#[test]
fn labeled_expressions_name_their_diagnostics() {
    let number = NodeKind::new("Number", shape![pat(r"\d+")]).build();
    let add = NodeKind::new(
        "Add",
        shape![
            kind(number.clone()),
            "+",
            kind(number).labeled("a right operand")
        ],
    )
    .allow_incomplete_parse(true)
    .incomplete_parse_threshold(2)
    .build();

    let mut scanner = Scanner::new("1 +");
    let node = add.parse(&mut scanner).unwrap();
    let diagnostics = node.validate();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message(), "a right operand");
    assert_eq!((diagnostics[0].line(), diagnostics[0].col()), (0, 3));
}

#[test]
fn multiline_input_positions() {
    let grammar = arithmetic();
    let mut scanner = Scanner::new("1+2\n  3+4");

    let first = grammar.add.parse(&mut scanner).unwrap();
    assert_eq!(first.text(), "1+2");
    assert_eq!((first.line_start(), first.line_end()), (0, 0));

    let second = grammar.add.parse(&mut scanner).unwrap();
    let tokens = second.content_tokens();
    let three = tokens[0];
    assert_eq!(three.value(), "3");
    assert_eq!((three.line(), three.col()), (1, 2));
    assert_eq!(three.indent(), 2);
}
