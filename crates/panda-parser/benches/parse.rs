use std::sync::{Arc, OnceLock};

use criterion::*;
use panda_parser::{kind, lazy, lit, pat, shape, KindRef, NodeKind, Scanner};

/// A chain grammar: `Sum = Number ("+" Number)*`, folded left.
fn sum_grammar() -> KindRef {
    let number = NodeKind::new("Number", shape![pat(r"\d+")]).build();

    let cell = Arc::new(OnceLock::<KindRef>::new());
    let inner = cell.clone();
    let sum = NodeKind::new(
        "Sum",
        shape![
            kind(number),
            "+",
            lazy(move || kind(inner.get().unwrap().clone()))
        ],
    )
    .left_recursive()
    .build();
    cell.set(sum.clone()).ok().unwrap();
    sum
}

/// A nesting grammar: `Expr = Group | Number`, `Group = "(" Expr ")"`.
fn group_grammar() -> KindRef {
    let number = NodeKind::new("Number", shape![pat(r"\d+")]).build();

    let cell = Arc::new(OnceLock::<KindRef>::new());
    let inner = cell.clone();
    let group = NodeKind::new(
        "Group",
        shape![
            lit("("),
            lazy(move || kind(inner.get().unwrap().clone())),
            lit(")")
        ],
    )
    .build();
    let expr = NodeKind::new("Expr", shape![vec![kind(group), kind(number)]]).build();
    cell.set(expr.clone()).ok().unwrap();
    expr
}

fn parse_all(grammar: &KindRef, input: &str) {
    let mut scanner = Scanner::new(input);
    let node = grammar
        .parse(&mut scanner)
        .expect("benchmark inputs parse fully");
    black_box(node.tokens().len());
}

fn bench_long_chain(c: &mut Criterion) {
    let sum = sum_grammar();
    let input = (0..200).map(|i| i.to_string()).collect::<Vec<_>>().join(" + ");

    c.bench_function("long_chain", move |b| b.iter(|| parse_all(&sum, &input)));
}

fn bench_deep_nesting(c: &mut Criterion) {
    let expr = group_grammar();
    let mut input = String::new();
    input.push_str(&"(".repeat(100));
    input.push('7');
    input.push_str(&")".repeat(100));

    c.bench_function("deep_nesting", move |b| b.iter(|| parse_all(&expr, &input)));
}

fn bench_whitespace_heavy(c: &mut Criterion) {
    let sum = sum_grammar();
    let input = (0..100)
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("   +\n   ");

    c.bench_function("whitespace_heavy", move |b| {
        b.iter(|| parse_all(&sum, &input))
    });
}

criterion_group!(
    benches,
    bench_long_chain,
    bench_deep_nesting,
    bench_whitespace_heavy
);
criterion_main!(benches);
