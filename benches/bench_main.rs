#![allow(clippy::unwrap_used)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qlisp::{evaluator, parser, reader};

const SIMPLE: &str = "(+ 1 2)";
const NESTED: &str = "(* (+ 1 2) (^ 2 (- 5 2)))";
const LISTY: &str = "(eval (join {head} (list {1 2 3})))";

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Parsing");

    group.bench_function("Simple", |b| b.iter(|| parser::parse(black_box(SIMPLE))));
    group.bench_function("Nested", |b| b.iter(|| parser::parse(black_box(NESTED))));
    group.bench_function("Listy", |b| b.iter(|| parser::parse(black_box(LISTY))));

    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Evaluation");

    let mut env = evaluator::create_global_env();
    let simple = reader::read(&parser::parse(SIMPLE).unwrap());
    let nested = reader::read(&parser::parse(NESTED).unwrap());
    let listy = reader::read(&parser::parse(LISTY).unwrap());

    group.bench_function("Eval Simple", |b| {
        b.iter(|| evaluator::eval(&mut env, black_box(simple.clone())))
    });
    group.bench_function("Eval Nested", |b| {
        b.iter(|| evaluator::eval(&mut env, black_box(nested.clone())))
    });
    group.bench_function("Eval Listy", |b| {
        b.iter(|| evaluator::eval(&mut env, black_box(listy.clone())))
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_evaluation);
criterion_main!(benches);
