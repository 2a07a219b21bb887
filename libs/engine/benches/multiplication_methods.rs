//! Trace-building cost of each multiplication method
//!
//! Every method builds its full step trace, so these numbers measure the
//! narration as much as the arithmetic.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ganita_engine::{default_registry, Operands, Operation};

const OPERAND_SIZES: [(i64, i64); 3] = [(47, 36), (98_765, 43_210), (987_654_321, 123_456_789)];

fn bench_multiplication_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiplication");
    for method in default_registry().get_all_methods(Operation::Multiplication) {
        if method.id() == "vedic-ekadhikena" {
            continue;
        }
        for (num1, num2) in OPERAND_SIZES {
            let operands = Operands::pair(num1, num2);
            group.bench_with_input(
                BenchmarkId::new(method.id(), num1.to_string().len()),
                &operands,
                |b, operands| b.iter(|| method.calculate(criterion::black_box(operands))),
            );
        }
    }
    group.finish();
}

fn bench_ekadhikena(c: &mut Criterion) {
    let method = default_registry()
        .get_method(Operation::Multiplication, "vedic-ekadhikena")
        .expect("registered");
    c.bench_function("vedic-ekadhikena/square_995", |b| {
        b.iter(|| method.calculate(criterion::black_box(&Operands::single(995))))
    });
}

fn bench_division_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("division");
    let operands = Operands::pair(987_654_321, 9_876);
    for method in default_registry().get_all_methods(Operation::Division) {
        if method.id() == "synthetic" {
            continue;
        }
        group.bench_with_input(BenchmarkId::from_parameter(method.id()), &operands, |b, operands| {
            b.iter(|| method.calculate(criterion::black_box(operands)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_multiplication_methods,
    bench_ekadhikena,
    bench_division_methods
);
criterion_main!(benches);
