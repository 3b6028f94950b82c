//! Criterion benches for word application on curve words.
//! Focus: genus in {1, 2, 4}, random Humphries words of 4–12 letters. Curve
//! words grow exponentially with the word, so lengths stay short.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p dehn

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use dehn::generators::{random_word, ReplayToken};
use dehn::{Handedness, MappingClassWord, SurfaceModel};

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_apply");
    for &genus in &[1usize, 2, 4] {
        let model = SurfaceModel::closed(genus).unwrap();
        let seed = model.generic_seed().unwrap();
        for &len in &[4usize, 8, 12] {
            let word = random_word(&model, len, ReplayToken { seed: 42, index: 0 }).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("g{genus}"), len),
                &word,
                |b, w| b.iter(|| w.apply(&seed).unwrap()),
            );
        }
    }
    group.finish();
}

fn bench_twist(c: &mut Criterion) {
    let mut group = c.benchmark_group("twist");
    let model = SurfaceModel::closed(4).unwrap();
    let twist = model.reference().generator(1, Handedness::Left).unwrap();
    // A long curve: the seed after a random word.
    let word = random_word(&model, 12, ReplayToken { seed: 7, index: 1 }).unwrap();
    let big = word.apply(&model.generic_seed().unwrap()).unwrap();
    group.bench_function(BenchmarkId::new("apply_power", "e=1"), |b| {
        b.iter(|| twist.apply_power(&big, 1).unwrap())
    });
    group.bench_function(BenchmarkId::new("apply_power", "e=16"), |b| {
        b.iter(|| twist.apply_power(&big, 16).unwrap())
    });
    group.bench_function(BenchmarkId::new("crossings", "c2"), |b| {
        b.iter(|| twist.crossings(&big).unwrap())
    });
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_compose");
    let model = SurfaceModel::closed(3).unwrap();
    for &len in &[50usize, 500] {
        group.bench_with_input(BenchmarkId::new("compose_inverse", len), &len, |b, &len| {
            b.iter_batched(
                || random_word(&model, len, ReplayToken { seed: 3, index: len as u64 }).unwrap(),
                |w: MappingClassWord| {
                    let _ = w.compose(&w.inverse()).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_apply, bench_twist, bench_compose);
criterion_main!(benches);
