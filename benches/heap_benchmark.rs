use chromatic::collections::{AddressableHeap, FibonacciHeap, IndexedBinaryHeap};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::BinaryHeap;

const N: usize = 10_000;

/// Deterministic pseudo-random keys (xorshift).
fn keys(n: usize) -> Vec<u32> {
    let mut state = 0x9E37_79B9u32;
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state
        })
        .collect()
}

fn push_raise_pop<H: AddressableHeap<u32>>(keys: &[u32]) {
    let mut heap = H::with_ids(keys.len());
    for (id, &k) in keys.iter().enumerate() {
        heap.push(id, k >> 8);
    }
    // DSatur-like traffic: many small raises between pops
    for (id, &k) in keys.iter().enumerate().step_by(3) {
        if let Some(&current) = heap.key(id) {
            heap.increase_key(id, current + (k & 0xff));
        }
    }
    while let Some(entry) = heap.pop() {
        black_box(entry);
    }
}

fn bench_heaps(c: &mut Criterion) {
    let keys = keys(N);
    let mut group = c.benchmark_group("addressable_heap");

    group.bench_function("std_binary_heap_push_pop", |b| {
        b.iter(|| {
            let mut heap = BinaryHeap::with_capacity(N);
            for &k in &keys {
                heap.push(black_box(k));
            }
            while let Some(x) = heap.pop() {
                black_box(x);
            }
        });
    });

    group.bench_function("indexed_binary_heap_push_raise_pop", |b| {
        b.iter(|| push_raise_pop::<IndexedBinaryHeap<u32>>(&keys));
    });

    group.bench_function("fibonacci_heap_push_raise_pop", |b| {
        b.iter(|| push_raise_pop::<FibonacciHeap<u32>>(&keys));
    });

    group.finish();
}

fn bench_parallel_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("fibonacci_heap_build");
    for n in [10_000usize, 1_000_000] {
        let keys = keys(n);
        group.bench_with_input(BenchmarkId::new("sequential", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = FibonacciHeap::with_ids(keys.len());
                for (id, &k) in keys.iter().enumerate() {
                    heap.push(id, k);
                }
                black_box(heap.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("par_from_fn", n), &keys, |b, keys| {
            b.iter(|| black_box(FibonacciHeap::par_from_fn(keys.len(), 4096, |v| keys[v]).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_heaps, bench_parallel_build);
criterion_main!(benches);
