use criterion::{Criterion, black_box, criterion_group, criterion_main};
use hybrid_vec::HybridVec;

fn bench_push_boundary(c: &mut Criterion) {
    // Same inline capacity, one workload below the boundary and one past it,
    // so the spilled cost is visible against the allocation-free baseline.
    let mut group = c.benchmark_group("HybridVec<i32, 16> push");

    group.bench_function("inline only (12 of 16)", |b| {
        b.iter(|| {
            let mut v: HybridVec<i32, 16> = HybridVec::new();
            for i in 0..12 {
                v.push(black_box(i));
            }
            v
        })
    });

    group.bench_function("spilled (48 of 16)", |b| {
        b.iter(|| {
            let mut v: HybridVec<i32, 16> = HybridVec::new();
            for i in 0..48 {
                v.push(black_box(i));
            }
            v
        })
    });

    group.bench_function("std::vec::Vec baseline (48)", |b| {
        b.iter(|| {
            let mut v = Vec::new();
            for i in 0..48 {
                v.push(black_box(i));
            }
            v
        })
    });
    group.finish();
}

fn bench_access_paths(c: &mut Criterion) {
    // Checked access (`at`) against the debug-gated unchecked fast path,
    // on both storage states.
    for (label, len) in [("inline", 16usize), ("heap", 64usize)] {
        let mut group = c.benchmark_group(format!("HybridVec<i32, 16> access ({label})"));
        let v: HybridVec<i32, 16> = HybridVec::from_elem(len, 123);

        group.bench_function("at (checked)", |b| {
            b.iter(|| {
                let mut acc = 0;
                for i in 0..len {
                    acc += v.at(black_box(i)).copied().unwrap_or(0);
                }
                acc
            })
        });

        group.bench_function("get_unchecked", |b| {
            b.iter(|| {
                let mut acc = 0;
                for i in 0..len {
                    acc += unsafe { *v.get_unchecked(black_box(i)) };
                }
                acc
            })
        });
        group.finish();
    }
}

fn bench_promotion(c: &mut Criterion) {
    let mut group = c.benchmark_group("Promotion Overhead (N=8 -> 9)");
    let n_total = 9;

    group.bench_function("HybridVec Promote", |b| {
        b.iter(|| {
            let mut v: HybridVec<i32, 8> = HybridVec::new();
            for i in 0..n_total {
                v.push(black_box(i as i32));
            }
            v
        })
    });
    group.finish();
}

fn bench_resize_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resize Round Trip (8 -> 64 -> 8)");

    group.bench_function("HybridVec<i32, 8>", |b| {
        b.iter(|| {
            let mut v: HybridVec<i32, 8> = HybridVec::with_len(black_box(8));
            v.resize(black_box(64));
            v.resize(black_box(8));
            v
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_push_boundary,
    bench_access_paths,
    bench_promotion,
    bench_resize_round_trip
);
criterion_main!(benches);
