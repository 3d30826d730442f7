use collapse::{representatives, Agglomerative, Centroid, ScoreTable};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

fn bench_agglomerative(c: &mut Criterion) {
    let mut group = c.benchmark_group("agglomerative");

    // Synthetic report: mostly weak scores, with a few strong families.
    let mut rng = StdRng::seed_from_u64(42);
    let n = 200;
    let items: Vec<String> = (0..n).map(|i| format!("sub{}_{}.c", i % 40, i)).collect();

    let mut triples = Vec::with_capacity(n * (n - 1) / 2);
    for a in 0..n {
        for b in (a + 1)..n {
            let family = a % 40 == b % 40;
            let score: u32 = if family {
                rng.random_range(20..90)
            } else {
                rng.random_range(0..20)
            };
            triples.push((items[a].clone(), items[b].clone(), score));
        }
    }
    let scores = ScoreTable::from_triples(triples);

    group.bench_function("fit_n200_t20", |b| {
        b.iter(|| {
            let model = Agglomerative::new().with_threshold(20);
            model.fit(black_box(&items), black_box(&scores));
        })
    });

    let partition = Agglomerative::new().fit(&items, &scores);
    group.bench_function("centroid_n200", |b| {
        b.iter(|| representatives(black_box(&partition), &scores, &Centroid).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_agglomerative);
criterion_main!(benches);
