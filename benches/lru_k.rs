use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lrukit::policy::lru_k::LruKCache;

fn bench_lru_k_admission(c: &mut Criterion) {
    let mut group = c.benchmark_group("lru_k_admission");
    for k in [1usize, 2, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| {
                let cache = LruKCache::new(1024, 4096, k);
                for round in 0..k as u64 {
                    for key in 0..1024u64 {
                        cache.put(std::hint::black_box(key), round);
                    }
                }
                std::hint::black_box(cache.len())
            })
        });
    }
    group.finish();
}

fn bench_lru_k_get_hit(c: &mut Criterion) {
    let cache = LruKCache::new(1024, 4096, 2);
    for key in 0..1024u64 {
        cache.put(key, key);
        cache.put(key, key);
    }
    c.bench_function("lru_k_get_hit", |b| {
        let mut key = 0u64;
        b.iter(|| {
            key = (key + 1) % 1024;
            std::hint::black_box(cache.get(&std::hint::black_box(key)))
        })
    });
}

fn bench_lru_k_scan(c: &mut Criterion) {
    c.bench_function("lru_k_one_shot_scan", |b| {
        let cache = LruKCache::new(1024, 4096, 2);
        let mut next = 0u64;
        b.iter(|| {
            next += 1;
            cache.put(std::hint::black_box(next), next);
        })
    });
}

criterion_group!(
    benches,
    bench_lru_k_admission,
    bench_lru_k_get_hit,
    bench_lru_k_scan
);
criterion_main!(benches);
