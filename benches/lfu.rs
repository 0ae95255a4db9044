use containerkit::policy::lfu::LfuCache;
use containerkit::traits::IdCache;
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

fn bench_lfu_get_hot(c: &mut Criterion) {
    let cache = LfuCache::new(1024);
    for i in 0..1024u64 {
        cache.add_by_id(i.to_string(), i).unwrap();
    }
    let keys: Vec<String> = (0..64).map(|i| i.to_string()).collect();

    c.bench_function("lfu_get_hot", |b| {
        b.iter(|| {
            for id in &keys {
                let _ = std::hint::black_box(cache.get(std::hint::black_box(id)));
            }
        })
    });
}

fn bench_lfu_eviction_churn(c: &mut Criterion) {
    c.bench_function("lfu_eviction_churn", |b| {
        b.iter_batched(
            || {
                let cache = LfuCache::new(128);
                for i in 0..128u64 {
                    cache.add_by_id(format!("warm{i}"), i).unwrap();
                }
                cache
            },
            |cache| {
                for i in 0..512u64 {
                    cache.add_by_id(i.to_string(), i).unwrap();
                    if i % 4 == 0 {
                        let _ = cache.get(&i.to_string());
                    }
                }
                std::hint::black_box(cache)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_lfu_get_hot, bench_lfu_eviction_churn);
criterion_main!(benches);
