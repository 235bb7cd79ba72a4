//! 编码与解析性能基准测试

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use iplocations::store::{IpRangeStore, MemoryRangeIndex, builtin_seed, shard_for};
use iplocations::utils::encode;

// ============== 编码 ==============

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for ip in ["0.0.0.0", "1.160.0.0", "255.255.255.255", "not.an.ip"] {
        group.bench_with_input(BenchmarkId::from_parameter(ip), ip, |b, ip| {
            b.iter(|| encode(black_box(ip)))
        });
    }

    group.finish();
}

fn bench_shard_for(c: &mut Criterion) {
    c.bench_function("shard_for", |b| {
        b.iter(|| shard_for(black_box(27_262_976)))
    });
}

// ============== 解析 ==============

fn bench_resolve(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(IpRangeStore::new(Arc::new(MemoryRangeIndex::new())));
    rt.block_on(async {
        store.warm_up(&builtin_seed()).await.unwrap();
    });

    let mut group = c.benchmark_group("resolve/memory");
    for ip in ["1.170.12.34", "1.0.4.0", "8.8.8.8"] {
        let store = Arc::clone(&store);
        group.bench_with_input(BenchmarkId::from_parameter(ip), ip, |b, ip| {
            b.to_async(&rt).iter(|| {
                let s = Arc::clone(&store);
                async move { s.resolve(ip).await }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_shard_for, bench_resolve);
criterion_main!(benches);
