//! 版本化存储性能基准测试

use std::hint::black_box;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use relinker::services::confirm::confirmation_link;
use relinker::storage::{LinkStore, Record, VersionedStore};

fn populated_store(codes: usize, versions: usize) -> VersionedStore {
    let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut store = VersionedStore::new();
    for v in 0..versions {
        for c in 0..codes {
            let created_at = t0 + Duration::seconds(v as i64);
            // 一半的短码在一周后过期
            let expires_at = (c % 2 == 0).then(|| created_at + Duration::weeks(1));
            store.append(Record::new(
                format!("code{}", c),
                format!("https://example.com/{}/{}", c, v),
                created_at,
                expires_at,
            ));
        }
    }
    store
}

// ============== resolve 基准测试 ==============

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/resolve");
    let now = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();

    for versions in [1usize, 16, 256] {
        let store = populated_store(1_000, versions);
        group.bench_with_input(BenchmarkId::new("hit", versions), &store, |b, store| {
            b.iter(|| black_box(store.resolve(black_box("code500"), now)));
        });
    }

    let store = populated_store(1_000, 1);
    group.bench_function("miss", |b| {
        b.iter(|| black_box(store.resolve(black_box("absent"), now)));
    });

    group.finish();
}

// ============== list_current 基准测试 ==============

fn bench_list_current(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/list_current");
    let now = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();

    for codes in [100usize, 10_000] {
        let store = populated_store(codes, 4);
        group.bench_with_input(BenchmarkId::from_parameter(codes), &store, |b, store| {
            b.iter(|| black_box(store.list_current(now)));
        });
    }

    group.finish();
}

// ============== 读写锁下的并发读取 ==============

fn bench_guarded_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("store/guarded");
    let now = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
    let store = Arc::new(LinkStore::new(populated_store(1_000, 8)));

    group.bench_function("resolve_4_threads", |b| {
        b.iter(|| {
            std::thread::scope(|scope| {
                for t in 0..4 {
                    let store = Arc::clone(&store);
                    scope.spawn(move || {
                        for i in 0..256 {
                            let code = format!("code{}", (i * 7 + t) % 1_000);
                            black_box(store.resolve(&code, now));
                        }
                    });
                }
            });
        });
    });

    group.finish();
}

// ============== confirmation_link 基准测试 ==============

fn bench_confirmation_link(c: &mut Criterion) {
    c.bench_function("confirm/link", |b| {
        b.iter(|| {
            black_box(confirmation_link(
                black_box("/create/abc"),
                black_box("url=https%3A%2F%2Fexample.com%2Fpath%3Fq%3D1&week&token=stale"),
                black_box("Qk9Pb0J5ZXRoaXNpc2F0b2tlbg"),
            ))
        });
    });
}

criterion_group!(
    benches,
    bench_resolve,
    bench_list_current,
    bench_guarded_reads,
    bench_confirmation_link
);
criterion_main!(benches);
