//! Throughput benchmarks for respkv
//!
//! Measures the store on its own, command dispatch, and frame decoding.

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use respkv::protocol::{Command, FrameDecoder};
use respkv::{Dispatcher, Store};
use std::sync::Arc;
use std::time::Duration;

fn bench_set(c: &mut Criterion) {
    let store = Arc::new(Store::new());

    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_small", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = Bytes::from(format!("key:{}", i));
            store.set(key, Bytes::from("small_value"));
            i += 1;
        });
    });

    group.bench_function("set_large", |b| {
        let mut i = 0u64;
        let value = Bytes::from("x".repeat(64 * 1024)); // 64KB value
        b.iter(|| {
            let key = Bytes::from(format!("key:{}", i));
            store.set(key, value.clone());
            i += 1;
        });
    });

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let store = Arc::new(Store::new());

    for i in 0..100_000 {
        store.set(
            Bytes::from(format!("key:{}", i)),
            Bytes::from(format!("value:{}", i)),
        );
    }

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_existing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i % 100_000);
            black_box(store.get(key.as_bytes()));
            i += 1;
        });
    });

    group.bench_function("get_missing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("missing:{}", i);
            black_box(store.get(key.as_bytes()));
            i += 1;
        });
    });

    group.finish();
}

/// 80% GET, 20% SET through the dispatcher
fn bench_dispatch(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(Arc::new(Store::new()));

    for i in 0..10_000 {
        dispatcher.execute(&Command::from_parts([
            Bytes::from("SET"),
            Bytes::from(format!("key:{}", i)),
            Bytes::from(format!("value:{}", i)),
        ]));
    }

    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    group.bench_function("80_read_20_write", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let command = if i % 5 == 0 {
                Command::from_parts([
                    Bytes::from("SET"),
                    Bytes::from(format!("new:{}", i)),
                    Bytes::from("value"),
                ])
            } else {
                Command::from_parts([Bytes::from("GET"), Bytes::from(format!("key:{}", i % 10_000))])
            };
            black_box(dispatcher.execute(&command));
            i += 1;
        });
    });

    group.bench_function("ping", |b| {
        let command = Command::from_parts(["PING"]);
        b.iter(|| black_box(dispatcher.execute(&command)));
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    let small = Command::from_parts(["SET", "user:101", "Ariz"]).encode();
    let large = Command::from_parts([
        Bytes::from("SET"),
        Bytes::from("blob"),
        Bytes::from("x".repeat(64 * 1024)),
    ])
    .encode();

    let mut group = c.benchmark_group("decode");

    group.throughput(Throughput::Bytes(small.len() as u64));
    group.bench_function("decode_small", |b| {
        b.iter(|| {
            runtime.block_on(async {
                let mut decoder = FrameDecoder::new(&small[..]);
                black_box(decoder.decode().await.unwrap())
            })
        });
    });

    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("decode_64kb", |b| {
        b.iter(|| {
            runtime.block_on(async {
                let mut decoder = FrameDecoder::new(&large[..]);
                black_box(decoder.decode().await.unwrap())
            })
        });
    });

    group.finish();
}

fn bench_concurrent(c: &mut Criterion) {
    use std::thread;

    let mut group = c.benchmark_group("concurrent");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("4_threads_mixed", |b| {
        b.iter(|| {
            let store = Arc::new(Store::new());
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let store = Arc::clone(&store);
                    thread::spawn(move || {
                        for i in 0..10_000 {
                            let key = Bytes::from(format!("key:{}:{}", t, i));
                            store.set(key.clone(), Bytes::from("value"));
                            store.get(&key);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(store.len());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_set,
    bench_get,
    bench_dispatch,
    bench_decode,
    bench_concurrent,
);

criterion_main!(benches);
