use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matchbook::{Order, OrderBook, OrderId, Side, TimeInForce};

fn gtc(id: u64, side: Side, price: i32, qty: u32) -> Order {
    Order::new(OrderId(id), side, TimeInForce::GoodTillCancel, price, qty)
}

fn bench_order_submission(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_submission");

    for &num_orders in [100u64, 1000, 10000].iter() {
        group.bench_with_input(
            BenchmarkId::new("non_crossing_orders", num_orders),
            &num_orders,
            |b, &num_orders| {
                b.iter(|| {
                    let mut book = OrderBook::new();
                    for i in 0..num_orders {
                        let order = if i % 2 == 0 {
                            gtc(i, Side::Buy, 10_000 - i as i32, 100)
                        } else {
                            gtc(i, Side::Sell, 10_100 + i as i32, 100)
                        };
                        black_box(book.add_order(order));
                    }
                })
            },
        );
    }

    group.finish();
}

fn bench_order_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_matching");

    for &depth in [10u64, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("crossing_sweep", depth),
            &depth,
            |b, &depth| {
                b.iter_batched(
                    || {
                        let mut book = OrderBook::new();
                        // One resting ask per level, best first.
                        for i in 0..depth {
                            book.add_order(gtc(i, Side::Sell, 10_000 + i as i32, 100));
                        }
                        book
                    },
                    |mut book| {
                        // One large bid walks every level.
                        let aggressor = gtc(
                            depth * 2,
                            Side::Buy,
                            10_000 + depth as i32,
                            depth as u32 * 100,
                        );
                        black_box(book.add_order(aggressor))
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_order_cancellation(c: &mut Criterion) {
    let mut group = c.benchmark_group("cancellation");

    for &num_orders in [100u64, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("cancel_half", num_orders),
            &num_orders,
            |b, &num_orders| {
                b.iter_batched(
                    || {
                        let mut book = OrderBook::new();
                        // Everything at one price so removal hits a long queue.
                        for i in 0..num_orders {
                            book.add_order(gtc(i, Side::Buy, 10_000, 100));
                        }
                        book
                    },
                    |mut book| {
                        for i in (0..num_orders).step_by(2) {
                            black_box(book.cancel_order(OrderId(i)));
                        }
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

fn bench_market_data_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_data");

    let mut book = OrderBook::new();
    for i in 0..1000 {
        book.add_order(gtc(i, Side::Sell, 10_000 + i as i32, 100));
        book.add_order(gtc(i + 1000, Side::Buy, 9_999 - i as i32, 100));
    }

    group.bench_function("best_bid", |b| b.iter(|| black_box(book.best_bid())));
    group.bench_function("best_ask", |b| b.iter(|| black_box(book.best_ask())));
    group.bench_function("snapshot_1000_levels", |b| {
        b.iter(|| black_box(book.snapshot()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_order_submission,
    bench_order_matching,
    bench_order_cancellation,
    bench_market_data_access
);

criterion_main!(benches);
