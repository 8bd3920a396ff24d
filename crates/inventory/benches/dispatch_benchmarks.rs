use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, Utc};
use warehouse_core::{BinId, ItemId};
use warehouse_inventory::{Bin, Warehouse};

/// Warehouse with `bins` bins, each holding `lots_per_bin` lots of a handful of items.
fn stocked_warehouse(bins: usize, lots_per_bin: usize) -> Warehouse {
    let start = Utc::now();
    let mut warehouse = Warehouse::new();

    for b in 0..bins {
        let bin_id = BinId::new(format!("B{b}")).unwrap();
        warehouse
            .register_bin(Bin::new(bin_id.clone(), 1_000_000).unwrap())
            .unwrap();

        for l in 0..lots_per_bin {
            let item_id = ItemId::new(format!("SKU-{}", l % 4)).unwrap();
            let at = start + Duration::milliseconds((b * lots_per_bin + l) as i64);
            warehouse.add_item(&bin_id, item_id, 10, 3, at).unwrap();
        }
    }

    warehouse
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_item");
    let item = ItemId::new("SKU-0").unwrap();

    for bins in [10usize, 100, 1_000] {
        let warehouse = stocked_warehouse(bins, 8);
        // Enough to drain roughly half of the bins holding SKU-0.
        let quantity = (bins as u64 * 2 * 10) / 2;

        group.throughput(Throughput::Elements(bins as u64));
        group.bench_with_input(BenchmarkId::from_parameter(bins), &bins, |b, _| {
            b.iter_batched(
                || warehouse.clone(),
                |mut w| black_box(w.dispatch_item(&item, quantity)),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_stock_status(c: &mut Criterion) {
    let warehouse = stocked_warehouse(1_000, 8);
    c.bench_function("stock_status/1000_bins", |b| {
        b.iter(|| black_box(warehouse.stock_status()))
    });
}

criterion_group!(benches, bench_dispatch, bench_stock_status);
criterion_main!(benches);
