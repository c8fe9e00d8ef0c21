//! Verifier Benchmarks
//!
//! Price arithmetic and sort-order checks over listing-sized inputs.
//!
//! Run with: `cargo bench --bench verify_ops`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shopcheck::{
    verify_sorted, verify_subtotal, verify_tax, verify_total, CartSnapshot, LineItem, Money,
    SortMode, TaxRate,
};

fn bench_money_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("money_parse");

    let inputs = vec![
        ("bare", "29.99"),
        ("dollar", "$29.99"),
        ("labelled", "Item total: $129.94"),
        ("tax", "Tax: $10.40"),
    ];

    for (name, text) in inputs {
        group.bench_with_input(BenchmarkId::from_parameter(name), &text, |bench, text| {
            bench.iter(|| Money::parse(black_box(text)).unwrap());
        });
    }

    group.finish();
}

fn cart(size: usize) -> Vec<LineItem> {
    (0..size)
        .map(|i| LineItem::new(format!("item {i}"), Money::from_cents(799 + (i as u32 % 7) * 600)))
        .collect()
}

fn bench_price_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("price_checks");

    for size in [1, 6, 60] {
        let items = cart(size);
        let subtotal: Money = items.iter().map(|i| i.price).sum();
        let tax = subtotal.scaled(TaxRate::standard().rate()).round_cents();
        let total = subtotal + tax;

        group.bench_with_input(BenchmarkId::new("subtotal", size), &items, |bench, items| {
            bench.iter(|| verify_subtotal(black_box(items), black_box(subtotal)));
        });
        group.bench_with_input(BenchmarkId::new("tax_and_total", size), &size, |bench, _| {
            bench.iter(|| {
                verify_tax(black_box(subtotal), black_box(tax), TaxRate::standard())
                    && verify_total(black_box(subtotal), black_box(tax), black_box(total))
            });
        });
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let lines: Vec<(String, String)> = vec![
        ("Sauce Labs Backpack".into(), "$29.99".into()),
        ("Sauce Labs Bike Light".into(), "$9.99".into()),
    ];

    c.bench_function("snapshot_from_text_and_verify", |bench| {
        bench.iter(|| {
            let snapshot = CartSnapshot::from_text(
                black_box(&lines),
                "Item total: $39.98",
                "Tax: $3.20",
                "Total: $43.18",
            )
            .unwrap();
            snapshot.verify(TaxRate::standard()).all_ok()
        });
    });
}

fn bench_sort_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_checks");

    for size in [6, 100, 1000] {
        let names: Vec<String> = (0..size).map(|i| format!("Product {i:05}")).collect();
        let prices: Vec<String> = (0..size).map(|i| format!("${}.99", i + 1)).collect();

        group.bench_with_input(BenchmarkId::new("names", size), &names, |bench, names| {
            bench.iter(|| verify_sorted(black_box(names), SortMode::NameAscending).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("prices", size), &prices, |bench, prices| {
            bench.iter(|| verify_sorted(black_box(prices), SortMode::PriceAscending).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_money_parse,
    bench_price_checks,
    bench_snapshot,
    bench_sort_checks
);
criterion_main!(benches);
