use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use viewrouter::router::{RouteEntry, RouteTable, Router};
use viewrouter::routes::app_table;
use viewrouter::WebHistory;

fn large_table(n: usize) -> RouteTable {
    let mut entries: Vec<RouteEntry> = (0..n)
        .map(|i| RouteEntry::with_params(format!("/section{i}/:id"), format!("section{i}"), "SectionView"))
        .collect();
    entries.push(RouteEntry::view("/users", "users", "UsersView"));
    RouteTable::new(entries).expect("valid table")
}

fn bench_app_routes(c: &mut Criterion) {
    let router = Router::new(Arc::new(app_table().expect("valid table")), WebHistory::default());

    c.bench_function("resolve_static", |b| {
        b.iter(|| router.resolve(black_box("/users")))
    });
    c.bench_function("resolve_param", |b| {
        b.iter(|| router.resolve(black_box("/dashboard/42")))
    });
    c.bench_function("resolve_redirect", |b| {
        b.iter(|| router.resolve(black_box("/")))
    });
    c.bench_function("resolve_no_match", |b| {
        b.iter(|| router.resolve(black_box("/unknown")))
    });
}

fn bench_table_size(c: &mut Criterion) {
    for n in [10, 100, 500] {
        let table = large_table(n);
        c.bench_function(&format!("match_last_of_{n}"), |b| {
            b.iter(|| table.match_path(black_box("/users")))
        });
    }
}

criterion_group!(benches, bench_app_routes, bench_table_size);
criterion_main!(benches);
