//! Performance benchmarks for waypost-engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use waypost_engine::{flatten, paginate, plan_query, Pointer, Tree};

fn sample_tree() -> Tree {
    let rooms: serde_json::Map<String, serde_json::Value> = (0..50)
        .map(|i| {
            (
                format!("rt-{i}"),
                json!({"name": format!("room {i}"), "price": 60 + i, "occupancy": 2}),
            )
        })
        .collect();
    Tree::object([(
        "descriptionUri",
        Tree::pointer(Pointer::resolved(
            "json://description",
            Tree::from(json!({
                "name": "Grand Hotel",
                "location": {"latitude": 50.1, "longitude": 14.4},
                "currency": "EUR",
                "roomTypes": rooms,
            })),
        )),
    )])
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");

    group.bench_function("plan_query", |b| {
        b.iter(|| plan_query(black_box("managerAddress,name,location,roomTypes.name,ratePlansUri")))
    });

    group.bench_function("flatten_room_types", |b| {
        let tree = sample_tree();
        let spec = plan_query("name,roomTypes.name,roomTypes.price");
        b.iter(|| flatten(black_box(&tree), black_box(&spec.to_flatten)))
    });

    group.finish();
}

fn bench_pagination(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagination");

    let collection: Vec<String> = (0..10_000).map(|i| format!("0x{i:04x}")).collect();

    group.bench_function("paginate_front", |b| {
        b.iter(|| paginate(black_box(&collection), 25, None, |a| a.as_str()))
    });

    group.bench_function("paginate_deep_cursor", |b| {
        b.iter(|| paginate(black_box(&collection), 25, Some("0x2327"), |a| a.as_str()))
    });

    group.finish();
}

criterion_group!(benches, bench_projection, bench_pagination);
criterion_main!(benches);
