//! Criterion timings for rendering warehouse statements and decoding SHOW rows, the two
//! pieces of work the client does locally on every call.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use warehouse_client::prelude::*;
use warehouse_client::test_utils::WarehouseRowBuilder;
use warehouse_client::warehouses::WarehouseStatement;

fn full_create_options() -> CreateWarehouseOptions {
    let tag = |name: &str| SchemaObjectIdentifier::new("BENCH_DB", "PUBLIC", name);
    CreateWarehouseOptions {
        or_replace: Some(true),
        warehouse_type: Some(WarehouseType::Standard),
        warehouse_size: Some(WarehouseSize::Small),
        max_cluster_count: Some(8),
        min_cluster_count: Some(2),
        scaling_policy: Some(ScalingPolicy::Economy),
        auto_suspend: Some(1000),
        auto_resume: Some(true),
        initially_suspended: Some(false),
        comment: Some("it's a 'quoted' comment with \\ backslashes".into()),
        enable_query_acceleration: Some(true),
        query_acceleration_max_scale_factor: Some(90),
        max_concurrency_level: Some(10),
        statement_queued_timeout_in_seconds: Some(2000),
        statement_timeout_in_seconds: Some(3000),
        tag: vec![
            TagAssociation::new(tag("COST_CENTER"), "analytics"),
            TagAssociation::new(tag("OWNER"), "data-platform"),
        ],
        ..Default::default()
    }
}

fn bench_render(c: &mut Criterion) {
    let id = AccountObjectIdentifier::new("BENCH_WH");
    let create = full_create_options();
    let alter = AlterWarehouseOptions {
        set: Some(WarehouseSet {
            warehouse_size: Some(WarehouseSize::Medium),
            wait_for_completion: Some(true),
            auto_suspend: Some(60),
            ..Default::default()
        }),
        ..Default::default()
    };

    let mut group = c.benchmark_group("render");
    group.bench_function("create_full", |b| {
        b.iter(|| {
            let statement = WarehouseStatement::Create {
                id: black_box(&id),
                opts: Some(black_box(&create)),
            };
            black_box(statement.render())
        });
    });
    group.bench_function("create_bare", |b| {
        b.iter(|| {
            let statement = WarehouseStatement::Create {
                id: black_box(&id),
                opts: None,
            };
            black_box(statement.render())
        });
    });
    group.bench_function("alter_set", |b| {
        b.iter(|| {
            let statement = WarehouseStatement::Alter {
                id: black_box(&id),
                opts: black_box(&alter),
            };
            black_box(statement.render())
        });
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let rows: Vec<CustomDbRow> = (0..100)
        .map(|i| {
            WarehouseRowBuilder::new(format!("WH_{i}"))
                .size(WarehouseSize::Large)
                .comment("bench")
                .build()
        })
        .collect();

    c.bench_function("decode_show_100_rows", |b| {
        b.iter(|| {
            let decoded: Result<Vec<Warehouse>, Error> =
                black_box(&rows).iter().map(Warehouse::try_from).collect();
            black_box(decoded)
        });
    });
}

criterion_group!(benches, bench_render, bench_decode);
criterion_main!(benches);
