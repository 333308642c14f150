/*
 *
 *  *
 *  *      Copyright (c) 2018-2025, SnackCloud All rights reserved.
 *  *
 *  *   Redistribution and use in source and binary forms, with or without
 *  *   modification, are permitted provided that the following conditions are met:
 *  *
 *  *   Redistributions of source code must retain the above copyright notice,
 *  *   this list of conditions and the following disclaimer.
 *  *   Redistributions in binary form must reproduce the above copyright
 *  *   notice, this list of conditions and the following disclaimer in the
 *  *   documentation and/or other materials provided with the distribution.
 *  *   Neither the name of the www.snackcloud.cn developer nor the names of its
 *  *   contributors may be used to endorse or promote products derived from
 *  *   this software without specific prior written permission.
 *  *   Author: SnackCloud
 *  *
 *
 */

// benches/reconstruct.rs
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use lookout::prelude::*;

fn bound_with_params(count: usize) -> BoundStatement {
    let placeholders = vec!["?"; count].join(", ");
    let sql = format!("INSERT INTO events (c) VALUES ({})", placeholders);
    let mut params = properties! {};
    let mut mappings = Vec::with_capacity(count);
    for i in 0..count {
        let name = format!("p{}", i);
        let value = if i % 2 == 0 {
            SqlValue::Bigint(i as i64)
        } else {
            SqlValue::Text(format!("value-{}", i))
        };
        params.insert(name.clone(), value);
        mappings.push(name);
    }
    BoundStatement::new(sql)
        .with_mappings(mappings)
        .with_parameter_object(params)
}

pub fn bench_reconstruct(c: &mut Criterion) {
    let registry = TypeHandlerRegistry::default();

    let mut group = c.benchmark_group("reconstruct");
    group.measurement_time(Duration::from_secs(5));

    // Benchmark: literal SQL for growing parameter counts
    for count in [1usize, 10, 100].iter() {
        let bound = bound_with_params(*count);
        group.bench_with_input(BenchmarkId::new("to_literal_sql", count), &bound, |b, bound| {
            b.iter(|| black_box(bound.to_literal_sql(black_box(&registry))));
        });
    }

    group.finish();
}

pub fn bench_chain(c: &mut Criterion) {
    let loggers: Arc<dyn LoggerFactory> = Arc::new(TracingLoggerFactory::new());
    let chain = InterceptorBuilder::new()
        .register(Arc::new(SqlLoggingInterceptor::new(loggers.clone())))
        .register(Arc::new(SqlCostInterceptor::new(loggers)))
        .enable(SqlLoggingInterceptor::NAME)
        .and_then(|b| b.enable(SqlCostInterceptor::NAME))
        .and_then(|b| b.build())
        .unwrap();
    let bound = bound_with_params(10);

    // Benchmark: full interceptor chain around a no-op statement
    c.bench_function("chain_execute", |b| {
        b.iter(|| {
            let mut execution = StatementExecution::new("Bench.insert", ExecuteMethod::Update, bound.clone());
            black_box(chain.execute(&mut execution, || Ok(ExecuteResult::AffectedRows(1)))).unwrap();
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(50);
    targets = bench_reconstruct, bench_chain
);
criterion_main!(benches);
