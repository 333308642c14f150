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

//!
//! Async statement interceptor chain tests.
//!
use std::sync::Arc;
use std::time::Duration;

use lookout::prelude::*;
use lookout::LookoutError;

const STATEMENT: &str = "OrderMapper.selectByCustomer";

fn select_orders() -> StatementExecution {
    let bound = BoundStatement::new("SELECT * FROM orders WHERE customer = ? AND status = ?")
        .with_mappings(["customer", "status"])
        .with_parameter_object(properties! { "customer" => 42, "status" => "OPEN" });
    StatementExecution::new(STATEMENT, ExecuteMethod::Query, bound)
}

fn chain(loggers: &RecordingLoggerFactory) -> AsyncInterceptorChain {
    let factory: Arc<dyn LoggerFactory> = Arc::new(loggers.clone());
    AsyncInterceptorBuilder::new()
        .register(Arc::new(SqlLoggingInterceptor::new(factory.clone())))
        .register(Arc::new(SqlCostInterceptor::new(factory)))
        .enable(SqlLoggingInterceptor::NAME)
        .and_then(|b| b.enable(SqlCostInterceptor::NAME))
        .and_then(|b| b.build())
        .unwrap()
}

#[tokio::test]
async fn test_async_chain_logs_literal_sql() {
    let loggers = RecordingLoggerFactory::new();
    let chain = chain(&loggers);
    let mut execution = select_orders();

    let result = chain
        .execute(&mut execution, || async {
            Ok::<_, LookoutError>(ExecuteResult::Rows(vec![Row::new(), Row::new()]))
        })
        .await
        .unwrap();

    assert_eq!(result.len(), 2);
    let lines = loggers.messages(STATEMENT);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("<==      MethodName: query Duration: "));
    assert!(lines[0].ends_with("ExecutionSQL: SELECT * FROM orders WHERE customer = 42 AND status = 'OPEN'"));
    assert!(loggers.messages("SqlCostInterceptor")[2].starts_with("<==      Total: 2, Cost: "));
}

#[tokio::test]
async fn test_async_slow_execution_duration() {
    let loggers = RecordingLoggerFactory::new();
    let chain = chain(&loggers);
    let mut execution = select_orders();

    chain
        .execute(&mut execution, || async {
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok::<_, LookoutError>(ExecuteResult::Cursor)
        })
        .await
        .unwrap();

    assert!(execution.duration().unwrap() >= Duration::from_millis(30));
    let line = &loggers.messages(STATEMENT)[0];
    let rest = &line[line.find("Duration: ").unwrap() + "Duration: ".len()..];
    let millis: u128 = rest[..rest.find(" ms").unwrap()].parse().unwrap();
    assert!(millis >= 30);
}

#[tokio::test]
async fn test_cancelled_execution_is_still_logged() {
    let loggers = RecordingLoggerFactory::new();
    let chain = chain(&loggers);
    let mut execution = select_orders();

    let outcome = tokio::time::timeout(
        Duration::from_millis(20),
        chain.execute(&mut execution, || async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, LookoutError>(ExecuteResult::None)
        }),
    )
    .await;

    assert!(outcome.is_err());
    assert!(!execution.is_resolved());
    assert_eq!(loggers.messages(STATEMENT).len(), 1);
    assert!(loggers.messages("SqlCostInterceptor").is_empty());
}
