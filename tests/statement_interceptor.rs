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
//! Statement interceptor chain tests.
//!
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::NaiveDate;
use lookout::prelude::*;
use lookout::LookoutError;

const STATEMENT: &str = "UserMapper.updateStatus";

pub struct User {
    pub id: i64,
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

impl PropertySource for User {
    fn type_name(&self) -> &str {
        "User"
    }

    fn property(&self, name: &str) -> Option<SqlValue> {
        match name {
            "id" => Some(SqlValue::Bigint(self.id)),
            "name" => Some(SqlValue::Text(self.name.clone())),
            "birthday" => Some(self.birthday.map(SqlValue::Date).unwrap_or(SqlValue::Null)),
            _ => None,
        }
    }
}

fn update_user() -> StatementExecution {
    let user = User {
        id: 7,
        name: "Bob".to_string(),
        birthday: None,
    };
    let bound = BoundStatement::new("UPDATE users\n   SET name = ?, birthday = ?\n WHERE id = ?")
        .with_mappings(["name", "birthday", "id"])
        .with_parameter_object(ParameterObject::source(user));
    StatementExecution::new(STATEMENT, ExecuteMethod::Update, bound)
}

fn full_chain(loggers: &RecordingLoggerFactory) -> InterceptorChain {
    let factory: Arc<dyn LoggerFactory> = Arc::new(loggers.clone());
    InterceptorBuilder::new()
        .register(Arc::new(SqlLoggingInterceptor::new(factory.clone())))
        .register(Arc::new(SqlCostInterceptor::new(factory)))
        .enable(SqlLoggingInterceptor::NAME)
        .and_then(|b| b.enable(SqlCostInterceptor::NAME))
        .and_then(|b| b.build())
        .unwrap()
}

fn logged_millis(line: &str) -> u128 {
    let rest = &line[line.find("Duration: ").unwrap() + "Duration: ".len()..];
    rest[..rest.find(" ms").unwrap()].parse().unwrap()
}

/// Counts how often the wrapped call is reached through it.
struct CountingInterceptor {
    calls: AtomicUsize,
}

impl StatementInterceptor for CountingInterceptor {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn intercept(&self, invocation: Invocation<'_>) -> lookout::Result<ExecuteResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        invocation.proceed()
    }
}

#[test]
fn test_builder_only_chains_enabled_interceptors() {
    let loggers: Arc<dyn LoggerFactory> = Arc::new(RecordingLoggerFactory::new());
    let builder = InterceptorBuilder::new()
        .register(Arc::new(SqlLoggingInterceptor::new(loggers.clone())))
        .register(Arc::new(SqlCostInterceptor::new(loggers)))
        .enable(SqlLoggingInterceptor::NAME)
        .unwrap();

    assert!(builder.is_registered(SqlCostInterceptor::NAME));
    assert!(!builder.is_enabled(SqlCostInterceptor::NAME));
    let chain = builder.build().unwrap();
    assert_eq!(chain.names(), vec![SqlLoggingInterceptor::NAME]);
}

#[test]
fn test_builder_orders_and_rejects_unknown_names() {
    let loggers: Arc<dyn LoggerFactory> = Arc::new(RecordingLoggerFactory::new());
    let builder = InterceptorBuilder::new()
        .register(Arc::new(SqlLoggingInterceptor::new(loggers.clone())))
        .register(Arc::new(SqlCostInterceptor::new(loggers)));

    assert!(matches!(builder_enable_missing(), Err(LookoutError::Interceptor(_))));

    let chain = builder
        .enable(SqlLoggingInterceptor::NAME)
        .and_then(|b| b.enable(SqlCostInterceptor::NAME))
        .and_then(|b| b.with_order(SqlLoggingInterceptor::NAME, 1))
        .and_then(|b| b.build())
        .unwrap();
    assert_eq!(chain.names(), vec![SqlLoggingInterceptor::NAME, SqlCostInterceptor::NAME]);
}

fn builder_enable_missing() -> lookout::Result<InterceptorBuilder> {
    InterceptorBuilder::new().enable("missing")
}

#[test]
fn test_builder_enforces_max_depth() {
    let loggers: Arc<dyn LoggerFactory> = Arc::new(RecordingLoggerFactory::new());
    let result = InterceptorBuilder::new()
        .with_chain_config(InterceptorConfig { max_interceptor_depth: 1 })
        .register(Arc::new(SqlLoggingInterceptor::new(loggers.clone())))
        .register(Arc::new(SqlCostInterceptor::new(loggers)))
        .enable(SqlLoggingInterceptor::NAME)
        .and_then(|b| b.enable(SqlCostInterceptor::NAME))
        .and_then(|b| b.build());

    assert!(matches!(result, Err(LookoutError::Interceptor(_))));
}

#[test]
fn test_composed_interceptors_log_and_return_result_unchanged() {
    let loggers = RecordingLoggerFactory::new();
    let chain = full_chain(&loggers);
    let mut execution = update_user();

    let result = chain
        .execute(&mut execution, || Ok(ExecuteResult::AffectedRows(1)))
        .unwrap();

    assert_eq!(result, ExecuteResult::AffectedRows(1));
    assert!(execution.is_resolved());

    let statement = loggers.messages(STATEMENT);
    assert_eq!(statement.len(), 1);
    assert!(statement[0].starts_with("<==      MethodName: update Duration: "));
    assert!(statement[0].ends_with("ExecutionSQL: UPDATE users\n   SET name = 'Bob', birthday = null\n WHERE id = 7"));

    let cost = loggers.messages("SqlCostInterceptor");
    assert_eq!(cost[0], format!("==> Mapper: {}", STATEMENT));
    assert_eq!(cost[1], "==> SQL: UPDATE users SET name = ?, birthday = ? WHERE id = ?");
    assert!(cost[2].starts_with("<==      Total: 1, Cost: "));
}

#[test]
fn test_slow_execution_logs_at_least_its_duration() {
    let loggers = RecordingLoggerFactory::new();
    let chain = full_chain(&loggers);
    let mut execution = update_user();

    chain
        .execute(&mut execution, || {
            thread::sleep(Duration::from_millis(30));
            Ok(ExecuteResult::AffectedRows(1))
        })
        .unwrap();

    assert!(execution.duration().unwrap() >= Duration::from_millis(30));
    assert!(logged_millis(&loggers.messages(STATEMENT)[0]) >= 30);
}

#[test]
fn test_execution_error_passes_through_after_logging() {
    let loggers = RecordingLoggerFactory::new();
    let chain = full_chain(&loggers);
    let mut execution = update_user();

    let err = chain
        .execute(&mut execution, || {
            Err(LookoutError::execution(std::io::Error::new(
                std::io::ErrorKind::Other,
                "deadlock detected",
            )))
        })
        .unwrap_err();

    assert!(err.is_execution());
    assert_eq!(err.to_string(), "deadlock detected");
    assert_eq!(loggers.messages(STATEMENT).len(), 1);
    assert!(loggers.messages("SqlCostInterceptor").is_empty());
}

#[test]
fn test_method_restriction_skips_interceptor() {
    let loggers = RecordingLoggerFactory::new();
    let factory: Arc<dyn LoggerFactory> = Arc::new(loggers.clone());
    let chain = InterceptorBuilder::new()
        .register(Arc::new(SqlLoggingInterceptor::new(factory)))
        .enable(SqlLoggingInterceptor::NAME)
        .and_then(|b| b.with_methods(SqlLoggingInterceptor::NAME, &[ExecuteMethod::Query]))
        .and_then(|b| b.build())
        .unwrap();
    let mut execution = update_user();

    chain
        .execute(&mut execution, || Ok(ExecuteResult::AffectedRows(1)))
        .unwrap();

    assert!(loggers.is_empty());
    assert!(execution.is_resolved());
}

#[test]
fn test_added_interceptor_reaches_target_once_and_can_be_removed() {
    let counting = Arc::new(CountingInterceptor {
        calls: AtomicUsize::new(0),
    });
    let mut chain = InterceptorChain::new();
    chain.add_interceptor(counting.clone()).unwrap();
    let target_calls = AtomicUsize::new(0);
    let mut execution = update_user();

    chain
        .execute(&mut execution, || {
            target_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ExecuteResult::None)
        })
        .unwrap();
    assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    assert_eq!(target_calls.load(Ordering::SeqCst), 1);

    assert!(chain.remove_interceptor("counting"));
    assert!(chain.is_empty());
    chain.execute(&mut execution, || Ok(ExecuteResult::None)).unwrap();
    assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_additional_parameters_and_dates_render_as_literals() {
    let loggers = RecordingLoggerFactory::new();
    let chain = full_chain(&loggers);
    let user = User {
        id: 3,
        name: "O'Hara".to_string(),
        birthday: NaiveDate::from_ymd_opt(1990, 5, 17),
    };
    let bound = BoundStatement::new("SELECT * FROM users WHERE birthday = ? AND name = ? LIMIT ?")
        .with_mappings(["birthday", "name", "__limit"])
        .with_parameter_object(ParameterObject::source(user))
        .with_additional_parameter("__limit", 10);
    let mut execution = StatementExecution::new("UserMapper.search", ExecuteMethod::Query, bound);

    chain
        .execute(&mut execution, || Ok(ExecuteResult::Rows(Vec::new())))
        .unwrap();

    let line = &loggers.messages("UserMapper.search")[0];
    assert!(line.ends_with(
        "SELECT * FROM users WHERE birthday = '1990-05-17 00:00:00.000' AND name = 'O'Hara' LIMIT 10"
    ));
}

/// Parameter object whose property access panics.
struct Volatile;

impl PropertySource for Volatile {
    fn type_name(&self) -> &str {
        "Volatile"
    }

    fn property(&self, _name: &str) -> Option<SqlValue> {
        panic!("property getter failed");
    }
}

#[test]
fn test_panicking_property_does_not_replace_the_result() {
    let loggers = RecordingLoggerFactory::new();
    let chain = full_chain(&loggers);
    let bound = BoundStatement::new("DELETE FROM users WHERE id = ?")
        .with_mappings(["id"])
        .with_parameter_object(ParameterObject::source(Volatile));
    let mut execution = StatementExecution::new("UserMapper.delete", ExecuteMethod::Update, bound);

    let result = chain
        .execute(&mut execution, || Ok(ExecuteResult::AffectedRows(2)))
        .unwrap();

    assert_eq!(result, ExecuteResult::AffectedRows(2));
    assert!(loggers.messages("UserMapper.delete").is_empty());
}

#[test]
fn test_added_interceptors_respect_max_depth() {
    let mut chain = InterceptorChain::with_config(InterceptorConfig { max_interceptor_depth: 1 });
    chain
        .add_interceptor(Arc::new(CountingInterceptor {
            calls: AtomicUsize::new(0),
        }))
        .unwrap();

    let err = chain
        .add_interceptor(Arc::new(CountingInterceptor {
            calls: AtomicUsize::new(0),
        }))
        .err()
        .unwrap();

    assert!(matches!(err, LookoutError::Interceptor(_)));
    assert_eq!(chain.len(), 1);
}
