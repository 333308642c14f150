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
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use lookout_core::{StatementExecution, TypeHandlerRegistry};

use crate::logger::{LogLevel, LoggerFactory};

/// Logs every statement invocation with its duration and the SQL as it would
/// read with the bound values inlined.
///
/// The line goes to a channel named by the statement id and is written on
/// every exit path: success, error, panic and (async) cancellation.
pub struct SqlLoggingInterceptor {
    pub log_level: LogLevel,
    pub slow_statement_threshold: Option<Duration>,
    registry: TypeHandlerRegistry,
    loggers: Arc<dyn LoggerFactory>,
}

impl SqlLoggingInterceptor {
    pub const NAME: &'static str = "sql_logging";

    pub fn new(loggers: Arc<dyn LoggerFactory>) -> Self {
        Self {
            log_level: LogLevel::Info,
            slow_statement_threshold: None,
            registry: TypeHandlerRegistry::default(),
            loggers,
        }
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Adds a warn line for invocations slower than `threshold`.
    pub fn with_slow_statement_threshold(mut self, threshold: Duration) -> Self {
        self.slow_statement_threshold = Some(threshold);
        self
    }

    pub fn with_registry(mut self, registry: TypeHandlerRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &TypeHandlerRegistry {
        &self.registry
    }

    pub(crate) fn log_execution(&self, execution: &StatementExecution, elapsed: Duration) {
        let sql = execution.reconstruct(&self.registry);
        let channel = self.loggers.channel(execution.id());
        let millis = elapsed.as_millis();
        channel.log(
            self.log_level,
            &format!(
                "<==      MethodName: {} Duration: {} ms ExecutionSQL: {}",
                execution.method(),
                millis,
                sql
            ),
        );
        if !sql.is_complete() {
            let reasons = sql.failures.iter().map(ToString::to_string).collect::<Vec<_>>();
            channel.debug(&format!("<==      Unresolved parameters: {}", reasons.join("; ")));
        }
        if let Some(threshold) = self.slow_statement_threshold {
            if elapsed > threshold {
                channel.warn(&format!(
                    "<==      Slow statement! MethodName: {} Duration: {} ms Threshold: {} ms",
                    execution.method(),
                    millis,
                    threshold.as_millis()
                ));
            }
        }
    }
}

/// Writes the execution line when dropped.
pub(crate) struct ExecutionLogGuard<'a> {
    interceptor: &'a SqlLoggingInterceptor,
    execution: &'a StatementExecution,
    start: Instant,
}

impl<'a> ExecutionLogGuard<'a> {
    pub(crate) fn new(interceptor: &'a SqlLoggingInterceptor, execution: &'a StatementExecution) -> Self {
        Self {
            interceptor,
            execution,
            start: Instant::now(),
        }
    }
}

impl Drop for ExecutionLogGuard<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        let logged = panic::catch_unwind(AssertUnwindSafe(|| self.interceptor.log_execution(self.execution, elapsed)));
        if logged.is_err() {
            tracing::error!("Panicked while logging statement {}", self.execution.id());
        }
    }
}
