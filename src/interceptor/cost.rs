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
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use lookout_core::{ExecuteMethod, StatementExecution};

use crate::comm::ExecuteResult;
use crate::logger::LoggerFactory;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Folds every whitespace run of a statement into one space.
pub fn collapse_whitespace(sql: &str) -> String {
    WHITESPACE.replace_all(sql, " ").trim().to_string()
}

/// Debug-level cost line for successful invocations of query, cursor query
/// and update. Failures pass through without a line.
pub struct SqlCostInterceptor {
    category: String,
    loggers: Arc<dyn LoggerFactory>,
}

impl SqlCostInterceptor {
    pub const NAME: &'static str = "sql_cost";

    pub fn new(loggers: Arc<dyn LoggerFactory>) -> Self {
        Self {
            category: "SqlCostInterceptor".to_string(),
            loggers,
        }
    }

    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = category.into();
        self
    }

    pub(crate) fn supports(method: ExecuteMethod) -> bool {
        !matches!(method, ExecuteMethod::Batch)
    }

    pub(crate) fn log_cost(&self, execution: &StatementExecution, result: &ExecuteResult, cost: Duration) {
        let channel = self.loggers.channel(&self.category);
        channel.debug(&format!("==> Mapper: {}", execution.id()));
        channel.debug(&format!("==> SQL: {}", collapse_whitespace(execution.sql())));
        if execution.method().is_cursor() {
            channel.debug(&format!("<==      Cursor opened, Cost: {} ms", cost.as_millis()));
        } else {
            channel.debug(&format!("<==      Total: {}, Cost: {} ms", result.affected_rows(), cost.as_millis()));
        }
    }
}
