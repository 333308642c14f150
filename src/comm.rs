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
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use lookout_core::{ExecuteMethod, SqlValue, StatementExecution};

/// One result row, column name to value.
pub type Row = IndexMap<String, SqlValue>;

/// Query result type
#[derive(Debug, Clone, PartialEq)]
pub enum ExecuteResult {
    Rows(Vec<Row>),
    AffectedRows(u64),
    /// An opened cursor; rows are consumed later and never counted here.
    Cursor,
    None,
}

impl ExecuteResult {
    pub fn len(&self) -> u64 {
        match self {
            ExecuteResult::Rows(rows) => rows.len() as u64,
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn affected_rows(&self) -> u64 {
        match self {
            ExecuteResult::Rows(rows) => rows.len() as u64,
            ExecuteResult::AffectedRows(af) => *af,
            _ => 0,
        }
    }

    pub fn rows(self) -> Vec<Row> {
        match self {
            ExecuteResult::Rows(rows) => rows,
            _ => Vec::new(),
        }
    }
}

/// Execution context
///
/// Shared read-only by every interceptor of one invocation.
#[derive(Debug)]
pub struct ExecuteContext<'a> {
    execution: &'a StatementExecution,
    start_time: Instant,
}

impl<'a> ExecuteContext<'a> {
    pub fn new(execution: &'a StatementExecution) -> Self {
        Self {
            execution,
            start_time: Instant::now(),
        }
    }

    pub fn execution(&self) -> &'a StatementExecution {
        self.execution
    }

    pub fn statement_id(&self) -> &'a str {
        self.execution.id()
    }

    pub fn method(&self) -> ExecuteMethod {
        self.execution.method()
    }

    pub fn sql(&self) -> &'a str {
        self.execution.sql()
    }

    /// Start time - Set when the chain starts
    pub fn start_time(&self) -> &Instant {
        &self.start_time
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_core::BoundStatement;

    #[test]
    fn test_result_counts() {
        let rows = vec![Row::new(), Row::new()];
        assert_eq!(ExecuteResult::Rows(rows.clone()).len(), 2);
        assert_eq!(ExecuteResult::AffectedRows(5).affected_rows(), 5);
        assert!(ExecuteResult::Cursor.is_empty());
        assert_eq!(ExecuteResult::Rows(rows).rows().len(), 2);
        assert!(ExecuteResult::None.rows().is_empty());
    }

    #[test]
    fn test_context_exposes_statement() {
        let execution = StatementExecution::new("OrderMapper.insert", ExecuteMethod::Update, BoundStatement::new("INSERT INTO o VALUES (?)"));
        let ctx = ExecuteContext::new(&execution);
        assert_eq!(ctx.statement_id(), "OrderMapper.insert");
        assert_eq!(ctx.method(), ExecuteMethod::Update);
        assert_eq!(ctx.sql(), "INSERT INTO o VALUES (?)");
    }
}
