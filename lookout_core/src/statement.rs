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
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::{BoundStatement, ReconstructedSql, TypeHandlerRegistry};

/// The execution entry point a statement was sent through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecuteMethod {
    /// Point query returning materialized rows
    Query,
    /// Query returning a lazily consumed cursor
    QueryCursor,
    /// Insert, update or delete
    Update,
    /// Flush of queued batch statements
    Batch,
}

impl ExecuteMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecuteMethod::Query => "query",
            ExecuteMethod::QueryCursor => "queryCursor",
            ExecuteMethod::Update => "update",
            ExecuteMethod::Batch => "batch",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "query" => Some(ExecuteMethod::Query),
            "queryCursor" | "query_cursor" => Some(ExecuteMethod::QueryCursor),
            "update" => Some(ExecuteMethod::Update),
            "batch" => Some(ExecuteMethod::Batch),
            _ => None,
        }
    }

    pub fn is_cursor(&self) -> bool {
        matches!(self, ExecuteMethod::QueryCursor)
    }
}

impl fmt::Display for ExecuteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One statement invocation as seen by the interceptors.
///
/// The duration is only known once the wrapped call has returned.
#[derive(Debug, Clone)]
pub struct StatementExecution {
    id: String,
    method: ExecuteMethod,
    bound: BoundStatement,
    duration: Option<Duration>,
}

impl StatementExecution {
    pub fn new<S: Into<String>>(id: S, method: ExecuteMethod, bound: BoundStatement) -> Self {
        Self {
            id: id.into(),
            method,
            bound,
            duration: None,
        }
    }

    /// Logical statement id, also used as the log category.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn method(&self) -> ExecuteMethod {
        self.method
    }

    pub fn bound(&self) -> &BoundStatement {
        &self.bound
    }

    pub fn sql(&self) -> &str {
        self.bound.sql()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = Some(duration);
    }

    pub fn is_resolved(&self) -> bool {
        self.duration.is_some()
    }

    pub fn reconstruct(&self, registry: &TypeHandlerRegistry) -> ReconstructedSql {
        self.bound.to_literal_sql(registry)
    }
}
