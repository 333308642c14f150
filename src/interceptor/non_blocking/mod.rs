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
mod chain;
mod builder;
mod logging;
mod cost;

pub use chain::*;
pub use builder::*;

use std::collections::HashSet;
use std::sync::Arc;

use futures_core::future::BoxFuture;
use lookout_core::{ExecuteMethod, StatementExecution};

use crate::comm::{ExecuteContext, ExecuteResult};
use crate::errors::Result;

/// Async counterpart of [`StatementInterceptor`](crate::interceptor::blocking::StatementInterceptor).
///
/// An interceptor future may be dropped before it completes; anything that
/// has to happen on every exit path belongs in a drop guard.
#[async_trait::async_trait]
pub trait AsyncStatementInterceptor: Send + Sync {
    /// Interceptor name
    fn name(&self) -> &'static str;

    /// Execution order (the smaller the value, the further out it wraps)
    fn order(&self) -> i32 {
        0
    }

    /// Whether the execution method is intercepted at all
    fn supports_method(&self, _method: ExecuteMethod) -> bool {
        true
    }

    async fn intercept(&self, invocation: AsyncInvocation<'_>) -> Result<ExecuteResult>;
}

/// The wrapped async statement call.
pub type AsyncTarget<'a> = Box<dyn FnOnce() -> BoxFuture<'a, Result<ExecuteResult>> + Send + 'a>;

#[derive(Clone)]
pub(crate) struct AsyncChainEntry {
    pub(crate) interceptor: Arc<dyn AsyncStatementInterceptor>,
    pub(crate) methods: HashSet<ExecuteMethod>,
    pub(crate) order: i32,
}

impl AsyncChainEntry {
    fn applies(&self, method: ExecuteMethod) -> bool {
        (self.methods.is_empty() || self.methods.contains(&method))
            && self.interceptor.supports_method(method)
    }
}

/// The remainder of an async interceptor chain plus the wrapped call.
pub struct AsyncInvocation<'a> {
    ctx: &'a ExecuteContext<'a>,
    remaining: &'a [AsyncChainEntry],
    target: AsyncTarget<'a>,
}

impl<'a> AsyncInvocation<'a> {
    pub(crate) fn new(ctx: &'a ExecuteContext<'a>, remaining: &'a [AsyncChainEntry], target: AsyncTarget<'a>) -> Self {
        Self { ctx, remaining, target }
    }

    pub fn context(&self) -> &'a ExecuteContext<'a> {
        self.ctx
    }

    pub fn execution(&self) -> &'a StatementExecution {
        self.ctx.execution()
    }

    pub fn method(&self) -> ExecuteMethod {
        self.ctx.method()
    }

    pub fn proceed(self) -> BoxFuture<'a, Result<ExecuteResult>> {
        let AsyncInvocation { ctx, remaining, target } = self;
        match remaining.split_first() {
            Some((entry, rest)) => {
                let next = AsyncInvocation::new(ctx, rest, target);
                if entry.applies(ctx.method()) {
                    entry.interceptor.intercept(next)
                } else {
                    next.proceed()
                }
            }
            None => target(),
        }
    }
}
