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

use lookout_core::{ExecuteMethod, StatementExecution};

use crate::comm::{ExecuteContext, ExecuteResult};
use crate::errors::Result;

/// A layer wrapped around statement execution.
///
/// `intercept` receives the rest of the chain as an [`Invocation`] and decides
/// what happens around [`Invocation::proceed`]. The outcome of `proceed` is
/// expected to be returned unchanged.
pub trait StatementInterceptor: Send + Sync {
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

    fn intercept(&self, invocation: Invocation<'_>) -> Result<ExecuteResult>;
}

/// The wrapped statement call.
pub type Target<'a> = Box<dyn FnOnce() -> Result<ExecuteResult> + 'a>;

#[derive(Clone)]
pub(crate) struct ChainEntry {
    pub(crate) interceptor: Arc<dyn StatementInterceptor>,
    pub(crate) methods: HashSet<ExecuteMethod>,
    pub(crate) order: i32,
}

impl ChainEntry {
    fn applies(&self, method: ExecuteMethod) -> bool {
        (self.methods.is_empty() || self.methods.contains(&method))
            && self.interceptor.supports_method(method)
    }
}

/// The remainder of an interceptor chain plus the wrapped call.
///
/// `proceed` takes the invocation by value, so the call underneath runs at
/// most once per invocation.
pub struct Invocation<'a> {
    ctx: &'a ExecuteContext<'a>,
    remaining: &'a [ChainEntry],
    target: Target<'a>,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(ctx: &'a ExecuteContext<'a>, remaining: &'a [ChainEntry], target: Target<'a>) -> Self {
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

    pub fn proceed(self) -> Result<ExecuteResult> {
        let Invocation { ctx, remaining, target } = self;
        match remaining.split_first() {
            Some((entry, rest)) => {
                let next = Invocation::new(ctx, rest, target);
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
