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
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use futures_core::future::BoxFuture;
use lookout_core::{ExecuteMethod, StatementExecution};

use crate::comm::{ExecuteContext, ExecuteResult};
use crate::errors::{LookoutError, Result};
use crate::interceptor::non_blocking::{AsyncChainEntry, AsyncInvocation, AsyncStatementInterceptor, AsyncTarget};
use crate::interceptor::InterceptorConfig;

/// Interceptor chain manager
#[derive(Clone, Default)]
pub struct AsyncInterceptorChain {
    entries: Vec<AsyncChainEntry>,
    config: InterceptorConfig,
}

impl AsyncInterceptorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InterceptorConfig) -> Self {
        Self {
            entries: Vec::new(),
            config,
        }
    }

    /// Adds `interceptor` at its own order. Fails once the chain holds
    /// `max_interceptor_depth` entries.
    pub fn add_interceptor(&mut self, interceptor: Arc<dyn AsyncStatementInterceptor>) -> Result<&mut Self> {
        let order = interceptor.order();
        self.push_ordered(interceptor, HashSet::new(), order)
    }

    pub(crate) fn push_ordered(
        &mut self,
        interceptor: Arc<dyn AsyncStatementInterceptor>,
        methods: HashSet<ExecuteMethod>,
        order: i32,
    ) -> Result<&mut Self> {
        if self.entries.len() >= self.config.max_interceptor_depth {
            return Err(LookoutError::interceptor(format!(
                "Interceptor chain too deep: at most {} allowed, cannot add {}",
                self.config.max_interceptor_depth,
                interceptor.name()
            )));
        }
        self.entries.push(AsyncChainEntry { interceptor, methods, order });
        self.entries.sort_by_key(|entry| entry.order);
        Ok(self)
    }

    pub fn remove_interceptor(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.interceptor.name() != name);
        before != self.entries.len()
    }

    /// Runs `target` wrapped by every interceptor, outermost first, and
    /// records the raw duration on `execution` once it completes.
    pub async fn execute<F, Fut>(&self, execution: &mut StatementExecution, target: F) -> Result<ExecuteResult>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<ExecuteResult>> + Send,
    {
        let (result, elapsed) = {
            let ctx = ExecuteContext::new(execution);
            let target: AsyncTarget<'_> = Box::new(move || {
                let fut: BoxFuture<'_, Result<ExecuteResult>> = Box::pin(target());
                fut
            });
            let result = AsyncInvocation::new(&ctx, &self.entries, target).proceed().await;
            (result, ctx.elapsed())
        };
        execution.set_duration(elapsed);
        result
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.interceptor.name()).collect()
    }

    pub fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
