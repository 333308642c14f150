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

use lookout_core::{cfg_if, ExecuteMethod};

mod logging;
mod cost;

pub use logging::SqlLoggingInterceptor;
pub use cost::{collapse_whitespace, SqlCostInterceptor};

pub mod blocking;

cfg_if! {if #[cfg(feature = "non-blocking")] {
    pub mod non_blocking;
}}

/// Interceptor chain configuration
#[derive(Debug, Clone)]
pub struct InterceptorConfig {
    /// Upper bound on the number of interceptors wrapped around one call.
    pub max_interceptor_depth: usize,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            max_interceptor_depth: 10,
        }
    }
}

/// Interceptor configuration items
#[derive(Debug, Clone)]
pub struct InterceptorConfigItem {
    pub enabled: bool,
    pub order: i32,
    /// Methods the interceptor is limited to; empty means all of them.
    pub supported_methods: HashSet<ExecuteMethod>,
}

impl InterceptorConfigItem {
    pub fn new(order: i32) -> Self {
        Self {
            enabled: false,
            order,
            supported_methods: HashSet::new(),
        }
    }

    pub fn allows(&self, method: ExecuteMethod) -> bool {
        self.supported_methods.is_empty() || self.supported_methods.contains(&method)
    }
}
