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
use std::collections::HashMap;
use std::sync::Arc;

use lookout_core::ExecuteMethod;

use crate::errors::{LookoutError, Result};
use crate::interceptor::blocking::{InterceptorChain, StatementInterceptor};
use crate::interceptor::{InterceptorConfig, InterceptorConfigItem};

/// Interceptor builder
///
/// Interceptors are registered disabled and only make it into the chain once
/// enabled by name.
pub struct InterceptorBuilder {
    interceptors: HashMap<String, (Arc<dyn StatementInterceptor>, InterceptorConfigItem)>,
    chain_config: InterceptorConfig,
}

impl Default for InterceptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InterceptorBuilder {
    pub fn new() -> Self {
        Self {
            interceptors: HashMap::new(),
            chain_config: InterceptorConfig::default(),
        }
    }

    /// Set up the interceptor chain configuration
    pub fn with_chain_config(mut self, config: InterceptorConfig) -> Self {
        self.chain_config = config;
        self
    }

    pub fn register(mut self, interceptor: Arc<dyn StatementInterceptor>) -> Self {
        let name = interceptor.name().to_string();
        let config_item = InterceptorConfigItem::new(interceptor.order());
        self.interceptors.insert(name, (interceptor, config_item));
        self
    }

    pub fn register_instance<I>(self, interceptor: I) -> Self
    where
        I: StatementInterceptor + 'static,
    {
        self.register(Arc::new(interceptor))
    }

    fn item_mut(&mut self, name: &str) -> Result<&mut InterceptorConfigItem> {
        self.interceptors
            .get_mut(name)
            .map(|(_, config)| config)
            .ok_or_else(|| LookoutError::interceptor(format!("Interceptor '{}' not found", name)))
    }

    pub fn enable(mut self, name: &str) -> Result<Self> {
        self.item_mut(name)?.enabled = true;
        Ok(self)
    }

    pub fn disable(mut self, name: &str) -> Result<Self> {
        self.item_mut(name)?.enabled = false;
        Ok(self)
    }

    pub fn with_order(mut self, name: &str, order: i32) -> Result<Self> {
        self.item_mut(name)?.order = order;
        Ok(self)
    }

    /// Restrict the interceptor to some execution methods
    pub fn with_methods(mut self, name: &str, methods: &[ExecuteMethod]) -> Result<Self> {
        self.item_mut(name)?.supported_methods = methods.iter().copied().collect();
        Ok(self)
    }

    /// Build an interceptor chain
    pub fn build(self) -> Result<InterceptorChain> {
        let mut enabled: Vec<_> = self
            .interceptors
            .into_values()
            .filter(|(_, config)| config.enabled)
            .collect();
        if enabled.len() > self.chain_config.max_interceptor_depth {
            return Err(LookoutError::interceptor(format!(
                "Interceptor chain too deep: {} enabled, at most {} allowed",
                enabled.len(),
                self.chain_config.max_interceptor_depth
            )));
        }
        enabled.sort_by(|(a_i, a), (b_i, b)| a.order.cmp(&b.order).then_with(|| a_i.name().cmp(b_i.name())));

        let mut chain = InterceptorChain::with_config(self.chain_config);
        for (interceptor, config) in enabled {
            chain.push_ordered(interceptor, config.supported_methods, config.order)?;
        }
        Ok(chain)
    }

    pub fn registered_interceptors(&self) -> Vec<&str> {
        self.interceptors.keys().map(|s| s.as_str()).collect()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.interceptors.contains_key(name)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.interceptors
            .get(name)
            .map(|(_, config)| config.enabled)
            .unwrap_or(false)
    }
}
