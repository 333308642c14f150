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

use crate::{ParameterObject, ValueKind};

/// The value kinds the execution engine can bind directly.
///
/// A parameter object whose kind is registered here is bound as a whole;
/// anything else is treated as a composite and read property by property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHandlerRegistry {
    kinds: HashSet<ValueKind>,
}

impl Default for TypeHandlerRegistry {
    fn default() -> Self {
        Self {
            kinds: ValueKind::SCALARS.iter().copied().collect(),
        }
    }
}

impl TypeHandlerRegistry {
    /// A registry without any handler.
    pub fn empty() -> Self {
        Self { kinds: HashSet::new() }
    }

    pub fn register(mut self, kind: ValueKind) -> Self {
        self.kinds.insert(kind);
        self
    }

    pub fn unregister(mut self, kind: ValueKind) -> Self {
        self.kinds.remove(&kind);
        self
    }

    pub fn has_handler(&self, kind: ValueKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn has_type_handler(&self, object: &ParameterObject) -> bool {
        match object {
            ParameterObject::Value(v) => self.has_handler(v.kind()),
            ParameterObject::Map(_) | ParameterObject::Source(_) => false,
        }
    }
}
