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

use std::fmt;

/// Errors raised while resolving bound parameters or decoding captured bodies.
///
/// None of these ever reach the caller of an intercepted operation; they are
/// observation failures and are logged or dropped where they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The bound parameter object has no property with this name.
    MissingProperty {
        property: String,
        type_name: String,
    },
    /// The parameter object's type has no type handler and cannot expose properties.
    NoTypeHandler {
        property: String,
        type_name: String,
    },
    /// A charset label we cannot decode with.
    UnsupportedCharset(String),
    /// The body stream was consumed or is otherwise unreadable.
    BodyUnavailable(String),
}

impl CoreError {
    pub fn missing_property<P: Into<String>, T: Into<String>>(property: P, type_name: T) -> Self {
        Self::MissingProperty {
            property: property.into(),
            type_name: type_name.into(),
        }
    }

    pub fn no_type_handler<P: Into<String>, T: Into<String>>(property: P, type_name: T) -> Self {
        Self::NoTypeHandler {
            property: property.into(),
            type_name: type_name.into(),
        }
    }

    pub fn unsupported_charset<T: Into<String>>(label: T) -> Self {
        Self::UnsupportedCharset(label.into())
    }

    pub fn body_unavailable<T: Into<String>>(reason: T) -> Self {
        Self::BodyUnavailable(reason.into())
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::MissingProperty { property, type_name } => {
                write!(f, "There is no property named '{}' in '{}'", property, type_name)
            }
            CoreError::NoTypeHandler { property, type_name } => {
                write!(f, "No type handler or property accessor for '{}' on '{}'", property, type_name)
            }
            CoreError::UnsupportedCharset(label) => write!(f, "Unsupported charset: {}", label),
            CoreError::BodyUnavailable(reason) => write!(f, "Body unavailable: {}", reason),
        }
    }
}

impl std::error::Error for CoreError {}

pub type CoreResult<T> = Result<T, CoreError>;
