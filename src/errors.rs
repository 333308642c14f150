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

//!
//! Common Errors.
//!
use std::error::Error as StdError;
use std::fmt;
use std::io;

use lookout_core::CoreError;

pub type Result<T> = std::result::Result<T, LookoutError>;

/// Boxed failure raised by a wrapped call.
pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug)]
pub enum LookoutError {
    /// Failure of the wrapped downstream call or statement, passed through as is.
    Execution(BoxError),
    Io(io::Error),
    Core(CoreError),
    Format(String),
    Interceptor(String),
}

impl LookoutError {
    pub fn execution<E: Into<BoxError>>(err: E) -> Self {
        LookoutError::Execution(err.into())
    }

    pub fn interceptor<S: Into<String>>(msg: S) -> Self {
        LookoutError::Interceptor(msg.into())
    }

    pub fn format<S: Into<String>>(msg: S) -> Self {
        LookoutError::Format(msg.into())
    }

    pub fn is_execution(&self) -> bool {
        matches!(self, LookoutError::Execution(_))
    }

    /// The wrapped call's own error, if this is one.
    pub fn execution_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            LookoutError::Execution(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for LookoutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LookoutError::Execution(ref err) => err.fmt(f),
            LookoutError::Io(ref err) => err.fmt(f),
            LookoutError::Core(ref err) => err.fmt(f),
            LookoutError::Format(ref err) => write!(f, "Format error: {}", err),
            LookoutError::Interceptor(ref err) => write!(f, "Interceptor error: {}", err),
        }
    }
}

impl StdError for LookoutError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            LookoutError::Execution(ref err) => Some(err.as_ref()),
            LookoutError::Io(ref err) => Some(err),
            LookoutError::Core(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for LookoutError {
    fn from(err: io::Error) -> Self {
        LookoutError::Io(err)
    }
}

impl From<CoreError> for LookoutError {
    fn from(err: CoreError) -> Self {
        LookoutError::Core(err)
    }
}

impl From<serde_json::Error> for LookoutError {
    fn from(err: serde_json::Error) -> Self {
        LookoutError::Format(err.to_string())
    }
}

impl From<fmt::Error> for LookoutError {
    fn from(err: fmt::Error) -> Self {
        LookoutError::Format(err.to_string())
    }
}
