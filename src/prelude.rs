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

//! Everything needed to wire the filter, the interceptors and the sink.

pub use crate::errors::{LookoutError, Result};
pub use crate::logger::{LogChannel, LogLevel, LoggerFactory, RecordingLoggerFactory, TracingLoggerFactory};
pub use crate::config::CaptureConfig;
pub use crate::comm::{ExecuteContext, ExecuteResult, Row};
pub use crate::interceptor::blocking::{InterceptorBuilder, InterceptorChain, Invocation, StatementInterceptor};
pub use crate::interceptor::{InterceptorConfig, SqlCostInterceptor, SqlLoggingInterceptor};
pub use crate::capture::{CachingRequest, CachingResponse, CapturedRequest, CapturedResponse, CaptureFilter, HttpMessage};
pub use crate::sink::{DualLogSink, HttpLogFormatter, JsonHttpLogFormatter, Sink};

pub use lookout_core::{
    properties, BoundStatement, ExecuteMethod, ParameterMapping, ParameterObject, PropertySource, SqlValue,
    StatementExecution, TypeHandlerRegistry, ValueKind,
};

pub use http;

#[cfg(feature = "non-blocking")]
pub use crate::interceptor::non_blocking::{
    AsyncInterceptorBuilder, AsyncInterceptorChain, AsyncInvocation, AsyncStatementInterceptor,
};
#[cfg(feature = "non-blocking")]
pub use crate::capture::AsyncFilterChain;
