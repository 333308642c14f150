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

//! This crate offers:
//!
//! *   A capture filter that logs every http exchange, request and response
//!     body included, without starving the handler or the client of the body;
//! *   A statement interceptor chain that logs executed SQL with the bound
//!     parameters spliced back in as literals, plus the execution time;
//! *   A dual-channel sink: structured exchange records on one channel, raw
//!     JSON bodies on another.
//!
//! ## Installation
//!
//! Put the desired version of the crate into the `dependencies` section of your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! lookout = "0.1.0"
//! ```
//!
//! ## Feature.
//!
//! * ```non-blocking``` - async interceptor chain and capture filter over tokio transports
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use lookout::prelude::*;
//!
//! let loggers = Arc::new(RecordingLoggerFactory::new());
//! let chain = InterceptorBuilder::new()
//!     .register(Arc::new(SqlLoggingInterceptor::new(loggers.clone())))
//!     .enable(SqlLoggingInterceptor::NAME)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let bound = BoundStatement::new("SELECT * FROM users WHERE id = ? AND name = ?")
//!     .with_mappings(["id", "name"])
//!     .with_parameter_object(properties! { "id" => 42, "name" => "Alice" });
//! let mut execution = StatementExecution::new("UserMapper.selectOne", ExecuteMethod::Query, bound);
//!
//! chain.execute(&mut execution, || Ok(ExecuteResult::Rows(Vec::new()))).unwrap();
//!
//! let lines = loggers.messages("UserMapper.selectOne");
//! assert!(lines[0].ends_with("SELECT * FROM users WHERE id = 42 AND name = 'Alice'"));
//! ```
//!
//! Capturing an exchange:
//!
//! ```rust
//! use std::io::Write;
//! use lookout::prelude::*;
//!
//! let loggers = RecordingLoggerFactory::new();
//! let filter = CaptureFilter::new(CaptureConfig::default(), &loggers);
//! let request = http::Request::post("/users").body(&b"{\"id\":1}"[..]).unwrap();
//! let mut transport = Vec::new();
//!
//! filter.do_filter(request, &mut transport, |_req, resp| {
//!     resp.write_all(b"created")?;
//!     Ok(())
//! }).unwrap();
//!
//! assert_eq!(transport, b"created");
//! ```

#![deny(clippy::all)]

mod errors;
mod logger;
mod config;
mod comm;
pub mod interceptor;
pub mod capture;
pub mod sink;
pub mod prelude;

#[doc(inline)]
pub use errors::{BoxError, LookoutError, Result};
#[doc(inline)]
pub use logger::*;
#[doc(inline)]
pub use config::*;
#[doc(inline)]
pub use comm::*;
#[doc(inline)]
pub use interceptor::{InterceptorConfig, InterceptorConfigItem, SqlCostInterceptor, SqlLoggingInterceptor};
#[doc(inline)]
pub use capture::CaptureFilter;
#[doc(inline)]
pub use sink::{DualLogSink, Sink};

pub use lookout_core as core;

pub use lookout_core::*;

pub use http;
pub use bytes;
