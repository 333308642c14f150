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

//! Request/response capture around a downstream handler.
mod message;
mod request;
mod response;

pub use message::*;
pub use request::CachingRequest;
pub use response::CachingResponse;

use std::io::{Read, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use http::Request;
use lookout_core::cfg_if;

use crate::config::CaptureConfig;
use crate::errors::Result;
use crate::logger::{LogChannel, LoggerFactory};
use crate::sink::{Precorrelation, Sink};

cfg_if! {if #[cfg(feature = "non-blocking")] {
    mod non_blocking;
    pub use non_blocking::AsyncFilterChain;
}}

/// Logs every exchange passing through it and hands the response body back
/// to the transport afterwards, whatever downstream did.
pub struct CaptureFilter {
    config: CaptureConfig,
    general: Arc<dyn LogChannel>,
    sink: Option<Arc<dyn Sink>>,
}

impl CaptureFilter {
    pub fn new(config: CaptureConfig, loggers: &dyn LoggerFactory) -> Self {
        Self {
            general: loggers.channel(config.general_channel()),
            config,
            sink: None,
        }
    }

    /// Also forward request and response snapshots to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Runs `chain` once with caching wrappers around `request` and `response`.
    ///
    /// The response log and the copy of the buffered body to `response` happen
    /// on every exit path. A downstream error is returned as is and a panic is
    /// resumed once both are done. On success the returned head carries the
    /// status and headers downstream set.
    pub fn do_filter<R, W, C>(&self, request: Request<R>, response: W, chain: C) -> Result<http::Response<()>>
    where
        R: Read,
        W: Write,
        C: FnOnce(&mut CachingRequest<R>, &mut CachingResponse<W>) -> Result<()>,
    {
        let mut request = if self.buffers_request_eagerly() {
            CachingRequest::eager(request)
        } else {
            CachingRequest::new(request)
        };
        let mut response = CachingResponse::new(response);
        let precorrelation = Precorrelation::new();
        let start = Instant::now();

        self.observe("request", || self.log_request(&request, &precorrelation));

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| chain(&mut request, &mut response)));

        let elapsed = start.elapsed();
        self.observe("response", || self.log_response(&request, &response, &precorrelation, elapsed));
        let copied = response.copy_body_to_response();

        match outcome {
            Ok(Ok(())) => {
                copied?;
                Ok(response.head())
            }
            Ok(Err(err)) => {
                if let Err(copy_err) = copied {
                    self.general.error(&format!("Failed to copy response body: {}", copy_err));
                }
                Err(err)
            }
            Err(payload) => {
                if let Err(copy_err) = copied {
                    self.general.error(&format!("Failed to copy response body: {}", copy_err));
                }
                panic::resume_unwind(payload)
            }
        }
    }

    /// Request bodies are read up front when configured, or when a sink
    /// needs them at `write_request` time.
    pub(crate) fn buffers_request_eagerly(&self) -> bool {
        self.config.eager_request_body() || self.sink.as_ref().map_or(false, |s| s.is_active())
    }

    /// Runs one logging step. A panic inside it is reported and swallowed so
    /// it can neither skip downstream nor the copy-back.
    pub(crate) fn observe<F: FnOnce()>(&self, step: &str, log: F) {
        if panic::catch_unwind(AssertUnwindSafe(log)).is_err() {
            let _ = panic::catch_unwind(AssertUnwindSafe(|| {
                self.general.error(&format!("Panicked while logging the {}", step))
            }));
        }
    }

    pub(crate) fn log_request<R>(&self, request: &CachingRequest<R>, precorrelation: &Precorrelation) {
        let mut lines = vec![
            format!("==> Request: {} {}", request.method(), request.request_url()),
            format!("==> Headers: {}", self.render_headers(request.headers())),
        ];
        if let Some(body) = self.render_body(request) {
            lines.push(format!("==> Body: {}", body));
        }
        self.general.log(self.config.request_log_level(), &lines.join("\n"));

        if let Some(sink) = self.sink.as_ref().filter(|s| s.is_active()) {
            if let Err(err) = sink.write_request(precorrelation, &request.snapshot()) {
                self.general.error(&format!("Failed to write request to sink: {}", err));
            }
        }
    }

    pub(crate) fn log_response<R, W>(
        &self,
        request: &CachingRequest<R>,
        response: &CachingResponse<W>,
        precorrelation: &Precorrelation,
        elapsed: Duration,
    ) {
        let mut lines = vec![
            format!("<== Response: {} ({} ms)", response.status(), elapsed.as_millis()),
            format!("<== Headers: {}", self.render_headers(response.headers())),
        ];
        if let Some(body) = self.render_body(response) {
            lines.push(format!("<== Body: {}", body));
        }
        self.general.log(self.config.response_log_level(), &lines.join("\n"));

        if let Some(sink) = self.sink.as_ref().filter(|s| s.is_active()) {
            let correlation = precorrelation.correlate(elapsed);
            if let Err(err) = sink.write_response(&correlation, &request.snapshot(), &response.snapshot()) {
                self.general.error(&format!("Failed to write response to sink: {}", err));
            }
        }
    }

    fn render_headers(&self, headers: &http::HeaderMap) -> String {
        let values = header_values(headers);
        serde_json::to_string(&values).unwrap_or_else(|_| format!("{:?}", values))
    }

    /// Decoded body for the log, or `None` when empty or undecodable.
    fn render_body<M: HttpMessage>(&self, message: &M) -> Option<String> {
        if message.body().is_empty() {
            return None;
        }
        message
            .body_as_string()
            .ok()
            .map(|body| self.config.truncate_body(&body).into_owned())
    }
}
