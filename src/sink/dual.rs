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
use std::sync::Arc;

use crate::capture::{CapturedRequest, CapturedResponse, HttpMessage};
use crate::config::CaptureConfig;
use crate::errors::Result;
use crate::logger::{LogChannel, LoggerFactory};
use crate::sink::{Correlation, HttpLogFormatter, JsonHttpLogFormatter, Precorrelation, Sink};

/// Fans each exchange out to two channels.
///
/// The general channel gets the formatted request and response every time.
/// The body channel gets the raw body, and only for non-empty JSON bodies.
pub struct DualLogSink {
    formatter: Arc<dyn HttpLogFormatter>,
    general: Arc<dyn LogChannel>,
    body: Arc<dyn LogChannel>,
    config: CaptureConfig,
}

impl DualLogSink {
    pub fn new(formatter: Arc<dyn HttpLogFormatter>, loggers: &dyn LoggerFactory, config: CaptureConfig) -> Self {
        Self {
            formatter,
            general: loggers.channel(config.general_channel()),
            body: loggers.channel(config.body_channel()),
            config,
        }
    }

    /// Sink with the JSON formatter and default channels.
    pub fn with_defaults(loggers: &dyn LoggerFactory) -> Self {
        Self::new(Arc::new(JsonHttpLogFormatter::new()), loggers, CaptureConfig::default())
    }

    fn write_body<M: HttpMessage>(&self, message: &M, label: &str) {
        if message.body().is_empty() || !self.config.is_json(message.content_type()) {
            return;
        }
        match message.body_as_string() {
            Ok(body) => self
                .body
                .info(&format!("{} Body: {}", label, self.config.truncate_body(&body))),
            Err(err) => self
                .general
                .error(&format!("Failed to read {} body: {}", label.to_lowercase(), err)),
        }
    }
}

impl Sink for DualLogSink {
    fn write_request(&self, precorrelation: &Precorrelation, request: &CapturedRequest) -> Result<()> {
        let formatted = self.formatter.format_request(precorrelation, request)?;
        self.general.info(&format!("Formatted Request:\n{}", formatted));
        self.write_body(request, "Request");
        Ok(())
    }

    fn write_response(
        &self,
        correlation: &Correlation,
        _request: &CapturedRequest,
        response: &CapturedResponse,
    ) -> Result<()> {
        let formatted = self.formatter.format_response(correlation, response)?;
        self.general.info(&format!("Formatted Response:\n{}", formatted));
        self.write_body(response, "Response");
        Ok(())
    }
}
