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

use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;

/// Channel receiving every formatted request/response event.
pub const GENERAL_CHANNEL: &str = "BASIC_LOGGER";
/// Channel receiving JSON bodies only.
pub const BODY_CHANNEL: &str = "BODY_LOGGER";
/// Substring of a content type marking a JSON body.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Capture filter and sink settings.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    general_channel: String,
    body_channel: String,
    request_log_level: LogLevel,
    response_log_level: LogLevel,
    eager_request_body: bool,
    max_body_chars: Option<usize>,
    json_content_type: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            general_channel: GENERAL_CHANNEL.to_string(),
            body_channel: BODY_CHANNEL.to_string(),
            request_log_level: LogLevel::Info,
            response_log_level: LogLevel::Info,
            eager_request_body: false,
            max_body_chars: None,
            json_content_type: JSON_CONTENT_TYPE.to_string(),
        }
    }
}

impl CaptureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_general_channel<S: Into<String>>(mut self, name: S) -> Self {
        self.general_channel = name.into();
        self
    }

    pub fn general_channel(&self) -> &str {
        &self.general_channel
    }

    pub fn set_body_channel<S: Into<String>>(mut self, name: S) -> Self {
        self.body_channel = name.into();
        self
    }

    pub fn body_channel(&self) -> &str {
        &self.body_channel
    }

    pub fn set_request_log_level(mut self, level: LogLevel) -> Self {
        self.request_log_level = level;
        self
    }

    pub fn request_log_level(&self) -> LogLevel {
        self.request_log_level
    }

    pub fn set_response_log_level(mut self, level: LogLevel) -> Self {
        self.response_log_level = level;
        self
    }

    pub fn response_log_level(&self) -> LogLevel {
        self.response_log_level
    }

    /// Read the whole request body into the cache before the request log, so
    /// the log shows it. Downstream then reads the cached bytes.
    pub fn set_eager_request_body(mut self, eager: bool) -> Self {
        self.eager_request_body = eager;
        self
    }

    pub fn eager_request_body(&self) -> bool {
        self.eager_request_body
    }

    /// Cap on the characters of a body written to a log line. `None` logs bodies whole.
    pub fn set_max_body_chars(mut self, max: Option<usize>) -> Self {
        self.max_body_chars = max;
        self
    }

    pub fn max_body_chars(&self) -> Option<usize> {
        self.max_body_chars
    }

    pub fn set_json_content_type<S: Into<String>>(mut self, marker: S) -> Self {
        self.json_content_type = marker.into();
        self
    }

    pub fn json_content_type(&self) -> &str {
        &self.json_content_type
    }

    pub fn is_json(&self, content_type: Option<&str>) -> bool {
        content_type
            .map(|ct| ct.contains(self.json_content_type.as_str()))
            .unwrap_or(false)
    }

    /// Applies the body cap on a char boundary.
    pub fn truncate_body<'a>(&self, body: &'a str) -> std::borrow::Cow<'a, str> {
        truncate_chars(body, self.max_body_chars)
    }
}

pub(crate) fn truncate_chars(body: &str, max: Option<usize>) -> std::borrow::Cow<'_, str> {
    match max {
        Some(max) => match body.char_indices().nth(max) {
            Some((cut, _)) => format!("{}...({} chars)", &body[..cut], body.chars().count()).into(),
            None => body.into(),
        },
        None => body.into(),
    }
}
