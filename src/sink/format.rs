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
use serde_json::{json, Value};

use crate::capture::{header_values, CapturedRequest, CapturedResponse};
use crate::errors::Result;
use crate::sink::{Correlation, Precorrelation};

/// Renders one side of an exchange as a log line.
pub trait HttpLogFormatter: Send + Sync {
    fn format_request(&self, precorrelation: &Precorrelation, request: &CapturedRequest) -> Result<String>;

    fn format_response(&self, correlation: &Correlation, response: &CapturedResponse) -> Result<String>;
}

/// Single-line JSON without bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHttpLogFormatter;

impl JsonHttpLogFormatter {
    pub fn new() -> Self {
        JsonHttpLogFormatter
    }

    pub fn request_value(&self, precorrelation: &Precorrelation, request: &CapturedRequest) -> Value {
        json!({
            "origin": "remote",
            "type": "request",
            "correlation": precorrelation.id(),
            "method": request.method.as_str(),
            "uri": request.url,
            "headers": header_values(&request.headers),
        })
    }

    pub fn response_value(&self, correlation: &Correlation, response: &CapturedResponse) -> Value {
        json!({
            "origin": "local",
            "type": "response",
            "correlation": correlation.id(),
            "duration": correlation.duration().as_millis() as u64,
            "status": response.status.as_u16(),
            "headers": header_values(&response.headers),
        })
    }
}

impl HttpLogFormatter for JsonHttpLogFormatter {
    fn format_request(&self, precorrelation: &Precorrelation, request: &CapturedRequest) -> Result<String> {
        Ok(serde_json::to_string(&self.request_value(precorrelation, request))?)
    }

    fn format_response(&self, correlation: &Correlation, response: &CapturedResponse) -> Result<String> {
        Ok(serde_json::to_string(&self.response_value(correlation, response))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, HeaderValue, Method, StatusCode};
    use std::time::Duration;

    #[test]
    fn test_request_and_response_lines() {
        let mut headers = HeaderMap::new();
        headers.append("accept", HeaderValue::from_static("application/json"));
        headers.append("accept", HeaderValue::from_static("text/plain"));
        let request = CapturedRequest {
            method: Method::GET,
            url: "http://localhost/users?page=1".to_string(),
            headers,
            body: Bytes::new(),
        };
        let precorrelation = Precorrelation::new();
        let formatter = JsonHttpLogFormatter::new();

        let line = formatter.format_request(&precorrelation, &request).unwrap();
        assert!(!line.contains('\n'));
        let value: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["type"], "request");
        assert_eq!(value["method"], "GET");
        assert_eq!(value["uri"], "http://localhost/users?page=1");
        assert_eq!(value["correlation"], precorrelation.id());
        assert_eq!(value["headers"]["accept"], json!(["application/json", "text/plain"]));

        let response = CapturedResponse {
            status: StatusCode::NOT_FOUND,
            headers: HeaderMap::new(),
            body: Bytes::from_static(b"{}"),
        };
        let correlation = precorrelation.correlate(Duration::from_millis(37));
        let value: Value = serde_json::from_str(&formatter.format_response(&correlation, &response).unwrap()).unwrap();
        assert_eq!(value["status"], 404);
        assert_eq!(value["duration"], 37);
        assert_eq!(value["correlation"], precorrelation.id());
        assert!(value.get("body").is_none());
    }
}
