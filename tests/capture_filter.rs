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
//! Capture filter tests.
//!
use std::io::{Read, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use http::header::{CONTENT_TYPE, SET_COOKIE};
use http::{HeaderValue, Request, StatusCode};
use lookout::prelude::*;
use lookout::{BODY_CHANNEL, GENERAL_CHANNEL};

fn bridged_filter(loggers: &RecordingLoggerFactory, config: CaptureConfig) -> CaptureFilter {
    CaptureFilter::new(config, loggers).with_sink(Arc::new(DualLogSink::with_defaults(loggers)))
}

#[test]
fn test_downstream_reads_the_full_request_body() {
    let loggers = RecordingLoggerFactory::new();
    let filter = CaptureFilter::new(CaptureConfig::default(), &loggers);
    let request = Request::post("/upload").body(&b"hello world"[..]).unwrap();
    let mut transport = Vec::new();
    let mut seen = String::new();

    filter
        .do_filter(request, &mut transport, |req, resp| {
            req.read_to_string(&mut seen)?;
            resp.write_all(seen.to_uppercase().as_bytes())?;
            Ok(())
        })
        .unwrap();

    assert_eq!(seen, "hello world");
    assert_eq!(transport, b"HELLO WORLD");
}

#[test]
fn test_eager_request_body_is_logged_before_downstream() {
    let loggers = RecordingLoggerFactory::new();
    let filter = CaptureFilter::new(CaptureConfig::new().set_eager_request_body(true), &loggers);
    let request = Request::post("/users")
        .header(CONTENT_TYPE, "application/json")
        .body(&br#"{"name":"Alice"}"#[..])
        .unwrap();
    let mut transport = Vec::new();
    let mut replayed = Vec::new();

    filter
        .do_filter(request, &mut transport, |req, _resp| {
            req.read_to_end(&mut replayed)?;
            Ok(())
        })
        .unwrap();

    assert_eq!(replayed, br#"{"name":"Alice"}"#);
    let messages = loggers.messages(GENERAL_CHANNEL);
    assert!(messages[0].ends_with(r#"==> Body: {"name":"Alice"}"#));
}

#[test]
fn test_request_line_decodes_query_and_keeps_repeated_headers() {
    let loggers = RecordingLoggerFactory::new();
    let filter = CaptureFilter::new(CaptureConfig::default(), &loggers);
    let request = Request::get("/search?q=caf%C3%A9+au+lait&page=2")
        .header("host", "shop.local")
        .header("accept", "text/html")
        .header("accept", "application/json")
        .body(&b""[..])
        .unwrap();
    let mut transport = Vec::new();

    filter
        .do_filter(request, &mut transport, |_req, resp| {
            resp.append_header(SET_COOKIE, HeaderValue::from_static("a=1"));
            resp.append_header(SET_COOKIE, HeaderValue::from_static("b=2"));
            Ok(())
        })
        .unwrap();

    let messages = loggers.messages(GENERAL_CHANNEL);
    assert!(messages[0].starts_with("==> Request: GET http://shop.local/search?q=café au lait&page=2\n"));
    assert!(messages[0].contains(r#""accept":["text/html","application/json"]"#));
    assert!(messages[1].contains(r#""set-cookie":["a=1","b=2"]"#));
}

#[test]
fn test_latin1_response_body_is_decoded_for_the_log() {
    let loggers = RecordingLoggerFactory::new();
    let filter = CaptureFilter::new(CaptureConfig::default(), &loggers);
    let request = Request::get("/greeting").body(&b""[..]).unwrap();
    let mut transport = Vec::new();
    // "café" in ISO-8859-1
    let body = [0x63u8, 0x61, 0x66, 0xE9];

    filter
        .do_filter(request, &mut transport, |_req, resp| {
            resp.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; CHARSET = ISO-8859-1"));
            resp.write_all(&body)?;
            Ok(())
        })
        .unwrap();

    assert_eq!(transport, body);
    let messages = loggers.messages(GENERAL_CHANNEL);
    assert!(messages[1].ends_with("<== Body: café"));
}

#[test]
fn test_panicking_downstream_still_logs_and_copies_back() {
    let loggers = RecordingLoggerFactory::new();
    let filter = CaptureFilter::new(CaptureConfig::default(), &loggers);
    let request = Request::get("/crash").body(&b""[..]).unwrap();
    let mut transport = Vec::new();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        filter.do_filter(request, &mut transport, |_req, resp| {
            resp.write_all(b"partial")?;
            panic!("handler blew up");
        })
    }));

    assert!(outcome.is_err());
    assert_eq!(transport, b"partial");
    let messages = loggers.messages(GENERAL_CHANNEL);
    assert_eq!(messages.len(), 2);
    assert!(messages[1].ends_with("<== Body: partial"));
}

#[test]
fn test_body_larger_than_limit_is_truncated_in_log_only() {
    let loggers = RecordingLoggerFactory::new();
    let filter = CaptureFilter::new(CaptureConfig::new().set_max_body_chars(Some(4)), &loggers);
    let request = Request::get("/long").body(&b""[..]).unwrap();
    let mut transport = Vec::new();

    filter
        .do_filter(request, &mut transport, |_req, resp| {
            resp.write_all(b"abcdefgh")?;
            Ok(())
        })
        .unwrap();

    assert_eq!(transport, b"abcdefgh");
    let messages = loggers.messages(GENERAL_CHANNEL);
    assert!(messages[1].ends_with("<== Body: abcd...(8 chars)"));
}

#[test]
fn test_sink_receives_formatted_exchange_and_json_bodies() {
    let loggers = RecordingLoggerFactory::new();
    let filter = bridged_filter(&loggers, CaptureConfig::new().set_eager_request_body(true));
    let request = Request::post("/orders")
        .header(CONTENT_TYPE, "application/json; charset=utf-8")
        .body(&br#"{"sku":"A-1"}"#[..])
        .unwrap();
    let mut transport = Vec::new();

    let head = filter
        .do_filter(request, &mut transport, |_req, resp| {
            resp.set_status(StatusCode::CREATED);
            resp.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            resp.write_all(br#"{"id":7}"#)?;
            Ok(())
        })
        .unwrap();

    assert_eq!(head.status(), StatusCode::CREATED);
    assert_eq!(
        loggers.messages(BODY_CHANNEL),
        vec![r#"Request Body: {"sku":"A-1"}"#.to_string(), r#"Response Body: {"id":7}"#.to_string()]
    );

    let general = loggers.messages(GENERAL_CHANNEL);
    let formatted_request = general
        .iter()
        .find_map(|m| m.strip_prefix("Formatted Request:\n"))
        .unwrap();
    let formatted_response = general
        .iter()
        .find_map(|m| m.strip_prefix("Formatted Response:\n"))
        .unwrap();
    let request_json: serde_json::Value = serde_json::from_str(formatted_request).unwrap();
    let response_json: serde_json::Value = serde_json::from_str(formatted_response).unwrap();
    assert_eq!(request_json["method"], "POST");
    assert_eq!(response_json["status"], 201);
    assert_eq!(request_json["correlation"], response_json["correlation"]);
}

#[test]
fn test_sink_skips_body_channel_for_non_json() {
    let loggers = RecordingLoggerFactory::new();
    let filter = bridged_filter(&loggers, CaptureConfig::default());
    let request = Request::get("/page").body(&b""[..]).unwrap();
    let mut transport = Vec::new();

    filter
        .do_filter(request, &mut transport, |_req, resp| {
            resp.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("text/html"));
            resp.write_all(b"<p>hi</p>")?;
            Ok(())
        })
        .unwrap();

    assert_eq!(transport, b"<p>hi</p>");
    assert!(loggers.messages(BODY_CHANNEL).is_empty());
    assert_eq!(
        loggers
            .messages(GENERAL_CHANNEL)
            .iter()
            .filter(|m| m.starts_with("Formatted "))
            .count(),
        2
    );
}

#[test]
fn test_sink_sees_json_request_body_with_default_config() {
    let loggers = RecordingLoggerFactory::new();
    let filter = bridged_filter(&loggers, CaptureConfig::default());
    let request = Request::post("/orders")
        .header(CONTENT_TYPE, "application/json")
        .body(&br#"{"sku":"B-2"}"#[..])
        .unwrap();
    let mut transport = Vec::new();
    let mut seen = String::new();

    filter
        .do_filter(request, &mut transport, |req, resp| {
            req.read_to_string(&mut seen)?;
            resp.write_all(b"done")?;
            Ok(())
        })
        .unwrap();

    assert_eq!(seen, r#"{"sku":"B-2"}"#);
    assert_eq!(loggers.messages(BODY_CHANNEL), vec![r#"Request Body: {"sku":"B-2"}"#.to_string()]);
}
