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
use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST};
use http::{HeaderMap, Method, StatusCode, Uri};
use indexmap::IndexMap;
use lookout_core::{decode_body, resolve_charset, CoreResult};
use url::form_urlencoded;

/// Read access shared by live wrappers and captured snapshots.
pub trait HttpMessage {
    fn headers(&self) -> &HeaderMap;

    /// Body bytes captured so far.
    fn body(&self) -> &[u8];

    fn content_type(&self) -> Option<&str> {
        self.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    fn charset(&self) -> String {
        resolve_charset(self.content_type())
    }

    /// Body decoded with the declared charset.
    fn body_as_string(&self) -> CoreResult<String> {
        decode_body(self.body(), self.content_type())
    }
}

/// Immutable copy of a request as seen by the filter.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    /// Full request URL with the query string percent-decoded.
    pub url: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpMessage for CapturedRequest {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Immutable copy of a response as seen by the filter.
#[derive(Debug, Clone)]
pub struct CapturedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpMessage for CapturedResponse {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Header names to every value they carry, in first-seen order.
pub fn header_values(headers: &HeaderMap) -> IndexMap<String, Vec<String>> {
    let mut map: IndexMap<String, Vec<String>> = IndexMap::with_capacity(headers.keys_len());
    for (name, value) in headers.iter() {
        map.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}

/// Rebuilds the URL a client requested.
///
/// Origin-form targets take their host from the `Host` header. The query
/// string is appended percent-decoded.
pub fn full_url(uri: &Uri, headers: &HeaderMap) -> String {
    let mut url = String::new();
    match (uri.scheme_str(), uri.authority()) {
        (Some(scheme), Some(authority)) => {
            url.push_str(scheme);
            url.push_str("://");
            url.push_str(authority.as_str());
        }
        _ => {
            if let Some(host) = headers.get(HOST).and_then(|h| h.to_str().ok()) {
                url.push_str("http://");
                url.push_str(host);
            }
        }
    }
    url.push_str(uri.path());
    if let Some(query) = uri.query().filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(&decode_query(query));
    }
    url
}

/// Percent-decodes each `&`-separated segment, `+` included, keeping the layout.
pub fn decode_query(query: &str) -> String {
    query
        .split('&')
        .map(|segment| match form_urlencoded::parse(segment.as_bytes()).next() {
            Some((name, value)) if segment.contains('=') => format!("{}={}", name, value),
            Some((name, _)) => name.into_owned(),
            None => String::new(),
        })
        .collect::<Vec<_>>()
        .join("&")
}
