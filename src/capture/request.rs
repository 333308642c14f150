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
use std::io::{self, Read};

use bytes::Bytes;
use http::request::Parts;
use http::{HeaderMap, Method, Request, Uri};

use crate::capture::message::{full_url, CapturedRequest, HttpMessage};

/// Request wrapper that keeps a copy of every body byte handed downstream.
///
/// Reading through the wrapper is indistinguishable from reading the original
/// body. In eager mode the body is pulled into the cache up front and replayed,
/// including a read error hit on the way.
#[derive(Debug)]
pub struct CachingRequest<R> {
    parts: Parts,
    body: R,
    cache: Vec<u8>,
    replay: Option<usize>,
    pending_error: Option<io::Error>,
}

impl<R> CachingRequest<R> {
    pub fn new(request: Request<R>) -> Self {
        let (parts, body) = request.into_parts();
        Self {
            parts,
            body,
            cache: Vec::new(),
            replay: None,
            pending_error: None,
        }
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn parts(&self) -> &Parts {
        &self.parts
    }

    /// Full URL including the decoded query string.
    pub fn request_url(&self) -> String {
        full_url(&self.parts.uri, &self.parts.headers)
    }

    /// Bytes read so far (or everything, in eager mode).
    pub fn content_as_bytes(&self) -> &[u8] {
        &self.cache
    }

    pub fn is_eager(&self) -> bool {
        self.replay.is_some()
    }

    pub fn snapshot(&self) -> CapturedRequest {
        CapturedRequest {
            method: self.parts.method.clone(),
            url: self.request_url(),
            headers: self.parts.headers.clone(),
            body: Bytes::copy_from_slice(&self.cache),
        }
    }

    pub(crate) fn start_replay(&mut self, error: Option<io::Error>) {
        self.replay = Some(0);
        self.pending_error = error;
    }

    pub(crate) fn cache_mut(&mut self) -> &mut Vec<u8> {
        &mut self.cache
    }

    pub(crate) fn body_mut(&mut self) -> &mut R {
        &mut self.body
    }

    /// Serves the next chunk from the cache in eager mode.
    /// `None` means the wrapper reads through to the body instead.
    pub(crate) fn replay_into(&mut self, buf: &mut [u8]) -> Option<io::Result<usize>> {
        let pos = self.replay?;
        if pos < self.cache.len() {
            let n = buf.len().min(self.cache.len() - pos);
            buf[..n].copy_from_slice(&self.cache[pos..pos + n]);
            self.replay = Some(pos + n);
            return Some(Ok(n));
        }
        match self.pending_error.take() {
            Some(err) => Some(Err(err)),
            None => Some(Ok(0)),
        }
    }
}

impl<R: Read> CachingRequest<R> {
    /// Wraps the request and buffers its whole body immediately.
    pub fn eager(request: Request<R>) -> Self {
        let mut wrapper = Self::new(request);
        let mut cache = Vec::new();
        let error = wrapper.body.read_to_end(&mut cache).err();
        wrapper.cache = cache;
        wrapper.start_replay(error);
        wrapper
    }
}

impl<R: Read> Read for CachingRequest<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(result) = self.replay_into(buf) {
            return result;
        }
        let n = self.body.read(buf)?;
        self.cache.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

impl<R> HttpMessage for CachingRequest<R> {
    fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    fn body(&self) -> &[u8] {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailAfter {
        data: &'static [u8],
        served: bool,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer gone"));
            }
            self.served = true;
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            Ok(n)
        }
    }

    #[test]
    fn test_lazy_read_tees_into_cache() {
        let request = Request::post("/items").body(&b"{\"id\":1}"[..]).unwrap();
        let mut wrapper = CachingRequest::new(request);
        assert!(wrapper.content_as_bytes().is_empty());

        let mut seen = String::new();
        wrapper.read_to_string(&mut seen).unwrap();
        assert_eq!(seen, "{\"id\":1}");
        assert_eq!(wrapper.content_as_bytes(), b"{\"id\":1}");
    }

    #[test]
    fn test_eager_replays_same_bytes() {
        let request = Request::post("/items").body(&b"payload"[..]).unwrap();
        let mut wrapper = CachingRequest::eager(request);
        assert!(wrapper.is_eager());
        assert_eq!(wrapper.content_as_bytes(), b"payload");

        let mut first = [0u8; 3];
        assert_eq!(wrapper.read(&mut first).unwrap(), 3);
        let mut rest = Vec::new();
        wrapper.read_to_end(&mut rest).unwrap();
        assert_eq!([&first[..], &rest[..]].concat(), b"payload");
        assert_eq!(wrapper.content_as_bytes(), b"payload");
    }

    #[test]
    fn test_eager_replays_read_error_after_data() {
        let body = FailAfter { data: b"partial", served: false };
        let request = Request::post("/upload").body(body).unwrap();
        let mut wrapper = CachingRequest::eager(request);
        assert_eq!(wrapper.content_as_bytes(), b"partial");

        let mut buf = [0u8; 16];
        assert_eq!(wrapper.read(&mut buf).unwrap(), 7);
        let err = wrapper.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(wrapper.read(&mut buf).unwrap(), 0);
    }
}
