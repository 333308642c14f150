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
use std::io::{self, Write};

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Response, StatusCode};

use crate::capture::message::{CapturedResponse, HttpMessage};

/// Response wrapper that holds the body back until
/// [`copy_body_to_response`](CachingResponse::copy_body_to_response).
///
/// Downstream writes land in an in-memory buffer. The copy to the real
/// transport happens once; anything written after that goes straight through.
#[derive(Debug)]
pub struct CachingResponse<W> {
    status: StatusCode,
    headers: HeaderMap,
    content: Vec<u8>,
    inner: W,
    copied: bool,
}

impl<W> CachingResponse<W> {
    pub fn new(inner: W) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            content: Vec::new(),
            inner,
            copied: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Adds a header value, keeping earlier values of the same name.
    pub fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }

    pub fn content_as_bytes(&self) -> &[u8] {
        &self.content
    }

    pub fn content_size(&self) -> usize {
        self.content.len()
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    pub fn snapshot(&self) -> CapturedResponse {
        CapturedResponse {
            status: self.status,
            headers: self.headers.clone(),
            body: Bytes::copy_from_slice(&self.content),
        }
    }

    /// Status and headers as a bodiless response.
    pub fn head(&self) -> Response<()> {
        let mut response = Response::new(());
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.clone();
        response
    }

    pub(crate) fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Marks the buffer as copied. Returns `false` if it already was.
    pub(crate) fn begin_copy(&mut self) -> bool {
        !std::mem::replace(&mut self.copied, true)
    }

    pub(crate) fn buffer_write(&mut self, buf: &[u8]) -> usize {
        self.content.extend_from_slice(buf);
        buf.len()
    }

    pub(crate) fn split_for_copy(&mut self) -> (&[u8], &mut W) {
        (&self.content, &mut self.inner)
    }
}

impl<W: Write> CachingResponse<W> {
    /// Writes the buffered body to the real transport, at most once.
    pub fn copy_body_to_response(&mut self) -> io::Result<()> {
        if !self.begin_copy() {
            return Ok(());
        }
        let (content, inner) = self.split_for_copy();
        inner.write_all(content)?;
        inner.flush()
    }
}

impl<W: Write> Write for CachingResponse<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.copied {
            return self.inner.write(buf);
        }
        Ok(self.buffer_write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.copied {
            return self.inner.flush();
        }
        Ok(())
    }
}

impl<W> HttpMessage for CachingResponse<W> {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn body(&self) -> &[u8] {
        &self.content
    }
}
