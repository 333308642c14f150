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
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use std::time::Instant;

use futures_util::FutureExt;
use http::Request;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};

use crate::capture::{CachingRequest, CachingResponse, CaptureFilter};
use crate::errors::Result;
use crate::sink::Precorrelation;

impl<R: AsyncRead + Unpin> CachingRequest<R> {
    /// Async counterpart of [`CachingRequest::eager`].
    pub async fn eager_async(request: Request<R>) -> Self {
        let mut wrapper = Self::new(request);
        let mut cache = Vec::new();
        let error = wrapper.body_mut().read_to_end(&mut cache).await.err();
        *wrapper.cache_mut() = cache;
        wrapper.start_replay(error);
        wrapper
    }
}

impl<R: AsyncRead + Unpin> AsyncRead for CachingRequest<R> {
    fn poll_read(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if let Some(result) = this.replay_into(buf.initialize_unfilled()) {
            return Poll::Ready(result.map(|n| buf.advance(n)));
        }
        let before = buf.filled().len();
        ready!(Pin::new(this.body_mut()).poll_read(cx, buf))?;
        this.cache_mut().extend_from_slice(&buf.filled()[before..]);
        Poll::Ready(Ok(()))
    }
}

impl<W: AsyncWrite + Unpin> CachingResponse<W> {
    /// Async counterpart of [`CachingResponse::copy_body_to_response`].
    pub async fn copy_body_to_response_async(&mut self) -> io::Result<()> {
        if !self.begin_copy() {
            return Ok(());
        }
        let (content, inner) = self.split_for_copy();
        inner.write_all(content).await?;
        inner.flush().await
    }
}

impl<W: AsyncWrite + Unpin> AsyncWrite for CachingResponse<W> {
    fn poll_write(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        if this.is_copied() {
            return Pin::new(this.inner_mut()).poll_write(cx, buf);
        }
        Poll::Ready(Ok(this.buffer_write(buf)))
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if this.is_copied() {
            return Pin::new(this.inner_mut()).poll_flush(cx);
        }
        Poll::Ready(Ok(()))
    }

    // The real transport stays open until the buffered body is copied.
    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if this.is_copied() {
            return Pin::new(this.inner_mut()).poll_shutdown(cx);
        }
        Poll::Ready(Ok(()))
    }
}

/// Async downstream handler.
#[async_trait::async_trait]
pub trait AsyncFilterChain<R, W>: Send + Sized
where
    R: Send,
    W: Send,
{
    async fn proceed(self, request: &mut CachingRequest<R>, response: &mut CachingResponse<W>) -> Result<()>;
}

/// In-flight exchange. If it is dropped before completing (cancellation or a
/// panic in downstream) the response is still logged with what was captured.
struct Exchange<'f, R, W> {
    filter: &'f CaptureFilter,
    request: CachingRequest<R>,
    response: CachingResponse<W>,
    precorrelation: Precorrelation,
    start: Instant,
    completed: bool,
}

impl<R, W> Drop for Exchange<'_, R, W> {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        let elapsed = self.start.elapsed();
        self.filter.observe("response", || {
            self.filter
                .log_response(&self.request, &self.response, &self.precorrelation, elapsed);
            self.filter
                .general
                .warn("<== Processing did not complete, response body was not copied back");
        });
    }
}

impl CaptureFilter {
    /// Async counterpart of [`CaptureFilter::do_filter`].
    ///
    /// A panic inside `chain` is caught, the body is copied back and the panic
    /// is resumed. If the future is dropped before `chain` finishes the
    /// response is still logged but nothing is copied back.
    pub async fn do_filter_async<R, W, C>(&self, request: Request<R>, response: W, chain: C) -> Result<http::Response<()>>
    where
        R: AsyncRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send,
        C: AsyncFilterChain<R, W>,
    {
        let request = if self.buffers_request_eagerly() {
            CachingRequest::eager_async(request).await
        } else {
            CachingRequest::new(request)
        };
        let mut exchange = Exchange {
            filter: self,
            request,
            response: CachingResponse::new(response),
            precorrelation: Precorrelation::new(),
            start: Instant::now(),
            completed: false,
        };

        self.observe("request", || self.log_request(&exchange.request, &exchange.precorrelation));

        let outcome = AssertUnwindSafe(chain.proceed(&mut exchange.request, &mut exchange.response))
            .catch_unwind()
            .await;

        exchange.completed = true;
        let elapsed = exchange.start.elapsed();
        self.observe("response", || {
            self.log_response(&exchange.request, &exchange.response, &exchange.precorrelation, elapsed)
        });
        let copied = exchange.response.copy_body_to_response_async().await;

        match outcome {
            Ok(Ok(())) => {
                copied?;
                Ok(exchange.response.head())
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
}
