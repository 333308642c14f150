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

//! Destinations for captured HTTP exchanges.
mod dual;
mod format;

pub use dual::DualLogSink;
pub use format::{HttpLogFormatter, JsonHttpLogFormatter};

use std::time::Duration;

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::capture::{CapturedRequest, CapturedResponse};
use crate::errors::Result;

/// Identity of an exchange before its response exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Precorrelation {
    id: String,
    start: DateTime<Local>,
}

impl Precorrelation {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            start: Local::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub fn correlate(&self, duration: Duration) -> Correlation {
        Correlation {
            id: self.id.clone(),
            start: self.start,
            duration,
        }
    }
}

impl Default for Precorrelation {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity and timing of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlation {
    id: String,
    start: DateTime<Local>,
    duration: Duration,
}

impl Correlation {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

pub trait Sink: Send + Sync {
    fn is_active(&self) -> bool {
        true
    }

    fn write_request(&self, precorrelation: &Precorrelation, request: &CapturedRequest) -> Result<()>;

    fn write_response(
        &self,
        correlation: &Correlation,
        request: &CapturedRequest,
        response: &CapturedResponse,
    ) -> Result<()>;
}
