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

//! Log channels.
//!
//! Components never talk to a logging backend directly; they ask a
//! [`LoggerFactory`] for a named [`LogChannel`]. The default factory forwards to
//! `tracing`, the recording one keeps events in memory.
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp layout used in rendered log lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Tracking level (lowest priority)
    Trace = 1,
    /// Debug level
    Debug = 2,
    /// Information level
    #[default]
    Info = 3,
    /// Warning level
    Warn = 4,
    /// Error Level (Highest Priority)
    Error = 5,
}

impl LogLevel {
    /// Parsing logs from the string level
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ERROR" | "ERR" => Some(LogLevel::Error),
            "WARN" | "WARNING" => Some(LogLevel::Warn),
            "INFO" => Some(LogLevel::Info),
            "DEBUG" => Some(LogLevel::Debug),
            "TRACE" => Some(LogLevel::Trace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Whether a message at `other` passes a threshold of `self`.
    pub fn should_log(&self, other: LogLevel) -> bool {
        *self <= other
    }
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (*self as u8).cmp(&(*other as u8))
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named destination for log lines.
///
/// Each call to [`LogChannel::log`] is one event; implementations must not
/// interleave two concurrent events.
pub trait LogChannel: Send + Sync {
    fn name(&self) -> &str;

    fn log(&self, level: LogLevel, message: &str);

    fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message)
    }

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message)
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message)
    }

    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message)
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message)
    }
}

/// Hands out channels by name. Statement logging asks for one channel per
/// statement id, so lookups happen on every invocation.
pub trait LoggerFactory: Send + Sync {
    fn channel(&self, name: &str) -> Arc<dyn LogChannel>;
}

/// Channels that emit `tracing` events with a `category` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLoggerFactory;

impl TracingLoggerFactory {
    pub fn new() -> Self {
        TracingLoggerFactory
    }
}

impl LoggerFactory for TracingLoggerFactory {
    fn channel(&self, name: &str) -> Arc<dyn LogChannel> {
        Arc::new(TracingChannel { name: name.to_string() })
    }
}

#[derive(Debug, Clone)]
pub struct TracingChannel {
    name: String,
}

impl LogChannel for TracingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&self, level: LogLevel, message: &str) {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let category = self.name.as_str();
        match level {
            LogLevel::Trace => tracing::trace!(category, "{} {}", timestamp, message),
            LogLevel::Debug => tracing::debug!(category, "{} {}", timestamp, message),
            LogLevel::Info => tracing::info!(category, "{} {}", timestamp, message),
            LogLevel::Warn => tracing::warn!(category, "{} {}", timestamp, message),
            LogLevel::Error => tracing::error!(category, "{} {}", timestamp, message),
        }
    }
}

/// One emitted log line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEvent {
    pub channel: String,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:<5} [{}] {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.level,
            self.channel,
            self.message
        )
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Clone, Default)]
pub struct RecordingLoggerFactory {
    events: Arc<Mutex<Vec<LogEvent>>>,
    min_level: Option<LogLevel>,
}

impl RecordingLoggerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop events below `level` on channels handed out afterwards.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = Some(level);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    pub fn events_for(&self, channel: &str) -> Vec<LogEvent> {
        self.lock().iter().filter(|e| e.channel == channel).cloned().collect()
    }

    /// Messages logged on `channel`, in order.
    pub fn messages(&self, channel: &str) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|e| e.channel == channel)
            .map(|e| e.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl LoggerFactory for RecordingLoggerFactory {
    fn channel(&self, name: &str) -> Arc<dyn LogChannel> {
        Arc::new(RecordingChannel {
            name: name.to_string(),
            events: self.events.clone(),
            min_level: self.min_level,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RecordingChannel {
    name: String,
    events: Arc<Mutex<Vec<LogEvent>>>,
    min_level: Option<LogLevel>,
}

impl LogChannel for RecordingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&self, level: LogLevel, message: &str) {
        if !self.min_level.map_or(true, |min| min.should_log(level)) {
            return;
        }
        let event = LogEvent {
            channel: self.name.clone(),
            level,
            message: message.to_string(),
            timestamp: Local::now(),
        };
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}
