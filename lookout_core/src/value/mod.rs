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

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

mod to_value;

pub use to_value::*;

/// Token written in place of a placeholder whose bound value is null.
pub const NULL_LITERAL: &str = "null";

/// chrono pattern for date/time literals, `yyyy-MM-dd HH:mm:ss.SSS`.
pub const LITERAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A resolved bound-parameter value.
///
/// The variant is the value shape: it only decides how the value is rendered
/// into a logged SQL literal.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SqlValue {
    #[default]
    Null,
    Bool(bool),
    Tinyint(i8),
    Smallint(i16),
    Int(i32),
    Bigint(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Text(String),
    Blob(Vec<u8>),
    Json(JsonValue),
    Uuid(Uuid),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
}

/// The shape of a [`SqlValue`], used as the key of the type-handler registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Bool,
    Tinyint,
    Smallint,
    Int,
    Bigint,
    Float,
    Double,
    Char,
    Text,
    Blob,
    Json,
    Uuid,
    Date,
    Time,
    DateTime,
    Timestamp,
}

impl ValueKind {
    /// Every kind that carries a value (everything but `Null`).
    pub const SCALARS: [ValueKind; 16] = [
        ValueKind::Bool,
        ValueKind::Tinyint,
        ValueKind::Smallint,
        ValueKind::Int,
        ValueKind::Bigint,
        ValueKind::Float,
        ValueKind::Double,
        ValueKind::Char,
        ValueKind::Text,
        ValueKind::Blob,
        ValueKind::Json,
        ValueKind::Uuid,
        ValueKind::Date,
        ValueKind::Time,
        ValueKind::DateTime,
        ValueKind::Timestamp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Tinyint => "i8",
            ValueKind::Smallint => "i16",
            ValueKind::Int => "i32",
            ValueKind::Bigint => "i64",
            ValueKind::Float => "f32",
            ValueKind::Double => "f64",
            ValueKind::Char => "char",
            ValueKind::Text => "String",
            ValueKind::Blob => "Vec<u8>",
            ValueKind::Json => "serde_json::Value",
            ValueKind::Uuid => "Uuid",
            ValueKind::Date => "NaiveDate",
            ValueKind::Time => "NaiveTime",
            ValueKind::DateTime => "NaiveDateTime",
            ValueKind::Timestamp => "DateTime<Utc>",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SqlValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            SqlValue::Null => ValueKind::Null,
            SqlValue::Bool(_) => ValueKind::Bool,
            SqlValue::Tinyint(_) => ValueKind::Tinyint,
            SqlValue::Smallint(_) => ValueKind::Smallint,
            SqlValue::Int(_) => ValueKind::Int,
            SqlValue::Bigint(_) => ValueKind::Bigint,
            SqlValue::Float(_) => ValueKind::Float,
            SqlValue::Double(_) => ValueKind::Double,
            SqlValue::Char(_) => ValueKind::Char,
            SqlValue::Text(_) => ValueKind::Text,
            SqlValue::Blob(_) => ValueKind::Blob,
            SqlValue::Json(_) => ValueKind::Json,
            SqlValue::Uuid(_) => ValueKind::Uuid,
            SqlValue::Date(_) => ValueKind::Date,
            SqlValue::Time(_) => ValueKind::Time,
            SqlValue::DateTime(_) => ValueKind::DateTime,
            SqlValue::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            SqlValue::Date(_) | SqlValue::Time(_) | SqlValue::DateTime(_) | SqlValue::Timestamp(_)
        )
    }

    /// The value as a point in time. Dates start at midnight, bare times sit on
    /// the epoch date, timestamps use their UTC wall clock.
    pub fn as_naive_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            SqlValue::Date(d) => d.and_hms_opt(0, 0, 0),
            SqlValue::Time(t) => NaiveDate::from_ymd_opt(1970, 1, 1).map(|d| d.and_time(*t)),
            SqlValue::DateTime(dt) => Some(*dt),
            SqlValue::Timestamp(ts) => Some(ts.naive_utc()),
            _ => None,
        }
    }

    /// Logging-only SQL literal for this value.
    ///
    /// Text and chars are quoted verbatim, embedded quotes are NOT escaped, so the
    /// result must never be sent to a database.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => NULL_LITERAL.to_string(),
            SqlValue::Text(s) => format!("'{}'", s),
            SqlValue::Char(c) => format!("'{}'", c),
            v if v.is_temporal() => match v.as_naive_datetime() {
                Some(dt) => format!("'{}'", dt.format(LITERAL_DATETIME_FORMAT)),
                None => v.to_string(),
            },
            other => other.to_string(),
        }
    }
}

/// Default textual representation, unquoted.
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str(NULL_LITERAL),
            SqlValue::Bool(v) => write!(f, "{}", v),
            SqlValue::Tinyint(v) => write!(f, "{}", v),
            SqlValue::Smallint(v) => write!(f, "{}", v),
            SqlValue::Int(v) => write!(f, "{}", v),
            SqlValue::Bigint(v) => write!(f, "{}", v),
            // Debug keeps the fractional part, 1.0 stays "1.0"
            SqlValue::Float(v) => write!(f, "{:?}", v),
            SqlValue::Double(v) => write!(f, "{:?}", v),
            SqlValue::Char(v) => write!(f, "{}", v),
            SqlValue::Text(v) => f.write_str(v),
            SqlValue::Blob(v) => write!(f, "BLOB({} bytes)", v.len()),
            SqlValue::Json(v) => write!(f, "{}", v),
            SqlValue::Uuid(v) => write!(f, "{}", v),
            SqlValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            SqlValue::Time(v) => write!(f, "{}", v.format("%H:%M:%S%.3f")),
            SqlValue::DateTime(v) => write!(f, "{}", v.format(LITERAL_DATETIME_FORMAT)),
            SqlValue::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
        }
    }
}
