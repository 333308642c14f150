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
use crate::SqlValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

pub trait IntoSqlValue {
    fn into_value(&self) -> SqlValue;
}

macro_rules! impl_into_sql_value {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl IntoSqlValue for $ty {
                fn into_value(&self) -> SqlValue {
                    SqlValue::$variant(self.to_owned())
                }
            }
        )*
    };
}

// Unsigned types widen into the next signed variant so nothing wraps.
macro_rules! impl_widening_into_sql_value {
    ($($ty:ty => $variant:ident($target:ty)),*) => {
        $(
            impl IntoSqlValue for $ty {
                fn into_value(&self) -> SqlValue {
                    SqlValue::$variant(<$target>::from(*self))
                }
            }
        )*
    };
}

impl_into_sql_value! {
    bool => Bool,
    i8 => Tinyint,
    i16 => Smallint,
    i32 => Int,
    i64 => Bigint,
    f32 => Float,
    f64 => Double,
    char => Char,
    String => Text,
    Vec<u8> => Blob,
    JsonValue => Json,
    Uuid => Uuid,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => DateTime,
    DateTime<Utc> => Timestamp
}

impl_widening_into_sql_value! {
    u8 => Smallint(i16),
    u16 => Int(i32),
    u32 => Bigint(i64)
}

impl IntoSqlValue for u64 {
    fn into_value(&self) -> SqlValue {
        match i64::try_from(*self) {
            Ok(v) => SqlValue::Bigint(v),
            Err(_) => SqlValue::Text(self.to_string()),
        }
    }
}

impl IntoSqlValue for usize {
    fn into_value(&self) -> SqlValue {
        (*self as u64).into_value()
    }
}

impl IntoSqlValue for &str {
    fn into_value(&self) -> SqlValue {
        SqlValue::Text(self.to_string())
    }
}

impl IntoSqlValue for () {
    fn into_value(&self) -> SqlValue {
        SqlValue::Null
    }
}

impl IntoSqlValue for SqlValue {
    fn into_value(&self) -> SqlValue {
        self.clone()
    }
}

impl<T: IntoSqlValue> IntoSqlValue for Option<T> {
    fn into_value(&self) -> SqlValue {
        match self {
            Some(val) => val.into_value(),
            None => SqlValue::Null,
        }
    }
}

macro_rules! impl_from_for_sql_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SqlValue {
                fn from(value: $ty) -> Self {
                    value.into_value()
                }
            }
        )*
    };
}

impl_from_for_sql_value!(
    bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, char, String, &str,
    Vec<u8>, JsonValue, Uuid, NaiveDate, NaiveTime, NaiveDateTime, DateTime<Utc>
);

impl<T: IntoSqlValue> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.into_value()
    }
}
