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
use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CoreError, CoreResult};

/// Label returned when a content type carries no usable charset.
pub const DEFAULT_CHARSET: &str = "UTF-8";

static CHARSET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)charset\s*=\s*([\w-]+)").expect("charset pattern is valid")
});

/// Pulls the `charset=` parameter out of a content type.
///
/// Matching is case-insensitive and tolerates whitespace around `=`. A missing
/// content type or parameter falls back to [`DEFAULT_CHARSET`].
pub fn resolve_charset(content_type: Option<&str>) -> String {
    let content_type = match content_type {
        Some(ct) if !ct.trim().is_empty() => ct,
        _ => return DEFAULT_CHARSET.to_string(),
    };
    CHARSET_PATTERN
        .captures(content_type)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| DEFAULT_CHARSET.to_string())
}

/// The encoding registered under `label`, e.g. `utf-8`, `GBK` or `Shift_JIS`.
pub fn encoding_for_label(label: &str) -> CoreResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| CoreError::unsupported_charset(label))
}

/// Decodes a captured body using the charset declared by `content_type`.
///
/// Malformed input becomes U+FFFD; only an unknown label is an error.
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> CoreResult<String> {
    let encoding = encoding_for_label(&resolve_charset(content_type))?;
    let (text, _) = encoding.decode_without_bom_handling(body);
    Ok(text.into_owned())
}
