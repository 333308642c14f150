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

/// Positional placeholder in a statement template.
pub const PLACEHOLDER: char = '?';

/// Replaces `?` placeholders left to right, one per literal.
///
/// The scan never revisits text it already emitted, so a literal that itself
/// contains `?` cannot swallow a later binding. A `None` literal keeps its
/// placeholder. Surplus literals are dropped and surplus placeholders stay.
pub fn fill_placeholders<I>(template: &str, literals: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    for literal in literals {
        let Some(pos) = rest.find(PLACEHOLDER) else {
            break;
        };
        out.push_str(&rest[..pos]);
        match literal {
            Some(text) => out.push_str(&text),
            None => out.push(PLACEHOLDER),
        }
        rest = &rest[pos + PLACEHOLDER.len_utf8()..];
    }
    out.push_str(rest);
    out
}
