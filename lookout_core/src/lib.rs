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

//! Shared building blocks for lookout: bound values, parameter mappings,
//! statement descriptions and charset handling.

#![deny(clippy::all)]

mod error;
mod value;
mod param;
mod statement;
mod charset;
mod macros;

#[doc(inline)]
pub use error::*;
#[doc(inline)]
pub use value::*;
#[doc(inline)]
pub use param::*;
#[doc(inline)]
pub use statement::*;
#[doc(inline)]
pub use charset::*;

pub use indexmap;
pub use serde_json;
