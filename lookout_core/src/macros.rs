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

/// Builds an ordered `property => value` map, usable as a map parameter object
/// or as the additional parameters of a bound statement.
///
/// ```
/// use lookout_core::{properties, SqlValue};
///
/// let id = 42;
/// let props = properties! {
///     "id" => id,
///     "name" => "Alice",
/// };
/// assert_eq!(props.get("id"), Some(&SqlValue::Int(42)));
/// ```
#[macro_export]
macro_rules! properties {
    () => {
        $crate::indexmap::IndexMap::<std::string::String, $crate::SqlValue>::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {
        {
            let mut output = $crate::indexmap::IndexMap::<std::string::String, $crate::SqlValue>::new();
            $(
                output.insert(std::string::String::from($name), $crate::IntoSqlValue::into_value(&$value));
            )+
            output
        }
    };
}

/// `#[cfg]` if/else chains over item blocks, evaluated in the calling crate.
#[macro_export]
macro_rules! cfg_if {
    (
        $(
            if #[cfg( $i_meta:meta )] { $( $i_tokens:tt )* }
        ) else+
        else { $( $e_tokens:tt )* }
    ) => {
        $crate::cfg_if! {
            @__items () ;
            $(
                (( $i_meta ) ( $( $i_tokens )* )) ,
            )+
            (() ( $( $e_tokens )* )) ,
        }
    };

    (
        if #[cfg( $i_meta:meta )] { $( $i_tokens:tt )* }
        $(
            else if #[cfg( $e_meta:meta )] { $( $e_tokens:tt )* }
        )*
    ) => {
        $crate::cfg_if! {
            @__items () ;
            (( $i_meta ) ( $( $i_tokens )* )) ,
            $(
                (( $e_meta ) ( $( $e_tokens )* )) ,
            )*
        }
    };

    // Each branch is emitted under its own cfg and the negation of every earlier one.
    (@__items ( $( $_:meta , )* ) ; ) => {};
    (
        @__items ( $( $no:meta , )* ) ;
        (( $( $yes:meta )? ) ( $( $tokens:tt )* )) ,
        $( $rest:tt , )*
    ) => {
        #[cfg(all(
            $( $yes , )?
            not(any( $( $no ),* ))
        ))]
        $crate::cfg_if! { @__identity $( $tokens )* }

        $crate::cfg_if! {
            @__items ( $( $no , )* $( $yes , )? ) ;
            $( $rest , )*
        }
    };

    (@__identity $( $tokens:tt )* ) => {
        $( $tokens )*
    };
}
