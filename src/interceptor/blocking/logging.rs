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
use crate::comm::ExecuteResult;
use crate::errors::Result;
use crate::interceptor::blocking::{Invocation, StatementInterceptor};
use crate::interceptor::logging::{ExecutionLogGuard, SqlLoggingInterceptor};

impl StatementInterceptor for SqlLoggingInterceptor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn order(&self) -> i32 {
        90
    }

    fn intercept(&self, invocation: Invocation<'_>) -> Result<ExecuteResult> {
        let _guard = ExecutionLogGuard::new(self, invocation.execution());
        invocation.proceed()
    }
}
