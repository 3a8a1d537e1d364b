// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use snafu::{Backtrace, Snafu};
use value::define_result;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display(
        "Fragment already exists, fragment:{}.\nBacktrace:\n{}",
        fragment,
        backtrace
    ))]
    AlreadyExists { fragment: String, backtrace: Backtrace },

    #[snafu(display(
        "No such fragment, fragment:{}.\nBacktrace:\n{}",
        fragment,
        backtrace
    ))]
    NoSuchFragment { fragment: String, backtrace: Backtrace },

    #[snafu(display(
        "Fragment row width does not match its schema, fragment:{}, \
         expected:{}, got:{}.\nBacktrace:\n{}",
        fragment,
        expected,
        got,
        backtrace
    ))]
    RowWidthMismatch {
        fragment: String,
        expected: usize,
        got: usize,
        backtrace: Backtrace,
    },
}

define_result!(Error);
