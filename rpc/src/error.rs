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
    #[snafu(display("Unknown node endpoint, endpoint:{}.\nBacktrace:\n{}", endpoint, backtrace))]
    UnknownEndpoint { endpoint: String, backtrace: Backtrace },

    #[snafu(display(
        "Transport dropped the call, endpoint:{}, method:{}.\nBacktrace:\n{}",
        endpoint,
        method,
        backtrace
    ))]
    Dropped {
        endpoint: String,
        method: String,
        backtrace: Backtrace,
    },

    #[snafu(display("Node returned an error, endpoint:{}, err:{}", endpoint, source))]
    NodeFailed { endpoint: String, source: node::Error },
}

define_result!(Error);
