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

//! The error kinds of spec.md §7, gathered at the coordinator boundary.

use snafu::{Backtrace, Snafu};
use value::define_result;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Table already exists, table:{}.\nBacktrace:\n{}", table, backtrace))]
    AlreadyExists { table: String, backtrace: Backtrace },

    #[snafu(display("No such table, table:{}.\nBacktrace:\n{}", table, backtrace))]
    NoSuchTable { table: String, backtrace: Backtrace },

    #[snafu(display(
        "No such column, table:{}, column:{}.\nBacktrace:\n{}",
        table,
        column,
        backtrace
    ))]
    NoSuchColumn {
        table: String,
        column: String,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Row matched no partition rule and strict routing is enabled, table:{}.\nBacktrace:\n{}",
        table,
        backtrace
    ))]
    NotRouted { table: String, backtrace: Backtrace },

    #[snafu(display(
        "Vertical replicas disagree on a cell, table:{}, row_id:{}, column:{}.\nBacktrace:\n{}",
        table,
        row_id,
        column,
        backtrace
    ))]
    Inconsistent {
        table: String,
        row_id: u64,
        column: String,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Reconstruction left holes, the set cover did not cover every rule, \
         table:{}, row_id:{}, column:{}.\nBacktrace:\n{}",
        table,
        row_id,
        column,
        backtrace
    ))]
    Incomplete {
        table: String,
        row_id: u64,
        column: String,
        backtrace: Backtrace,
    },

    #[snafu(display("Failed to build partition spec, err:{}", source))]
    Partition { source: partition::Error },

    #[snafu(display("Transport error, err:{}", source))]
    Transport { source: rpc::Error },
}

define_result!(Error);
