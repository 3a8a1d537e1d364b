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
    #[snafu(display("Failed to parse partition spec, err:{}", source))]
    MalformedSpec { source: serde_json::Error },

    #[snafu(display(
        "Invalid node set in partition rule, raw:{}.\nBacktrace:\n{}",
        raw,
        backtrace
    ))]
    InvalidNodeSet { raw: String, backtrace: Backtrace },

    #[snafu(display("Partition rule's node set must not be empty.\nBacktrace:\n{}", backtrace))]
    EmptyNodeSet { backtrace: Backtrace },

    #[snafu(display(
        "Unsupported predicate operator, op:{}.\nBacktrace:\n{}",
        op,
        backtrace
    ))]
    UnsupportedOperator { op: String, backtrace: Backtrace },

    #[snafu(display(
        "Predicate literal does not fit column type, column:{}, data_type:{:?}.\nBacktrace:\n{}",
        column,
        data_type,
        backtrace
    ))]
    LiteralTypeMismatch {
        column: String,
        data_type: value::DataType,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Partition rule references a column absent from the table schema, \
         table:{}, column:{}, rule_idx:{}.\nBacktrace:\n{}",
        table,
        column,
        rule_idx,
        backtrace
    ))]
    BadRule {
        table: String,
        column: String,
        rule_idx: usize,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Projection column absent from the table schema, table:{}, column:{}.\nBacktrace:\n{}",
        table,
        column,
        backtrace
    ))]
    UnknownProjectionColumn {
        table: String,
        column: String,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Too many rules in partition spec, count:{}, limit:64.\nBacktrace:\n{}",
        count,
        backtrace
    ))]
    TooManyRules { count: usize, backtrace: Backtrace },

    #[snafu(display("Unknown rule index in cover plan, rule_idx:{}.\nBacktrace:\n{}", rule_idx, backtrace))]
    UnknownRuleIndex { rule_idx: usize, backtrace: Backtrace },
}

define_result!(Error);
