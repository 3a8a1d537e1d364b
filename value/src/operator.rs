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

//! Predicate comparison operators.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
}

impl Operator {
    /// Evaluate `lhs <op> rhs`. Returns `None` if the two values are not
    /// comparable under this operator (mixed, non-widenable types); callers
    /// treat `None` as "condition not satisfied", per the spec's rule that
    /// mixed comparisons fail the predicate rather than error out.
    pub fn evaluate(&self, lhs: &Value, rhs: &Value) -> Option<bool> {
        match self {
            Operator::Eq => lhs.values_equal(rhs),
            Operator::Ne => lhs.values_equal(rhs).map(|eq| !eq),
            Operator::Lt => lhs.partial_cmp_value(rhs).map(|o| o == Ordering::Less),
            Operator::Le => lhs
                .partial_cmp_value(rhs)
                .map(|o| o != Ordering::Greater),
            Operator::Gt => lhs.partial_cmp_value(rhs).map(|o| o == Ordering::Greater),
            Operator::Ge => lhs.partial_cmp_value(rhs).map(|o| o != Ordering::Less),
        }
    }
}
