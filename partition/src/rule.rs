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

//! A single partition rule: node set, predicate, projection, index.

use value::{Operator, Row, Schema, Value};

use crate::error::{BadRule, Result, UnknownProjectionColumn};

/// One (operator, literal) condition against a single column.
#[derive(Clone, Debug)]
pub struct Condition {
    pub op: Operator,
    pub literal: Value,
}

/// A conjunction of conditions per column. A column absent from the map
/// carries no constraint.
#[derive(Clone, Debug, Default)]
pub struct Predicate {
    pub(crate) conditions: Vec<(String, Vec<Condition>)>,
}

impl Predicate {
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(|(c, _)| c.as_str())
    }
}

/// One entry of a table's partition spec.
#[derive(Clone, Debug)]
pub struct PartitionRule {
    /// Dense, 0-based ordinal assigned at parse time.
    pub index: usize,
    /// Non-empty set of node indices that store this rule's fragments.
    pub node_set: Vec<usize>,
    pub predicate: Predicate,
    /// Ordered list of original columns retained at this fragment.
    pub projection: Vec<String>,
}

impl PartitionRule {
    /// `fragment_name` per the wire-visible naming convention `<table>_R<ruleIdx>`.
    pub fn fragment_name(&self, table_name: &str) -> String {
        format!("{table_name}_R{}", self.index)
    }

    /// Does `row` (under `schema`) satisfy this rule's predicate?
    ///
    /// A predicate column absent from the schema is a [`crate::Error::BadRule`];
    /// per the propagation policy (spec.md §7) the *caller* decides whether
    /// that aborts the write or is merely treated as non-matching -- this
    /// function always returns the error so the caller can apply that policy
    /// (see `PartitionSpec::matching_rules`).
    pub fn matches(&self, table_name: &str, schema: &Schema, row: &Row) -> Result<bool> {
        for (column, conditions) in &self.conditions_ref() {
            let col_idx = schema.column_index(column).ok_or_else(|| {
                BadRule {
                    table: table_name.to_string(),
                    column: column.to_string(),
                    rule_idx: self.index,
                }
                .build()
            })?;
            let value = row.get(col_idx).expect("row matches schema width");
            for condition in *conditions {
                let satisfied = condition.op.evaluate(value, &condition.literal);
                if satisfied != Some(true) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn conditions_ref(&self) -> Vec<(&str, &Vec<Condition>)> {
        self.predicate
            .conditions
            .iter()
            .map(|(c, conds)| (c.as_str(), conds))
            .collect()
    }

    /// Produce the fragment row values: the projected user columns, in
    /// projection order. The row-id itself is injected by the caller, which
    /// owns the coordinator's row-id counter.
    pub fn project(&self, table_name: &str, schema: &Schema, row: &Row) -> Result<Vec<Value>> {
        self.projection
            .iter()
            .map(|name| {
                let idx = schema.column_index(name).ok_or_else(|| {
                    UnknownProjectionColumn {
                        table: table_name.to_string(),
                        column: name.to_string(),
                    }
                    .build()
                })?;
                Ok(row.get(idx).expect("row matches schema width").clone())
            })
            .collect()
    }
}
