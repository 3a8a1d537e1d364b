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

//! Parsing the declarative, JSON-compatible partition spec of spec.md §6:
//!
//! ```json
//! {
//!   "0|2|3": {
//!     "predicate": { "grade": [ {"op": "<=", "val": 3.6} ] },
//!     "column": ["sid", "name"]
//!   }
//! }
//! ```
//!
//! Rule order in the encoding is the rule-index order, which is why the
//! parser is built on `serde_json`'s order-preserving map (the
//! `preserve_order` feature) rather than sorting keys alphabetically.

use log::warn;
use serde::Deserialize;
use snafu::ResultExt;
use value::{Operator, Row, Schema, Value};

use crate::{
    error::{
        InvalidNodeSet, LiteralTypeMismatch, MalformedSpec, Result, TooManyRules,
    },
    rule::{Condition, PartitionRule, Predicate},
};

pub const MAX_RULES: usize = 64;

#[derive(Debug, Deserialize)]
struct RawCondition {
    op: Operator,
    val: serde_json::Value,
}

#[derive(Debug, Deserialize, Default)]
struct RawRule {
    #[serde(default)]
    predicate: indexmap::IndexMap<String, Vec<RawCondition>>,
    #[serde(default, rename = "column")]
    columns: Vec<String>,
}

/// The ordered sequence of rules governing one table's horizontal and
/// vertical partitioning.
#[derive(Clone, Debug, Default)]
pub struct PartitionSpec {
    pub rules: Vec<PartitionRule>,
}

impl PartitionSpec {
    pub fn parse(schema: &Schema, json_text: &str) -> Result<Self> {
        let raw: indexmap::IndexMap<String, RawRule> =
            serde_json::from_str(json_text).context(MalformedSpec)?;

        let mut rules = Vec::with_capacity(raw.len());
        for (idx, (node_set_str, raw_rule)) in raw.into_iter().enumerate() {
            let node_set = parse_node_set(&node_set_str)?;
            let mut conditions = Vec::with_capacity(raw_rule.predicate.len());
            for (column, raw_conditions) in raw_rule.predicate {
                let data_type = schema.column(&column).map(|c| c.data_type);
                let mut parsed = Vec::with_capacity(raw_conditions.len());
                for raw_cond in raw_conditions {
                    // A predicate column absent from the schema is deferred
                    // to evaluation time (`PartitionRule::matches`) so it is
                    // reported with the row that triggered it, per the
                    // `BadRule` policy in spec.md §7. Here we only need a
                    // data type to interpret a JSON number/bool/string
                    // literal, so fall back to inferring one straight from
                    // the literal when the column is unknown.
                    let literal = match data_type {
                        Some(dt) => Value::from_json(dt, &raw_cond.val).ok_or_else(|| {
                            LiteralTypeMismatch {
                                column: column.clone(),
                                data_type: dt,
                            }
                            .build()
                        })?,
                        None => infer_literal(&raw_cond.val),
                    };
                    parsed.push(Condition {
                        op: raw_cond.op,
                        literal,
                    });
                }
                conditions.push((column, parsed));
            }

            rules.push(PartitionRule {
                index: idx,
                node_set,
                predicate: Predicate { conditions },
                projection: raw_rule.columns,
            });
        }

        if rules.len() > MAX_RULES {
            return TooManyRules { count: rules.len() }.fail();
        }

        Ok(Self { rules })
    }

    /// The rules whose predicate matches `row`. A `BadRule` (predicate
    /// column missing from the schema) is logged once and the rule is
    /// treated as non-matching, per spec.md §7's propagation policy.
    pub fn matching_rules<'a>(
        &'a self,
        table_name: &str,
        schema: &Schema,
        row: &Row,
    ) -> Vec<&'a PartitionRule> {
        self.rules
            .iter()
            .filter(|rule| match rule.matches(table_name, schema, row) {
                Ok(matched) => matched,
                Err(err) => {
                    warn!(
                        "Rule failed to evaluate, treating as non-matching, \
                         table:{table_name}, rule_idx:{}, err:{err}",
                        rule.index
                    );
                    false
                }
            })
            .collect()
    }
}

fn parse_node_set(raw: &str) -> Result<Vec<usize>> {
    let mut nodes = Vec::new();
    for part in raw.split('|') {
        let node: usize = part.parse().map_err(|_| {
            InvalidNodeSet {
                raw: raw.to_string(),
            }
            .build()
        })?;
        nodes.push(node);
    }
    if nodes.is_empty() {
        return InvalidNodeSet {
            raw: raw.to_string(),
        }
        .fail();
    }
    Ok(nodes)
}

fn infer_literal(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int64(i)
            } else {
                Value::Float64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        _ => Value::String(json.to_string()),
    }
}
