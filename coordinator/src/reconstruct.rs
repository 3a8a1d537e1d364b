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

//! Fragment reconstruction (spec.md §4.5): merge vertically-split fragment
//! rows back into full-width logical rows keyed by row-id. Shared by
//! `Join` (reconstruct every table fully) and `SemiJoin` (reconstruct the
//! right table fully, then the surviving left rows piecemeal).

use std::collections::HashMap;

use partition::{plan_cover, PartitionRule};
use rpc::{node_endpoint, Transport};
use snafu::ResultExt;
use value::{FragmentRow, Row, RowId, Schema, Value};

use crate::error::{Incomplete, Inconsistent, Result, Transport as TransportCtx};

/// Accumulates fragment rows into full-width logical rows keyed by row-id.
/// `width` is the full table schema's column count.
pub(crate) struct PkRowBuilder {
    width: usize,
    rows: HashMap<RowId, Vec<Option<Value>>>,
}

impl PkRowBuilder {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            width,
            rows: HashMap::new(),
        }
    }

    /// Merge `fragment_rows`, whose values are ordered per `insert_col_idx`
    /// (the full-schema column index each projected value belongs in).
    pub(crate) fn merge(
        &mut self,
        table: &str,
        schema: &Schema,
        insert_col_idx: &[usize],
        fragment_rows: Vec<FragmentRow>,
    ) -> Result<()> {
        for frow in fragment_rows {
            let slot = self
                .rows
                .entry(frow.row_id)
                .or_insert_with(|| vec![None; self.width]);
            for (i, value) in frow.values.into_iter().enumerate() {
                let col_idx = insert_col_idx[i];
                match &slot[col_idx] {
                    None => slot[col_idx] = Some(value),
                    Some(existing) => {
                        if existing.values_equal(&value) != Some(true) {
                            return Inconsistent {
                                table: table.to_string(),
                                row_id: frow.row_id,
                                column: schema.columns[col_idx].name.clone(),
                            }
                            .fail();
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn row_ids(&self) -> Vec<RowId> {
        self.rows.keys().copied().collect()
    }

    pub(crate) fn contains(&self, row_id: RowId) -> bool {
        self.rows.contains_key(&row_id)
    }

    /// Drain into full logical rows, failing with `Incomplete` if any
    /// surviving row has an unset cell (a set-cover bug, per spec.md §4.5).
    pub(crate) fn into_rows(self, table: &str, schema: &Schema) -> Result<Vec<Row>> {
        let mut rows = Vec::with_capacity(self.rows.len());
        for (row_id, slots) in self.rows {
            let mut values = Vec::with_capacity(slots.len());
            for (col_idx, slot) in slots.into_iter().enumerate() {
                match slot {
                    Some(v) => values.push(v),
                    None => {
                        return Incomplete {
                            table: table.to_string(),
                            row_id,
                            column: schema.columns[col_idx].name.clone(),
                        }
                        .fail()
                    }
                }
            }
            rows.push(Row::new(values));
        }
        Ok(rows)
    }
}

/// Fetch `rule`'s fragment from `node_idx` and return its rows, tagged by
/// the rule's projection (for merging).
pub(crate) async fn fetch_fragment(
    transport: &Transport,
    table: &str,
    node_idx: usize,
    rule: &PartitionRule,
) -> Result<Vec<FragmentRow>> {
    let fragment_name = rule.fragment_name(table);
    let endpoint = node_endpoint(node_idx);
    let (_schema, rows) = transport
        .call_node(&endpoint, "GetDataset", |n| {
            let fragment_name = fragment_name.clone();
            async move { n.get_dataset(&fragment_name).await }
        })
        .await
        .context(TransportCtx)?;
    Ok(rows)
}

/// Precompute, for `rule`'s projection, the full-schema column index each
/// projected slot belongs in.
pub(crate) fn insert_col_idx(schema: &Schema, rule: &PartitionRule) -> Vec<usize> {
    rule.projection
        .iter()
        .map(|name| schema.column_index(name).expect("projection column exists"))
        .collect()
}

/// Full reconstruction of a table from its chosen cover plan (spec.md §4.4
/// + §4.5): fetch each (node, rule) pair the planner selected and merge.
pub(crate) async fn reconstruct_rules(
    transport: &Transport,
    table: &str,
    schema: &Schema,
    rules: &[PartitionRule],
) -> Result<PkRowBuilder> {
    let plan = plan_cover(rules);
    let mut builder = PkRowBuilder::new(schema.len());
    for (node_idx, rule_indices) in plan {
        for rule_idx in rule_indices {
            let rule = &rules[rule_idx];
            let rows = fetch_fragment(transport, table, node_idx, rule).await?;
            let idx = insert_col_idx(schema, rule);
            builder.merge(table, schema, &idx, rows)?;
        }
    }
    Ok(builder)
}
