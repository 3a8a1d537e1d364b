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

//! Bandwidth-optimized distributed semi-join (spec.md §4.7): reconstruct
//! the right table, ship its join-column value set instead of whole
//! fragments, and only fall back to fetching by primary key for left-side
//! fragments that don't carry the join column at all.

use partition::{plan_cover, PartitionRule, PartitionSpec};
use rpc::{node_endpoint, Transport};
use snafu::ResultExt;
use value::{Row, Schema, Value};

use crate::{
    dataset::Dataset,
    error::{NoSuchColumn, Result, Transport as TransportCtx},
    reconstruct::{insert_col_idx, reconstruct_rules, PkRowBuilder},
};

/// `SemiJoin(joinColumn, leftTable, rightTable)`: every row of `leftTable`
/// whose `joinColumn` value appears in `rightTable`'s `joinColumn` column.
pub async fn semi_join(
    transport: &Transport,
    join_column: &str,
    left_table: &str,
    left_schema: &Schema,
    left_spec: &PartitionSpec,
    right_table: &str,
    right_schema: &Schema,
    right_spec: &PartitionSpec,
) -> Result<Dataset> {
    left_schema.column_index(join_column).ok_or_else(|| {
        NoSuchColumn {
            table: left_table.to_string(),
            column: join_column.to_string(),
        }
        .build()
    })?;
    let right_join_idx = right_schema.column_index(join_column).ok_or_else(|| {
        NoSuchColumn {
            table: right_table.to_string(),
            column: join_column.to_string(),
        }
        .build()
    })?;

    let right_builder =
        reconstruct_rules(transport, right_table, right_schema, &right_spec.rules).await?;
    let right_rows = right_builder.into_rows(right_table, right_schema)?;
    let value_set: Vec<Value> = right_rows
        .into_iter()
        .map(|row| row.get(right_join_idx).unwrap().clone())
        .collect();

    let (direct, deferred) =
        partition_by_has_column(transport, left_table, join_column, &left_spec.rules).await?;

    let mut builder = PkRowBuilder::new(left_schema.len());

    if !direct.is_empty() {
        // `plan_cover` reads each rule's `index` field as its bitmask bit
        // position, assuming a dense `0..rules.len()` slice; this subset's
        // original indices may be sparse, so renumber a throwaway copy for
        // planning purposes only and index back into `direct` for the rest.
        let plan = plan_cover(&renumbered(&direct));
        for (node_idx, local_indices) in plan {
            for local_idx in local_indices {
                let rule = &direct[local_idx];
                let rows = fetch_filtered_by_values(
                    transport,
                    left_table,
                    node_idx,
                    rule,
                    join_column,
                    &value_set,
                )
                .await?;
                let idx = insert_col_idx(left_schema, rule);
                builder.merge(left_table, left_schema, &idx, rows)?;
            }
        }
    }

    if !deferred.is_empty() {
        let pk_list = builder.row_ids();
        if !pk_list.is_empty() {
            let plan = plan_cover(&renumbered(&deferred));
            for (node_idx, local_indices) in plan {
                for local_idx in local_indices {
                    let rule = &deferred[local_idx];
                    let rows =
                        fetch_filtered_by_pks(transport, left_table, node_idx, rule, &pk_list)
                            .await?;
                    let idx = insert_col_idx(left_schema, rule);
                    builder.merge(left_table, left_schema, &idx, rows)?;
                }
            }
        }
    }

    let rows: Vec<Row> = builder.into_rows(left_table, left_schema)?;
    Ok(Dataset::new(left_schema.clone(), rows))
}

/// Clone `rules` with `index` reassigned to slice position, so `plan_cover`
/// (which treats `index` as a dense bitmask bit) can run over an arbitrary
/// subset. Fragment naming and column projection still use the original
/// (unrenumbered) rules.
fn renumbered(rules: &[PartitionRule]) -> Vec<PartitionRule> {
    rules
        .iter()
        .enumerate()
        .map(|(i, r)| PartitionRule {
            index: i,
            ..r.clone()
        })
        .collect()
}

/// Ask the first node of each rule's node set whether it carries
/// `join_column`, splitting `rules` into (direct, deferred) groups.
async fn partition_by_has_column(
    transport: &Transport,
    table: &str,
    join_column: &str,
    rules: &[PartitionRule],
) -> Result<(Vec<PartitionRule>, Vec<PartitionRule>)> {
    let mut direct = Vec::new();
    let mut deferred = Vec::new();
    for rule in rules {
        let fragment_name = rule.fragment_name(table);
        let node_idx = *rule
            .node_set
            .first()
            .expect("rule node set is non-empty by construction");
        let endpoint = node_endpoint(node_idx);
        let has_column = transport
            .call_node(&endpoint, "HasColumn", |n| {
                let fragment_name = fragment_name.clone();
                let join_column = join_column.to_string();
                async move { n.has_column(&fragment_name, &join_column).await }
            })
            .await
            .context(TransportCtx)?;
        if has_column {
            direct.push(rule.clone());
        } else {
            deferred.push(rule.clone());
        }
    }
    Ok((direct, deferred))
}

async fn fetch_filtered_by_values(
    transport: &Transport,
    table: &str,
    node_idx: usize,
    rule: &PartitionRule,
    column: &str,
    values: &[Value],
) -> Result<Vec<value::FragmentRow>> {
    let fragment_name = rule.fragment_name(table);
    let endpoint = node_endpoint(node_idx);
    let (_schema, rows) = transport
        .call_node(&endpoint, "FilterByColumnValues", |n| {
            let fragment_name = fragment_name.clone();
            let column = column.to_string();
            let values = values.to_vec();
            async move { n.filter_by_column_values(&fragment_name, &column, &values).await }
        })
        .await
        .context(TransportCtx)?;
    Ok(rows)
}

async fn fetch_filtered_by_pks(
    transport: &Transport,
    table: &str,
    node_idx: usize,
    rule: &PartitionRule,
    pks: &[value::RowId],
) -> Result<Vec<value::FragmentRow>> {
    let fragment_name = rule.fragment_name(table);
    let endpoint = node_endpoint(node_idx);
    let (_schema, rows) = transport
        .call_node(&endpoint, "FilterByPKs", |n| {
            let fragment_name = fragment_name.clone();
            let pks = pks.to_vec();
            async move { n.filter_by_pks(&fragment_name, &pks).await }
        })
        .await
        .context(TransportCtx)?;
    Ok(rows)
}
