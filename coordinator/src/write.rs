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

//! `BuildTable` (spec.md §4.2) and `FragmentWrite` (spec.md §4.3).

use futures::future::join_all;
use log::info;
use node::FragmentSchema;
use partition::PartitionSpec;
use rpc::{node_endpoint, Transport};
use snafu::ResultExt;
use value::{FragmentRow, Row, RowId, Schema};

use crate::error::{NotRouted, Result, Transport as TransportCtx};

/// Reply to `FragmentWrite`. Extends the spec's bare acknowledgment string
/// with the diagnostics spec.md §9's open question asks for: whether the
/// row was routed to any fragment at all, and how many of the dispatched
/// per-fragment writes the transport reported as dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteAck {
    pub row_id: RowId,
    pub routed: bool,
    pub attempted: usize,
    pub dropped: usize,
}

/// Register `schema`'s fragments with every node named in `spec`'s rules.
/// Caller must have already reserved `table` in the catalog (spec.md §4.2:
/// a duplicate table name must fail *before* any node is contacted).
pub async fn build_table(
    transport: &Transport,
    table: &str,
    schema: &Schema,
    spec: &PartitionSpec,
) -> Result<()> {
    info!("Building table, table:{table}, rules:{}", spec.rules.len());
    for rule in &spec.rules {
        let fragment_name = rule.fragment_name(table);
        let columns = schema
            .project(&rule.projection)
            .expect("rule projection columns were validated at parse time");
        for &node_idx in &rule.node_set {
            let endpoint = node_endpoint(node_idx);
            let fragment_schema = FragmentSchema::new(fragment_name.clone(), columns.clone());
            transport
                .call_node(&endpoint, "BuildFragment", |n| async move {
                    n.build_fragment(fragment_schema).await
                })
                .await
                .context(TransportCtx)?;
        }
    }
    Ok(())
}

/// Route `row` into every fragment whose rule matches it (spec.md §4.3).
///
/// `strict_routing`: when `true`, a row matching no rule fails with
/// `NotRouted` instead of being silently dropped (the source's original
/// behavior, preserved as the default -- see SPEC_FULL.md §9).
/// `best_effort`: when `true` (the fire-and-forget default), a dropped
/// per-fragment write does not fail the call; when `false`, the first
/// dropped write aborts it.
#[allow(clippy::too_many_arguments)]
pub async fn fragment_write(
    transport: &Transport,
    table: &str,
    schema: &Schema,
    spec: &PartitionSpec,
    row_id: RowId,
    row: Row,
    strict_routing: bool,
    best_effort: bool,
) -> Result<WriteAck> {
    let matching = spec.matching_rules(table, schema, &row);
    if matching.is_empty() {
        if strict_routing {
            return NotRouted {
                table: table.to_string(),
            }
            .fail();
        }
        return Ok(WriteAck {
            row_id,
            routed: false,
            attempted: 0,
            dropped: 0,
        });
    }

    let mut futures = Vec::new();
    for rule in matching {
        let fragment_name = rule.fragment_name(table);
        let values = rule
            .project(table, schema, &row)
            .expect("rule matched, so its projection columns exist");
        for &node_idx in &rule.node_set {
            let endpoint = node_endpoint(node_idx);
            let fragment_name = fragment_name.clone();
            let fragment_row = FragmentRow::new(row_id, values.clone());
            futures.push(async move {
                transport
                    .call_node(&endpoint, "Write", |n| async move {
                        n.write(&fragment_name, fragment_row).await
                    })
                    .await
            });
        }
    }

    let attempted = futures.len();
    let results = join_all(futures).await;
    let dropped = results.iter().filter(|r| r.is_err()).count();

    if !best_effort {
        if let Some(Err(err)) = results.into_iter().find(|r| r.is_err()) {
            return Err(err).context(TransportCtx);
        }
    }

    Ok(WriteAck {
        row_id,
        routed: true,
        attempted,
        dropped,
    })
}
