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

//! Shared harness for the end-to-end scenarios of `tests/scenarios.rs`.
//! Plays the role the teacher's `integration_tests::database` module
//! plays for its subprocess-driven tests, minus the subprocess: nodes and
//! the coordinator all live in one process here.

use std::sync::Arc;

use coordinator::{Coordinator, Dataset};
use node::InMemoryNode;
use rpc::{EndpointRegistry, Transport};
use value::{Row, Schema, Value};

/// Spin up `node_count` fresh `InMemoryNode`s registered as `Node0..NodeN`
/// behind a `Coordinator` with no failure injection.
pub fn new_cluster(node_count: usize) -> Coordinator {
    let mut registry = EndpointRegistry::new();
    for i in 0..node_count {
        registry.register(i, Arc::new(InMemoryNode::new()));
    }
    Coordinator::new(Transport::new(registry))
}

pub async fn build_table(coordinator: &Coordinator, table: &str, schema: Schema, spec_json: &str) {
    coordinator
        .build_table(table, schema, spec_json)
        .await
        .unwrap_or_else(|err| panic!("BuildTable({table}) failed: {err}"));
}

pub async fn write_rows(coordinator: &Coordinator, table: &str, rows: Vec<Row>) {
    for row in rows {
        coordinator
            .fragment_write(table, row)
            .await
            .unwrap_or_else(|err| panic!("FragmentWrite({table}) failed: {err}"));
    }
}

/// Render a dataset's rows as a sorted `Vec<String>` for multiset
/// comparison (spec.md §8: row order is never meaningful).
pub fn sorted_rows(dataset: &Dataset) -> Vec<String> {
    let mut rendered: Vec<String> = dataset
        .rows
        .iter()
        .map(|row| {
            row.0
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();
    rendered.sort();
    rendered
}

/// Same rendering as [`sorted_rows`], for a hand-written expected multiset
/// that was never wrapped in a `Dataset`.
pub fn sorted_values(rows: Vec<Vec<Value>>) -> Vec<String> {
    let mut rendered: Vec<String> = rows
        .into_iter()
        .map(|values| {
            values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();
    rendered.sort();
    rendered
}
