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

//! The coordinator's catalog: table schema, partition spec, and row-id
//! counter. spec.md §5 requires catalog mutations (`BuildTable`,
//! `FragmentWrite`) to be serialized with respect to each other, while
//! catalog reads may run concurrently with each other -- a single
//! `tokio::sync::RwLock` over the whole map gives us exactly that (reads
//! take the shared lock, mutations take the exclusive one).

use std::collections::HashMap;

use partition::PartitionSpec;
use tokio::sync::RwLock;
use value::{RowId, Schema};

use crate::error::{AlreadyExists, NoSuchTable, Result};

pub struct TableState {
    pub schema: Schema,
    pub spec: PartitionSpec,
    pub row_counter: RowId,
}

#[derive(Default)]
pub struct Catalog {
    tables: RwLock<HashMap<String, TableState>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a brand-new table. Fails with `AlreadyExists` and leaves the
    /// catalog untouched if the name is already taken -- the coordinator
    /// must call this *before* contacting any node (spec.md §4.2).
    pub async fn create(&self, table: &str, schema: Schema, spec: PartitionSpec) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(table) {
            return AlreadyExists {
                table: table.to_string(),
            }
            .fail();
        }
        tables.insert(
            table.to_string(),
            TableState {
                schema,
                spec,
                row_counter: 0,
            },
        );
        Ok(())
    }

    /// Snapshot a table's immutable schema and spec.
    pub async fn schema_and_spec(&self, table: &str) -> Result<(Schema, PartitionSpec)> {
        let tables = self.tables.read().await;
        let state = tables.get(table).ok_or_else(|| {
            NoSuchTable {
                table: table.to_string(),
            }
            .build()
        })?;
        Ok((state.schema.clone(), state.spec.clone()))
    }

    /// The coordinator is the only writer of the row-id counter; this is
    /// the sole mutation point (spec.md §5).
    pub async fn next_row_id(&self, table: &str) -> Result<RowId> {
        let mut tables = self.tables.write().await;
        let state = tables.get_mut(table).ok_or_else(|| {
            NoSuchTable {
                table: table.to_string(),
            }
            .build()
        })?;
        let row_id = state.row_counter;
        state.row_counter += 1;
        Ok(row_id)
    }

    pub async fn contains(&self, table: &str) -> bool {
        self.tables.read().await.contains_key(table)
    }
}
