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

//! The coordinator: the single entry point clients talk to (spec.md §6).
//! Owns the catalog and the transport to the cluster; every public method
//! here is one coordinator RPC.

pub mod catalog;
pub mod dataset;
pub mod error;
pub mod join;
pub mod reconstruct;
pub mod semijoin;
pub mod write;

use log::info;
use partition::PartitionSpec;
use snafu::ResultExt;
use value::{Row, Schema};

pub use catalog::Catalog;
pub use dataset::Dataset;
pub use error::Error;
pub use write::WriteAck;

use error::Result;
use rpc::Transport;

/// Tunables resolving spec.md §9's open questions. Defaults preserve the
/// source system's original behavior (silent drop of unrouted rows,
/// fire-and-forget writes); see SPEC_FULL.md §7 for the rationale.
#[derive(Clone, Copy, Debug)]
pub struct CoordinatorConfig {
    pub strict_routing: bool,
    pub best_effort: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            strict_routing: false,
            best_effort: true,
        }
    }
}

/// Ties together the catalog (spec.md §5) and the transport to the
/// cluster's nodes (spec.md §4.8) behind the four coordinator RPCs of
/// spec.md §6.
pub struct Coordinator {
    catalog: Catalog,
    transport: Transport,
    config: CoordinatorConfig,
}

impl Coordinator {
    pub fn new(transport: Transport) -> Self {
        Self::with_config(transport, CoordinatorConfig::default())
    }

    pub fn with_config(transport: Transport, config: CoordinatorConfig) -> Self {
        Self {
            catalog: Catalog::new(),
            transport,
            config,
        }
    }

    /// `BuildTable((schema, specBlob)) -> string` (spec.md §6). Registers
    /// `table` in the catalog before contacting any node, then builds the
    /// fragments named by `spec` at every node in each rule's node set.
    pub async fn build_table(
        &self,
        table: &str,
        schema: Schema,
        spec_json: &str,
    ) -> Result<()> {
        let spec = PartitionSpec::parse(&schema, spec_json)
            .context(error::Partition)?;
        self.catalog.create(table, schema.clone(), spec.clone()).await?;
        write::build_table(&self.transport, table, &schema, &spec).await?;
        info!("Table built, table:{table}");
        Ok(())
    }

    /// `FragmentWrite((tableName, logicalRow)) -> string` (spec.md §6).
    /// Allocates the next row-id from the catalog and routes the row into
    /// every fragment whose rule matches it.
    pub async fn fragment_write(&self, table: &str, row: Row) -> Result<WriteAck> {
        let (schema, spec) = self.catalog.schema_and_spec(table).await?;
        let row_id = self.catalog.next_row_id(table).await?;
        write::fragment_write(
            &self.transport,
            table,
            &schema,
            &spec,
            row_id,
            row,
            self.config.strict_routing,
            self.config.best_effort,
        )
        .await
    }

    /// `Join([tableName...]) -> Dataset` (spec.md §6, §4.6). Fully
    /// reconstructs each named table, then natural-joins them left to right.
    /// A single table name is a valid call: it returns that table's full
    /// reconstructed rows unchanged.
    pub async fn join(&self, tables: &[&str]) -> Result<Dataset> {
        assert!(!tables.is_empty(), "join needs at least one table");
        let mut datasets = Vec::with_capacity(tables.len());
        for &table in tables {
            let (schema, spec) = self.catalog.schema_and_spec(table).await?;
            let builder =
                reconstruct::reconstruct_rules(&self.transport, table, &schema, &spec.rules)
                    .await?;
            let rows = builder.into_rows(table, &schema)?;
            datasets.push(Dataset::new(schema, rows));
        }
        Ok(join::natural_join(datasets))
    }

    /// `SemiJoin([joinCol, leftTable, rightTable]) -> Dataset` (spec.md §6,
    /// §4.7).
    pub async fn semi_join(
        &self,
        join_column: &str,
        left_table: &str,
        right_table: &str,
    ) -> Result<Dataset> {
        let (left_schema, left_spec) = self.catalog.schema_and_spec(left_table).await?;
        let (right_schema, right_spec) = self.catalog.schema_and_spec(right_table).await?;
        semijoin::semi_join(
            &self.transport,
            join_column,
            left_table,
            &left_schema,
            &left_spec,
            right_table,
            &right_schema,
            &right_spec,
        )
        .await
    }
}
