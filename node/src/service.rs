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

//! `NodeService`: the operations a worker node exposes over RPC
//! (spec.md §4.8). `InMemoryNode` is the reference implementation -- an
//! ordered, in-memory, append-only store per fragment, exclusively owned
//! by the node (spec.md §5).

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use log::info;
use tokio::sync::RwLock;
use value::{FragmentRow, RowId, Value};

use crate::{
    error::{AlreadyExists, NoSuchFragment, Result, RowWidthMismatch},
    fragment::{Fragment, FragmentSchema},
};

pub type NodeServiceRef = Arc<dyn NodeService>;

#[async_trait]
pub trait NodeService: Send + Sync {
    async fn build_fragment(&self, schema: FragmentSchema) -> Result<()>;

    async fn write(&self, fragment: &str, row: FragmentRow) -> Result<()>;

    async fn get_dataset(&self, fragment: &str) -> Result<(FragmentSchema, Vec<FragmentRow>)>;

    async fn has_column(&self, fragment: &str, column: &str) -> Result<bool>;

    async fn filter_by_column_values(
        &self,
        fragment: &str,
        column: &str,
        values: &[Value],
    ) -> Result<(FragmentSchema, Vec<FragmentRow>)>;

    async fn filter_by_pks(
        &self,
        fragment: &str,
        pks: &[RowId],
    ) -> Result<(FragmentSchema, Vec<FragmentRow>)>;

    /// Test-only: spec.md §3 notes `Remove` exists only so tests can reset
    /// fragment state between scenarios.
    async fn remove(&self, fragment: &str) -> Result<()>;
}

/// Single-process, in-memory node. One instance per simulated `Node<i>`.
#[derive(Default)]
pub struct InMemoryNode {
    fragments: RwLock<HashMap<String, Fragment>>,
}

impl InMemoryNode {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NodeService for InMemoryNode {
    async fn build_fragment(&self, schema: FragmentSchema) -> Result<()> {
        let mut fragments = self.fragments.write().await;
        if fragments.contains_key(&schema.name) {
            return AlreadyExists {
                fragment: schema.name.clone(),
            }
            .fail();
        }
        info!("Building fragment, fragment:{}", schema.name);
        fragments.insert(schema.name.clone(), Fragment::new(schema));
        Ok(())
    }

    async fn write(&self, fragment: &str, row: FragmentRow) -> Result<()> {
        let mut fragments = self.fragments.write().await;
        let frag = fragments.get_mut(fragment).ok_or_else(|| {
            NoSuchFragment {
                fragment: fragment.to_string(),
            }
            .build()
        })?;
        if row.values.len() != frag.schema.columns.len() {
            return RowWidthMismatch {
                fragment: fragment.to_string(),
                expected: frag.schema.columns.len(),
                got: row.values.len(),
            }
            .fail();
        }
        frag.rows.push(row);
        Ok(())
    }

    async fn get_dataset(&self, fragment: &str) -> Result<(FragmentSchema, Vec<FragmentRow>)> {
        let fragments = self.fragments.read().await;
        let frag = fragments.get(fragment).ok_or_else(|| {
            NoSuchFragment {
                fragment: fragment.to_string(),
            }
            .build()
        })?;
        Ok((frag.schema.clone(), frag.rows.clone()))
    }

    async fn has_column(&self, fragment: &str, column: &str) -> Result<bool> {
        let fragments = self.fragments.read().await;
        let frag = fragments.get(fragment).ok_or_else(|| {
            NoSuchFragment {
                fragment: fragment.to_string(),
            }
            .build()
        })?;
        Ok(frag.schema.column_index(column).is_some())
    }

    async fn filter_by_column_values(
        &self,
        fragment: &str,
        column: &str,
        values: &[Value],
    ) -> Result<(FragmentSchema, Vec<FragmentRow>)> {
        let fragments = self.fragments.read().await;
        let frag = fragments.get(fragment).ok_or_else(|| {
            NoSuchFragment {
                fragment: fragment.to_string(),
            }
            .build()
        })?;
        let col_idx = match frag.schema.column_index(column) {
            Some(idx) => idx,
            None => return Ok((frag.schema.clone(), Vec::new())),
        };
        let matched = frag
            .rows
            .iter()
            .filter(|row| {
                values
                    .iter()
                    .any(|v| row.values[col_idx].values_equal(v) == Some(true))
            })
            .cloned()
            .collect();
        Ok((frag.schema.clone(), matched))
    }

    async fn filter_by_pks(
        &self,
        fragment: &str,
        pks: &[RowId],
    ) -> Result<(FragmentSchema, Vec<FragmentRow>)> {
        let fragments = self.fragments.read().await;
        let frag = fragments.get(fragment).ok_or_else(|| {
            NoSuchFragment {
                fragment: fragment.to_string(),
            }
            .build()
        })?;
        let matched = frag
            .rows
            .iter()
            .filter(|row| pks.contains(&row.row_id))
            .cloned()
            .collect();
        Ok((frag.schema.clone(), matched))
    }

    async fn remove(&self, fragment: &str) -> Result<()> {
        let mut fragments = self.fragments.write().await;
        fragments.remove(fragment).ok_or_else(|| {
            NoSuchFragment {
                fragment: fragment.to_string(),
            }
            .build()
        })?;
        Ok(())
    }
}
