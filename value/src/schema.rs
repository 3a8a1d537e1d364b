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

//! Column and table schemas.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use snafu::{ensure, Backtrace, Snafu};

use crate::value::DataType;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display(
        "Duplicate column name in schema, table:{}, column:{}.\nBacktrace:\n{}",
        table,
        column,
        backtrace
    ))]
    DuplicateColumn {
        table: String,
        column: String,
        backtrace: Backtrace,
    },
}

define_result!(Error);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A table schema: an ordered sequence of uniquely-named columns.
///
/// Also doubles as a fragment schema (the ordered projection stored at one
/// node under one rule) -- the row-id column is never part of this list, it
/// is carried alongside in [`crate::row::FragmentRow`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
}

impl Schema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>) -> Result<Self> {
        let name = name.into();
        let mut seen = HashSet::with_capacity(columns.len());
        for col in &columns {
            ensure!(
                seen.insert(col.name.clone()),
                DuplicateColumn {
                    table: name.clone(),
                    column: col.name.clone(),
                }
            );
        }
        Ok(Self { name, columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Build the schema of a fragment that projects `column_names` (in that
    /// order) out of `self`. Used by `BuildTable` to describe the fragment
    /// created at each node in a rule's node set.
    pub fn project(&self, column_names: &[String]) -> Option<Vec<ColumnSchema>> {
        column_names
            .iter()
            .map(|name| self.column(name).cloned())
            .collect()
    }
}
