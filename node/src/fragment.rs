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

//! The schema and ordered row sequence of a single fragment.

use value::{ColumnSchema, FragmentRow};

/// The schema of one fragment: its wire name and the projected columns it
/// stores. The row-id is implicit and never listed here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentSchema {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
}

impl FragmentSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

/// A fragment: its schema plus the append-only, ordered sequence of rows
/// written to it.
#[derive(Clone, Debug)]
pub struct Fragment {
    pub schema: FragmentSchema,
    pub rows: Vec<FragmentRow>,
}

impl Fragment {
    pub fn new(schema: FragmentSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }
}
