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

//! The two row shapes: logical rows (client boundary) and fragment rows
//! (node storage, carrying the injected row-id).

use crate::value::Value;

/// Opaque, coordinator-assigned, monotonically increasing primary key used
/// to reconstruct a logical row from its fragments.
pub type RowId = u64;

/// A row matching a table schema column-for-column, in schema order.
#[derive(Clone, Debug, PartialEq)]
pub struct Row(pub Vec<Value>);

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.0.get(idx)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A row as stored inside a node fragment: the row-id plus the values of
/// whichever columns this fragment's rule projects, in projection order.
/// The row-id is never part of any user-visible schema.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentRow {
    pub row_id: RowId,
    pub values: Vec<Value>,
}

impl FragmentRow {
    pub fn new(row_id: RowId, values: Vec<Value>) -> Self {
        Self { row_id, values }
    }
}
