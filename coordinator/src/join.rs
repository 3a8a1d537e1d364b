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

//! Natural join over already-reconstructed datasets (spec.md §4.6): an
//! iterative left-fold, no hash-join or sort-merge required.

use value::{ColumnSchema, Row, Schema};

use crate::dataset::Dataset;

/// `datasets.len() >= 1`. A single dataset is returned as-is (`Join([T])`
/// is a valid call per spec.md and must round-trip `T`'s rows unchanged).
/// Otherwise joins left to right, extending the running result's schema
/// with each new dataset's non-common columns.
pub fn natural_join(datasets: Vec<Dataset>) -> Dataset {
    assert!(!datasets.is_empty(), "natural join needs at least one dataset");

    let mut iter = datasets.into_iter();
    let mut result = iter.next().unwrap();

    for next in iter {
        let common: Vec<(usize, usize)> = next
            .schema
            .columns
            .iter()
            .enumerate()
            .filter_map(|(next_idx, col)| {
                result
                    .schema
                    .column_index(&col.name)
                    .map(|result_idx| (next_idx, result_idx))
            })
            .collect();

        if common.is_empty() {
            return Dataset::empty(Schema::new("join", Vec::<ColumnSchema>::new()).unwrap());
        }

        let common_next_idx: Vec<usize> = common.iter().map(|(n, _)| *n).collect();
        let non_common: Vec<usize> = (0..next.schema.len())
            .filter(|i| !common_next_idx.contains(i))
            .collect();

        let mut new_columns = result.schema.columns.clone();
        for &idx in &non_common {
            new_columns.push(next.schema.columns[idx].clone());
        }
        let new_schema = Schema {
            name: result.schema.name.clone(),
            columns: new_columns,
        };

        let mut new_rows = Vec::new();
        for r_row in &result.rows {
            for d_row in &next.rows {
                let matches = common.iter().all(|&(next_idx, result_idx)| {
                    d_row.get(next_idx).unwrap().values_equal(r_row.get(result_idx).unwrap())
                        == Some(true)
                });
                if matches {
                    let mut values = r_row.0.clone();
                    for &idx in &non_common {
                        values.push(d_row.get(idx).unwrap().clone());
                    }
                    new_rows.push(Row::new(values));
                }
            }
        }

        result = Dataset::new(new_schema, new_rows);
        if result.rows.is_empty() {
            return result;
        }
    }

    result
}
