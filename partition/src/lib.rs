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

//! Partition spec parsing, predicate evaluation, and the set-cover fragment
//! planner (spec.md §4.1, §4.4).

pub mod cover;
pub mod error;
pub mod rule;
pub mod spec;

pub use cover::{covers_every_rule, plan_cover, CoverPlan};
pub use error::Error;
pub use rule::{Condition, PartitionRule, Predicate};
pub use spec::{PartitionSpec, MAX_RULES};
