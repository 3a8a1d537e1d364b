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

//! A worker node: an in-memory, per-fragment row store plus the service
//! surface the coordinator calls over RPC (spec.md §4.8).

pub mod error;
pub mod fragment;
pub mod service;

pub use error::Error;
pub use fragment::{Fragment, FragmentSchema};
pub use service::{InMemoryNode, NodeService, NodeServiceRef};
