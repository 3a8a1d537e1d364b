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

//! Maps wire-visible node endpoints (`Node<i>`) to the in-process
//! `NodeService` that implements them. Stands in for the channel cache a
//! real gRPC client keeps (the teacher's `remote_engine_client::CachedRouter`)
//! since nodes here are in-process actors rather than remote servers.

use std::collections::HashMap;

use node::NodeServiceRef;

use crate::error::{Result, UnknownEndpoint};

/// `Node<i>` naming convention from spec.md §6.
pub fn node_endpoint(index: usize) -> String {
    format!("Node{index}")
}

#[derive(Default, Clone)]
pub struct EndpointRegistry {
    nodes: HashMap<String, NodeServiceRef>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, index: usize, node: NodeServiceRef) {
        self.nodes.insert(node_endpoint(index), node);
    }

    pub fn resolve(&self, endpoint: &str) -> Result<NodeServiceRef> {
        self.nodes.get(endpoint).cloned().ok_or_else(|| {
            UnknownEndpoint {
                endpoint: endpoint.to_string(),
            }
            .build()
        })
    }
}
