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

//! The coordinator's one door into the cluster: resolve an endpoint, maybe
//! drop the call, dispatch to the node. Grounded on the teacher's
//! `remote_engine_client::Client`, whose `read`/`write`/`get_table_info`
//! each resolve a channel via the router and then issue one RPC.

use std::{future::Future, sync::Arc};

use log::debug;
use node::NodeServiceRef;

use crate::{
    error::{Dropped, Result},
    failure::FailureInjector,
    registry::EndpointRegistry,
};

pub struct Transport {
    registry: EndpointRegistry,
    injector: FailureInjector,
}

impl Transport {
    pub fn new(registry: EndpointRegistry) -> Self {
        Self {
            registry,
            injector: FailureInjector::none(),
        }
    }

    pub fn with_failure_injector(registry: EndpointRegistry, injector: FailureInjector) -> Self {
        Self { registry, injector }
    }

    /// Resolve `endpoint`, honor the failure injector, then run `call`
    /// against the resolved node. `method` is only used for logging/error
    /// messages, matching the teacher's practice of tagging RPC errors with
    /// the operation name.
    pub async fn call_node<T, F, Fut>(&self, endpoint: &str, method: &str, call: F) -> Result<T>
    where
        F: FnOnce(NodeServiceRef) -> Fut,
        Fut: Future<Output = node::Result<T>>,
    {
        if self.injector.should_drop(endpoint) {
            debug!("Transport dropped call, endpoint:{endpoint}, method:{method}");
            return Dropped {
                endpoint: endpoint.to_string(),
                method: method.to_string(),
            }
            .fail();
        }

        let node = self.registry.resolve(endpoint)?;
        call(node).await.map_err(|source| {
            crate::error::Error::NodeFailed {
                endpoint: endpoint.to_string(),
                source,
            }
        })
    }
}

pub type TransportRef = Arc<Transport>;
