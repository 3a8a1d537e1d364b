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

//! A deterministic stand-in for the "transport may drop a message"
//! collaborator of spec.md §5/§9. Rather than a random packet-loss model
//! (which would make test failures irreproducible), drops are decided by a
//! predicate over `(endpoint, call_sequence_number)`, so a test can force a
//! single specific RPC to fail and assert on the resulting behavior.

use std::collections::HashMap;
use std::sync::Mutex;

/// `None` injector never drops a call; `Predicate` drops exactly the calls
/// the closure says to.
pub struct FailureInjector {
    predicate: Option<Box<dyn Fn(&str, u64) -> bool + Send + Sync>>,
    calls: Mutex<HashMap<String, u64>>,
}

impl Default for FailureInjector {
    fn default() -> Self {
        Self::none()
    }
}

impl FailureInjector {
    pub fn none() -> Self {
        Self {
            predicate: None,
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_predicate(
        predicate: impl Fn(&str, u64) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Some(Box::new(predicate)),
            calls: Mutex::new(HashMap::new()),
        }
    }

    /// Drop the `nth` (0-based) call made to `endpoint`, across all methods.
    pub fn drop_nth_call_to(endpoint: impl Into<String>, nth: u64) -> Self {
        let endpoint = endpoint.into();
        Self::with_predicate(move |call_endpoint, seq| call_endpoint == endpoint && seq == nth)
    }

    /// Consult the injector for the next call and advance its counter.
    /// Call sequence numbers are tracked per endpoint, so `drop_nth_call_to`
    /// counts only the calls made to the endpoint it names.
    pub fn should_drop(&self, endpoint: &str) -> bool {
        let seq = {
            let mut calls = self.calls.lock().unwrap();
            let entry = calls.entry(endpoint.to_string()).or_insert(0);
            let seq = *entry;
            *entry += 1;
            seq
        };
        match &self.predicate {
            Some(p) => p(endpoint, seq),
            None => false,
        }
    }
}
