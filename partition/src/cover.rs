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

//! Greedy weighted set cover over a table's rules (spec.md §4.4).
//!
//! Universe: rule indices `0..K`, encoded as a `u64` bitmask (`K <= 64`,
//! enforced at parse time by [`crate::spec::PartitionSpec::parse`]). For
//! each node that appears in any rule's node set, its "set" is the bitmask
//! of rule indices it stores; its weight is the popcount of that mask. The
//! planner greedily picks the node that minimizes `weight / newly_covered`
//! until every rule is covered.

use std::collections::BTreeMap;

use crate::rule::PartitionRule;

/// node index -> rule indices to fetch from that node.
pub type CoverPlan = BTreeMap<usize, Vec<usize>>;

/// Compute a minimum-cost (by the greedy heuristic) set of fragment fetches
/// that together cover every rule in `rules`.
///
/// Ties are broken by ascending node index, which is arbitrary but
/// deterministic within a process, per spec.md §4.4.
pub fn plan_cover(rules: &[PartitionRule]) -> CoverPlan {
    let k = rules.len();
    debug_assert!(k <= 64, "rule count must be capped at parse time");

    // node -> bitmask of rules it stores.
    let mut node_masks: BTreeMap<usize, u64> = BTreeMap::new();
    for rule in rules {
        for &node in &rule.node_set {
            *node_masks.entry(node).or_insert(0) |= 1u64 << rule.index;
        }
    }

    let universe: u64 = if k == 64 { u64::MAX } else { (1u64 << k) - 1 };
    let mut covered: u64 = 0;
    let mut plan: CoverPlan = BTreeMap::new();

    while covered != universe {
        let mut best: Option<(usize, u64, f64)> = None; // (node, mask, cost)
        for (&node, &mask) in &node_masks {
            let new_bits = mask & !covered;
            let new_count = new_bits.count_ones();
            if new_count == 0 {
                continue;
            }
            let weight = mask.count_ones() as f64;
            let cost = weight / new_count as f64;
            match &best {
                None => best = Some((node, mask, cost)),
                Some((best_node, _, best_cost)) => {
                    if cost < *best_cost || (cost == *best_cost && node < *best_node) {
                        best = Some((node, mask, cost));
                    }
                }
            }
        }

        let Some((node, mask, _)) = best else {
            // No remaining node contributes new coverage: the rules left
            // uncovered have an empty node set, which parsing rejects, so
            // this only happens if `rules` itself is empty.
            break;
        };

        let new_bits = mask & !covered;
        let mut rule_indices: Vec<usize> = Vec::with_capacity(new_bits.count_ones() as usize);
        for idx in 0..k {
            if new_bits & (1u64 << idx) != 0 {
                rule_indices.push(idx);
            }
        }
        plan.entry(node).or_default().extend(rule_indices);
        covered |= mask;
    }

    plan
}

/// Every rule index is covered by at least one fetch in `plan`.
pub fn covers_every_rule(plan: &CoverPlan, rule_count: usize) -> bool {
    let mut covered = vec![false; rule_count];
    for rules in plan.values() {
        for &r in rules {
            covered[r] = true;
        }
    }
    covered.into_iter().all(|c| c)
}
