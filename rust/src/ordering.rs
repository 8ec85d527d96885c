//! Topological ordering of the dependency graph.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use crate::graph::TaskGraph;
use crate::models::Task;

/// Perform topological sort of the task graph using Kahn's algorithm.
///
/// Returns task ids ordered so that every parent precedes all of its
/// dependents. An output shorter than the node count is the authoritative
/// signal that the graph contains a cycle; callers must not rely on any
/// ordering property beyond "dependencies precede dependents".
pub fn topological_ordering(graph: &TaskGraph<'_>) -> Vec<i64> {
    kahn_ordering(graph.children_map(), graph.ids())
}

/// Kahn worklist over an explicit children map.
///
/// Shared with the edge validator, which runs it against a working copy of
/// the adjacency carrying a tentative edge. The worklist is seeded in input
/// order so the ordering is deterministic for a given snapshot.
pub(crate) fn kahn_ordering(children: &FxHashMap<i64, Vec<&Task>>, order: &[i64]) -> Vec<i64> {
    let mut in_degree: FxHashMap<i64, usize> = children.keys().map(|&id| (id, 0)).collect();

    for dependents in children.values() {
        for child in dependents {
            if let Some(degree) = in_degree.get_mut(&child.id) {
                *degree += 1;
            }
        }
    }

    let mut queue: VecDeque<i64> = VecDeque::new();
    for &id in order {
        if in_degree.get(&id) == Some(&0) {
            queue.push_back(id);
        }
    }

    let mut result: Vec<i64> = Vec::with_capacity(children.len());

    while let Some(id) = queue.pop_front() {
        result.push(id);

        if let Some(dependents) = children.get(&id) {
            for child in dependents {
                if let Some(degree) = in_degree.get_mut(&child.id) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(child.id);
                    }
                }
            }
        }
    }

    result
}
