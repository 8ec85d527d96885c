//! Critical path analysis: the longest dependency chain and its origin.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::graph::{build_graph, TaskGraph};
use crate::models::{CriticalPath, Task};
use crate::ordering::topological_ordering;
use crate::{log_changes, log_checks, log_debug};

/// Errors from critical path analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriticalPathError {
    #[error("unknown longest-path strategy: {0}")]
    UnknownStrategy(String),
}

/// Find the deepest task in the dependency graph and reconstruct its chain.
///
/// Depth is the number of edges from a root (in-degree zero) to the task.
/// The returned path runs from the deepest task back to its root; ties keep
/// the first task found in traversal order. The relaxation strategy comes
/// from `config.longest_path_strategy`:
///
/// - `"frontier"`: level-by-level relaxation from each root independently.
///   A child's recorded depth is raised every time it is reached but a node
///   is only expanded on first discovery, so depths are exact only when
///   every node has a single parent (the committed data model).
/// - `"topological"`: relax along a full topological ordering, so every
///   parent is final before its dependents are examined. Exact for any DAG.
pub fn critical_path(
    tasks: &[Task],
    config: &EngineConfig,
) -> Result<CriticalPath, CriticalPathError> {
    if tasks.is_empty() {
        return Ok(CriticalPath::default());
    }

    let graph = build_graph(tasks);
    if graph.dangling_edges() > 0 {
        log_changes!(
            config.verbosity,
            "dropped {} dangling parent reference(s) from the graph",
            graph.dangling_edges()
        );
    }

    let winner = match config.longest_path_strategy.as_str() {
        "frontier" => frontier_longest(&graph, config.verbosity),
        "topological" => topological_longest(&graph, config.verbosity),
        _ => {
            return Err(CriticalPathError::UnknownStrategy(
                config.longest_path_strategy.clone(),
            ))
        }
    };

    let Some((terminal, length)) = winner else {
        // Non-empty input with no reachable node means no root exists at all
        return Ok(CriticalPath::default());
    };

    log_changes!(
        config.verbosity,
        "critical path ends at task {} with depth {}",
        terminal,
        length
    );

    let by_id: FxHashMap<i64, &Task> = tasks.iter().map(|t| (t.id, t)).collect();

    // Walk parent references from the terminal back to its root. Each task
    // has at most one parent, so the walk retraces the discovery chain and
    // terminates; a dangling parent ends the path early.
    let mut path: Vec<Task> = Vec::with_capacity(length + 1);
    let mut current = by_id.get(&terminal).copied();
    while let Some(task) = current {
        path.push(task.clone());
        current = task.parent_id.and_then(|pid| by_id.get(&pid).copied());
    }

    Ok(CriticalPath { path, length })
}

/// Root ids of the adjacency: nodes with in-degree zero, in input order.
/// A task with a dangling parent reference has no incoming edge and counts
/// as a root for traversal purposes.
fn roots(graph: &TaskGraph<'_>) -> Vec<i64> {
    let mut in_degree: FxHashMap<i64, usize> = graph.ids().iter().map(|&id| (id, 0)).collect();
    for &id in graph.ids() {
        for child in graph.children_of(id) {
            if let Some(degree) = in_degree.get_mut(&child.id) {
                *degree += 1;
            }
        }
    }

    graph
        .ids()
        .iter()
        .copied()
        .filter(|id| in_degree.get(id) == Some(&0))
        .collect()
}

/// Level-by-level frontier relaxation from each root independently.
fn frontier_longest(graph: &TaskGraph<'_>, verbosity: u8) -> Option<(i64, usize)> {
    let mut best: Option<(i64, usize)> = None;

    for root in roots(graph) {
        let mut depth: FxHashMap<i64, usize> = FxHashMap::default();
        let mut discovered: Vec<i64> = vec![root];
        depth.insert(root, 0);

        let mut queue: VecDeque<i64> = VecDeque::new();
        queue.push_back(root);

        while let Some(id) = queue.pop_front() {
            for child in graph.children_of(id) {
                let via_here = depth.get(&id).copied().unwrap_or(0) + 1;
                let recorded = depth.get(&child.id).copied();
                if recorded.is_none() {
                    queue.push_back(child.id);
                    discovered.push(child.id);
                }
                let raised = via_here.max(recorded.unwrap_or(0));
                depth.insert(child.id, raised);
                log_debug!(verbosity, "  task {} depth -> {}", child.id, raised);
            }
        }

        // Deepest node reached from this root; strict comparison keeps the
        // first one found in discovery order.
        let mut local: Option<(i64, usize)> = None;
        for &id in &discovered {
            let d = depth[&id];
            if local.map_or(true, |(_, best_d)| d > best_d) {
                local = Some((id, d));
            }
        }

        log_checks!(verbosity, "root {}: deepest reachable {:?}", root, local);

        if let Some((id, d)) = local {
            if best.map_or(true, |(_, best_d)| d > best_d) {
                best = Some((id, d));
            }
        }
    }

    best
}

/// Relaxation along a full topological ordering.
fn topological_longest(graph: &TaskGraph<'_>, verbosity: u8) -> Option<(i64, usize)> {
    let order = topological_ordering(graph);
    let mut depth: FxHashMap<i64, usize> = order.iter().map(|&id| (id, 0)).collect();

    for &id in &order {
        let here = depth.get(&id).copied().unwrap_or(0);
        for child in graph.children_of(id) {
            if let Some(d) = depth.get_mut(&child.id) {
                if here + 1 > *d {
                    *d = here + 1;
                    log_debug!(verbosity, "  task {} depth -> {}", child.id, *d);
                }
            }
        }
    }

    let mut best: Option<(i64, usize)> = None;
    for &id in &order {
        let d = depth[&id];
        if best.map_or(true, |(_, best_d)| d > best_d) {
            best = Some((id, d));
        }
    }

    log_checks!(verbosity, "deepest task over topological order: {:?}", best);

    best
}
