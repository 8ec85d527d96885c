//! Validation of proposed dependency edges.

use thiserror::Error;

use crate::graph::build_graph;
use crate::models::Task;
use crate::ordering::kahn_ordering;

/// Reasons a proposed parent-child edge is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EdgeRejection {
    /// The collection has tasks but no root, so the stored structure is
    /// already cyclic. A data-integrity alarm, not a property of the
    /// proposed edge.
    #[error("task collection has no root; the stored dependency structure is already cyclic")]
    StructuralViolation,
    #[error("task {0} already has a parent; remove the existing dependency first")]
    ChildHasParent(i64),
    #[error("parent task {0} not found in the collection")]
    ParentNotFound(i64),
    #[error("task {child} is already a dependent of task {parent}")]
    DuplicateEdge { child: i64, parent: i64 },
    #[error("adding the edge would create a dependency cycle")]
    CycleDetected,
}

/// Validate a proposed dependency edge from `parent` to `child`.
///
/// Checks run in order and short-circuit on the first failure. Nothing
/// visible to the caller is mutated in any outcome; on `Ok` the caller is
/// responsible for persisting `child.parent_id = parent.id`.
pub fn validate_dependency<'a>(
    child: &'a Task,
    parent: &Task,
    tasks: &'a [Task],
) -> Result<(), EdgeRejection> {
    let has_root = tasks.iter().any(|t| t.parent_id.is_none());
    if !has_root && !tasks.is_empty() {
        return Err(EdgeRejection::StructuralViolation);
    }

    // Each task accepts at most one incoming dependency edge; re-parenting
    // must go through explicit removal first.
    if child.parent_id.is_some() {
        return Err(EdgeRejection::ChildHasParent(child.id));
    }

    let graph = build_graph(tasks);
    if !graph.contains(parent.id) {
        return Err(EdgeRejection::ParentNotFound(parent.id));
    }

    if graph.children_of(parent.id).iter().any(|t| t.id == child.id) {
        return Err(EdgeRejection::DuplicateEdge {
            child: child.id,
            parent: parent.id,
        });
    }

    // Tentative edge on a working copy; the caller's snapshot is untouched.
    // An ordering shorter than the task count means some ids never reached
    // in-degree zero, i.e. the tentative edge closed a cycle.
    let mut working = graph.children_map().clone();
    if let Some(dependents) = working.get_mut(&parent.id) {
        dependents.push(child);
    }

    if kahn_ordering(&working, graph.ids()).len() != tasks.len() {
        return Err(EdgeRejection::CycleDetected);
    }

    Ok(())
}
