//! Rust implementation of the task dependency-graph engine.
//!
//! This module provides the graph algorithms behind the task tracker:
//! adjacency construction, dependency-edge validation, topological ordering,
//! due-date consistency checking, and critical-path analysis. It performs no
//! I/O; every operation takes a full snapshot of the task collection and
//! returns plain data.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use std::collections::HashMap;

pub mod config;
pub mod critical_path;
pub mod due_dates;
pub mod graph;
pub mod logging;
mod models;
pub mod ordering;
pub mod validate;
pub mod view;

pub use config::EngineConfig;
pub use critical_path::{critical_path, CriticalPathError};
pub use due_dates::{check_due_dates, DueDateError};
pub use graph::{build_graph, TaskGraph};
pub use models::{AdjacencyView, CriticalPath, Task};
pub use ordering::topological_ordering;
pub use validate::{validate_dependency, EdgeRejection};
pub use view::{graph_view, GraphEdge, GraphNode, GraphView};

/// Build the adjacency view of a task collection.
///
/// # Arguments
/// * `tasks` - Full snapshot of the task collection
///
/// # Returns
/// * AdjacencyView mapping every task id to its direct dependents, plus the
///   count of dangling parent references dropped from the adjacency
#[pyfunction]
fn build_adjacency(tasks: Vec<Task>) -> AdjacencyView {
    let graph = graph::build_graph(&tasks);
    let children: HashMap<i64, Vec<Task>> = graph
        .ids()
        .iter()
        .map(|&id| {
            let dependents = graph.children_of(id).iter().map(|&t| t.clone()).collect();
            (id, dependents)
        })
        .collect();

    AdjacencyView {
        children,
        dangling_edges: graph.dangling_edges(),
    }
}

/// Compute a topological ordering of the task collection.
///
/// # Arguments
/// * `tasks` - Full snapshot of the task collection
///
/// # Returns
/// * Task ids with every parent before all of its dependents. An output
///   shorter than the input signals a cycle in the stored structure.
#[pyfunction]
fn topological_order(tasks: Vec<Task>) -> Vec<i64> {
    let graph = graph::build_graph(&tasks);
    ordering::topological_ordering(&graph)
}

/// Validate a proposed dependency edge before it is persisted.
///
/// # Arguments
/// * `child` - Task that would receive the parent
/// * `parent` - Task the child would depend on
/// * `tasks` - Full snapshot of the task collection
///
/// # Raises
/// * ValueError naming the rejection: no root in the stored collection,
///   child already has a parent, parent not found, duplicate edge, or the
///   edge would create a cycle
#[pyfunction]
fn validate_edge(child: Task, parent: Task, tasks: Vec<Task>) -> PyResult<()> {
    match validate::validate_dependency(&child, &parent, &tasks) {
        Ok(()) => Ok(()),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Check due-date consistency along every dependency chain.
///
/// # Arguments
/// * `tasks` - Full snapshot of the task collection
///
/// # Raises
/// * ValueError if a dependent is due before the dependency it waits on
#[pyfunction]
fn validate_due_dates(tasks: Vec<Task>) -> PyResult<()> {
    match due_dates::check_due_dates(&tasks) {
        Ok(()) => Ok(()),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Compute the critical path of the task collection.
///
/// # Arguments
/// * `tasks` - Full snapshot of the task collection
/// * `config` - Optional engine configuration (relaxation strategy, verbosity)
///
/// # Returns
/// * CriticalPath running from the deepest task back to its root;
///   `earliest_start()` yields the root's creation timestamp
///
/// # Raises
/// * ValueError if the configured longest-path strategy is unknown
#[pyfunction]
#[pyo3(signature = (tasks, config=None))]
fn compute_critical_path(tasks: Vec<Task>, config: Option<EngineConfig>) -> PyResult<CriticalPath> {
    let config = config.unwrap_or_default();
    match critical_path::critical_path(&tasks, &config) {
        Ok(result) => Ok(result),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Build the node/edge feed for the graph-layout collaborator.
///
/// # Arguments
/// * `tasks` - Full snapshot of the task collection
///
/// # Returns
/// * GraphView with labeled, intrinsically sized nodes and parent-child
///   edges; coordinates are the layout collaborator's job
#[pyfunction]
fn build_graph_view(tasks: Vec<Task>) -> GraphView {
    view::graph_view(&tasks)
}

/// The taskgraph.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Task>()?;
    m.add_class::<AdjacencyView>()?;
    m.add_class::<CriticalPath>()?;
    m.add_class::<GraphNode>()?;
    m.add_class::<GraphEdge>()?;
    m.add_class::<GraphView>()?;

    // Config types
    m.add_class::<EngineConfig>()?;

    // Engine operations
    m.add_function(wrap_pyfunction!(build_adjacency, m)?)?;
    m.add_function(wrap_pyfunction!(topological_order, m)?)?;
    m.add_function(wrap_pyfunction!(validate_edge, m)?)?;
    m.add_function(wrap_pyfunction!(validate_due_dates, m)?)?;
    m.add_function(wrap_pyfunction!(compute_critical_path, m)?)?;
    m.add_function(wrap_pyfunction!(build_graph_view, m)?)?;

    Ok(())
}
