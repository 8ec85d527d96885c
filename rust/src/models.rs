//! Core data types for the dependency-graph engine.

use chrono::{NaiveDate, NaiveDateTime};
use pyo3::prelude::*;
use std::collections::HashMap;

// Note: We use std HashMap here for PyO3 interface compatibility

/// A unit of work with an optional due date and at most one parent dependency.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Task {
    #[pyo3(get, set)]
    pub id: i64,
    #[pyo3(get, set)]
    pub title: String,
    #[pyo3(get, set)]
    pub created_at: NaiveDateTime,
    #[pyo3(get, set)]
    pub due_date: Option<NaiveDate>,
    #[pyo3(get, set)]
    pub parent_id: Option<i64>,
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (id, title, created_at, due_date=None, parent_id=None))]
    fn new(
        id: i64,
        title: String,
        created_at: NaiveDateTime,
        due_date: Option<NaiveDate>,
        parent_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            title,
            created_at,
            due_date,
            parent_id,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={}, title={:?}, due_date={:?}, parent_id={:?})",
            self.id, self.title, self.due_date, self.parent_id
        )
    }
}

/// Adjacency view of a task collection: every task id mapped to its direct
/// dependents, in input order.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct AdjacencyView {
    #[pyo3(get, set)]
    pub children: HashMap<i64, Vec<Task>>,
    /// Parent references that resolved to no task in the input. Dropped from
    /// the adjacency, never an error; exposed so callers can detect data drift.
    #[pyo3(get, set)]
    pub dangling_edges: usize,
}

#[pymethods]
impl AdjacencyView {
    #[new]
    #[pyo3(signature = (children=None, dangling_edges=0))]
    fn new(children: Option<HashMap<i64, Vec<Task>>>, dangling_edges: usize) -> Self {
        Self {
            children: children.unwrap_or_default(),
            dangling_edges,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AdjacencyView(nodes={}, dangling_edges={})",
            self.children.len(),
            self.dangling_edges
        )
    }
}

/// The longest dependency chain in a task collection.
///
/// `path` runs from the deepest task back to its root; `length` is the
/// number of edges along it.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct CriticalPath {
    #[pyo3(get, set)]
    pub path: Vec<Task>,
    #[pyo3(get, set)]
    pub length: usize,
}

#[pymethods]
impl CriticalPath {
    #[new]
    #[pyo3(signature = (path, length=0))]
    fn new(path: Vec<Task>, length: usize) -> Self {
        Self { path, length }
    }

    /// Creation timestamp of the path's root element, the earliest point the
    /// whole chain could have begun.
    pub fn earliest_start(&self) -> Option<NaiveDateTime> {
        self.path.last().map(|t| t.created_at)
    }

    /// Edge identifiers along the path (`e-{parent}-{child}`), root to
    /// terminal, matching the identifiers in the graph view feed.
    pub fn edge_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for i in (1..self.path.len()).rev() {
            let parent = &self.path[i];
            let child = &self.path[i - 1];
            ids.push(format!("e-{}-{}", parent.id, child.id));
        }
        ids
    }

    fn __repr__(&self) -> String {
        format!(
            "CriticalPath(length={}, tasks={})",
            self.length,
            self.path.len()
        )
    }
}
