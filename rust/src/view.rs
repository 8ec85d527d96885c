//! Node and edge feed for the external graph-layout collaborator.
//!
//! The engine hands the collaborator node identifiers with intrinsic sizes
//! and a list of parent-child edges; screen coordinates come back from the
//! collaborator and are never computed here.

use pyo3::prelude::*;
use rustc_hash::FxHashSet;

use crate::models::Task;

const NODE_WIDTH: f64 = 150.0;
const NODE_HEIGHT: f64 = 50.0;

/// A renderable task node with its intrinsic size.
#[pyclass]
#[derive(Clone, Debug)]
pub struct GraphNode {
    #[pyo3(get, set)]
    pub id: i64,
    #[pyo3(get, set)]
    pub label: String,
    #[pyo3(get, set)]
    pub width: f64,
    #[pyo3(get, set)]
    pub height: f64,
}

#[pymethods]
impl GraphNode {
    #[new]
    #[pyo3(signature = (id, label, width=150.0, height=50.0))]
    fn new(id: i64, label: String, width: f64, height: f64) -> Self {
        Self {
            id,
            label,
            width,
            height,
        }
    }

    fn __repr__(&self) -> String {
        format!("GraphNode(id={}, label={:?})", self.id, self.label)
    }
}

/// A parent-to-child dependency edge.
#[pyclass]
#[derive(Clone, Debug)]
pub struct GraphEdge {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub source: i64,
    #[pyo3(get, set)]
    pub target: i64,
}

#[pymethods]
impl GraphEdge {
    #[new]
    fn new(id: String, source: i64, target: i64) -> Self {
        Self { id, source, target }
    }

    fn __repr__(&self) -> String {
        format!(
            "GraphEdge(id={:?}, source={}, target={})",
            self.id, self.source, self.target
        )
    }
}

/// Nodes, edges, and rank direction for the layout collaborator.
#[pyclass]
#[derive(Clone, Debug)]
pub struct GraphView {
    #[pyo3(get, set)]
    pub nodes: Vec<GraphNode>,
    #[pyo3(get, set)]
    pub edges: Vec<GraphEdge>,
    /// Rank direction hint ("TB": top to bottom).
    #[pyo3(get, set)]
    pub rank_dir: String,
}

#[pymethods]
impl GraphView {
    #[new]
    #[pyo3(signature = (nodes, edges, rank_dir=None))]
    fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>, rank_dir: Option<String>) -> Self {
        Self {
            nodes,
            edges,
            rank_dir: rank_dir.unwrap_or_else(|| "TB".to_string()),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "GraphView(nodes={}, edges={}, rank_dir={:?})",
            self.nodes.len(),
            self.edges.len(),
            self.rank_dir
        )
    }
}

fn node_label(task: &Task) -> String {
    match task.due_date {
        Some(due) => format!(
            "Id:{} Title:{} Due:{}",
            task.id,
            task.title,
            due.format("%Y-%m-%d")
        ),
        None => format!("Id:{}. {}", task.id, task.title),
    }
}

/// Build the layout feed for a task collection.
///
/// Nodes follow input order; edges cover every parent link that resolves to
/// a task in the collection, identified as `e-{parent}-{child}`.
pub fn graph_view(tasks: &[Task]) -> GraphView {
    let ids: FxHashSet<i64> = tasks.iter().map(|t| t.id).collect();

    let nodes: Vec<GraphNode> = tasks
        .iter()
        .map(|task| GraphNode {
            id: task.id,
            label: node_label(task),
            width: NODE_WIDTH,
            height: NODE_HEIGHT,
        })
        .collect();

    let mut edges: Vec<GraphEdge> = Vec::new();
    for task in tasks {
        let Some(parent_id) = task.parent_id else {
            continue;
        };
        if !ids.contains(&parent_id) {
            continue;
        }
        edges.push(GraphEdge {
            id: format!("e-{}-{}", parent_id, task.id),
            source: parent_id,
            target: task.id,
        });
    }

    GraphView {
        nodes,
        edges,
        rank_dir: "TB".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn make_datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn make_task(id: i64, title: &str, parent_id: Option<i64>, due_date: Option<NaiveDate>) -> Task {
        Task {
            id,
            title: title.to_string(),
            created_at: make_datetime(2024, 1, 1),
            due_date,
            parent_id,
        }
    }

    #[test]
    fn test_labels_include_due_date_when_set() {
        let due = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let tasks = vec![
            make_task(1, "write report", None, Some(due)),
            make_task(2, "review", Some(1), None),
        ];
        let view = graph_view(&tasks);

        assert_eq!(view.nodes[0].label, "Id:1 Title:write report Due:2024-01-05");
        assert_eq!(view.nodes[1].label, "Id:2. review");
    }

    #[test]
    fn test_nodes_carry_intrinsic_size() {
        let tasks = vec![make_task(1, "a", None, None)];
        let view = graph_view(&tasks);

        assert_eq!(view.nodes[0].width, 150.0);
        assert_eq!(view.nodes[0].height, 50.0);
        assert_eq!(view.rank_dir, "TB");
    }

    #[test]
    fn test_edges_use_parent_child_identifiers() {
        let tasks = vec![
            make_task(1, "a", None, None),
            make_task(2, "b", Some(1), None),
            make_task(3, "c", Some(2), None),
        ];
        let view = graph_view(&tasks);

        let ids: Vec<&str> = view.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e-1-2", "e-2-3"]);
        assert_eq!(view.edges[0].source, 1);
        assert_eq!(view.edges[0].target, 2);
    }

    #[test]
    fn test_dangling_links_produce_no_edge() {
        let tasks = vec![make_task(1, "a", None, None), make_task(2, "b", Some(99), None)];
        let view = graph_view(&tasks);

        assert_eq!(view.nodes.len(), 2);
        assert!(view.edges.is_empty());
    }
}
