//! Adjacency construction over a flat task collection.

use rustc_hash::FxHashMap;

use crate::models::Task;

/// Disposable adjacency view of a task collection.
///
/// Maps every task id to its direct dependents in input order. Built fresh
/// for each query and dropped with it; the engine keeps no graph state
/// between calls.
#[derive(Debug, Clone)]
pub struct TaskGraph<'a> {
    children: FxHashMap<i64, Vec<&'a Task>>,
    order: Vec<i64>,
    dangling_edges: usize,
}

impl<'a> TaskGraph<'a> {
    /// Direct dependents of a task, in input order.
    pub fn children_of(&self, id: i64) -> &[&'a Task] {
        self.children.get(&id).map(|c| c.as_slice()).unwrap_or(&[])
    }

    /// Whether the id belongs to a task in the collection.
    pub fn contains(&self, id: i64) -> bool {
        self.children.contains_key(&id)
    }

    /// Task ids in input order.
    pub fn ids(&self) -> &[i64] {
        &self.order
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Parent references that resolved to no task in the input.
    ///
    /// Dangling references contribute no edge and are not an error; the
    /// counter lets callers detect data drift in the stored collection.
    pub fn dangling_edges(&self) -> usize {
        self.dangling_edges
    }

    pub(crate) fn children_map(&self) -> &FxHashMap<i64, Vec<&'a Task>> {
        &self.children
    }
}

/// Build the adjacency view for a task collection.
///
/// Every task id is present as a key, with or without dependents. A task
/// whose `parent_id` does not resolve to any task in the input is treated
/// as a root for traversal purposes.
pub fn build_graph(tasks: &[Task]) -> TaskGraph<'_> {
    let mut children: FxHashMap<i64, Vec<&Task>> =
        FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
    let mut order: Vec<i64> = Vec::with_capacity(tasks.len());

    // Nodes before edges, so edges to tasks later in the input still resolve.
    for task in tasks {
        children.entry(task.id).or_default();
        order.push(task.id);
    }

    let mut dangling_edges = 0;
    for task in tasks {
        let Some(parent_id) = task.parent_id else {
            continue;
        };
        match children.get_mut(&parent_id) {
            Some(dependents) => dependents.push(task),
            None => dangling_edges += 1,
        }
    }

    TaskGraph {
        children,
        order,
        dangling_edges,
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

    fn make_task(id: i64, parent_id: Option<i64>) -> Task {
        Task {
            id,
            title: format!("task {}", id),
            created_at: make_datetime(2024, 1, 1),
            due_date: None,
            parent_id,
        }
    }

    #[test]
    fn test_every_id_is_a_key() {
        let tasks = vec![make_task(1, None), make_task(2, Some(1))];
        let graph = build_graph(&tasks);

        assert!(graph.contains(1));
        assert!(graph.contains(2));
        assert_eq!(graph.len(), 2);
        // Leaf task has an entry with no dependents
        assert!(graph.children_of(2).is_empty());
    }

    #[test]
    fn test_children_follow_input_order() {
        let tasks = vec![
            make_task(1, None),
            make_task(3, Some(1)),
            make_task(2, Some(1)),
        ];
        let graph = build_graph(&tasks);

        let ids: Vec<i64> = graph.children_of(1).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_forward_reference_resolves() {
        // Child appears before its parent in the input
        let tasks = vec![make_task(2, Some(1)), make_task(1, None)];
        let graph = build_graph(&tasks);

        let ids: Vec<i64> = graph.children_of(1).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(graph.dangling_edges(), 0);
    }

    #[test]
    fn test_dangling_parent_dropped_and_counted() {
        let tasks = vec![make_task(1, None), make_task(2, Some(99))];
        let graph = build_graph(&tasks);

        assert_eq!(graph.dangling_edges(), 1);
        assert!(graph.contains(2));
        assert!(!graph.contains(99));
        assert!(graph.children_of(1).is_empty());
    }

    #[test]
    fn test_build_is_idempotent() {
        let tasks = vec![
            make_task(1, None),
            make_task(2, Some(1)),
            make_task(3, Some(1)),
            make_task(4, Some(99)),
        ];
        let first = build_graph(&tasks);
        let second = build_graph(&tasks);

        assert_eq!(first.ids(), second.ids());
        assert_eq!(first.dangling_edges(), second.dangling_edges());
        for &id in first.ids() {
            let a: Vec<i64> = first.children_of(id).iter().map(|t| t.id).collect();
            let b: Vec<i64> = second.children_of(id).iter().map(|t| t.id).collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_empty_collection() {
        let graph = build_graph(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.dangling_edges(), 0);
    }
}
