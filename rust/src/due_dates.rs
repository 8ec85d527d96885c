//! Due-date consistency along dependency chains.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use thiserror::Error;

use crate::graph::build_graph;
use crate::models::Task;

/// Violation of due-date monotonicity between a task and its dependent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DueDateError {
    /// A dependent is due strictly before the dependency it waits on.
    /// `parent_due` is the dependency's effective due date, which may have
    /// been inherited from further up the chain.
    #[error("task {child_id} is due {child_due}, before its dependency {parent_id} due {parent_due}")]
    DueDateViolation {
        parent_id: i64,
        parent_due: NaiveDate,
        child_id: i64,
        child_due: NaiveDate,
    },
}

/// Check that due dates never decrease along any dependency chain.
///
/// Walks breadth-first from every root (task without a parent). A task
/// without a due date inherits its parent's effective due date for the
/// purpose of checking its own dependents; stored due dates are never
/// modified. Tasks unreachable from a root (dangling parent reference) are
/// not visited.
pub fn check_due_dates(tasks: &[Task]) -> Result<(), DueDateError> {
    let graph = build_graph(tasks);

    // id -> effective due date, filled in as the traversal reaches each task
    let mut effective: FxHashMap<i64, Option<NaiveDate>> = FxHashMap::default();
    let mut queue: VecDeque<i64> = VecDeque::new();

    for task in tasks {
        if task.parent_id.is_none() {
            effective.insert(task.id, task.due_date);
            queue.push_back(task.id);
        }
    }

    while let Some(id) = queue.pop_front() {
        let parent_due = effective.get(&id).copied().flatten();

        for child in graph.children_of(id) {
            match child.due_date {
                None => {
                    effective.insert(child.id, parent_due);
                }
                Some(child_due) => {
                    if let Some(parent_due) = parent_due {
                        if parent_due > child_due {
                            return Err(DueDateError::DueDateViolation {
                                parent_id: id,
                                parent_due,
                                child_id: child.id,
                                child_due,
                            });
                        }
                    }
                    effective.insert(child.id, Some(child_due));
                }
            }
            queue.push_back(child.id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn make_datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
        make_date(year, month, day).and_hms_opt(9, 0, 0).unwrap()
    }

    fn make_task(id: i64, parent_id: Option<i64>, due_date: Option<NaiveDate>) -> Task {
        Task {
            id,
            title: format!("task {}", id),
            created_at: make_datetime(2024, 1, 1),
            due_date,
            parent_id,
        }
    }

    #[test]
    fn test_child_due_before_parent_fails() {
        let tasks = vec![
            make_task(1, None, Some(make_date(2024, 1, 10))),
            make_task(2, Some(1), Some(make_date(2024, 1, 5))),
        ];
        let result = check_due_dates(&tasks);
        assert_eq!(
            result,
            Err(DueDateError::DueDateViolation {
                parent_id: 1,
                parent_due: make_date(2024, 1, 10),
                child_id: 2,
                child_due: make_date(2024, 1, 5),
            })
        );
    }

    #[test]
    fn test_child_due_on_or_after_parent_passes() {
        let tasks = vec![
            make_task(1, None, Some(make_date(2024, 1, 10))),
            make_task(2, Some(1), Some(make_date(2024, 1, 10))),
            make_task(3, Some(2), Some(make_date(2024, 2, 1))),
        ];
        assert_eq!(check_due_dates(&tasks), Ok(()));
    }

    #[test]
    fn test_dateless_child_inherits_effective_due_date() {
        // 2 has no due date, so it carries 1's date when checking 3
        let tasks = vec![
            make_task(1, None, Some(make_date(2024, 1, 10))),
            make_task(2, Some(1), None),
            make_task(3, Some(2), Some(make_date(2024, 1, 5))),
        ];
        let result = check_due_dates(&tasks);
        assert_eq!(
            result,
            Err(DueDateError::DueDateViolation {
                parent_id: 2,
                parent_due: make_date(2024, 1, 10),
                child_id: 3,
                child_due: make_date(2024, 1, 5),
            })
        );
    }

    #[test]
    fn test_dateless_child_alone_passes() {
        let tasks = vec![
            make_task(1, None, Some(make_date(2024, 1, 10))),
            make_task(2, Some(1), None),
        ];
        assert_eq!(check_due_dates(&tasks), Ok(()));
    }

    #[test]
    fn test_dateless_parent_constrains_nothing() {
        let tasks = vec![
            make_task(1, None, None),
            make_task(2, Some(1), Some(make_date(2024, 1, 5))),
        ];
        assert_eq!(check_due_dates(&tasks), Ok(()));
    }

    #[test]
    fn test_unreachable_tasks_are_not_checked() {
        // 3 hangs off a missing parent; its subtree would violate if visited
        let tasks = vec![
            make_task(1, None, Some(make_date(2024, 1, 10))),
            make_task(3, Some(99), Some(make_date(2024, 1, 10))),
            make_task(4, Some(3), Some(make_date(2024, 1, 5))),
        ];
        assert_eq!(check_due_dates(&tasks), Ok(()));
    }

    #[test]
    fn test_empty_collection_passes() {
        assert_eq!(check_due_dates(&[]), Ok(()));
    }
}
