//! Project scheduling with the critical path method (Potentiel Métra).
//!
//! A [`TaskTable`] only accepts predecessors that were added earlier, so the
//! task graph is acyclic and insertion order is already topological.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::error::{Result, SolverError};

/// One activity of a project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    label: String,
    duration: u64,
    predecessors: Vec<usize>,
}

impl Task {
    /// Task identifier shown to users, e.g. `T3`.
    #[must_use]
    #[rustfmt::skip]
    pub fn label(&self) -> &str { &self.label }

    /// Duration in time units.
    #[must_use]
    #[rustfmt::skip]
    pub const fn duration(&self) -> u64 { self.duration }

    /// Indices of the tasks that must finish first, ascending.
    #[must_use]
    #[rustfmt::skip]
    pub fn predecessors(&self) -> &[usize] { &self.predecessors }
}

/// An ordered set of tasks with precedence constraints.
///
/// # Examples
/// ```
/// use opsuite_core::schedule::TaskTable;
///
/// let mut table = TaskTable::new();
/// table.add_task("T1", 2, &[])?;
/// table.add_task("T2", 3, &["T1"])?;
/// assert_eq!(table.successors(), vec![vec![1], vec![]]);
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskTable {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
}

impl TaskTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a task whose predecessors are named by label.
    ///
    /// # Errors
    /// Returns [`SolverError::DuplicateTask`] when `label` is taken and
    /// [`SolverError::UnknownTask`] when a predecessor has not been added yet.
    pub fn add_task(
        &mut self,
        label: impl Into<String>,
        duration: u64,
        predecessors: &[&str],
    ) -> Result<usize> {
        let resolved = predecessors
            .iter()
            .map(|name| self.task_id(name))
            .collect::<Result<Vec<_>>>()?;
        self.add_task_with_indices(label, duration, resolved)
    }

    /// Adds a task whose predecessors are given by index.
    ///
    /// # Errors
    /// Returns [`SolverError::DuplicateTask`] when `label` is taken and
    /// [`SolverError::PredecessorOrder`] when a predecessor index is not lower
    /// than the new task's index.
    pub fn add_task_with_indices(
        &mut self,
        label: impl Into<String>,
        duration: u64,
        mut predecessors: Vec<usize>,
    ) -> Result<usize> {
        let label = label.into();
        if self.index.contains_key(&label) {
            return Err(SolverError::DuplicateTask { label });
        }
        let id = self.tasks.len();
        if let Some(&predecessor) = predecessors.iter().find(|&&p| p >= id) {
            return Err(SolverError::PredecessorOrder {
                task: id,
                predecessor,
            });
        }
        predecessors.sort_unstable();
        predecessors.dedup();
        self.index.insert(label.clone(), id);
        self.tasks.push(Task {
            label,
            duration,
            predecessors,
        });
        Ok(id)
    }

    /// Resolves a task label.
    ///
    /// # Errors
    /// Returns [`SolverError::UnknownTask`] when the label is not present.
    pub fn task_id(&self, label: &str) -> Result<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| SolverError::UnknownTask {
                label: label.to_owned(),
            })
    }

    /// Tasks in insertion (topological) order.
    #[must_use]
    #[rustfmt::skip]
    pub fn tasks(&self) -> &[Task] { &self.tasks }

    /// Task at `id`.
    #[must_use]
    pub fn task(&self, id: usize) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when no task has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Successor indices per task, ascending.
    #[must_use]
    pub fn successors(&self) -> Vec<Vec<usize>> {
        let mut successors = vec![Vec::new(); self.tasks.len()];
        for (id, task) in self.tasks.iter().enumerate() {
            for &predecessor in &task.predecessors {
                if let Some(list) = successors.get_mut(predecessor) {
                    list.push(id);
                }
            }
        }
        successors
    }
}

/// Earliest and latest start dates for every task of a [`TaskTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    earliest_start: Vec<u64>,
    latest_start: Vec<u64>,
    durations: Vec<u64>,
    total_duration: u64,
    critical_path: Vec<usize>,
}

impl Schedule {
    /// Earliest start per task.
    #[must_use]
    #[rustfmt::skip]
    pub fn earliest_starts(&self) -> &[u64] { &self.earliest_start }

    /// Latest start per task that does not delay the project.
    #[must_use]
    #[rustfmt::skip]
    pub fn latest_starts(&self) -> &[u64] { &self.latest_start }

    /// Earliest start of task `id`.
    #[must_use]
    pub fn earliest_start(&self, id: usize) -> Option<u64> {
        self.earliest_start.get(id).copied()
    }

    /// Latest start of task `id`.
    #[must_use]
    pub fn latest_start(&self, id: usize) -> Option<u64> {
        self.latest_start.get(id).copied()
    }

    /// Earliest finish of task `id`.
    #[must_use]
    pub fn earliest_finish(&self, id: usize) -> Option<u64> {
        Some(self.earliest_start(id)?.saturating_add(*self.durations.get(id)?))
    }

    /// Float of task `id`: how long it may slip without delaying the project.
    #[must_use]
    pub fn slack(&self, id: usize) -> Option<u64> {
        Some(self.latest_start(id)?.saturating_sub(self.earliest_start(id)?))
    }

    /// Minimum project duration.
    #[must_use]
    #[rustfmt::skip]
    pub const fn total_duration(&self) -> u64 { self.total_duration }

    /// Zero-slack tasks in ascending index order.
    #[must_use]
    #[rustfmt::skip]
    pub fn critical_path(&self) -> &[usize] { &self.critical_path }

    /// Returns `true` when task `id` has zero slack.
    #[must_use]
    pub fn is_critical(&self, id: usize) -> bool {
        self.critical_path.binary_search(&id).is_ok()
    }
}

/// Runs the forward and backward passes over `table`.
///
/// The forward pass walks tasks in insertion order and sets each earliest
/// start to the latest earliest finish among its predecessors. The backward
/// pass starts every task at `total_duration - duration` and, walking tasks
/// by descending earliest start (ties by descending index), pulls each task
/// with successors back to the tightest `successor latest start - duration`.
/// Sums saturate at `u64::MAX`.
///
/// # Errors
/// Returns [`SolverError::EmptyInstance`] when the table has no tasks.
///
/// # Examples
/// ```
/// use opsuite_core::schedule::{TaskTable, critical_path_method};
///
/// let mut table = TaskTable::new();
/// table.add_task("T1", 2, &[])?;
/// table.add_task("T2", 3, &["T1"])?;
/// let schedule = critical_path_method(&table)?;
/// assert_eq!(schedule.earliest_starts(), [0, 2]);
/// assert_eq!(schedule.total_duration(), 5);
/// assert_eq!(schedule.critical_path(), [0, 1]);
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
#[instrument(name = "schedule.critical_path", err, skip(table), fields(tasks = table.len()))]
pub fn critical_path_method(table: &TaskTable) -> Result<Schedule> {
    if table.is_empty() {
        return Err(SolverError::EmptyInstance { what: "task table" });
    }
    let tasks = table.tasks();
    let durations: Vec<u64> = tasks.iter().map(Task::duration).collect();

    let mut earliest_start = vec![0_u64; tasks.len()];
    for (id, task) in tasks.iter().enumerate() {
        earliest_start[id] = task
            .predecessors
            .iter()
            .map(|&p| earliest_start[p].saturating_add(durations[p]))
            .max()
            .unwrap_or(0);
    }

    let total_duration = earliest_start
        .iter()
        .zip(&durations)
        .map(|(start, duration)| start.saturating_add(*duration))
        .max()
        .unwrap_or(0);

    let successors = table.successors();
    let mut latest_start: Vec<u64> = durations
        .iter()
        .map(|duration| total_duration.saturating_sub(*duration))
        .collect();
    let mut backward: Vec<usize> = (0..tasks.len()).collect();
    backward.sort_by(|&left, &right| {
        earliest_start[right]
            .cmp(&earliest_start[left])
            .then(right.cmp(&left))
    });
    for id in backward {
        if let Some(tightest) = successors[id]
            .iter()
            .map(|&s| latest_start[s].saturating_sub(durations[id]))
            .min()
        {
            latest_start[id] = tightest;
        }
    }

    let critical_path: Vec<usize> = (0..tasks.len())
        .filter(|&id| earliest_start[id] == latest_start[id])
        .collect();
    debug!(
        total_duration,
        critical = critical_path.len(),
        "critical path computed"
    );

    Ok(Schedule {
        earliest_start,
        latest_start,
        durations,
        total_duration,
        critical_path,
    })
}
