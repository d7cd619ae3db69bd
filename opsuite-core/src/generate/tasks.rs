//! Random task tables.

use rand::{Rng, seq::index};
use tracing::instrument;

use crate::{
    error::{Result, SolverError},
    schedule::TaskTable,
};

use super::TaskConfig;

/// Builds tasks `T1..=Tn` with random durations. Task `i` draws between 0
/// and `max_predecessors` distinct predecessors from the tasks before it.
///
/// # Errors
/// Returns [`SolverError::EmptyInstance`] for zero tasks and
/// [`SolverError::InvalidRange`] for an inverted or negative duration range.
///
/// # Examples
/// ```
/// use opsuite_core::generate::{TaskConfig, task_table};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let table = task_table(&TaskConfig::default(), &mut rng)?;
/// assert_eq!(table.len(), 8);
/// assert!(table.tasks()[0].predecessors().is_empty());
/// # Ok::<(), opsuite_core::SolverError>(())
/// ```
#[instrument(name = "generate.task_table", err, skip(rng))]
pub fn task_table<R: Rng + ?Sized>(config: &TaskConfig, rng: &mut R) -> Result<TaskTable> {
    if config.task_count == 0 {
        return Err(SolverError::EmptyInstance { what: "task count" });
    }
    let durations = config.durations.validate_non_negative("durations")?;
    let mut table = TaskTable::new();
    for id in 0..config.task_count {
        let duration = durations.sample(rng).unsigned_abs();
        let count = rng.gen_range(0..=config.max_predecessors.min(id));
        let predecessors = index::sample(rng, id, count).into_vec();
        table.add_task_with_indices(format!("T{}", id + 1), duration, predecessors)?;
    }
    Ok(table)
}
