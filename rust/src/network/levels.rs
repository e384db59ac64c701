//! Task leveling: breadth-first distance from the beginning tasks.

use crate::log_debug;
use crate::models::TasksLevel;

use super::topology::Topology;

/// Assign each task a discrete level by breadth-first expansion over the
/// immediate-subsequent relation.
///
/// Level 0 holds the beginning tasks; for each task of a level, in order, its
/// non-empty subsequents list is appended as a new level. Every task has
/// exactly one layout parent, so each appears in exactly one level. The
/// result is re-indexed 0..N-1 by position so level numbers are always
/// contiguous.
pub fn tasks_levels(topology: &Topology, verbosity: u8) -> Vec<TasksLevel> {
    let mut worklist: Vec<Vec<String>> = Vec::new();
    if !topology.beginning_tasks().is_empty() {
        worklist.push(topology.beginning_tasks().to_vec());
    }

    let mut current = 0;
    while current < worklist.len() {
        for i in 0..worklist[current].len() {
            let task = worklist[current][i].clone();
            let subsequents = topology.immediate_subsequents(&task);
            if !subsequents.is_empty() {
                log_debug!(verbosity, "level {}: {} expands to {:?}", current, task, subsequents);
                worklist.push(subsequents.to_vec());
            }
        }
        current += 1;
    }

    worklist
        .into_iter()
        .enumerate()
        .map(|(level, tasks)| TasksLevel { level, tasks })
        .collect()
}

/// The 1-based step a task maps to: its level index + 1.
///
/// `None` means the task is unreachable from the beginning tasks - an
/// input-integrity problem the caller must surface, never ignore.
pub fn task_step(levels: &[TasksLevel], task: &str) -> Option<usize> {
    levels
        .iter()
        .find(|level| level.tasks.iter().any(|t| t == task))
        .map(|level| level.level + 1)
}
