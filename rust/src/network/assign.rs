//! Step and arc assignment: maps the task/level structure onto numbered
//! steps, one real arc per task.
//!
//! Arcs are emitted in level order, then tasks absorbed by a convergence
//! (no subsequents, not completing) in input order, then completing tasks in
//! input order. The order is load-bearing: target reuse looks up the
//! already-assigned target of a group sibling, so later arcs depend on what
//! earlier arcs claimed.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::models::{ConvergingGroup, TasksLevel};
use crate::{log_changes, log_checks};

use super::index::PrecedenceIndex;
use super::topology::Topology;
use super::NetworkError;

/// An arc with numeric step ids, used internally before rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcPlan {
    pub id: String,
    pub source: u32,
    pub target: u32,
    pub duration: f64,
    pub fictional: bool,
}

/// Real arcs plus the number of steps they span.
#[derive(Debug)]
pub struct ArcAssignment {
    pub arcs: Vec<ArcPlan>,
    pub step_count: u32,
}

struct Assigner<'a> {
    index: &'a PrecedenceIndex<'a>,
    topology: &'a Topology,
    groups: &'a [ConvergingGroup],
    arcs: Vec<ArcPlan>,
    targets: FxHashMap<String, u32>,
    max_target: u32,
    verbosity: u8,
}

impl<'a> Assigner<'a> {
    /// Lowest step number no arc has claimed yet. Step 1 is reserved for the
    /// project start, so the first claimed target is always 2.
    fn next_free(&self) -> u32 {
        self.max_target.max(1) + 1
    }

    /// Source step: the layout parent's arc target, found by scanning
    /// anteriors last-to-first for the first already-assigned arc.
    fn source_of(&self, task: &str) -> Result<u32, NetworkError> {
        if self.topology.is_beginning(task) {
            return Ok(1);
        }
        self.index
            .anteriors_of(task)?
            .iter()
            .rev()
            .find_map(|anterior| self.targets.get(anterior.as_str()).copied())
            .ok_or_else(|| NetworkError::BrokenPrecedence(task.to_string()))
    }

    /// Target step for an ordinary (non-completing) task.
    ///
    /// A dead-end task (no subsequents) belonging to a converging group
    /// reuses the target another group member already claimed, so converging
    /// arcs merge into one step. Live arcs never merge: tasks with
    /// subsequents always claim a fresh step, since later tasks branch from
    /// their target.
    fn target_of(&self, task: &str) -> u32 {
        if !self.topology.has_subsequents(task) {
            let group = self
                .groups
                .iter()
                .find(|g| g.tasks.iter().any(|t| t == task));
            if let Some(group) = group {
                let sibling_target = group
                    .tasks
                    .iter()
                    .filter(|t| t.as_str() != task)
                    .find_map(|t| self.targets.get(t.as_str()).copied());
                if let Some(target) = sibling_target {
                    log_checks!(
                        self.verbosity,
                        "  {} converges with group ending at {} into step {}",
                        task,
                        group.end,
                        target
                    );
                    return target;
                }
            }
        }
        self.next_free()
    }

    fn emit(&mut self, task: &str, target_override: Option<u32>) -> Result<(), NetworkError> {
        let source = self.source_of(task)?;
        let target = match target_override {
            Some(step) => step,
            None => self.target_of(task),
        };
        let duration = self.index.duration_of(task)?;
        log_changes!(self.verbosity, "arc {}: {} -> {} ({})", task, source, target, duration);

        self.targets.insert(task.to_string(), target);
        self.max_target = self.max_target.max(target);
        self.arcs.push(ArcPlan {
            id: task.to_string(),
            source,
            target,
            duration,
            fictional: false,
        });
        Ok(())
    }
}

/// Assign every task an arc between two steps.
///
/// # Errors
/// `BrokenPrecedence` if a non-beginning task has no anterior with an
/// already-assigned arc when its source is computed.
pub fn assign_arcs(
    index: &PrecedenceIndex<'_>,
    topology: &Topology,
    levels: &[TasksLevel],
    groups: &[ConvergingGroup],
    verbosity: u8,
) -> Result<ArcAssignment, NetworkError> {
    // Tasks with no subsequents that are not completing: their arcs are
    // absorbed into a convergence and emitted after the leveled tasks
    let absorbed: FxHashSet<&str> = index
        .conditions()
        .iter()
        .filter(|c| !topology.is_completing(&c.task) && !topology.has_subsequents(&c.task))
        .map(|c| c.task.as_str())
        .collect();

    let mut assigner = Assigner {
        index,
        topology,
        groups,
        arcs: Vec::with_capacity(index.len()),
        targets: FxHashMap::with_capacity_and_hasher(index.len(), Default::default()),
        max_target: 0,
        verbosity,
    };

    for level in levels {
        for task in &level.tasks {
            if topology.is_completing(task) || absorbed.contains(task.as_str()) {
                continue;
            }
            assigner.emit(task, None)?;
        }
    }

    for condition in index.conditions() {
        if absorbed.contains(condition.task.as_str()) {
            assigner.emit(&condition.task, None)?;
        }
    }

    // All completing tasks share one common final step
    let final_step = assigner.max_target.max(1) + 1;
    for task in topology.completing_tasks() {
        assigner.emit(task, Some(final_step))?;
    }

    let step_count = assigner.max_target;
    Ok(ArcAssignment {
        arcs: assigner.arcs,
        step_count,
    })
}
