//! Activity-on-arc network construction pipeline.
//!
//! A network computation is a pure function of its input condition list,
//! staged as derivations that each consume only the previous stage's output:
//! index -> topology -> levels -> convergence -> arc assignment -> dummy
//! arcs -> forward pass. Nothing is retained between calls; callers that
//! want memoization use [`NetworkCache`].

use thiserror::Error;

use crate::models::{Network, NetworkArc, NetworkOutput, NetworkStep, PrecedenceCondition};
use crate::PertConfig;

pub mod assign;
pub mod cache;
pub mod convergence;
pub mod dummy;
pub mod forward;
pub mod index;
pub mod levels;
pub mod topology;

pub use assign::{assign_arcs, ArcAssignment, ArcPlan};
pub use cache::NetworkCache;
pub use convergence::converging_groups;
pub use dummy::fictional_arcs;
pub use forward::starting_dates;
pub use index::PrecedenceIndex;
pub use levels::{task_step, tasks_levels};
pub use topology::{layout_parent, Topology};

/// Errors that abort a network computation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// An anterior (or a direct lookup) references a task identifier that is
    /// not present in the input set.
    #[error("Unknown task: {0}")]
    UnknownTask(String),
    /// A task's arc source cannot be located, or the task is unreachable from
    /// the beginning tasks (cycle or dangling reference).
    #[error("Unable to find the source step of task {0}: input is cyclic or inconsistent")]
    BrokenPrecedence(String),
}

/// Warning-level diagnostics collected during a computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineWarning {
    /// A step other than 1 has no incoming arc; its ASAP date defaults to 0.
    /// Likely indicates malformed input (duplicate or typo'd task ids).
    DegenerateStep { step: u32 },
    /// An arc runs from a higher-numbered step to a lower one, so the forward
    /// pass reads its source date before computing it. Happens when a
    /// dead-end task merges into a group sibling's earlier step; dates
    /// downstream of the arc may be understated.
    BackwardArc { id: String, source: u32, target: u32 },
}

impl std::fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineWarning::DegenerateStep { step } => {
                write!(f, "Step {step} has no incoming arc; ASAP date defaults to 0")
            }
            EngineWarning::BackwardArc { id, source, target } => {
                write!(
                    f,
                    "Arc {id} runs backward ({source} -> {target}); dates downstream may be understated"
                )
            }
        }
    }
}

/// Compute the activity-on-arc network for a list of precedence conditions.
///
/// Returns the network plus every intermediate artifact (beginning and
/// completing tasks, converging groups, task levels, enriched tasks) so a
/// caller can display them as tables next to the diagram.
///
/// # Errors
/// * `UnknownTask` if an anterior references a missing task
/// * `BrokenPrecedence` if a task is unreachable or its arc source cannot be
///   located (cyclic input)
pub fn compute_network(
    conditions: &[PrecedenceCondition],
    config: &PertConfig,
) -> Result<NetworkOutput, NetworkError> {
    let verbosity = config.verbosity;

    let index = PrecedenceIndex::new(conditions)?;
    let topology = Topology::new(&index);
    let levels = tasks_levels(&topology, verbosity);

    // Every task must be reachable through the layout-parent relation; a task
    // absent from all levels has no step and the input is cyclic or broken.
    for task in index.all_tasks() {
        if task_step(&levels, task).is_none() {
            return Err(NetworkError::BrokenPrecedence(task.to_string()));
        }
    }

    let groups = converging_groups(&index);
    let ArcAssignment { mut arcs, step_count } =
        assign_arcs(&index, &topology, &levels, &groups, verbosity)?;
    let dummies = fictional_arcs(&index, &topology, &arcs, verbosity);
    arcs.extend(dummies);

    let (dates, warnings) = starting_dates(&arcs, step_count, verbosity);

    let steps: Vec<NetworkStep> = (1..=step_count)
        .map(|step| NetworkStep {
            id: step.to_string(),
            starting_date_asap: Some(dates[(step - 1) as usize]),
        })
        .collect();
    let network_arcs: Vec<NetworkArc> = arcs
        .iter()
        .map(|arc| NetworkArc {
            id: arc.id.clone(),
            source: arc.source.to_string(),
            target: arc.target.to_string(),
            duration: arc.duration,
            fictional: arc.fictional,
        })
        .collect();

    Ok(NetworkOutput {
        beginning_tasks: topology.beginning_tasks().to_vec(),
        completing_tasks: topology.completing_tasks().to_vec(),
        converging_groups: groups,
        tasks_levels: levels,
        tasks: topology.task_nodes(&index),
        network: Network {
            steps,
            tasks: network_arcs,
        },
        warnings: warnings.iter().map(|w| w.to_string()).collect(),
    })
}
