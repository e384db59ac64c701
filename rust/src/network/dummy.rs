//! Dummy ("fictional") arc insertion.
//!
//! A task with several anteriors draws its real arc from the layout parent's
//! step only. Any other anterior whose own arc terminates elsewhere still
//! has to finish first; a zero-duration fictional arc from that anterior's
//! target to the task's source makes the constraint visible in the diagram.

use rustc_hash::FxHashMap;

use crate::log_changes;

use super::assign::ArcPlan;
use super::index::PrecedenceIndex;
use super::topology::Topology;

/// Compute the fictional arcs required by multi-anterior tasks.
///
/// For each anterior `A` of such a task: a dummy `A"` is inserted when `A`
/// has at least one real subsequent and the task is not among them (i.e.
/// `A`'s arc already terminates at an unrelated step). Anteriors with no
/// subsequents were merged onto the task's source step by the assigner and
/// need no dummy.
pub fn fictional_arcs(
    index: &PrecedenceIndex<'_>,
    topology: &Topology,
    arcs: &[ArcPlan],
    verbosity: u8,
) -> Vec<ArcPlan> {
    let by_task: FxHashMap<&str, &ArcPlan> = arcs.iter().map(|a| (a.id.as_str(), a)).collect();

    let mut dummies = Vec::new();
    for condition in index.conditions() {
        if condition.anteriors.len() < 2 {
            continue;
        }
        let Some(own_arc) = by_task.get(condition.task.as_str()) else {
            continue;
        };
        for anterior in &condition.anteriors {
            let subsequents = topology.immediate_subsequents(anterior);
            if subsequents.is_empty() || subsequents.iter().any(|s| s == &condition.task) {
                continue;
            }
            let Some(anterior_arc) = by_task.get(anterior.as_str()) else {
                continue;
            };
            log_changes!(
                verbosity,
                "dummy arc {}\": {} -> {} (before {})",
                anterior,
                anterior_arc.target,
                own_arc.source,
                condition.task
            );
            dummies.push(ArcPlan {
                id: format!("{anterior}\""),
                source: anterior_arc.target,
                target: own_arc.source,
                duration: 0.0,
                fictional: true,
            });
        }
    }
    dummies
}
