//! Convergence detection: groups of tasks whose arcs must meet at one step.

use rustc_hash::FxHashSet;

use crate::models::ConvergingGroup;

use super::index::PrecedenceIndex;

/// One group per task with two or more anteriors: all of its anteriors must
/// be routed onto its source step, via shared steps or dummy arcs.
///
/// Groups come out in input order of their `end` task; task identifiers are
/// unique, so the per-end merge is already done.
pub fn converging_groups(index: &PrecedenceIndex<'_>) -> Vec<ConvergingGroup> {
    let mut groups = Vec::new();
    for condition in index.conditions() {
        if condition.anteriors.len() < 2 {
            continue;
        }
        // An anterior listed twice contributes once
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let tasks: Vec<String> = condition
            .anteriors
            .iter()
            .filter(|a| seen.insert(a.as_str()))
            .cloned()
            .collect();
        groups.push(ConvergingGroup {
            tasks,
            end: condition.task.clone(),
        });
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrecedenceCondition;

    fn cond(task: &str, anteriors: &[&str]) -> PrecedenceCondition {
        PrecedenceCondition {
            task: task.to_string(),
            anteriors: anteriors.iter().map(|s| s.to_string()).collect(),
            duration: 1.0,
        }
    }

    #[test]
    fn test_single_anterior_tasks_do_not_converge() {
        let conditions = vec![cond("A", &[]), cond("B", &["A"])];
        let index = PrecedenceIndex::new(&conditions).unwrap();
        assert!(converging_groups(&index).is_empty());
    }

    #[test]
    fn test_one_group_per_multi_anterior_task() {
        let conditions = vec![
            cond("A", &[]),
            cond("B", &[]),
            cond("C", &["A"]),
            cond("D", &["A", "B"]),
            cond("E", &["C", "D"]),
        ];
        let index = PrecedenceIndex::new(&conditions).unwrap();
        let groups = converging_groups(&index);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].end, "D");
        assert_eq!(groups[0].tasks, vec!["A", "B"]);
        assert_eq!(groups[1].end, "E");
        assert_eq!(groups[1].tasks, vec!["C", "D"]);
    }

    #[test]
    fn test_duplicate_anterior_counted_once() {
        let conditions = vec![cond("A", &[]), cond("B", &[]), cond("C", &["A", "A", "B"])];
        let index = PrecedenceIndex::new(&conditions).unwrap();
        let groups = converging_groups(&index);
        assert_eq!(groups[0].tasks, vec!["A", "B"]);
    }
}
