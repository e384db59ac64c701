//! Topology classification: beginning tasks, completing tasks and the
//! immediate-subsequent relation.
//!
//! The subsequent relation is deliberately asymmetric: a task counts as a
//! subsequent only of the **last-listed** anterior of its condition. That
//! "last anterior wins" policy is what keeps one real arc per task - the
//! remaining anteriors are satisfied through convergence or dummy arcs.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::models::Task;

use super::index::PrecedenceIndex;

/// The layout-parent policy: the last-listed anterior of a task.
///
/// Swapping anterior order changes the diagram topology, so this is a named
/// rule rather than an indexing accident.
pub fn layout_parent(anteriors: &[String]) -> Option<&str> {
    anteriors.last().map(|s| s.as_str())
}

/// Classified topology, computed once per run.
pub struct Topology {
    subsequents: FxHashMap<String, Vec<String>>,
    beginning: Vec<String>,
    completing: Vec<String>,
    completing_set: FxHashSet<String>,
}

impl Topology {
    pub fn new(index: &PrecedenceIndex<'_>) -> Self {
        let mut subsequents: FxHashMap<String, Vec<String>> = index
            .all_tasks()
            .map(|task| (task.to_string(), Vec::new()))
            .collect();
        for condition in index.conditions() {
            if let Some(parent) = layout_parent(&condition.anteriors) {
                if let Some(subs) = subsequents.get_mut(parent) {
                    subs.push(condition.task.clone());
                }
            }
        }

        let beginning: Vec<String> = index
            .conditions()
            .iter()
            .filter(|c| c.anteriors.is_empty())
            .map(|c| c.task.clone())
            .collect();

        // Completing tasks never appear in any anteriors list (not just as
        // layout parent)
        let referenced: FxHashSet<&str> = index
            .conditions()
            .iter()
            .flat_map(|c| c.anteriors.iter().map(|a| a.as_str()))
            .collect();
        let completing: Vec<String> = index
            .conditions()
            .iter()
            .filter(|c| !referenced.contains(c.task.as_str()))
            .map(|c| c.task.clone())
            .collect();
        let completing_set = completing.iter().cloned().collect();

        Self {
            subsequents,
            beginning,
            completing,
            completing_set,
        }
    }

    /// Tasks with no anteriors, in input order.
    pub fn beginning_tasks(&self) -> &[String] {
        &self.beginning
    }

    /// Tasks never referenced as an anterior, in input order.
    pub fn completing_tasks(&self) -> &[String] {
        &self.completing
    }

    pub fn is_beginning(&self, task: &str) -> bool {
        self.beginning.iter().any(|t| t == task)
    }

    pub fn is_completing(&self, task: &str) -> bool {
        self.completing_set.contains(task)
    }

    /// Tasks whose layout parent is `task`, in input order.
    pub fn immediate_subsequents(&self, task: &str) -> &[String] {
        self.subsequents
            .get(task)
            .map(|subs| subs.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_subsequents(&self, task: &str) -> bool {
        !self.immediate_subsequents(task).is_empty()
    }

    /// Conditions enriched with their subsequents, in input order.
    pub fn task_nodes(&self, index: &PrecedenceIndex<'_>) -> Vec<Task> {
        index
            .conditions()
            .iter()
            .map(|condition| Task {
                task: condition.task.clone(),
                anteriors: condition.anteriors.clone(),
                duration: condition.duration,
                subsequents: self.immediate_subsequents(&condition.task).to_vec(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrecedenceCondition;

    fn cond(task: &str, anteriors: &[&str], duration: f64) -> PrecedenceCondition {
        PrecedenceCondition {
            task: task.to_string(),
            anteriors: anteriors.iter().map(|s| s.to_string()).collect(),
            duration,
        }
    }

    fn sample() -> Vec<PrecedenceCondition> {
        vec![
            cond("A", &[], 4.0),
            cond("B", &[], 2.0),
            cond("C", &["A"], 1.0),
            cond("D", &["A", "B"], 1.0),
        ]
    }

    #[test]
    fn test_layout_parent_is_last_anterior() {
        let anteriors = vec!["A".to_string(), "B".to_string()];
        assert_eq!(layout_parent(&anteriors), Some("B"));
        assert_eq!(layout_parent(&[]), None);
    }

    #[test]
    fn test_subsequents_follow_layout_parent_only() {
        let conditions = sample();
        let index = PrecedenceIndex::new(&conditions).unwrap();
        let topology = Topology::new(&index);

        // D lists A first, but its layout parent is B - so D is a subsequent
        // of B, not of A
        assert_eq!(topology.immediate_subsequents("A"), &["C".to_string()]);
        assert_eq!(topology.immediate_subsequents("B"), &["D".to_string()]);
        assert!(topology.immediate_subsequents("C").is_empty());
    }

    #[test]
    fn test_beginning_and_completing() {
        let conditions = sample();
        let index = PrecedenceIndex::new(&conditions).unwrap();
        let topology = Topology::new(&index);

        assert_eq!(topology.beginning_tasks(), &["A".to_string(), "B".to_string()]);
        // A and B are referenced as anteriors; C and D are not
        assert_eq!(topology.completing_tasks(), &["C".to_string(), "D".to_string()]);
        assert!(topology.is_beginning("A"));
        assert!(!topology.is_beginning("C"));
        assert!(topology.is_completing("D"));
        assert!(!topology.is_completing("A"));
    }

    #[test]
    fn test_task_nodes_enriched_with_subsequents() {
        let conditions = sample();
        let index = PrecedenceIndex::new(&conditions).unwrap();
        let topology = Topology::new(&index);

        let nodes = topology.task_nodes(&index);
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0].task, "A");
        assert_eq!(nodes[0].subsequents, vec!["C"]);
        assert_eq!(nodes[1].subsequents, vec!["D"]);
        assert!(nodes[3].subsequents.is_empty());
    }
}
