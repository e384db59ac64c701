//! Precedence index: O(1) lookups over the raw condition list.

use rustc_hash::FxHashMap;

use crate::models::PrecedenceCondition;

use super::NetworkError;

/// Normalized view of the input conditions.
///
/// Built once per computation; every later stage goes through it instead of
/// re-scanning the raw list.
#[derive(Debug)]
pub struct PrecedenceIndex<'a> {
    conditions: &'a [PrecedenceCondition],
    positions: FxHashMap<&'a str, usize>,
}

impl<'a> PrecedenceIndex<'a> {
    /// Build the index and validate referential integrity: every identifier
    /// listed as an anterior must exist as a task.
    pub fn new(conditions: &'a [PrecedenceCondition]) -> Result<Self, NetworkError> {
        let mut positions: FxHashMap<&'a str, usize> =
            FxHashMap::with_capacity_and_hasher(conditions.len(), Default::default());
        for (pos, condition) in conditions.iter().enumerate() {
            positions.insert(condition.task.as_str(), pos);
        }

        for condition in conditions {
            for anterior in &condition.anteriors {
                if !positions.contains_key(anterior.as_str()) {
                    return Err(NetworkError::UnknownTask(anterior.clone()));
                }
            }
        }

        Ok(Self {
            conditions,
            positions,
        })
    }

    /// The raw conditions, in input order.
    pub fn conditions(&self) -> &'a [PrecedenceCondition] {
        self.conditions
    }

    pub fn contains(&self, task: &str) -> bool {
        self.positions.contains_key(task)
    }

    /// Immediate predecessors of a task, in listed order.
    pub fn anteriors_of(&self, task: &str) -> Result<&'a [String], NetworkError> {
        self.positions
            .get(task)
            .map(|&pos| self.conditions[pos].anteriors.as_slice())
            .ok_or_else(|| NetworkError::UnknownTask(task.to_string()))
    }

    /// Duration of a task. Absent tasks are an error, never a silent 0.
    pub fn duration_of(&self, task: &str) -> Result<f64, NetworkError> {
        self.positions
            .get(task)
            .map(|&pos| self.conditions[pos].duration)
            .ok_or_else(|| NetworkError::UnknownTask(task.to_string()))
    }

    /// All task identifiers, in input order.
    pub fn all_tasks(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.conditions.iter().map(|c| c.task.as_str())
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cond(task: &str, anteriors: &[&str], duration: f64) -> PrecedenceCondition {
        PrecedenceCondition {
            task: task.to_string(),
            anteriors: anteriors.iter().map(|s| s.to_string()).collect(),
            duration,
        }
    }

    #[test]
    fn test_lookups() {
        let conditions = vec![cond("A", &[], 4.0), cond("B", &["A"], 2.0)];
        let index = PrecedenceIndex::new(&conditions).unwrap();

        assert_eq!(index.len(), 2);
        assert!(index.contains("A"));
        assert!(!index.contains("Z"));
        assert_eq!(index.duration_of("A").unwrap(), 4.0);
        assert_eq!(index.anteriors_of("B").unwrap(), &["A".to_string()]);
        assert_eq!(index.all_tasks().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn test_unknown_anterior_rejected_at_build() {
        let conditions = vec![cond("A", &["ghost"], 1.0)];
        let err = PrecedenceIndex::new(&conditions).unwrap_err();
        assert_eq!(err, NetworkError::UnknownTask("ghost".to_string()));
    }

    #[test]
    fn test_unknown_task_lookup_is_an_error() {
        let conditions = vec![cond("A", &[], 1.0)];
        let index = PrecedenceIndex::new(&conditions).unwrap();
        assert!(matches!(
            index.duration_of("Z"),
            Err(NetworkError::UnknownTask(_))
        ));
        assert!(matches!(
            index.anteriors_of("Z"),
            Err(NetworkError::UnknownTask(_))
        ));
    }
}
