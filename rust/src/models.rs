//! Core data types for the PERT network engine.

use pyo3::prelude::*;

// Note: these types double as the PyO3 interface, so fields stay simple
// (strings, f64, vectors) rather than interned ids.

/// A precedence condition: a task, its immediate predecessors, its duration.
///
/// The order of `anteriors` is significant: the last-listed anterior is the
/// task's layout parent in the activity-on-arc diagram.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct PrecedenceCondition {
    #[pyo3(get, set)]
    pub task: String,
    #[pyo3(get, set)]
    pub anteriors: Vec<String>,
    #[pyo3(get, set)]
    pub duration: f64,
}

#[pymethods]
impl PrecedenceCondition {
    #[new]
    #[pyo3(signature = (task, anteriors, duration=0.0))]
    fn new(task: String, anteriors: Vec<String>, duration: f64) -> Self {
        Self {
            task,
            anteriors,
            duration,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "PrecedenceCondition(task={:?}, anteriors={:?}, duration={})",
            self.task, self.anteriors, self.duration
        )
    }
}

/// A precedence condition enriched with its computed immediate subsequents.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    #[pyo3(get, set)]
    pub task: String,
    #[pyo3(get, set)]
    pub anteriors: Vec<String>,
    #[pyo3(get, set)]
    pub duration: f64,
    #[pyo3(get, set)]
    pub subsequents: Vec<String>,
}

#[pymethods]
impl Task {
    fn __repr__(&self) -> String {
        format!(
            "Task(task={:?}, anteriors={:?}, duration={}, subsequents={:?})",
            self.task, self.anteriors, self.duration, self.subsequents
        )
    }
}

/// A set of tasks whose arcs converge into the same network step because a
/// later task (`end`) depends on all of them.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ConvergingGroup {
    #[pyo3(get, set)]
    pub tasks: Vec<String>,
    #[pyo3(get, set)]
    pub end: String,
}

#[pymethods]
impl ConvergingGroup {
    fn __repr__(&self) -> String {
        format!("ConvergingGroup(tasks={:?}, end={:?})", self.tasks, self.end)
    }
}

/// Tasks at a given breadth-first distance from the beginning of the project.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct TasksLevel {
    #[pyo3(get, set)]
    pub level: usize,
    #[pyo3(get, set)]
    pub tasks: Vec<String>,
}

#[pymethods]
impl TasksLevel {
    fn __repr__(&self) -> String {
        format!("TasksLevel(level={}, tasks={:?})", self.level, self.tasks)
    }
}

/// A node/event of the activity-on-arc diagram.
///
/// `id` is a string-encoded positive integer; step "1" always has an ASAP
/// date of 0.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkStep {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub starting_date_asap: Option<f64>,
}

#[pymethods]
impl NetworkStep {
    fn __repr__(&self) -> String {
        format!(
            "NetworkStep(id={:?}, starting_date_asap={:?})",
            self.id, self.starting_date_asap
        )
    }
}

/// A directed edge of the diagram: one task's duration between two steps.
///
/// Fictional (dummy) arcs carry duration 0 and an id of the form `X"`.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkArc {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub source: String,
    #[pyo3(get, set)]
    pub target: String,
    #[pyo3(get, set)]
    pub duration: f64,
    #[pyo3(get, set)]
    pub fictional: bool,
}

#[pymethods]
impl NetworkArc {
    fn __repr__(&self) -> String {
        format!(
            "NetworkArc(id={:?}, source={:?}, target={:?}, duration={}, fictional={})",
            self.id, self.source, self.target, self.duration, self.fictional
        )
    }
}

/// The complete activity-on-arc network, rebuilt wholesale on every
/// computation.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Network {
    #[pyo3(get, set)]
    pub steps: Vec<NetworkStep>,
    #[pyo3(get, set)]
    pub tasks: Vec<NetworkArc>,
}

#[pymethods]
impl Network {
    fn __repr__(&self) -> String {
        format!(
            "Network(steps={}, tasks={})",
            self.steps.len(),
            self.tasks.len()
        )
    }
}

/// Full engine output: the network plus the intermediate artifacts used for
/// diagnostics and tabular display.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkOutput {
    #[pyo3(get)]
    pub beginning_tasks: Vec<String>,
    #[pyo3(get)]
    pub completing_tasks: Vec<String>,
    #[pyo3(get)]
    pub converging_groups: Vec<ConvergingGroup>,
    #[pyo3(get)]
    pub tasks_levels: Vec<TasksLevel>,
    #[pyo3(get)]
    pub tasks: Vec<Task>,
    #[pyo3(get)]
    pub network: Network,
    /// Rendered warning-level diagnostics (e.g. degenerate steps).
    #[pyo3(get)]
    pub warnings: Vec<String>,
}

#[pymethods]
impl NetworkOutput {
    fn __repr__(&self) -> String {
        format!(
            "NetworkOutput(tasks={}, steps={}, warnings={})",
            self.tasks.len(),
            self.network.steps.len(),
            self.warnings.len()
        )
    }
}
