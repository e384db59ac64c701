//! Configuration types for the network engine.

use pyo3::prelude::*;

/// Configuration for a network computation.
#[pyclass]
#[derive(Clone, Debug)]
pub struct PertConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for PertConfig {
    fn default() -> Self {
        Self { verbosity: 0 }
    }
}

#[pymethods]
impl PertConfig {
    #[new]
    #[pyo3(signature = (verbosity=None))]
    fn new(verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!("PertConfig(verbosity={})", self.verbosity)
    }
}
