//! Rust implementation of the PERT activity-on-arc network engine.
//!
//! This module turns a list of precedence conditions into a drawable,
//! schedulable project network: steps, arcs, dummy arcs and earliest-start
//! dates, plus the intermediate artifacts a UI displays as tables.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod config;
pub mod logging;
mod models;
pub mod network;

pub use config::PertConfig;
pub use models::{
    ConvergingGroup, Network, NetworkArc, NetworkOutput, NetworkStep, PrecedenceCondition, Task,
    TasksLevel,
};
pub use network::{compute_network, EngineWarning, NetworkCache, NetworkError};

/// Compute the activity-on-arc network for a list of precedence conditions.
///
/// # Arguments
/// * `conditions` - The full task list; anterior order is significant (the
///   last-listed anterior is the layout parent)
/// * `config` - Optional engine configuration (verbosity)
///
/// # Returns
/// * NetworkOutput with the network and all intermediate artifacts
///
/// # Raises
/// * ValueError if an anterior references an unknown task or the input is
///   cyclic/inconsistent
#[pyfunction]
#[pyo3(signature = (conditions, config=None))]
fn process(
    conditions: Vec<PrecedenceCondition>,
    config: Option<PertConfig>,
) -> PyResult<NetworkOutput> {
    let config = config.unwrap_or_default();

    match network::compute_network(&conditions, &config) {
        Ok(output) => Ok(output),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// The pert.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<PrecedenceCondition>()?;
    m.add_class::<Task>()?;
    m.add_class::<ConvergingGroup>()?;
    m.add_class::<TasksLevel>()?;
    m.add_class::<NetworkStep>()?;
    m.add_class::<NetworkArc>()?;
    m.add_class::<Network>()?;
    m.add_class::<NetworkOutput>()?;

    // Config types
    m.add_class::<PertConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(process, m)?)?;

    Ok(())
}
