use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use wator_core::{SimConfig, World};

/// Minimal PyO3 module exposing wator-core to Python.
#[pyfunction]
fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Run a full simulation from a JSON config and return the run summary as JSON.
#[pyfunction]
fn run_simulation(config_json: &str) -> PyResult<String> {
    let config: SimConfig = serde_json::from_str(config_json)
        .map_err(|e| PyValueError::new_err(format!("invalid config: {e}")))?;
    let mut world = World::try_new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let iterations = world.config().iterations;
    let summary = world
        .try_run(iterations)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    serde_json::to_string(&summary).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(version, m)?)?;
    m.add_function(wrap_pyfunction!(run_simulation, m)?)?;
    Ok(())
}
