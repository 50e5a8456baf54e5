//! Python-binding (feature `python`). Alt går over JSON-strenger.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::error::IngestError;
use crate::metrics::summarize;
use crate::types::RawSample;

fn to_py_err(e: IngestError) -> PyErr {
    PyValueError::new_err(format!("{}: {e}", e.reason()))
}

/// parse_training_file(file_name, data: bytes) -> str (JSON-rapport)
#[pyfunction]
fn parse_training_file(file_name: &str, data: &[u8]) -> PyResult<String> {
    crate::ingest::ingest_json(file_name, data).map_err(to_py_err)
}

/// summarize_samples(samples_json: str) -> str (JSON SessionSummary)
#[pyfunction]
fn summarize_samples(samples_json: &str) -> PyResult<String> {
    let de = &mut serde_json::Deserializer::from_str(samples_json);
    let samples: Vec<RawSample> = serde_path_to_error::deserialize(de)
        .map_err(|e| PyValueError::new_err(format!("samples at {}: {}", e.path(), e.inner())))?;
    serde_json::to_string(&summarize(&samples)).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pymodule]
fn ridefile_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(parse_training_file, m)?)?;
    m.add_function(wrap_pyfunction!(summarize_samples, m)?)?;
    Ok(())
}
