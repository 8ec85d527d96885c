//! Configuration types for the dependency-graph engine.

use pyo3::prelude::*;

/// Strategy and diagnostics configuration for graph queries.
#[pyclass]
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Longest-path relaxation strategy: "frontier" or "topological"
    #[pyo3(get, set)]
    pub longest_path_strategy: String,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            longest_path_strategy: "frontier".to_string(),
            verbosity: 0,
        }
    }
}

#[pymethods]
impl EngineConfig {
    #[new]
    #[pyo3(signature = (longest_path_strategy=None, verbosity=None))]
    fn new(longest_path_strategy: Option<String>, verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            longest_path_strategy: longest_path_strategy
                .unwrap_or(defaults.longest_path_strategy),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "EngineConfig(longest_path_strategy={:?}, verbosity={})",
            self.longest_path_strategy, self.verbosity
        )
    }
}
