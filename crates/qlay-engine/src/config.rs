//! Simulation configuration.
//!
//! Precedence (highest to lowest):
//! 1. Environment variables (`QLAY_` prefix)
//! 2. Configuration file (YAML)
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

/// Trial count used when none is given.
pub const DEFAULT_TRIALS: u64 = 1000;

/// Largest state the bundled simulator allocates by default.
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// Hard ceiling on `max_qubits`: a 30-qubit statevector already takes
/// 16 GiB.
pub const MAX_SUPPORTED_QUBITS: usize = 30;

/// Settings for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of trials per run.
    #[serde(default = "default_trials")]
    pub trials: u64,

    /// Seed for reproducible runs; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Worker threads; 1 runs sequentially.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Upper bound on qubits per state context.
    #[serde(default = "default_max_qubits")]
    pub max_qubits: usize,
}

fn default_trials() -> u64 {
    DEFAULT_TRIALS
}

fn default_workers() -> usize {
    1
}

fn default_max_qubits() -> usize {
    DEFAULT_MAX_QUBITS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            seed: None,
            workers: default_workers(),
            max_qubits: default_max_qubits(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;

        let config: SimulationConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> EngineResult<Self> {
        let config = Self::default().merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional file, then apply environment overrides.
    pub fn load(config_file: Option<&Path>) -> EngineResult<Self> {
        Self::load_with(config_file, |key| std::env::var(key).ok())
    }

    /// Like [`load`](Self::load), reading `QLAY_*` overrides from `lookup`
    /// instead of the process environment.
    pub fn load_with(
        config_file: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> EngineResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        let config = config.merge_vars(lookup);
        config.validate()?;
        debug!(?config, "Loaded simulation config");
        Ok(config)
    }

    /// Reject settings no run can use.
    pub fn validate(&self) -> EngineResult<()> {
        if self.trials == 0 {
            return Err(EngineError::Config("trials must be positive".into()));
        }
        if self.workers == 0 {
            return Err(EngineError::Config("workers must be positive".into()));
        }
        if self.max_qubits == 0 {
            return Err(EngineError::Config("max_qubits must be positive".into()));
        }
        if self.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(EngineError::Config(format!(
                "max_qubits must be at most {MAX_SUPPORTED_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        Ok(())
    }

    fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Unset or unparsable variables leave
    /// the current value unchanged.
    fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(val) => Some(val),
                Err(_) => {
                    warn!("Ignoring {}={:?}: not a valid number", key, raw);
                    None
                }
            }
        }

        if let Some(val) = parsed(&lookup, "QLAY_TRIALS") {
            self.trials = val;
        }
        if let Some(val) = parsed(&lookup, "QLAY_SEED") {
            self.seed = Some(val);
        }
        if let Some(val) = parsed(&lookup, "QLAY_WORKERS") {
            self.workers = val;
        }
        if let Some(val) = parsed(&lookup, "QLAY_MAX_QUBITS") {
            self.max_qubits = val;
        }
        self
    }
}
