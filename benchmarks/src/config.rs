//! Benchmark configuration: JSON file plus `--key=value` overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors that can occur while loading a benchmark configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Input grid and failure probability for max-finding benchmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Lower end of the input interval (inclusive).
    pub lower: f64,
    /// Upper end of the input interval (inclusive).
    pub upper: f64,
    /// Grid size for a single run.
    pub points: usize,
    /// Acceptable failure probability of the modeled quantum algorithm.
    pub error: f64,
    /// Grid sizes swept by the scaling report.
    pub sizes: Vec<usize>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            lower: -10.0,
            upper: 10.0,
            points: 10_000,
            error: 1e-5,
            sizes: vec![10, 100, 1_000, 10_000, 100_000],
        }
    }
}

impl BenchConfig {
    /// Load and validate a JSON config. Missing fields take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: BenchConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!("Loaded benchmark config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.error > 0.0 && self.error < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "error must lie in (0, 1), got {}",
                self.error
            )));
        }
        if !self.lower.is_finite() || !self.upper.is_finite() || self.lower > self.upper {
            return Err(ConfigError::Invalid(format!(
                "bad interval [{}, {}]",
                self.lower, self.upper
            )));
        }
        if self.points == 0 || self.sizes.contains(&0) {
            return Err(ConfigError::Invalid("grid sizes must be positive".to_string()));
        }
        Ok(())
    }

    /// Apply `--lower=`, `--upper=`, `--points=`, `--error=` and
    /// `--sizes=10,100,...` overrides. Unparseable values are ignored.
    pub fn apply_args(&mut self, args: &[String]) {
        fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
            args.iter().find_map(|a| a.strip_prefix(name))
        }

        if let Some(v) = flag(args, "--lower=").and_then(|v| v.parse().ok()) {
            self.lower = v;
        }
        if let Some(v) = flag(args, "--upper=").and_then(|v| v.parse().ok()) {
            self.upper = v;
        }
        if let Some(v) = flag(args, "--points=").and_then(|v| v.parse().ok()) {
            self.points = v;
        }
        if let Some(v) = flag(args, "--error=").and_then(|v| v.parse().ok()) {
            self.error = v;
        }
        if let Some(v) = flag(args, "--sizes=") {
            let sizes: Vec<usize> = v.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if !sizes.is_empty() {
                self.sizes = sizes;
            }
        }
    }
}
