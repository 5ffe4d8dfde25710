//! Benchmark configuration and experiment planning.
//!
//! Settings are layered: built-in reference defaults, then an optional TOML
//! file, then `STARJOIN_*` environment variables. The binary applies its
//! command-line flags last.

use crate::constants::{env as env_vars, limits, reference};
use crate::enumerator::cartesian_product_size;
use crate::error::{StarJoinError, StarJoinResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BenchmarkConfig {
    /// Rows in every dimension table (k)
    #[serde(default = "default_rows_per_dimension")]
    pub rows_per_dimension: usize,
    /// Cap on fact table cardinality (L)
    #[serde(default = "default_fact_row_limit")]
    pub fact_row_limit: usize,
    /// Repetitions per dimension count (R)
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
    #[serde(default = "default_min_dimensions")]
    pub min_dimensions: usize,
    #[serde(default = "default_max_dimensions")]
    pub max_dimensions: usize,
    /// Directory receiving the result files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_rows_per_dimension() -> usize {
    reference::ROWS_PER_DIMENSION
}

fn default_fact_row_limit() -> usize {
    reference::FACT_ROW_LIMIT
}

fn default_repetitions() -> usize {
    reference::REPETITIONS
}

fn default_min_dimensions() -> usize {
    reference::MIN_DIMENSIONS
}

fn default_max_dimensions() -> usize {
    reference::MAX_DIMENSIONS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(reference::OUTPUT_DIR)
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            rows_per_dimension: default_rows_per_dimension(),
            fact_row_limit: default_fact_row_limit(),
            repetitions: default_repetitions(),
            min_dimensions: default_min_dimensions(),
            max_dimensions: default_max_dimensions(),
            output_dir: default_output_dir(),
        }
    }
}

impl BenchmarkConfig {
    /// Parse a TOML document; missing keys fall back to the reference defaults.
    pub fn from_toml_str(contents: &str) -> StarJoinResult<Self> {
        toml::from_str(contents).map_err(|e| StarJoinError::configuration(e.to_string()))
    }

    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> StarJoinResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StarJoinError::configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), "Loaded benchmark configuration");
        Ok(config)
    }

    /// Apply `STARJOIN_*` overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> StarJoinResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> StarJoinResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        override_parsed(&lookup, env_vars::ROWS_PER_DIMENSION, &mut self.rows_per_dimension)?;
        override_parsed(&lookup, env_vars::FACT_ROW_LIMIT, &mut self.fact_row_limit)?;
        override_parsed(&lookup, env_vars::REPETITIONS, &mut self.repetitions)?;
        override_parsed(&lookup, env_vars::MIN_DIMENSIONS, &mut self.min_dimensions)?;
        override_parsed(&lookup, env_vars::MAX_DIMENSIONS, &mut self.max_dimensions)?;
        if let Some(dir) = lookup(env_vars::OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Reject configurations that cannot produce a meaningful run
    pub fn validate(&self) -> StarJoinResult<()> {
        if self.rows_per_dimension == 0 {
            return Err(StarJoinError::invalid_setting(
                "rows_per_dimension",
                "rows_per_dimension must be at least 1",
            ));
        }
        if self.fact_row_limit == 0 {
            return Err(StarJoinError::invalid_setting(
                "fact_row_limit",
                "fact_row_limit must be at least 1",
            ));
        }
        if self.repetitions == 0 {
            return Err(StarJoinError::invalid_setting(
                "repetitions",
                "repetitions must be at least 1",
            ));
        }
        if self.min_dimensions == 0 {
            return Err(StarJoinError::invalid_setting(
                "min_dimensions",
                "min_dimensions must be at least 1",
            ));
        }
        if self.max_dimensions > limits::MAX_DIMENSIONS {
            return Err(StarJoinError::invalid_setting(
                "max_dimensions",
                format!(
                    "max_dimensions ({}) exceeds the supported maximum of {}",
                    self.max_dimensions,
                    limits::MAX_DIMENSIONS
                ),
            ));
        }
        if self.min_dimensions > self.max_dimensions {
            return Err(StarJoinError::invalid_setting(
                "max_dimensions",
                format!(
                    "max_dimensions ({}) is smaller than min_dimensions ({})",
                    self.max_dimensions, self.min_dimensions
                ),
            ));
        }
        Ok(())
    }

    /// Split the configured dimension range into counts that will run and
    /// counts whose cartesian product is smaller than the fact row limit.
    pub fn plan(&self) -> ExperimentPlan {
        let mut plan = ExperimentPlan::default();
        for dimensions in self.min_dimensions..=self.max_dimensions {
            let product = cartesian_product_size(self.rows_per_dimension, dimensions);
            if product < self.fact_row_limit {
                info!(
                    dimensions,
                    product,
                    fact_row_limit = self.fact_row_limit,
                    "Not enough tuples in the cartesian product, skipping"
                );
                plan.skipped.push(dimensions);
            } else {
                plan.evaluated.push(dimensions);
            }
        }
        plan
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T) -> StarJoinResult<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = raw.trim().parse().map_err(|_| {
            StarJoinError::invalid_setting(key, format!("{key}={raw:?} is not a valid number"))
        })?;
    }
    Ok(())
}

/// Dimension counts selected for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExperimentPlan {
    /// Dimension counts whose cartesian product covers the fact row limit
    pub evaluated: Vec<usize>,
    /// Dimension counts skipped because `k^n < L`
    pub skipped: Vec<usize>,
}

impl ExperimentPlan {
    pub fn is_empty(&self) -> bool {
        self.evaluated.is_empty()
    }
}
