//! Console and JSON reporting of aggregated results.

use chrono::{DateTime, Utc};
use serde::Serialize;
use starjoin_core::{BenchmarkConfig, EncodingKind, ExperimentPlan, Phase, Summary};
use std::fmt::Write as _;
use std::path::Path;

/// Machine the benchmark ran on. Fields the platform cannot report stay empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HostInfo {
    pub os_type: Option<String>,
    pub cpu_num: Option<u32>,
    pub cpu_speed_mhz: Option<u64>,
    pub mem_total_kb: Option<u64>,
}

impl HostInfo {
    pub fn detect() -> Self {
        Self {
            os_type: sys_info::os_type().ok(),
            cpu_num: sys_info::cpu_num().ok(),
            cpu_speed_mhz: sys_info::cpu_speed().ok(),
            mem_total_kb: sys_info::mem_info().ok().map(|m| m.total),
        }
    }
}

/// Everything needed to interpret a run after the fact
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub config: &'a BenchmarkConfig,
    pub host: HostInfo,
    pub plan: &'a ExperimentPlan,
    pub summary: &'a Summary,
}

impl<'a> RunReport<'a> {
    pub fn new(config: &'a BenchmarkConfig, plan: &'a ExperimentPlan, summary: &'a Summary) -> Self {
        Self { generated_at: Utc::now(), config, host: HostInfo::detect(), plan, summary }
    }

    pub fn write_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Render the plan as printed by `starjoin plan`
pub fn render_plan(config: &BenchmarkConfig, plan: &ExperimentPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "k = {} rows per dimension, L = {} fact rows, R = {} repetitions",
        config.rows_per_dimension, config.fact_row_limit, config.repetitions
    );
    for &n in &plan.skipped {
        let _ = writeln!(out, "  n = {n:>2}  skip  (not enough tuples in the cartesian product)");
    }
    for &n in &plan.evaluated {
        let _ = writeln!(out, "  n = {n:>2}  run");
    }
    out
}

/// Render the per-experiment comparison table
pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", "=".repeat(78));
    let _ = writeln!(out, "  Star-join benchmark: foreign keys vs direct references");
    let _ = writeln!(out, "{}", "=".repeat(78));

    if summary.is_empty() {
        let _ = writeln!(out, "  No experiments were run.");
        return out;
    }

    let _ = writeln!(
        out,
        "  {:>3}  {:<6} {:<8} {:>12} {:>12} {:>12} {:>12}",
        "n", "phase", "type", "mean ms", "median ms", "min ms", "max ms"
    );
    let _ = writeln!(out, "  {}", "-".repeat(74));

    for size in summary.experiment_sizes() {
        for phase in Phase::ALL {
            for encoding in EncodingKind::ALL {
                if let Some(e) = summary.entry(size, phase, encoding) {
                    let _ = writeln!(
                        out,
                        "  {:>3}  {:<6} {:<8} {:>12.3} {:>12.3} {:>12.3} {:>12.3}",
                        size, phase, encoding, e.mean_ms, e.median_ms, e.min_ms, e.max_ms
                    );
                }
            }
            if let Some(speedup) = summary.speedup(size, phase) {
                let _ = writeln!(out, "  {:>3}  {:<6} foreign/pointer = {:.2}x", size, phase, speedup);
            }
        }
    }
    out
}
