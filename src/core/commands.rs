/// One-shot CLI command bodies, kept out of main so they can run against a stub service

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use super::api::SimulatorService;
use super::types::SystemMetrics;
use crate::utils::{round_one, tail, Gauge};

/// Request a report and return it pretty-printed, writing the same text to `output` when given
pub async fn fetch_report<S: SimulatorService + ?Sized>(service: &S, output: Option<&Path>) -> Result<String> {
    let report = service.generate_report().await
        .context("Failed to generate report")?;

    let pretty = serde_json::to_string_pretty(&report)?;

    if let Some(path) = output {
        fs::write(path, &pretty)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!(path = %path.display(), "report saved");
    }

    Ok(pretty)
}

/// Fetch the service log and keep the last `n` lines (all of them when `n` is None)
pub async fn fetch_log_lines<S: SimulatorService + ?Sized>(service: &S, n: Option<usize>) -> Result<Vec<String>> {
    let lines = service.get_logs().await
        .context("Failed to fetch logs")?;

    Ok(tail(&lines, n).to_vec())
}

pub fn format_metrics_table(metrics: &SystemMetrics) -> String {
    let mut out = String::from("System Metrics\n\n");
    out.push_str(&format!("{:<12} {:>12}\n", "Metric", "Value"));
    out.push_str(&format!("{}\n", "-".repeat(25)));

    let values = [metrics.cpu, metrics.memory, metrics.disk, metrics.network];
    for (gauge, value) in Gauge::all().iter().zip(values) {
        out.push_str(&format!(
            "{:<12} {:>12}\n",
            gauge.title(),
            format!("{}{}", round_one(value), gauge.unit())
        ));
    }

    out
}
