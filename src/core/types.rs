/// Data shapes exchanged with the simulation service and shown on the dashboard

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four system gauges. Units and ranges are whatever the service reports;
/// nothing here clamps or validates them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
}

/// Lifecycle state of the external simulation as seen by the dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationStatus {
    #[default]
    Inactive,
    Active,
    Error,
}

impl SimulationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationStatus::Inactive => "inactive",
            SimulationStatus::Active => "active",
            SimulationStatus::Error => "error",
        }
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One point of the CPU/memory chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub time: String,
    pub cpu: f64,
    pub memory: f64,
}

impl ChartData {
    pub fn from_metrics(time: impl Into<String>, metrics: &SystemMetrics) -> Self {
        Self {
            time: time.into(),
            cpu: metrics.cpu,
            memory: metrics.memory,
        }
    }
}
