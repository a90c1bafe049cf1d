/// Handlers behind the dashboard's start / stop / generate-report actions
///
/// The dashboard never talks to the service itself. The `App` owns one
/// `DashboardActions` implementation and applies whatever outcome it returns.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

use super::api::SimulatorService;
use super::types::{SimulationStatus, SystemMetrics};

/// State change requested by a handler. Empty means "leave everything as is".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutcome {
    pub status: Option<SimulationStatus>,
    pub message: Option<String>,
    /// Full report body, set only by a successful report request
    pub report: Option<Value>,
}

impl ActionOutcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.message.is_none() && self.report.is_none()
    }
}

/// Data produced by a periodic refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Refresh {
    pub metrics: Option<SystemMetrics>,
    pub logs: Option<Vec<String>>,
    pub message: Option<String>,
}

#[async_trait]
pub trait DashboardActions: Send + Sync {
    async fn on_start(&self) -> ActionOutcome;
    async fn on_stop(&self) -> ActionOutcome;
    async fn on_generate_report(&self) -> ActionOutcome;

    async fn refresh(&self) -> Refresh {
        Refresh::default()
    }

    /// Short label for the header ("unwired" / "live")
    fn mode(&self) -> &'static str;
}

/// Default handlers: every action is a no-op and nothing is ever fetched
#[derive(Debug, Clone, Copy, Default)]
pub struct UnwiredActions;

#[async_trait]
impl DashboardActions for UnwiredActions {
    async fn on_start(&self) -> ActionOutcome {
        ActionOutcome::none()
    }

    async fn on_stop(&self) -> ActionOutcome {
        ActionOutcome::none()
    }

    async fn on_generate_report(&self) -> ActionOutcome {
        ActionOutcome::none()
    }

    fn mode(&self) -> &'static str {
        "unwired"
    }
}

/// Handlers that forward every action to the simulation service
pub struct LiveActions<S> {
    service: S,
}

impl<S: SimulatorService> LiveActions<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

/// Human summary of a report response
fn describe_report(report: &Value) -> String {
    match report.as_object() {
        Some(fields) if !fields.is_empty() => {
            let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
            format!("Report generated ({})", keys.join(", "))
        }
        _ => "Report generated".to_string(),
    }
}

#[async_trait]
impl<S: SimulatorService> DashboardActions for LiveActions<S> {
    async fn on_start(&self) -> ActionOutcome {
        match self.service.start_simulation().await {
            Ok(_) => {
                info!("simulation started");
                ActionOutcome {
                    status: Some(SimulationStatus::Active),
                    message: Some("Simulation started".to_string()),
                    report: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to start simulation");
                ActionOutcome {
                    status: Some(SimulationStatus::Error),
                    message: Some(format!("Start failed: {}", e)),
                    report: None,
                }
            }
        }
    }

    async fn on_stop(&self) -> ActionOutcome {
        match self.service.stop_simulation().await {
            Ok(_) => {
                info!("simulation stopped");
                ActionOutcome {
                    status: Some(SimulationStatus::Inactive),
                    message: Some("Simulation stopped".to_string()),
                    report: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to stop simulation");
                ActionOutcome {
                    status: Some(SimulationStatus::Error),
                    message: Some(format!("Stop failed: {}", e)),
                    report: None,
                }
            }
        }
    }

    async fn on_generate_report(&self) -> ActionOutcome {
        match self.service.generate_report().await {
            Ok(report) => {
                info!("report generated");
                ActionOutcome {
                    status: None,
                    message: Some(describe_report(&report)),
                    report: Some(report),
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to generate report");
                ActionOutcome {
                    status: None,
                    message: Some(format!("Report failed: {}", e)),
                    report: None,
                }
            }
        }
    }

    async fn refresh(&self) -> Refresh {
        let mut errors = Vec::new();

        let metrics = match self.service.get_metrics().await {
            Ok(m) => Some(m),
            Err(e) => {
                warn!(error = %e, "failed to fetch metrics");
                errors.push(format!("metrics: {}", e));
                None
            }
        };

        let logs = match self.service.get_logs().await {
            Ok(lines) => Some(lines),
            Err(e) => {
                warn!(error = %e, "failed to fetch logs");
                errors.push(format!("logs: {}", e));
                None
            }
        };

        let message = if errors.is_empty() {
            None
        } else {
            Some(format!("Refresh failed - {}", errors.join("; ")))
        };

        Refresh { metrics, logs, message }
    }

    fn mode(&self) -> &'static str {
        "live"
    }
}
