/// Dashboard constants and defaults

use std::time::Duration;

/// Application name, used for config/log directories
pub const APP_NAME: &str = "simlab-dash";

/// Environment variable holding the service base URL (read at build time and at runtime)
pub const API_URL_ENV: &str = "SIMLAB_API_URL";

/// Base URL used when nothing else is configured
pub const FALLBACK_API_URL: &str = "http://localhost:5000/api";

/// Default interval between live refreshes
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(2);

/// Input poll timeout for the TUI loop
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Chart window size (oldest points dropped first)
pub const MAX_CHART_POINTS: usize = 60;

/// Maximum log lines kept for the log panel
pub const MAX_LOG_LINES: usize = 500;

/// Timestamped action/refresh messages kept for the events panel
pub const MAX_EVENTS: usize = 50;

/// Usage thresholds for colour-coded gauges (percent)
pub const USAGE_CRITICAL: f64 = 80.0;
pub const USAGE_WARNING: f64 = 60.0;

/// Base URL baked in at compile time, or the fallback
pub fn build_time_api_url() -> &'static str {
    option_env!("SIMLAB_API_URL").unwrap_or(FALLBACK_API_URL)
}

/// The four gauges shown on the dashboard, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gauge {
    Cpu,
    Memory,
    Disk,
    Network,
}

impl Gauge {
    pub fn all() -> &'static [Gauge] {
        &[Gauge::Cpu, Gauge::Memory, Gauge::Disk, Gauge::Network]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Gauge::Cpu => "CPU",
            Gauge::Memory => "Memory",
            Gauge::Disk => "Disk",
            Gauge::Network => "Network",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Gauge::Cpu | Gauge::Memory | Gauge::Disk => "%",
            Gauge::Network => "MB/s",
        }
    }

    /// Whether the gauge is a percentage and gets usage colouring
    pub fn is_percent(&self) -> bool {
        self.unit() == "%"
    }
}
