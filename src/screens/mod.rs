// Single-screen TUI:
// - Header with simulation status badge and handler mode
// - Metric cards (CPU, Memory, Disk, Network)
// - CPU/Memory chart and service log panel
// - Footer with key hints or the latest status message
// - Help overlay (press '?')
pub mod dashboard;

pub use dashboard::{Dashboard, DashboardAction, DashboardView};
