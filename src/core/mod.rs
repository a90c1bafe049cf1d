pub mod types;
pub mod api;
pub mod actions;
pub mod commands;

pub use types::{ChartData, SimulationStatus, SystemMetrics};
pub use api::{ApiError, SimulatorApi, SimulatorService};
pub use actions::{ActionOutcome, DashboardActions, LiveActions, Refresh, UnwiredActions};
