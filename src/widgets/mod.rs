// Custom widgets used by the dashboard screen.
// Everything else is composed inline from ratatui primitives (Block, Paragraph, Chart, List).
pub mod metric_card;

pub use metric_card::{MetricCard, MetricValue};
