/// Main dashboard screen

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, List, ListItem, Paragraph, Wrap},
    Frame,
};

use serde_json::Value;

use crate::core::{ChartData, SimulationStatus, SystemMetrics};
use crate::utils::{round_one, tail, usage_color, Gauge};
use crate::widgets::MetricCard;

/// The three zero-argument actions the dashboard can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    Start,
    Stop,
    GenerateReport,
}

impl DashboardAction {
    pub fn label(&self) -> &'static str {
        match self {
            DashboardAction::Start => "start",
            DashboardAction::Stop => "stop",
            DashboardAction::GenerateReport => "generate report",
        }
    }
}

/// Everything the dashboard needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct DashboardView<'a> {
    pub metrics: &'a SystemMetrics,
    pub status: SimulationStatus,
    pub history: &'a [ChartData],
    pub logs: &'a [String],
    pub events: &'a [String],
    pub status_message: Option<&'a str>,
    /// Report shown as an overlay, scrolled down by `report_scroll` lines
    pub report: Option<&'a Value>,
    pub report_scroll: u16,
    pub mode: &'a str,
    pub show_help: bool,
}

pub struct Dashboard {
    title: String,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            title: "SecureSimLab Monitor".to_string(),
        }
    }

    /// Key binding for the dashboard actions. The dashboard never runs them itself.
    pub fn action_for_key(key: KeyCode) -> Option<DashboardAction> {
        match key {
            KeyCode::Char('s') => Some(DashboardAction::Start),
            KeyCode::Char('x') => Some(DashboardAction::Stop),
            KeyCode::Char('g') => Some(DashboardAction::GenerateReport),
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame, view: &DashboardView) {
        let container = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = container.inner(frame.size());
        frame.render_widget(container, frame.size());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title + status
                Constraint::Length(4),  // Metric cards
                Constraint::Min(0),     // Chart + events/logs
                Constraint::Length(3),  // Footer
            ])
            .split(inner);

        frame.render_widget(self.render_header(view), chunks[0]);
        self.render_cards(frame, chunks[1], view.metrics);

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);

        self.render_chart(frame, middle[0], view.history, view.mode);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(middle[1]);

        self.render_events(frame, side[0], view.events);
        self.render_logs(frame, side[1], view.logs);

        // Footer with status message or key hints
        let footer_text = match view.status_message {
            Some(message) => message.to_string(),
            None => "[s]tart | [x] stop | [g]enerate report | [?] Help | [q]uit".to_string(),
        };

        let footer = Paragraph::new(footer_text)
            .alignment(Alignment::Center)
            .style(if view.status_message.is_some() {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            })
            .block(Block::default().borders(Borders::ALL));

        frame.render_widget(footer, chunks[3]);

        if let Some(report) = view.report {
            self.render_report(frame, report, view.report_scroll);
        }

        if view.show_help {
            self.render_help(frame, view.mode);
        }
    }

    fn render_header(&self, view: &DashboardView) -> Paragraph {
        let (badge_fg, badge_bg) = match view.status {
            SimulationStatus::Inactive => (Color::Black, Color::Gray),
            SimulationStatus::Active => (Color::Black, Color::Green),
            SimulationStatus::Error => (Color::White, Color::Red),
        };

        let line = Line::from(vec![
            Span::styled(
                self.title.as_str(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled("Simulation: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!(" {} ", view.status.as_str().to_uppercase()),
                Style::default().fg(badge_fg).bg(badge_bg).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("[{}]", view.mode), Style::default().fg(Color::DarkGray)),
        ]);

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, metrics: &SystemMetrics) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        for (gauge, column) in Gauge::all().iter().zip(columns.iter()) {
            let value = round_one(gauge_value(metrics, *gauge));
            let color = if gauge.is_percent() { usage_color(value) } else { Color::White };

            let card = MetricCard::new(gauge.title(), value)
                .unit(gauge.unit())
                .value_style(Style::default().fg(color));
            frame.render_widget(card, *column);
        }
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect, history: &[ChartData], mode: &str) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" CPU / Memory ", Style::default().fg(Color::Cyan)));

        if history.is_empty() {
            let hint = if mode == "live" {
                "Waiting for the first sample..."
            } else {
                "No samples. Run with --live to poll the service."
            };
            let empty = Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let cpu_points: Vec<(f64, f64)> = history
            .iter()
            .enumerate()
            .map(|(i, point)| (i as f64, point.cpu))
            .collect();
        let memory_points: Vec<(f64, f64)> = history
            .iter()
            .enumerate()
            .map(|(i, point)| (i as f64, point.memory))
            .collect();

        let y_max = history
            .iter()
            .flat_map(|p| [p.cpu, p.memory])
            .fold(100.0_f64, f64::max);
        let x_max = (history.len().saturating_sub(1)).max(1) as f64;

        let first_time = history.first().map(|p| p.time.clone()).unwrap_or_default();
        let last_time = history.last().map(|p| p.time.clone()).unwrap_or_default();

        let datasets = vec![
            Dataset::default()
                .name("CPU")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&cpu_points),
            Dataset::default()
                .name("Memory")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Magenta))
                .data(&memory_points),
        ];

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, x_max])
                    .labels(vec![Span::raw(first_time), Span::raw(last_time)]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, y_max])
                    .labels(vec![
                        Span::raw("0"),
                        Span::raw(format!("{}", y_max / 2.0)),
                        Span::raw(format!("{}", y_max)),
                    ]),
            );

        frame.render_widget(chart, area);
    }

    fn render_logs(&self, frame: &mut Frame, area: Rect, logs: &[String]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Logs ", Style::default().fg(Color::Cyan)));

        if logs.is_empty() {
            let empty = Paragraph::new(Span::styled("No log lines", Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Show the most recent lines that fit
        let visible = area.height.saturating_sub(2) as usize;
        let start = logs.len().saturating_sub(visible);
        let items: Vec<ListItem> = logs[start..]
            .iter()
            .map(|line| ListItem::new(Line::from(log_span(line))))
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_events(&self, frame: &mut Frame, area: Rect, events: &[String]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Events ", Style::default().fg(Color::Cyan)));

        let visible = area.height.saturating_sub(2) as usize;
        let items: Vec<ListItem> = tail(events, Some(visible))
            .iter()
            .map(|event| ListItem::new(Line::from(log_span(event))))
            .collect();

        if items.is_empty() {
            let empty = Paragraph::new(Span::styled("No events", Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        frame.render_widget(List::new(items).block(block), area);
    }

    fn render_report(&self, frame: &mut Frame, report: &Value, scroll: u16) {
        let area = frame.size();
        let popup_area = centered(area, area.width - area.width / 5, area.height - area.height / 5);

        let text = serde_json::to_string_pretty(report).unwrap_or_else(|_| report.to_string());
        let lines: Vec<Line> = text.lines().map(Line::from).collect();

        frame.render_widget(Clear, popup_area);

        let report_widget = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green))
                    .title(Span::styled(
                        " Report  [↑/↓] scroll  [Esc] close ",
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    )),
            )
            .scroll((scroll, 0));

        frame.render_widget(report_widget, popup_area);
    }

    fn render_help(&self, frame: &mut Frame, mode: &str) {
        let area = frame.size();
        let popup_area = centered(area, area.width.min(60), area.height.min(16));

        let mode_line = if mode == "live" {
            "  Actions are forwarded to the simulation service."
        } else {
            "  Actions are not wired; start with --live to enable them."
        };

        let help_text = vec![
            Line::from(Span::styled(
                "Keyboard Shortcuts",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("  [s]            Start simulation"),
            Line::from("  [x]            Stop simulation"),
            Line::from("  [g]            Generate report"),
            Line::from("  [?]            Toggle this help"),
            Line::from("  [↑/↓] [PgUp/PgDn]  Scroll the report"),
            Line::from("  [Esc]          Close the report"),
            Line::from("  [q] / [Esc]    Quit"),
            Line::from(""),
            Line::from(Span::styled(mode_line, Style::default().fg(Color::Yellow))),
            Line::from(""),
            Line::from(Span::styled(
                "Press [?] or [Esc] to close this help",
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )),
        ];

        frame.render_widget(Clear, popup_area);

        let help_widget = Paragraph::new(help_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(Span::styled(" Help ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
            )
            .wrap(Wrap { trim: false });

        frame.render_widget(help_widget, popup_area);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

fn gauge_value(metrics: &SystemMetrics, gauge: Gauge) -> f64 {
    match gauge {
        Gauge::Cpu => metrics.cpu,
        Gauge::Memory => metrics.memory,
        Gauge::Disk => metrics.disk,
        Gauge::Network => metrics.network,
    }
}

/// Colour a log line by the level word it contains
fn log_span(line: &str) -> Span<'_> {
    let upper = line.to_uppercase();
    let color = if upper.contains("ERROR") {
        Color::Red
    } else if upper.contains("WARN") {
        Color::Yellow
    } else if upper.contains("INFO") {
        Color::Cyan
    } else {
        Color::White
    };
    Span::styled(line, Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(view: &DashboardView, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let dashboard = Dashboard::new();
        terminal.draw(|f| dashboard.render(f, view)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn view<'a>(metrics: &'a SystemMetrics, history: &'a [ChartData], logs: &'a [String]) -> DashboardView<'a> {
        DashboardView {
            metrics,
            status: SimulationStatus::Inactive,
            history,
            logs,
            events: &[],
            status_message: None,
            report: None,
            report_scroll: 0,
            mode: "unwired",
            show_help: false,
        }
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(Dashboard::action_for_key(KeyCode::Char('s')), Some(DashboardAction::Start));
        assert_eq!(Dashboard::action_for_key(KeyCode::Char('x')), Some(DashboardAction::Stop));
        assert_eq!(Dashboard::action_for_key(KeyCode::Char('g')), Some(DashboardAction::GenerateReport));
        assert_eq!(Dashboard::action_for_key(KeyCode::Char('q')), None);
        assert_eq!(Dashboard::action_for_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_renders_cards_and_status() {
        let metrics = SystemMetrics { cpu: 42.0, memory: 63.46, disk: 10.0, network: 1.5 };
        let screen = draw(&view(&metrics, &[], &[]), 100, 24);

        assert!(screen.contains("SecureSimLab Monitor"));
        assert!(screen.contains("INACTIVE"));
        assert!(screen.contains("CPU"));
        assert!(screen.contains("42%"));
        assert!(screen.contains("63.5%"));
        assert!(screen.contains("1.5MB/s"));
        assert!(screen.contains("No samples"));
        assert!(screen.contains("No log lines"));
        assert!(screen.contains("No events"));
        assert!(screen.contains("[q]uit"));
    }

    #[test]
    fn test_renders_message_logs_and_help() {
        let metrics = SystemMetrics::default();
        let history = vec![
            ChartData { time: "10:00:00".to_string(), cpu: 10.0, memory: 20.0 },
            ChartData { time: "10:00:02".to_string(), cpu: 30.0, memory: 40.0 },
        ];
        let logs = vec!["INFO simulation running".to_string()];
        let mut v = view(&metrics, &history, &logs);
        v.status = SimulationStatus::Error;
        v.status_message = Some("Start failed: connection refused");
        v.mode = "live";

        let screen = draw(&v, 120, 30);
        assert!(screen.contains("ERROR"));
        assert!(screen.contains("Start failed: connection refused"));
        assert!(screen.contains("simulation running"));
        assert!(!screen.contains("No samples"));

        v.show_help = true;
        let screen = draw(&v, 120, 30);
        assert!(screen.contains("Keyboard Shortcuts"));
        assert!(screen.contains("forwarded to the simulation service"));
    }

    #[test]
    fn test_renders_in_tiny_terminal() {
        let metrics = SystemMetrics::default();
        // Must not panic when there is no room
        let _ = draw(&view(&metrics, &[], &[]), 10, 5);
    }

    #[test]
    fn test_renders_newest_events() {
        let metrics = SystemMetrics::default();
        let events: Vec<String> = (0..30).map(|i| format!("10:00:{:02} event {}", i, i)).collect();
        let mut v = view(&metrics, &[], &[]);
        v.events = &events;

        let screen = draw(&v, 120, 30);
        assert!(screen.contains("Events"));
        assert!(screen.contains("event 29"));
        assert!(!screen.contains("event 0 "));
        assert!(!screen.contains("No events"));
    }

    #[test]
    fn test_renders_report_overlay() {
        let metrics = SystemMetrics::default();
        let report = serde_json::json!({
            "metrics_summary": {"cpu_avg": 12.5},
            "timestamp": "2024-01-01T00:00:00"
        });
        let mut v = view(&metrics, &[], &[]);
        v.report = Some(&report);

        let screen = draw(&v, 120, 30);
        assert!(screen.contains("[Esc] close"));
        assert!(screen.contains("\"metrics_summary\": {"));
        assert!(screen.contains("\"cpu_avg\": 12.5"));

        // Scrolling past the first two lines hides them
        v.report_scroll = 2;
        let screen = draw(&v, 120, 30);
        assert!(!screen.contains("\"metrics_summary\""));
        assert!(screen.contains("\"cpu_avg\": 12.5"));
        assert!(screen.contains("\"timestamp\""));
    }
}
