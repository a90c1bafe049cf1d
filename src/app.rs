/// Main TUI application

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use serde_json::Value;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::core::{
    ActionOutcome, ChartData, DashboardActions, LiveActions, Refresh, SimulationStatus,
    SimulatorService, SystemMetrics, UnwiredActions,
};
use crate::screens::{Dashboard, DashboardAction, DashboardView};
use crate::utils::{
    push_bounded, tail, DEFAULT_REFRESH_INTERVAL, INPUT_POLL_INTERVAL, MAX_CHART_POINTS,
    MAX_EVENTS, MAX_LOG_LINES,
};

const REPORT_PAGE: u16 = 10;

pub struct App {
    dashboard: Dashboard,
    actions: Box<dyn DashboardActions>,
    metrics: SystemMetrics,
    status: SimulationStatus,
    history: Vec<ChartData>,
    logs: Vec<String>,
    // Newest message wins, whether it came from an action or a refresh
    status_message: Option<String>,
    message_from_refresh: bool,
    events: Vec<String>,
    report: Option<Value>,
    report_lines: u16,
    report_scroll: u16,
    show_help: bool,
    should_quit: bool,
    last_refresh: Option<Instant>,
    refresh_interval: Duration,
}

impl App {
    pub fn new(actions: Box<dyn DashboardActions>, refresh_interval: Duration) -> Self {
        Self {
            dashboard: Dashboard::new(),
            actions,
            metrics: SystemMetrics::default(),
            status: SimulationStatus::Inactive,
            history: Vec::new(),
            logs: Vec::new(),
            status_message: None,
            message_from_refresh: false,
            events: Vec::new(),
            report: None,
            report_lines: 0,
            report_scroll: 0,
            show_help: false,
            should_quit: false,
            last_refresh: None,
            refresh_interval,
        }
    }

    /// Dashboard whose actions do nothing
    pub fn unwired() -> Self {
        Self::new(Box::new(UnwiredActions), DEFAULT_REFRESH_INTERVAL)
    }

    /// Dashboard whose actions and refreshes go to `service`
    pub fn live<S: SimulatorService + 'static>(service: S, refresh_interval: Duration) -> Self {
        Self::new(Box::new(LiveActions::new(service)), refresh_interval)
    }

    pub fn metrics(&self) -> &SystemMetrics {
        &self.metrics
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    pub fn history(&self) -> &[ChartData] {
        &self.history
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Timestamped messages, oldest first
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Report currently shown in the overlay
    pub fn report(&self) -> Option<&Value> {
        self.report.as_ref()
    }

    pub fn report_scroll(&self) -> u16 {
        self.report_scroll
    }

    pub fn mode(&self) -> &'static str {
        self.actions.mode()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run one of the dashboard actions through the configured handlers
    pub async fn dispatch(&mut self, action: DashboardAction) {
        debug!(action = action.label(), mode = self.mode(), "dispatching dashboard action");

        let outcome = match action {
            DashboardAction::Start => self.actions.on_start().await,
            DashboardAction::Stop => self.actions.on_stop().await,
            DashboardAction::GenerateReport => self.actions.on_generate_report().await,
        };

        self.apply_outcome(outcome);
    }

    fn apply_outcome(&mut self, outcome: ActionOutcome) {
        if let Some(status) = outcome.status {
            if status != self.status {
                info!(from = %self.status, to = %status, "simulation status changed");
            }
            self.status = status;
        }
        if let Some(message) = outcome.message {
            self.record_event(&message);
            self.status_message = Some(message);
            self.message_from_refresh = false;
        }
        if let Some(report) = outcome.report {
            self.report_lines = serde_json::to_string_pretty(&report)
                .map(|text| text.lines().count())
                .unwrap_or(1)
                .min(u16::MAX as usize) as u16;
            self.report_scroll = 0;
            self.report = Some(report);
        }
    }

    /// Pull fresh data through the handlers (a no-op when unwired)
    pub async fn refresh(&mut self) {
        let refresh = self.actions.refresh().await;
        self.apply_refresh(refresh);
        self.last_refresh = Some(Instant::now());
    }

    fn apply_refresh(&mut self, refresh: Refresh) {
        if let Some(metrics) = refresh.metrics {
            self.metrics = metrics;
            let time = Local::now().format("%H:%M:%S").to_string();
            push_bounded(&mut self.history, ChartData::from_metrics(time, &metrics), MAX_CHART_POINTS);
        }

        if let Some(lines) = refresh.logs {
            self.logs = tail(&lines, Some(MAX_LOG_LINES)).to_vec();
        }

        match refresh.message {
            Some(message) => {
                // A failure repeated every tick is one event, not one per tick
                if self.status_message.as_deref() != Some(message.as_str()) {
                    self.record_event(&message);
                }
                self.status_message = Some(message);
                self.message_from_refresh = true;
            }
            None if self.message_from_refresh => {
                self.record_event("Refresh recovered");
                self.status_message = None;
                self.message_from_refresh = false;
            }
            None => {}
        }
    }

    fn record_event(&mut self, message: &str) {
        let entry = format!("{} {}", Local::now().format("%H:%M:%S"), message);
        push_bounded(&mut self.events, entry, MAX_EVENTS);
    }

    fn refresh_due(&self) -> bool {
        self.last_refresh
            .map_or(true, |last| last.elapsed() >= self.refresh_interval)
    }

    fn scroll_report(&mut self, delta: i32) {
        let max = self.report_lines.saturating_sub(1) as i32;
        self.report_scroll = (self.report_scroll as i32 + delta).clamp(0, max) as u16;
    }

    pub async fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        if self.report.is_some() {
            match key_event.code {
                KeyCode::Esc => {
                    self.report = None;
                    self.report_scroll = 0;
                    return;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll_report(-1);
                    return;
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll_report(1);
                    return;
                }
                KeyCode::PageUp => {
                    self.scroll_report(-(REPORT_PAGE as i32));
                    return;
                }
                KeyCode::PageDown => {
                    self.scroll_report(REPORT_PAGE as i32);
                    return;
                }
                _ => {}
            }
        }

        match key_event.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = !self.show_help;
            }
            code => {
                if let Some(action) = Dashboard::action_for_key(code) {
                    self.dispatch(action).await;
                }
            }
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        info!(mode = self.mode(), "dashboard started");
        let result = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;

        info!("dashboard closed");
        result
    }

    async fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            if self.refresh_due() {
                self.refresh().await;
            }

            terminal.draw(|f| self.render(f))?;

            if event::poll(INPUT_POLL_INTERVAL)? {
                if let Event::Key(key_event) = event::read()? {
                    self.handle_key(key_event).await;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        let view = DashboardView {
            metrics: &self.metrics,
            status: self.status,
            history: &self.history,
            logs: &self.logs,
            events: &self.events,
            status_message: self.status_message.as_deref(),
            report: self.report.as_ref(),
            report_scroll: self.report_scroll,
            mode: self.mode(),
            show_help: self.show_help,
        };

        self.dashboard.render(frame, &view);
    }
}
