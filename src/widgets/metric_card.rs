/// Metric card: a bordered label with a value and an optional unit suffix

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::fmt;

/// A card value: numbers use the shortest float formatting (42.0 shows as "42")
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Number(value as f64)
    }
}

impl From<i32> for MetricValue {
    fn from(value: i32) -> Self {
        MetricValue::Number(value.into())
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

#[derive(Debug, Clone)]
pub struct MetricCard<'a> {
    title: &'a str,
    value: MetricValue,
    unit: Option<&'a str>,
    value_style: Style,
}

impl<'a> MetricCard<'a> {
    pub fn new(title: &'a str, value: impl Into<MetricValue>) -> Self {
        Self {
            title,
            value: value.into(),
            unit: None,
            value_style: Style::default().fg(Color::White),
        }
    }

    pub fn unit(mut self, unit: &'a str) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn value_style(mut self, style: Style) -> Self {
        self.value_style = style;
        self
    }

    pub fn title(&self) -> &str {
        self.title
    }

    /// Value as displayed, unit included
    pub fn value_text(&self) -> String {
        match self.unit {
            Some(unit) => format!("{}{}", self.value, unit),
            None => self.value.to_string(),
        }
    }
}

impl Widget for MetricCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut value_spans = vec![Span::styled(
            self.value.to_string(),
            self.value_style.add_modifier(Modifier::BOLD),
        )];
        if let Some(unit) = self.unit {
            value_spans.push(Span::styled(unit, Style::default().fg(Color::Gray)));
        }

        let lines = vec![
            Line::from(Span::styled(self.title, Style::default().fg(Color::Gray))),
            Line::from(value_spans),
        ];

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .render(area, buf);
    }
}
