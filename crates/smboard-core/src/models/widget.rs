//! Renderable widgets and the report envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::chart::ChartSpec;

/// Metric row a metric belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGroup {
    /// Averages and extremes of numeric columns
    Overview,
    /// Most and least preferred social platform
    Platform,
}

/// A single headline number (or category) with an optional delta caption
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub group: MetricGroup,
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

impl Metric {
    pub fn new(group: MetricGroup, label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group,
            label: label.into(),
            value: value.into(),
            delta: None,
        }
    }

    pub fn with_delta(mut self, delta: impl Into<String>) -> Self {
        self.delta = Some(delta.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    Heading,
    Info,
    Warning,
    Success,
}

impl TextKind {
    /// Leading glyph used by text surfaces
    pub fn icon(&self) -> &'static str {
        match self {
            TextKind::Heading => "ℹ️",
            TextKind::Info => "💡",
            TextKind::Warning => "⚠️",
            TextKind::Success => "✅",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub kind: TextKind,
    pub body: String,
}

impl TextBlock {
    pub fn new(kind: TextKind, body: impl Into<String>) -> Self {
        Self {
            kind,
            body: body.into(),
        }
    }
}

/// Abstract renderable unit with no surface-specific behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Widget {
    Metric(Metric),
    Chart(ChartSpec),
    Text(TextBlock),
}

impl Widget {
    pub fn as_metric(&self) -> Option<&Metric> {
        match self {
            Widget::Metric(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_chart(&self) -> Option<&ChartSpec> {
        match self {
            Widget::Chart(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Widget::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Titled, timestamped envelope around a widget sequence
///
/// The timestamp lives here, not on widgets, so two builds over the same
/// dataset compare equal widget-for-widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub generated_at: DateTime<Utc>,
    /// Number of records the report was built from
    pub record_count: usize,
    pub widgets: Vec<Widget>,
}

impl Report {
    pub fn new(title: impl Into<String>, record_count: usize, widgets: Vec<Widget>) -> Self {
        Self {
            title: title.into(),
            generated_at: Utc::now(),
            record_count,
            widgets,
        }
    }

    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.widgets.iter().filter_map(Widget::as_metric)
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartSpec> {
        self.widgets.iter().filter_map(Widget::as_chart)
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextBlock> {
        self.widgets.iter().filter_map(Widget::as_text)
    }

    /// Metrics of one group, in emission order
    pub fn metric_group(&self, group: MetricGroup) -> Vec<&Metric> {
        self.metrics().filter(|m| m.group == group).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_serializes_with_type_tag() {
        let widget = Widget::Metric(
            Metric::new(MetricGroup::Platform, "Most Preferred Platform", "TikTok")
                .with_delta("12 users"),
        );
        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json["type"], "metric");
        assert_eq!(json["content"]["group"], "platform");
        assert_eq!(json["content"]["delta"], "12 users");
    }

    #[test]
    fn test_report_filters_by_widget_type() {
        let widgets = vec![
            Widget::Metric(Metric::new(MetricGroup::Overview, "a", "1.0")),
            Widget::Metric(Metric::new(MetricGroup::Platform, "b", "X")),
            Widget::Text(TextBlock::new(TextKind::Info, "hello")),
        ];
        let report = Report::new("t", 3, widgets);

        assert_eq!(report.metrics().count(), 2);
        assert_eq!(report.texts().count(), 1);
        assert_eq!(report.charts().count(), 0);
        assert_eq!(report.metric_group(MetricGroup::Platform)[0].label, "b");
    }
}
