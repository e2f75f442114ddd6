//! Terminal rendering of a built report
//!
//! Metrics, one table per chart and the advisories, using comfy-table.

use anyhow::Context;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use smboard_core::error::CoreError;
use smboard_core::export::{chart_table, DataTable};
use smboard_core::models::{Report, TextKind, Widget};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug)]
pub enum CliError {
    Core(CoreError),
    Other(anyhow::Error),
}

impl CliError {
    /// Actionable hint printed under the error message
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CliError::Core(e) => e.suggestion(),
            CliError::Other(e) => e.downcast_ref::<CoreError>().and_then(CoreError::suggestion),
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Core(e) => write!(f, "{}", e),
            CliError::Other(e) => write!(f, "{:#}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<CoreError> for CliError {
    fn from(e: CoreError) -> Self {
        CliError::Core(e)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(e: anyhow::Error) -> Self {
        CliError::Other(e)
    }
}

// ============================================================================
// Formatters
// ============================================================================

/// Format the report as terminal tables (human) or JSON
pub fn format_report(report: &Report, json: bool, no_color: bool) -> Result<String, CliError> {
    if json {
        let out = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        return Ok(out);
    }

    let mut sections = vec![format!(
        "{}\n{} records, generated {}",
        report.title,
        report.record_count,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    )];

    let metrics = DataTable {
        header: vec!["Metric".into(), "Value".into(), "Detail".into()],
        rows: report
            .metrics()
            .map(|m| {
                vec![
                    m.label.clone(),
                    m.value.clone(),
                    m.delta.clone().unwrap_or_default(),
                ]
            })
            .collect(),
    };
    if !metrics.rows.is_empty() {
        sections.push(render_table(&metrics, no_color));
    }

    for widget in &report.widgets {
        match widget {
            Widget::Metric(_) => {}
            Widget::Chart(chart) => {
                let body = if chart.data.is_empty() {
                    "No data in range.".to_string()
                } else {
                    render_table(&chart_table(chart), no_color)
                };
                sections.push(format!("{} ({})\n{}", chart.title, chart.kind().label(), body));
            }
            Widget::Text(text) => {
                let line = match text.kind {
                    TextKind::Heading => format!("{} {}", text.kind.icon(), text.body.to_uppercase()),
                    _ => format!("  {} {}", text.kind.icon(), text.body),
                };
                sections.push(line);
            }
        }
    }

    Ok(sections.join("\n\n"))
}

fn render_table(data: &DataTable, no_color: bool) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    // Apply colors only if enabled
    if no_color {
        table.set_header(data.header.clone());
    } else {
        table.set_header(
            data.header
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }

    for row in &data.rows {
        table.add_row(row.clone());
    }

    table.to_string()
}
