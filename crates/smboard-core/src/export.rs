//! Export functionality for built reports
//!
//! JSON keeps the full widget structure; Markdown flattens every chart to a
//! table so the report reads well without a chart renderer.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::models::{ChartData, ChartSpec, Report, TextKind, Widget};

/// Tabular view of a chart's computed data
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Flatten a chart's data into rows, one row per bar, bin, slice, box or series
pub fn chart_table(chart: &ChartSpec) -> DataTable {
    let strings = |cols: &[&str]| cols.iter().map(|c| c.to_string()).collect::<Vec<_>>();

    match &chart.data {
        ChartData::Histogram { bins } => DataTable {
            header: strings(&["Bin", "Count"]),
            rows: bins
                .iter()
                .map(|b| vec![format!("{}-{}", b.start, b.end), b.count.to_string()])
                .collect(),
        },
        ChartData::Scatter { series } => DataTable {
            header: strings(&["Group", "Points", "Mean X", "Mean Y"]),
            rows: series
                .iter()
                .map(|s| {
                    let n = s.points.len().max(1) as f64;
                    let mean_x = s.points.iter().map(|p| p.0).sum::<f64>() / n;
                    let mean_y = s.points.iter().map(|p| p.1).sum::<f64>() / n;
                    vec![
                        s.name.clone(),
                        s.points.len().to_string(),
                        format!("{:.2}", mean_x),
                        format!("{:.2}", mean_y),
                    ]
                })
                .collect(),
        },
        ChartData::Pie { slices } => DataTable {
            header: strings(&["Category", "Count", "Share"]),
            rows: slices
                .iter()
                .map(|s| {
                    vec![
                        s.label.clone(),
                        s.count.to_string(),
                        format!("{:.1}%", s.percent),
                    ]
                })
                .collect(),
        },
        ChartData::StackedBar {
            pivot,
            total_labels,
            ..
        } => {
            let mut header = vec![chart
                .x_axis
                .as_ref()
                .map(|a| a.title.clone())
                .unwrap_or_default()];
            header.extend(pivot.columns.iter().cloned());
            header.push("Total".to_string());

            let rows = pivot
                .rows
                .iter()
                .zip(&pivot.cells)
                .zip(total_labels)
                .map(|((row, cells), total)| {
                    let mut line = vec![row.clone()];
                    line.extend(cells.iter().map(|v| format!("{:.1}", v)));
                    line.push(total.trim_start_matches("Total: ").to_string());
                    line
                })
                .collect();
            DataTable { header, rows }
        }
        ChartData::GroupedBar { bars, .. } => DataTable {
            header: vec![
                chart
                    .x_axis
                    .as_ref()
                    .map(|a| a.title.clone())
                    .unwrap_or_default(),
                chart
                    .y_axis
                    .as_ref()
                    .map(|a| a.title.clone())
                    .unwrap_or_default(),
            ],
            rows: bars
                .iter()
                .map(|b| vec![b.category.clone(), b.label.clone()])
                .collect(),
        },
        ChartData::BoxPlot {
            groups,
            annotations,
        } => DataTable {
            header: strings(&["Group", "Min", "Q1", "Median", "Q3", "Max", "Mean", "Outliers"]),
            rows: groups
                .iter()
                .map(|g| {
                    let mean = annotations
                        .iter()
                        .find(|a| a.x == g.name)
                        .map(|a| a.text.clone())
                        .unwrap_or_default();
                    vec![
                        g.name.clone(),
                        format!("{:.2}", g.stats.lower_whisker),
                        format!("{:.2}", g.stats.q1),
                        format!("{:.2}", g.stats.median),
                        format!("{:.2}", g.stats.q3),
                        format!("{:.2}", g.stats.upper_whisker),
                        mean,
                        g.stats.outliers.len().to_string(),
                    ]
                })
                .collect(),
        },
    }
}

fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Export the full report (title, timestamp, widgets) as pretty JSON
pub fn export_report_to_json(report: &Report, path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;
    serde_json::to_writer_pretty(&mut writer, report).context("Failed to serialize report")?;
    writeln!(writer).context("Failed to write JSON")?;
    writer.flush().context("Failed to flush JSON writer")?;
    Ok(())
}

/// Export the report as Markdown
pub fn export_report_to_markdown(report: &Report, path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer
        .write_all(render_markdown(report).as_bytes())
        .context("Failed to write Markdown")?;
    writer.flush().context("Failed to flush Markdown writer")?;
    Ok(())
}

/// Markdown rendering of a report
pub fn render_markdown(report: &Report) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", report.title));
    md.push_str(&format!(
        "Generated {} from {} records.\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.record_count
    ));

    let metrics: Vec<_> = report.metrics().collect();
    if !metrics.is_empty() {
        md.push_str("| Metric | Value | Detail |\n|---|---|---|\n");
        for metric in metrics {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                escape_cell(&metric.label),
                escape_cell(&metric.value),
                escape_cell(metric.delta.as_deref().unwrap_or("")),
            ));
        }
        md.push('\n');
    }

    for widget in &report.widgets {
        match widget {
            Widget::Metric(_) => {}
            Widget::Chart(chart) => {
                md.push_str(&format!("## {}\n\n", chart.title));
                if chart.data.is_empty() {
                    md.push_str("_No data in range._\n\n");
                    continue;
                }
                let table = chart_table(chart);
                md.push_str(&markdown_table(&table));
                md.push('\n');
            }
            Widget::Text(text) => match text.kind {
                TextKind::Heading => {
                    md.push_str(&format!("### {} {}\n\n", text.kind.icon(), text.body))
                }
                _ => md.push_str(&format!("> {} {}\n\n", text.kind.icon(), text.body)),
            },
        }
    }

    md
}

fn markdown_table(table: &DataTable) -> String {
    let mut out = String::new();
    let header: Vec<String> = table.header.iter().map(|h| escape_cell(h)).collect();
    out.push_str(&format!("| {} |\n", header.join(" | ")));
    out.push_str(&format!("|{}\n", "---|".repeat(table.header.len())));
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
