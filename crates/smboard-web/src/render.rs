//! Server-side HTML rendering
//!
//! Each chart spec becomes a Plotly figure (`{data, layout}`) embedded as
//! JSON; the page loads plotly.js from the CDN and draws them client side.

use serde_json::{json, Map, Value};
use smboard_core::models::{
    Axis, ChartData, ChartSpec, LabelPosition, Metric, Report, TextBlock, TextKind, TickMode,
    Widget,
};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.0.min.js";

/// Plotly's default qualitative palette
const PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

const STYLE: &str = r#"
body{font-family:system-ui,-apple-system,sans-serif;max-width:1400px;margin:0 auto;padding:20px;background:#fafafa;color:#1a1a2e}
h1{margin:12px 0 4px}
.subtitle{color:#666;margin-bottom:20px}
.banner{width:100%;max-height:280px;object-fit:cover;border-radius:8px}
.metrics{display:flex;gap:16px;margin:12px 0}
.metric{flex:1;background:#fff;border-radius:8px;padding:12px 16px;box-shadow:0 1px 3px rgba(0,0,0,0.1)}
.metric .label{font-size:0.9rem;color:#555}
.metric .value{font-size:2rem;font-weight:600}
.metric .delta{font-size:0.85rem;color:#09ab3b}
.plot{background:#fff;border-radius:8px;padding:10px;margin:20px 0;box-shadow:0 1px 3px rgba(0,0,0,0.1)}
.plot>div{height:460px}
.callout{border-radius:6px;padding:12px 16px;margin:10px 0}
.callout.info{background:#e8f0fe;color:#0b3d91}
.callout.warning{background:#fff8e1;color:#7a5b00}
.callout.success{background:#e6f4ea;color:#1e5e2f}
.callout.error{background:#fdecea;color:#8a1c1c}
.hint{color:#555}
"#;

/// Full dashboard page for a built report
pub fn render_page(report: &Report, show_banner: bool) -> String {
    let mut body = String::new();

    if show_banner {
        body.push_str("<img class=\"banner\" src=\"/banner\" alt=\"banner\">\n");
    }
    body.push_str(&format!("<h1>{}</h1>\n", escape_html(&report.title)));
    body.push_str(&format!(
        "<p class=\"subtitle\">{} records, generated {}</p>\n",
        report.record_count,
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    let mut metric_row: Vec<&Metric> = Vec::new();
    let mut scripts = String::new();
    let mut chart_index = 0;

    for widget in &report.widgets {
        match widget {
            Widget::Metric(metric) => {
                if metric_row.last().is_some_and(|prev| prev.group != metric.group) {
                    push_metric_row(&mut body, &mut metric_row);
                }
                metric_row.push(metric);
            }
            Widget::Chart(chart) => {
                push_metric_row(&mut body, &mut metric_row);
                let id = format!("chart-{}", chart_index);
                chart_index += 1;
                body.push_str(&format!(
                    "<div class=\"plot\"><div id=\"{}\"></div></div>\n",
                    id
                ));
                scripts.push_str(&format!(
                    "Plotly.newPlot('{}', ...unpack({}));\n",
                    id,
                    script_json(&figure(chart))
                ));
            }
            Widget::Text(text) => {
                push_metric_row(&mut body, &mut metric_row);
                body.push_str(&text_html(text));
            }
        }
    }
    push_metric_row(&mut body, &mut metric_row);

    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<script src="{cdn}"></script>
<style>{style}</style>
</head><body>
{body}<script>
function unpack(fig) {{ return [fig.data, fig.layout, {{responsive: true}}]; }}
{scripts}</script>
</body></html>
"#,
        title = escape_html(&report.title),
        cdn = PLOTLY_CDN,
        style = STYLE,
        body = body,
        scripts = scripts,
    )
}

/// Page shown instead of a partial report when loading or building fails
pub fn render_error_page(title: &str, message: &str, suggestion: Option<&str>) -> String {
    let hint = suggestion
        .map(|s| format!("<p class=\"hint\">{}</p>\n", escape_html(s)))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>{title}</title>
<style>{style}</style>
</head><body>
<h1>{title}</h1>
<div class="callout error">{message}</div>
{hint}</body></html>
"#,
        title = escape_html(title),
        style = STYLE,
        message = escape_html(message),
        hint = hint,
    )
}

fn push_metric_row(body: &mut String, row: &mut Vec<&Metric>) {
    if row.is_empty() {
        return;
    }
    body.push_str("<div class=\"metrics\">\n");
    for metric in row.drain(..) {
        let delta = metric
            .delta
            .as_deref()
            .map(|d| format!("<div class=\"delta\">{}</div>", escape_html(d)))
            .unwrap_or_default();
        body.push_str(&format!(
            "<div class=\"metric\"><div class=\"label\">{}</div><div class=\"value\">{}</div>{}</div>\n",
            escape_html(&metric.label),
            escape_html(&metric.value),
            delta
        ));
    }
    body.push_str("</div>\n");
}

fn text_html(text: &TextBlock) -> String {
    let body = escape_html(&text.body);
    match text.kind {
        TextKind::Heading => format!("<h2>{} {}</h2>\n", text.kind.icon(), body),
        TextKind::Info => format!("<div class=\"callout info\">{} {}</div>\n", text.kind.icon(), body),
        TextKind::Warning => format!(
            "<div class=\"callout warning\">{} {}</div>\n",
            text.kind.icon(),
            body
        ),
        TextKind::Success => format!(
            "<div class=\"callout success\">{} {}</div>\n",
            text.kind.icon(),
            body
        ),
    }
}

/// Plotly figure (`{"data": [...], "layout": {...}}`) for one chart spec
pub fn figure(chart: &ChartSpec) -> Value {
    let mut layout = Map::new();
    layout.insert("title".into(), json!({ "text": chart.title }));
    layout.insert("showlegend".into(), json!(chart.show_legend));
    if let Some(legend) = &chart.legend_title {
        layout.insert("legend".into(), json!({ "title": { "text": legend } }));
    }
    if let Some(axis) = &chart.x_axis {
        layout.insert("xaxis".into(), axis_layout(axis));
    }
    if let Some(axis) = &chart.y_axis {
        layout.insert("yaxis".into(), axis_layout(axis));
    }

    let data = match &chart.data {
        ChartData::Histogram { bins } => {
            layout.insert("bargap".into(), json!(0.05));
            vec![json!({
                "type": "bar",
                "x": bins.iter().map(|b| (b.start + b.end) / 2.0).collect::<Vec<_>>(),
                "y": bins.iter().map(|b| b.count).collect::<Vec<_>>(),
                "width": bins.iter().map(|b| b.end - b.start).collect::<Vec<_>>(),
                "marker": { "color": PALETTE[0] },
            })]
        }
        ChartData::Scatter { series } => series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                json!({
                    "type": "scatter",
                    "mode": "markers",
                    "name": s.name,
                    "x": s.points.iter().map(|p| p.0).collect::<Vec<_>>(),
                    "y": s.points.iter().map(|p| p.1).collect::<Vec<_>>(),
                    "marker": { "color": color(i), "opacity": 0.7 },
                })
            })
            .collect(),
        ChartData::Pie { slices } => vec![json!({
            "type": "pie",
            "labels": slices.iter().map(|s| &s.label).collect::<Vec<_>>(),
            "values": slices.iter().map(|s| s.count).collect::<Vec<_>>(),
            "text": slices.iter().map(|s| &s.text).collect::<Vec<_>>(),
            "textinfo": "text",
            "textposition": "inside",
            "sort": false,
        })],
        ChartData::StackedBar {
            pivot,
            segment_labels,
            totals,
            total_labels,
        } => {
            layout.insert("barmode".into(), json!("stack"));
            let annotations: Vec<Value> = pivot
                .rows
                .iter()
                .zip(totals)
                .zip(total_labels)
                .map(|((row, total), label)| {
                    json!({
                        "x": row,
                        "y": total,
                        "text": label,
                        "showarrow": false,
                        "yanchor": "bottom",
                    })
                })
                .collect();
            layout.insert("annotations".into(), json!(annotations));

            pivot
                .columns
                .iter()
                .enumerate()
                .map(|(c, column)| {
                    let text: Vec<Option<&String>> = segment_labels
                        .iter()
                        .map(|row| row.get(c).and_then(Option::as_ref))
                        .collect();
                    json!({
                        "type": "bar",
                        "name": column,
                        "x": pivot.rows,
                        "y": pivot.column_values(c),
                        "text": text,
                        "textposition": "inside",
                        "marker": { "color": color(c) },
                    })
                })
                .collect()
        }
        ChartData::GroupedBar {
            bars,
            label_position,
        } => vec![json!({
            "type": "bar",
            "x": bars.iter().map(|b| &b.category).collect::<Vec<_>>(),
            "y": bars.iter().map(|b| b.value).collect::<Vec<_>>(),
            "text": bars.iter().map(|b| &b.label).collect::<Vec<_>>(),
            "textposition": text_position(*label_position),
            "marker": { "color": (0..bars.len()).map(color).collect::<Vec<_>>() },
        })],
        ChartData::BoxPlot {
            groups,
            annotations,
        } => {
            let notes: Vec<Value> = annotations
                .iter()
                .map(|a| {
                    json!({
                        "x": a.x,
                        "y": a.y,
                        "text": a.text,
                        "showarrow": false,
                        "yanchor": "bottom",
                        "xanchor": "center",
                    })
                })
                .collect();
            layout.insert("annotations".into(), json!(notes));

            groups
                .iter()
                .enumerate()
                .map(|(i, g)| {
                    json!({
                        "type": "box",
                        "name": g.name,
                        "y": g.values,
                        "boxpoints": "outliers",
                        "quartilemethod": "linear",
                        "marker": { "color": color(i) },
                    })
                })
                .collect()
        }
    };

    json!({ "data": data, "layout": Value::Object(layout) })
}

fn axis_layout(axis: &Axis) -> Value {
    let mut map = Map::new();
    map.insert("title".into(), json!({ "text": axis.title }));
    if let Some((min, max)) = axis.range {
        map.insert("range".into(), json!([min, max]));
    }
    if let TickMode::Linear { step } = axis.ticks {
        map.insert("tickmode".into(), json!("linear"));
        map.insert("dtick".into(), json!(step));
    }
    map.insert("showgrid".into(), json!(axis.show_grid));
    if let Some(format) = &axis.tick_format {
        map.insert("tickformat".into(), json!(format));
    }
    if let Some(angle) = axis.tick_angle {
        map.insert("tickangle".into(), json!(angle));
    }
    Value::Object(map)
}

fn text_position(position: LabelPosition) -> &'static str {
    match position {
        LabelPosition::Inside => "inside",
        LabelPosition::Outside => "outside",
        LabelPosition::TopCenter => "top center",
    }
}

fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// JSON safe to inline inside a `<script>` element
///
/// `<` only occurs inside JSON strings, where `\u003c` is an equivalent escape.
fn script_json(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
