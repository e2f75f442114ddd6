//! Chart specifications
//!
//! A [`ChartSpec`] is the data plus configuration of one chart, independent
//! of whatever library eventually draws it. Labels are pre-formatted here so
//! every rendering surface shows the same text.

use serde::{Deserialize, Serialize};

use crate::schema::Field;

/// Kind of chart, derived from [`ChartData`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
    Scatter,
    Pie,
    StackedBar,
    GroupedBar,
    BoxPlot,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Histogram => "Histogram",
            ChartKind::Scatter => "Scatter",
            ChartKind::Pie => "Pie",
            ChartKind::StackedBar => "Stacked bar",
            ChartKind::GroupedBar => "Grouped bar",
            ChartKind::BoxPlot => "Box plot",
        }
    }
}

/// Tick placement along an axis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TickMode {
    #[default]
    Auto,
    /// One tick every `step` units
    Linear { step: f64 },
}

/// Axis configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    /// Fixed display domain (min, max)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<(f64, f64)>,
    #[serde(default)]
    pub ticks: TickMode,
    #[serde(default)]
    pub show_grid: bool,
    /// d3-style tick format, e.g. ".2f"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_format: Option<String>,
    /// Tick label rotation in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_angle: Option<i32>,
}

impl Axis {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    /// Linear ticks every `step` units, with gridlines
    pub fn with_linear_ticks(mut self, step: f64) -> Self {
        self.ticks = TickMode::Linear { step };
        self.show_grid = true;
        self
    }

    pub fn with_tick_format(mut self, format: impl Into<String>) -> Self {
        self.tick_format = Some(format.into());
        self
    }

    pub fn with_tick_angle(mut self, degrees: i32) -> Self {
        self.tick_angle = Some(degrees);
        self
    }
}

/// Where a text label sits relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPosition {
    Inside,
    Outside,
    TopCenter,
}

/// One unit-width histogram bin, `[start, end)` except the last which is closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Points of one scatter group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of all records, 0-100, two decimals
    pub percent: f64,
    /// Percent plus label, shown inside the slice
    pub text: String,
}

/// Two categorical fields as row/column axes with a numeric aggregate per cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PivotTable {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    /// `cells[row][column]`
    pub cells: Vec<Vec<f64>>,
}

impl PivotTable {
    /// Cell value; absent combinations (or unknown labels) are 0
    pub fn get(&self, row: &str, column: &str) -> f64 {
        let Some(r) = self.rows.iter().position(|x| x == row) else {
            return 0.0;
        };
        let Some(c) = self.columns.iter().position(|x| x == column) else {
            return 0.0;
        };
        self.cells[r][c]
    }

    /// Sum across each row
    pub fn row_totals(&self) -> Vec<f64> {
        self.cells.iter().map(|row| row.iter().sum()).collect()
    }

    /// All values of one column, aligned with `rows`
    pub fn column_values(&self, column: usize) -> Vec<f64> {
        self.cells.iter().map(|row| row[column]).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarValue {
    pub category: String,
    pub value: f64,
    pub label: String,
}

/// Five-number summary of one box, plus its outliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxGroup {
    pub name: String,
    /// Raw values, in row order
    pub values: Vec<f64>,
    pub stats: BoxStats,
}

/// Text overlaid on a chart at a data coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: String,
    pub y: f64,
    pub text: String,
    pub position: LabelPosition,
}

/// Computed sub-table of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    Histogram {
        bins: Vec<HistogramBin>,
    },
    Scatter {
        series: Vec<ScatterSeries>,
    },
    Pie {
        slices: Vec<PieSlice>,
    },
    StackedBar {
        pivot: PivotTable,
        /// Per-segment labels aligned with `pivot.cells`, `None` for empty segments
        segment_labels: Vec<Vec<Option<String>>>,
        totals: Vec<f64>,
        total_labels: Vec<String>,
    },
    GroupedBar {
        bars: Vec<BarValue>,
        label_position: LabelPosition,
    },
    BoxPlot {
        groups: Vec<BoxGroup>,
        annotations: Vec<Annotation>,
    },
}

impl ChartData {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartData::Histogram { .. } => ChartKind::Histogram,
            ChartData::Scatter { .. } => ChartKind::Scatter,
            ChartData::Pie { .. } => ChartKind::Pie,
            ChartData::StackedBar { .. } => ChartKind::StackedBar,
            ChartData::GroupedBar { .. } => ChartKind::GroupedBar,
            ChartData::BoxPlot { .. } => ChartKind::BoxPlot,
        }
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Histogram { bins } => bins.iter().all(|b| b.count == 0),
            ChartData::Scatter { series } => series.iter().all(|s| s.points.is_empty()),
            ChartData::Pie { slices } => slices.is_empty(),
            ChartData::StackedBar { pivot, .. } => pivot.columns.is_empty(),
            ChartData::GroupedBar { bars, .. } => bars.is_empty(),
            ChartData::BoxPlot { groups, .. } => groups.is_empty(),
        }
    }
}

/// Data plus configuration for one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_field: Option<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_field: Option<Field>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_field: Option<Field>,
    /// Pie charts have no axes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<Axis>,
    pub show_legend: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend_title: Option<String>,
    pub data: ChartData,
}

impl ChartSpec {
    pub fn kind(&self) -> ChartKind {
        self.data.kind()
    }
}
