//! Data models for smboard

pub mod chart;
pub mod record;
pub mod widget;

pub use chart::{
    Annotation, Axis, BarValue, BoxGroup, BoxStats, ChartData, ChartKind, ChartSpec,
    HistogramBin, LabelPosition, PieSlice, PivotTable, ScatterSeries, TickMode,
};
pub use record::{Dataset, Record};
pub use widget::{Metric, MetricGroup, Report, TextBlock, TextKind, Widget};
