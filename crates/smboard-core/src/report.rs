//! Report assembly
//!
//! Turns a dataset into the fixed, ordered widget sequence of the dashboard:
//! metric rows, six chart specs, then the advisory text.

use std::path::Path;
use tracing::{debug, info};

use crate::analytics::{
    box_stats, format_rounded, group_mean, group_values, histogram_bins, pivot_sum, round2,
    value_counts_desc, SummaryStats,
};
use crate::error::CoreError;
use crate::models::{
    Annotation, Axis, BarValue, BoxGroup, ChartData, ChartSpec, Dataset, LabelPosition, Metric,
    MetricGroup, PieSlice, Report, ScatterSeries, TextBlock, TextKind, Widget,
};
use crate::parsers::DatasetParser;
use crate::schema::Field;

/// Genders shown in the stacked bar chart, in display order
pub const STACKED_BAR_ROWS: [&str; 2] = ["Male", "Female"];

pub const ADVISORY_HEADING: &str = "Additional Information";
pub const ADVISORY_INFO: &str =
    "Studies show that people who reduce social media usage by 30 minutes a day report better focus.";
pub const ADVISORY_WARNING: &str = "Heavy usage can lead to procrastination and anxiety.";
pub const ADVISORY_SUCCESS: &str =
    "Good practice: use screen time apps to monitor and control usage.";

/// Builds the dashboard widget sequence from a dataset
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    /// Fixed display domain of the job satisfaction histogram
    satisfaction_domain: (f64, f64),
    /// Gridline spacing of the histogram count axis
    histogram_count_step: f64,
    /// Display domain of the work hours axis
    work_hours_domain: (f64, f64),
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self {
            satisfaction_domain: (0.0, 10.0),
            histogram_count_step: 30.0,
            work_hours_domain: (-0.5, 12.5),
        }
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every widget, in display order
    ///
    /// Fails with `EmptyDataset` before producing anything when the dataset
    /// has no rows. Building twice over the same dataset yields equal
    /// sequences.
    pub fn build(&self, dataset: &Dataset) -> Result<Vec<Widget>, CoreError> {
        if dataset.is_empty() {
            return Err(CoreError::empty("report"));
        }

        let stats = SummaryStats::compute(dataset)?;
        let mut widgets = self.metric_widgets(&stats);

        widgets.extend(
            [
                self.satisfaction_histogram(dataset),
                self.work_stress_scatter(dataset),
                self.gender_pie(dataset),
                self.coffee_stacked_bar(dataset),
                self.burnout_grouped_bar(dataset),
                self.screen_time_box_plot(dataset),
            ]
            .into_iter()
            .map(Widget::Chart),
        );

        widgets.extend(advisory_widgets());

        info!(
            records = dataset.len(),
            widgets = widgets.len(),
            "Built dashboard report"
        );
        Ok(widgets)
    }

    /// Overview metrics followed by the platform preference metrics
    pub fn metric_widgets(&self, stats: &SummaryStats) -> Vec<Widget> {
        let platforms = &stats.platforms;
        vec![
            Metric::new(
                MetricGroup::Overview,
                "Avg. Daily Social Media Time",
                format!("{} hrs", format_rounded(stats.mean_daily_social_media)),
            ),
            Metric::new(
                MetricGroup::Overview,
                "Max Coffee/Day",
                format!("{} cups", format_rounded(stats.max_coffee)),
            ),
            Metric::new(
                MetricGroup::Overview,
                "Min Productivity Score",
                format_rounded(stats.min_productivity),
            ),
            Metric::new(
                MetricGroup::Platform,
                "Most Preferred Platform",
                platforms.most.category.clone(),
            )
            .with_delta(format!("{} users", platforms.most.count)),
            Metric::new(
                MetricGroup::Platform,
                "Least Preferred Platform",
                platforms.least.category.clone(),
            )
            .with_delta(format!("{} users", platforms.least.count)),
        ]
        .into_iter()
        .map(Widget::Metric)
        .collect()
    }

    pub fn satisfaction_histogram(&self, dataset: &Dataset) -> ChartSpec {
        let field = Field::JobSatisfactionScore;
        let (min, max) = self.satisfaction_domain;
        let bins = histogram_bins(&dataset.numeric_column(field), min, max, 1.0);
        debug!(bins = bins.len(), "Shaped job satisfaction histogram");

        ChartSpec {
            title: "Job Satisfaction Scores".to_string(),
            x_field: Some(field),
            y_field: None,
            group_field: None,
            x_axis: Some(
                Axis::titled(field.column_name())
                    .with_range(min, max)
                    .with_linear_ticks(1.0),
            ),
            y_axis: Some(Axis::titled("Count").with_linear_ticks(self.histogram_count_step)),
            show_legend: false,
            legend_title: None,
            data: ChartData::Histogram { bins },
        }
    }

    pub fn work_stress_scatter(&self, dataset: &Dataset) -> ChartSpec {
        let (x, y, group) = (Field::WorkHoursPerDay, Field::StressLevel, Field::Gender);
        let mut series: Vec<ScatterSeries> = Vec::new();
        for record in dataset {
            let (Some(name), Some(px), Some(py)) =
                (record.category(group), record.numeric(x), record.numeric(y))
            else {
                continue;
            };
            match series.iter_mut().find(|s| s.name == name) {
                Some(s) => s.points.push((px, py)),
                None => series.push(ScatterSeries {
                    name: name.to_string(),
                    points: vec![(px, py)],
                }),
            }
        }
        debug!(series = series.len(), "Shaped work hours scatter");

        let (min, max) = self.work_hours_domain;
        ChartSpec {
            title: "Work Hours vs Stress Level".to_string(),
            x_field: Some(x),
            y_field: Some(y),
            group_field: Some(group),
            x_axis: Some(
                Axis::titled(x.column_name())
                    .with_range(min, max)
                    .with_linear_ticks(1.0),
            ),
            y_axis: Some(Axis::titled(y.column_name()).with_linear_ticks(1.0)),
            show_legend: true,
            legend_title: Some(group.column_name().to_string()),
            data: ChartData::Scatter { series },
        }
    }

    pub fn gender_pie(&self, dataset: &Dataset) -> ChartSpec {
        let counts = value_counts_desc(dataset.category_column(Field::Gender));
        let total: usize = counts.iter().map(|c| c.count).sum();

        let slices = counts
            .into_iter()
            .map(|c| {
                let share = if total == 0 {
                    0.0
                } else {
                    c.count as f64 * 100.0 / total as f64
                };
                PieSlice {
                    text: format!("{} {:.1}%", c.category, share),
                    label: c.category,
                    count: c.count,
                    percent: round2(share),
                }
            })
            .collect();

        ChartSpec {
            title: "Gender Distribution".to_string(),
            x_field: None,
            y_field: None,
            group_field: Some(Field::Gender),
            x_axis: None,
            y_axis: None,
            show_legend: true,
            legend_title: None,
            data: ChartData::Pie { slices },
        }
    }

    pub fn coffee_stacked_bar(&self, dataset: &Dataset) -> ChartSpec {
        let pivot = pivot_sum(
            dataset,
            Field::Gender,
            Field::JobType,
            Field::CoffeeConsumption,
            &STACKED_BAR_ROWS,
        );
        let segment_labels = pivot
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| (*v > 0.0).then(|| format!("{:.1}", v)))
                    .collect()
            })
            .collect();
        let totals = pivot.row_totals();
        let total_labels = totals.iter().map(|t| format!("Total: {:.1}", t)).collect();
        debug!(
            job_types = pivot.columns.len(),
            "Shaped coffee consumption pivot"
        );

        ChartSpec {
            title: "Coffee Consumption vs Gender".to_string(),
            x_field: Some(Field::Gender),
            y_field: Some(Field::CoffeeConsumption),
            group_field: Some(Field::JobType),
            x_axis: Some(Axis::titled("Gender")),
            y_axis: Some(Axis::titled("Total Coffee Consumption")),
            show_legend: true,
            legend_title: Some(Field::JobType.column_name().to_string()),
            data: ChartData::StackedBar {
                pivot,
                segment_labels,
                totals,
                total_labels,
            },
        }
    }

    pub fn burnout_grouped_bar(&self, dataset: &Dataset) -> ChartSpec {
        let (group, value) = (Field::JobType, Field::BurnoutDaysPerMonth);
        let bars = group_mean(dataset, group, value)
            .into_iter()
            .map(|(category, mean)| BarValue {
                label: format!("{:.2}", mean),
                category,
                value: mean,
            })
            .collect();

        ChartSpec {
            title: format!("Average {} vs {}", value, group),
            x_field: Some(group),
            y_field: Some(value),
            group_field: Some(group),
            x_axis: Some(Axis::titled(group.column_name())),
            y_axis: Some(Axis::titled(format!("Average {}", value))),
            // bar labels already name every group on the x axis
            show_legend: false,
            legend_title: None,
            data: ChartData::GroupedBar {
                bars,
                label_position: LabelPosition::Outside,
            },
        }
    }

    pub fn screen_time_box_plot(&self, dataset: &Dataset) -> ChartSpec {
        let (group, value) = (Field::SocialPlatformPreference, Field::ScreenTimeBeforeSleep);
        let mut groups = Vec::new();
        let mut annotations = Vec::new();

        for (name, values) in group_values(dataset, group, value) {
            let Some(stats) = box_stats(&values) else {
                continue;
            };
            let mean = round2(values.iter().sum::<f64>() / values.len() as f64);
            annotations.push(Annotation {
                x: name.clone(),
                y: mean,
                text: format!("{:.2}", mean),
                position: LabelPosition::TopCenter,
            });
            groups.push(BoxGroup {
                name,
                values,
                stats,
            });
        }

        ChartSpec {
            title: format!("{} vs {}", value, group),
            x_field: Some(group),
            y_field: Some(value),
            group_field: Some(group),
            x_axis: Some(Axis::titled(group.column_name()).with_tick_angle(45)),
            y_axis: Some(Axis::titled(value.column_name()).with_tick_format(".2f")),
            show_legend: false,
            legend_title: None,
            data: ChartData::BoxPlot {
                groups,
                annotations,
            },
        }
    }
}

/// Load a fresh dataset copy from `path` and build a titled report from it
///
/// Any load or build error aborts the whole report.
pub fn load_report(path: &Path, title: &str) -> Result<Report, CoreError> {
    let dataset = DatasetParser::new().parse_file(path)?;
    let widgets = ReportBuilder::new().build(&dataset)?;
    Ok(Report::new(title, dataset.len(), widgets))
}

/// Heading plus the three fixed advisories, always last
fn advisory_widgets() -> Vec<Widget> {
    vec![
        TextBlock::new(TextKind::Heading, ADVISORY_HEADING),
        TextBlock::new(TextKind::Info, ADVISORY_INFO),
        TextBlock::new(TextKind::Warning, ADVISORY_WARNING),
        TextBlock::new(TextKind::Success, ADVISORY_SUCCESS),
    ]
    .into_iter()
    .map(Widget::Text)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChartKind, Record, TickMode};

    fn record(gender: &str, job: &str, platform: &str) -> Record {
        Record {
            daily_social_media_time: 2.0,
            coffee_consumption: 1.0,
            actual_productivity_score: 5.0,
            social_platform_preference: platform.to_string(),
            job_satisfaction_score: 6.0,
            work_hours_per_day: 8.0,
            stress_level: 4.0,
            gender: gender.to_string(),
            job_type: job.to_string(),
            burnout_days_per_month: 3.0,
            screen_time_before_sleep: 1.5,
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record("Male", "IT", "TikTok"),
            record("Female", "Finance", "Instagram"),
            record("Female", "IT", "TikTok"),
            record("Other", "Health", "Facebook"),
        ])
    }

    #[test]
    fn test_build_order() {
        let widgets = ReportBuilder::new().build(&dataset()).unwrap();

        assert_eq!(widgets.len(), 5 + 6 + 4);
        assert!(widgets[..5].iter().all(|w| w.as_metric().is_some()));
        let kinds: Vec<ChartKind> = widgets[5..11]
            .iter()
            .map(|w| w.as_chart().unwrap().kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                ChartKind::Histogram,
                ChartKind::Scatter,
                ChartKind::Pie,
                ChartKind::StackedBar,
                ChartKind::GroupedBar,
                ChartKind::BoxPlot,
            ]
        );
        let texts: Vec<TextKind> = widgets[11..]
            .iter()
            .map(|w| w.as_text().unwrap().kind)
            .collect();
        assert_eq!(
            texts,
            vec![TextKind::Heading, TextKind::Info, TextKind::Warning, TextKind::Success]
        );
    }

    #[test]
    fn test_build_empty_dataset_fails() {
        let err = ReportBuilder::new().build(&Dataset::default()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyDataset { .. }));
    }

    #[test]
    fn test_build_is_idempotent() {
        let dataset = dataset();
        let builder = ReportBuilder::new();
        assert_eq!(builder.build(&dataset).unwrap(), builder.build(&dataset).unwrap());
    }

    #[test]
    fn test_metric_groups_and_text() {
        let widgets = ReportBuilder::new().build(&dataset()).unwrap();
        let metrics: Vec<&Metric> = widgets.iter().filter_map(Widget::as_metric).collect();

        assert_eq!(metrics[0].value, "2.0 hrs");
        assert_eq!(metrics[1].value, "1.0 cups");
        assert_eq!(metrics[2].value, "5.0");
        assert!(metrics[..3].iter().all(|m| m.group == MetricGroup::Overview));

        assert_eq!(metrics[3].label, "Most Preferred Platform");
        assert_eq!(metrics[3].value, "TikTok");
        assert_eq!(metrics[3].delta.as_deref(), Some("2 users"));
        assert_eq!(metrics[4].value, "Instagram");
        assert_eq!(metrics[4].delta.as_deref(), Some("1 users"));
        assert!(metrics[3..].iter().all(|m| m.group == MetricGroup::Platform));
    }

    #[test]
    fn test_histogram_axes() {
        let chart = ReportBuilder::new().satisfaction_histogram(&dataset());
        let x = chart.x_axis.unwrap();
        let y = chart.y_axis.unwrap();

        assert_eq!(x.range, Some((0.0, 10.0)));
        assert_eq!(x.ticks, TickMode::Linear { step: 1.0 });
        assert_eq!(y.ticks, TickMode::Linear { step: 30.0 });
        assert_eq!(y.title, "Count");
        match chart.data {
            ChartData::Histogram { bins } => assert_eq!(bins[6].count, 4),
            other => panic!("unexpected data {other:?}"),
        }
    }

    #[test]
    fn test_scatter_groups_by_gender() {
        let chart = ReportBuilder::new().work_stress_scatter(&dataset());
        assert_eq!(chart.x_axis.unwrap().range, Some((-0.5, 12.5)));
        match chart.data {
            ChartData::Scatter { series } => {
                let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
                assert_eq!(names, vec!["Male", "Female", "Other"]);
                assert_eq!(series[1].points, vec![(8.0, 4.0), (8.0, 4.0)]);
            }
            other => panic!("unexpected data {other:?}"),
        }
    }

    #[test]
    fn test_pie_counts_and_percentages() {
        let chart = ReportBuilder::new().gender_pie(&dataset());
        match chart.data {
            ChartData::Pie { slices } => {
                assert_eq!(slices[0].label, "Female");
                assert_eq!(slices[0].count, 2);
                assert_eq!(slices[0].percent, 50.0);
                assert_eq!(slices[0].text, "Female 50.0%");
                assert_eq!(slices.len(), 3);
            }
            other => panic!("unexpected data {other:?}"),
        }
        assert!(chart.x_axis.is_none());
    }

    #[test]
    fn test_stacked_bar_labels() {
        let chart = ReportBuilder::new().coffee_stacked_bar(&dataset());
        match chart.data {
            ChartData::StackedBar {
                pivot,
                segment_labels,
                totals,
                total_labels,
            } => {
                assert_eq!(pivot.rows, vec!["Male", "Female"]);
                assert_eq!(pivot.columns, vec!["Finance", "Health", "IT"]);
                assert_eq!(segment_labels[0], vec![None, None, Some("1.0".to_string())]);
                assert_eq!(segment_labels[1][1], None, "Health only appears with Other");
                assert_eq!(totals, vec![1.0, 2.0]);
                assert_eq!(total_labels, vec!["Total: 1.0", "Total: 2.0"]);
            }
            other => panic!("unexpected data {other:?}"),
        }
        assert_eq!(chart.legend_title.as_deref(), Some("Job Type"));
    }

    #[test]
    fn test_grouped_bar_hides_legend() {
        let chart = ReportBuilder::new().burnout_grouped_bar(&dataset());
        assert!(!chart.show_legend);
        assert_eq!(
            chart.y_axis.unwrap().title,
            "Average Days Feeling Burnout per Month"
        );
        match chart.data {
            ChartData::GroupedBar { bars, .. } => {
                let cats: Vec<&str> = bars.iter().map(|b| b.category.as_str()).collect();
                assert_eq!(cats, vec!["Finance", "Health", "IT"]);
                assert_eq!(bars[0].label, "3.00");
            }
            other => panic!("unexpected data {other:?}"),
        }
    }

    #[test]
    fn test_box_plot_mean_annotations() {
        let mut rows = vec![record("Male", "IT", "TikTok"); 2];
        rows[1].screen_time_before_sleep = 2.0;
        let chart = ReportBuilder::new().screen_time_box_plot(&Dataset::from_records(rows));

        let y = chart.y_axis.unwrap();
        assert_eq!(y.tick_format.as_deref(), Some(".2f"));
        match chart.data {
            ChartData::BoxPlot {
                groups,
                annotations,
            } => {
                assert_eq!(groups.len(), 1);
                assert_eq!(annotations[0].x, "TikTok");
                assert_eq!(annotations[0].y, 1.75);
                assert_eq!(annotations[0].text, "1.75");
                assert_eq!(annotations[0].position, LabelPosition::TopCenter);
            }
            other => panic!("unexpected data {other:?}"),
        }
    }
}
