//! Unit tests for analytics module

use super::*;
use crate::models::{Dataset, Record};

fn record(gender: &str, job_type: &str, platform: &str) -> Record {
    Record {
        gender: gender.to_string(),
        job_type: job_type.to_string(),
        social_platform_preference: platform.to_string(),
        ..Default::default()
    }
}

fn platforms(labels: &[&str]) -> Dataset {
    Dataset::from_records(labels.iter().map(|p| record("Male", "IT", p)).collect())
}

// ============================================================================
// Scalar aggregates
// ============================================================================

#[test]
fn test_mean_max_min_rounded() {
    let mut a = record("Male", "IT", "X");
    a.daily_social_media_time = 1.0;
    a.coffee_consumption = 2.123;
    a.actual_productivity_score = 4.567;
    let mut b = record("Female", "IT", "X");
    b.daily_social_media_time = 2.0;
    b.coffee_consumption = 5.678;
    b.actual_productivity_score = 6.0;
    let mut c = record("Male", "IT", "X");
    c.daily_social_media_time = 2.0;
    c.coffee_consumption = 1.0;
    c.actual_productivity_score = 7.5;
    let dataset = Dataset::from_records(vec![a, b, c]);

    assert_eq!(column_mean(&dataset, Field::DailySocialMediaTime).unwrap(), 1.67);
    assert_eq!(column_max(&dataset, Field::CoffeeConsumption).unwrap(), 5.68);
    assert_eq!(column_min(&dataset, Field::ActualProductivityScore).unwrap(), 4.57);
}

#[test]
fn test_exact_ties_round_to_even() {
    let mut rows = Vec::new();
    for value in [0.0, 0.25] {
        let mut r = record("Male", "A", "P");
        r.daily_social_media_time = value;
        r.burnout_days_per_month = value;
        rows.push(r);
    }
    let dataset = Dataset::from_records(rows);

    assert_eq!(column_mean(&dataset, Field::DailySocialMediaTime).unwrap(), 0.12);
    assert_eq!(
        group_mean(&dataset, Field::JobType, Field::BurnoutDaysPerMonth),
        vec![("A".to_string(), 0.12)]
    );
}

#[test]
fn test_aggregates_fail_on_empty_dataset() {
    let dataset = Dataset::default();
    for result in [
        column_mean(&dataset, Field::StressLevel),
        column_max(&dataset, Field::StressLevel),
        column_min(&dataset, Field::StressLevel),
    ] {
        assert!(matches!(result, Err(CoreError::EmptyDataset { .. })));
    }
    assert!(matches!(
        category_extremes(&dataset, Field::Gender),
        Err(CoreError::EmptyDataset { .. })
    ));
}

#[test]
fn test_mode_and_least_frequent() {
    let dataset = platforms(&["A", "A", "B"]);
    let extremes = category_extremes(&dataset, Field::SocialPlatformPreference).unwrap();

    assert_eq!(extremes.most.category, "A");
    assert_eq!(extremes.most.count, 2);
    assert_eq!(extremes.least.category, "B");
    assert_eq!(extremes.least.count, 1);
}

#[test]
fn test_extremes_ties_use_first_seen() {
    let dataset = platforms(&["C", "B", "B", "C", "A", "D"]);
    let extremes = category_extremes(&dataset, Field::SocialPlatformPreference).unwrap();

    assert_eq!(extremes.most.category, "C");
    assert_eq!(extremes.least.category, "A");
}

#[test]
fn test_single_category_is_both_extremes() {
    let dataset = platforms(&["Reddit", "Reddit"]);
    let extremes = category_extremes(&dataset, Field::SocialPlatformPreference).unwrap();
    assert_eq!(extremes.most, extremes.least);
}

#[test]
fn test_summary_stats_compute() {
    let mut a = record("Male", "IT", "TikTok");
    a.daily_social_media_time = 3.0;
    a.coffee_consumption = 4.0;
    a.actual_productivity_score = 2.5;
    let dataset = Dataset::from_records(vec![a]);

    let stats = SummaryStats::compute(&dataset).unwrap();
    assert_eq!(stats.mean_daily_social_media, 3.0);
    assert_eq!(stats.max_coffee, 4.0);
    assert_eq!(stats.min_productivity, 2.5);
    assert_eq!(stats.platforms.most.category, "TikTok");
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn test_pivot_sums_duplicate_combinations() {
    let mut a = record("Male", "X", "P");
    a.coffee_consumption = 3.0;
    let mut b = record("Male", "X", "P");
    b.coffee_consumption = 2.0;
    let mut c = record("Female", "Y", "P");
    c.coffee_consumption = 1.5;
    let dataset = Dataset::from_records(vec![a, b, c]);

    let pivot = pivot_sum(
        &dataset,
        Field::Gender,
        Field::JobType,
        Field::CoffeeConsumption,
        &["Male", "Female"],
    );

    assert_eq!(pivot.get("Male", "X"), 5.0);
    assert_eq!(pivot.get("Male", "Y"), 0.0);
    assert_eq!(pivot.get("Female", "X"), 0.0);
    assert_eq!(pivot.get("Female", "Y"), 1.5);
}

#[test]
fn test_pivot_fixed_row_order_and_sorted_columns() {
    let mut a = record("Female", "Retail", "P");
    a.coffee_consumption = 1.0;
    let mut b = record("Other", "Zoo", "P");
    b.coffee_consumption = 9.0;
    let mut c = record("Female", "Education", "P");
    c.coffee_consumption = 2.0;
    let dataset = Dataset::from_records(vec![a, b, c]);

    let pivot = pivot_sum(
        &dataset,
        Field::Gender,
        Field::JobType,
        Field::CoffeeConsumption,
        &["Male", "Female"],
    );

    assert_eq!(pivot.rows, vec!["Male", "Female"]);
    assert_eq!(pivot.columns, vec!["Education", "Retail", "Zoo"]);
    assert_eq!(pivot.cells[0], vec![0.0, 0.0, 0.0], "absent gender is all zeros");
    assert_eq!(pivot.row_totals(), vec![0.0, 3.0]);
}

#[test]
fn test_pivot_keeps_job_types_of_dropped_genders() {
    let mut a = record("Male", "IT", "P");
    a.coffee_consumption = 2.0;
    let mut b = record("Other", "Zoo", "P");
    b.coffee_consumption = 4.0;
    let dataset = Dataset::from_records(vec![a, b]);

    let pivot = pivot_sum(
        &dataset,
        Field::Gender,
        Field::JobType,
        Field::CoffeeConsumption,
        &["Male", "Female"],
    );

    assert_eq!(pivot.columns, vec!["IT", "Zoo"]);
    assert_eq!(pivot.get("Male", "Zoo"), 0.0);
    assert_eq!(pivot.get("Female", "Zoo"), 0.0);
    assert_eq!(pivot.row_totals(), vec![2.0, 0.0], "dropped rows add nothing");
}

#[test]
fn test_group_mean_burnout() {
    let mut a = record("Male", "A", "P");
    a.burnout_days_per_month = 2.0;
    let mut b = record("Female", "A", "P");
    b.burnout_days_per_month = 4.0;
    let dataset = Dataset::from_records(vec![a, b]);

    let means = group_mean(&dataset, Field::JobType, Field::BurnoutDaysPerMonth);
    assert_eq!(means, vec![("A".to_string(), 3.0)]);
}

#[test]
fn test_group_mean_sorted_and_rounded() {
    let mut rows = Vec::new();
    for (job, burnout) in [("Zeta", 1.0), ("Alpha", 1.0), ("Alpha", 2.0), ("Alpha", 2.0)] {
        let mut r = record("Male", job, "P");
        r.burnout_days_per_month = burnout;
        rows.push(r);
    }
    let dataset = Dataset::from_records(rows);

    let means = group_mean(&dataset, Field::JobType, Field::BurnoutDaysPerMonth);
    assert_eq!(
        means,
        vec![("Alpha".to_string(), 1.67), ("Zeta".to_string(), 1.0)]
    );
}

#[test]
fn test_group_values_first_seen() {
    let mut rows = Vec::new();
    for (platform, screen) in [("TikTok", 1.0), ("Facebook", 2.0), ("TikTok", 3.0)] {
        let mut r = record("Male", "IT", platform);
        r.screen_time_before_sleep = screen;
        rows.push(r);
    }
    let dataset = Dataset::from_records(rows);

    let groups = group_values(
        &dataset,
        Field::SocialPlatformPreference,
        Field::ScreenTimeBeforeSleep,
    );
    assert_eq!(groups[0], ("TikTok".to_string(), vec![1.0, 3.0]));
    assert_eq!(groups[1], ("Facebook".to_string(), vec![2.0]));
}

// ============================================================================
// Distributions
// ============================================================================

#[test]
fn test_histogram_unit_bins() {
    let bins = histogram_bins(&[0.0, 0.5, 1.0, 9.5, 10.0, 10.5, -1.0], 0.0, 10.0, 1.0);

    assert_eq!(bins.len(), 10);
    assert_eq!(bins[0].count, 2);
    assert_eq!(bins[1].count, 1);
    assert_eq!(bins[9].count, 2, "last bin is closed at 10");
    let total: usize = bins.iter().map(|b| b.count).sum();
    assert_eq!(total, 5, "out-of-domain values are not counted");
    assert_eq!((bins[3].start, bins[3].end), (3.0, 4.0));
}

#[test]
fn test_histogram_nothing_in_range() {
    let bins = histogram_bins(&[42.0, -3.0], 0.0, 10.0, 1.0);
    assert_eq!(bins.len(), 10);
    assert!(bins.iter().all(|b| b.count == 0));
}

#[test]
fn test_histogram_degenerate_width_is_empty() {
    assert!(histogram_bins(&[1.0, 2.0], 0.0, 10.0, 0.0).is_empty());
    assert!(histogram_bins(&[1.0, 2.0], 0.0, 10.0, -1.0).is_empty());
    assert!(histogram_bins(&[1.0], 0.0, 10.0, f64::NAN).is_empty());
    assert!(histogram_bins(&[1.0], 0.0, f64::INFINITY, 1.0).is_empty());
    assert!(histogram_bins(&[1.0], f64::NAN, 10.0, 1.0).is_empty());
}

#[test]
fn test_histogram_skips_non_finite_values() {
    let bins = histogram_bins(&[f64::NAN, 0.5, f64::INFINITY, f64::NEG_INFINITY], 0.0, 10.0, 1.0);

    assert_eq!(bins.len(), 10);
    assert_eq!(bins[0].count, 1, "NaN does not land in the first bin");
    let total: usize = bins.iter().map(|b| b.count).sum();
    assert_eq!(total, 1);
}

#[test]
fn test_box_stats_linear_quartiles() {
    let stats = box_stats(&[4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();
    assert_eq!(stats.q1, 2.0);
    assert_eq!(stats.median, 3.0);
    assert_eq!(stats.q3, 4.0);
    assert_eq!(stats.lower_whisker, 1.0);
    assert_eq!(stats.upper_whisker, 5.0);
    assert!(stats.outliers.is_empty());
}

#[test]
fn test_box_stats_outliers_beyond_fences() {
    let stats = box_stats(&[1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 20.0]).unwrap();
    // q1 = 2, q3 = 3.5, fence = 2.25
    assert_eq!(stats.q1, 2.0);
    assert_eq!(stats.q3, 3.5);
    assert_eq!(stats.upper_whisker, 4.0);
    assert_eq!(stats.outliers, vec![20.0]);
}

#[test]
fn test_box_stats_interpolates_even_counts() {
    let stats = box_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
    assert_eq!(stats.q1, 1.75);
    assert_eq!(stats.median, 2.5);
    assert_eq!(stats.q3, 3.25);
}

#[test]
fn test_box_stats_empty() {
    assert!(box_stats(&[]).is_none());
}
