//! Scalar aggregates over single columns
//!
//! Every aggregate over zero values returns `EmptyDataset` instead of NaN.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::Dataset;
use crate::schema::Field;

/// Round to two decimals, exact ties going to the even digit
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Shortest decimal rendering of an already-rounded number, keeping at
/// least one fractional digit: `3.1`, `5.0`, `2.57`
pub fn format_rounded(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

/// Mean of a numeric column, rounded to two decimals
pub fn column_mean(dataset: &Dataset, field: Field) -> Result<f64, CoreError> {
    mean(&dataset.numeric_column(field))
        .map(round2)
        .ok_or_else(|| CoreError::empty(format!("mean of {}", field)))
}

/// Maximum of a numeric column, rounded to two decimals
pub fn column_max(dataset: &Dataset, field: Field) -> Result<f64, CoreError> {
    max(&dataset.numeric_column(field))
        .map(round2)
        .ok_or_else(|| CoreError::empty(format!("max of {}", field)))
}

/// Minimum of a numeric column, rounded to two decimals
pub fn column_min(dataset: &Dataset, field: Field) -> Result<f64, CoreError> {
    min(&dataset.numeric_column(field))
        .map(round2)
        .ok_or_else(|| CoreError::empty(format!("min of {}", field)))
}

/// A category label with its frequency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Frequency of each category, in first-seen order
pub fn value_counts<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for label in labels {
        match index.get(label) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(label, counts.len());
                counts.push(CategoryCount {
                    category: label.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts
}

/// Frequencies ordered by descending count, ties kept in first-seen order
pub fn value_counts_desc<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts = value_counts(labels);
    // stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Most and least frequent category of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryExtremes {
    pub most: CategoryCount,
    pub least: CategoryCount,
}

/// Mode and least-frequent category, ties broken by first-seen order
pub fn category_extremes(dataset: &Dataset, field: Field) -> Result<CategoryExtremes, CoreError> {
    let counts = value_counts(dataset.category_column(field));

    let mut most: Option<&CategoryCount> = None;
    let mut least: Option<&CategoryCount> = None;
    for entry in &counts {
        if most.map_or(true, |m| entry.count > m.count) {
            most = Some(entry);
        }
        if least.map_or(true, |l| entry.count < l.count) {
            least = Some(entry);
        }
    }

    match (most, least) {
        (Some(most), Some(least)) => Ok(CategoryExtremes {
            most: most.clone(),
            least: least.clone(),
        }),
        _ => Err(CoreError::empty(format!("mode of {}", field))),
    }
}
