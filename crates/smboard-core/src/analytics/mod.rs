//! Statistics over the survey dataset
//!
//! Pure aggregation with no knowledge of widgets or rendering, so every
//! number on the dashboard can be tested on its own.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::Dataset;
use crate::schema::Field;

pub mod aggregates;
pub mod distribution;
pub mod grouping;

#[cfg(test)]
mod tests;

pub use aggregates::{
    category_extremes, column_max, column_mean, column_min, format_rounded, round2,
    value_counts, value_counts_desc, CategoryCount, CategoryExtremes,
};
pub use distribution::{box_stats, histogram_bins};
pub use grouping::{group_mean, group_values, pivot_sum};

/// Headline numbers shown in the metric rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Mean daily social media time (hours), two decimals
    pub mean_daily_social_media: f64,
    /// Max coffee cups per day, two decimals
    pub max_coffee: f64,
    /// Min actual productivity score, two decimals
    pub min_productivity: f64,
    /// Most and least preferred platforms
    pub platforms: CategoryExtremes,
}

impl SummaryStats {
    /// Compute all scalar metrics, failing on an empty dataset
    pub fn compute(dataset: &Dataset) -> Result<Self, CoreError> {
        Ok(Self {
            mean_daily_social_media: column_mean(dataset, Field::DailySocialMediaTime)?,
            max_coffee: column_max(dataset, Field::CoffeeConsumption)?,
            min_productivity: column_min(dataset, Field::ActualProductivityScore)?,
            platforms: category_extremes(dataset, Field::SocialPlatformPreference)?,
        })
    }
}
