//! Survey respondent records and the immutable dataset that holds them

use serde::{Deserialize, Serialize};

use crate::schema::Field;

/// One survey respondent
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Hours per day
    pub daily_social_media_time: f64,
    /// Cups per day
    pub coffee_consumption: f64,
    pub actual_productivity_score: f64,
    pub social_platform_preference: String,
    /// Expected range 0-10
    pub job_satisfaction_score: f64,
    pub work_hours_per_day: f64,
    pub stress_level: f64,
    /// Expected "Male" or "Female", other values pass through untouched
    pub gender: String,
    pub job_type: String,
    pub burnout_days_per_month: f64,
    pub screen_time_before_sleep: f64,
}

impl Record {
    /// Numeric value of a field, `None` for categorical fields
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::DailySocialMediaTime => Some(self.daily_social_media_time),
            Field::CoffeeConsumption => Some(self.coffee_consumption),
            Field::ActualProductivityScore => Some(self.actual_productivity_score),
            Field::JobSatisfactionScore => Some(self.job_satisfaction_score),
            Field::WorkHoursPerDay => Some(self.work_hours_per_day),
            Field::StressLevel => Some(self.stress_level),
            Field::BurnoutDaysPerMonth => Some(self.burnout_days_per_month),
            Field::ScreenTimeBeforeSleep => Some(self.screen_time_before_sleep),
            Field::SocialPlatformPreference | Field::Gender | Field::JobType => None,
        }
    }

    /// Category label of a field, `None` for numeric fields
    pub fn category(&self, field: Field) -> Option<&str> {
        match field {
            Field::SocialPlatformPreference => Some(&self.social_platform_preference),
            Field::Gender => Some(&self.gender),
            Field::JobType => Some(&self.job_type),
            _ => None,
        }
    }

    /// Mutable slot for a numeric field (used by the loader)
    pub(crate) fn numeric_mut(&mut self, field: Field) -> Option<&mut f64> {
        match field {
            Field::DailySocialMediaTime => Some(&mut self.daily_social_media_time),
            Field::CoffeeConsumption => Some(&mut self.coffee_consumption),
            Field::ActualProductivityScore => Some(&mut self.actual_productivity_score),
            Field::JobSatisfactionScore => Some(&mut self.job_satisfaction_score),
            Field::WorkHoursPerDay => Some(&mut self.work_hours_per_day),
            Field::StressLevel => Some(&mut self.stress_level),
            Field::BurnoutDaysPerMonth => Some(&mut self.burnout_days_per_month),
            Field::ScreenTimeBeforeSleep => Some(&mut self.screen_time_before_sleep),
            _ => None,
        }
    }

    /// Mutable slot for a categorical field (used by the loader)
    pub(crate) fn category_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::SocialPlatformPreference => Some(&mut self.social_platform_preference),
            Field::Gender => Some(&mut self.gender),
            Field::JobType => Some(&mut self.job_type),
            _ => None,
        }
    }
}

/// Ordered, immutable sequence of records
///
/// Loaded once at the entry point and passed explicitly to the report
/// builder. Duplicate rows are valid and counted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// All values of a numeric column, in row order
    pub fn numeric_column(&self, field: Field) -> Vec<f64> {
        self.records
            .iter()
            .filter_map(|r| r.numeric(field))
            .collect()
    }

    /// All labels of a categorical column, in row order
    pub fn category_column(&self, field: Field) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|r| r.category(field))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
