//! Typed schema for the survey dataset
//!
//! Column names are exact-match and case-sensitive. Every lookup in the
//! crate goes through [`Field`] so a misspelled column fails once, at load.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a column holds numbers or category labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Numeric,
    Categorical,
}

/// One column of the survey dataset used by the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "Daily Social Media Time")]
    DailySocialMediaTime,
    #[serde(rename = "Coffee Consumption per Day")]
    CoffeeConsumption,
    #[serde(rename = "Actual Productivity Score")]
    ActualProductivityScore,
    #[serde(rename = "Social Platform Preference")]
    SocialPlatformPreference,
    #[serde(rename = "Job Satisfaction Score")]
    JobSatisfactionScore,
    #[serde(rename = "Work Hours per Day")]
    WorkHoursPerDay,
    #[serde(rename = "Stress Level")]
    StressLevel,
    #[serde(rename = "Gender")]
    Gender,
    #[serde(rename = "Job Type")]
    JobType,
    #[serde(rename = "Days Feeling Burnout per Month")]
    BurnoutDaysPerMonth,
    #[serde(rename = "Screen Time Before Sleep")]
    ScreenTimeBeforeSleep,
}

impl Field {
    /// All required columns, in validation order
    pub const ALL: [Field; 11] = [
        Field::DailySocialMediaTime,
        Field::CoffeeConsumption,
        Field::ActualProductivityScore,
        Field::SocialPlatformPreference,
        Field::JobSatisfactionScore,
        Field::WorkHoursPerDay,
        Field::StressLevel,
        Field::Gender,
        Field::JobType,
        Field::BurnoutDaysPerMonth,
        Field::ScreenTimeBeforeSleep,
    ];

    /// Exact CSV header for this column
    pub fn column_name(self) -> &'static str {
        match self {
            Field::DailySocialMediaTime => "Daily Social Media Time",
            Field::CoffeeConsumption => "Coffee Consumption per Day",
            Field::ActualProductivityScore => "Actual Productivity Score",
            Field::SocialPlatformPreference => "Social Platform Preference",
            Field::JobSatisfactionScore => "Job Satisfaction Score",
            Field::WorkHoursPerDay => "Work Hours per Day",
            Field::StressLevel => "Stress Level",
            Field::Gender => "Gender",
            Field::JobType => "Job Type",
            Field::BurnoutDaysPerMonth => "Days Feeling Burnout per Month",
            Field::ScreenTimeBeforeSleep => "Screen Time Before Sleep",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::SocialPlatformPreference | Field::Gender | Field::JobType => {
                FieldKind::Categorical
            }
            _ => FieldKind::Numeric,
        }
    }

    pub fn is_numeric(self) -> bool {
        self.kind() == FieldKind::Numeric
    }

    /// Reverse lookup from an exact header
    pub fn from_column_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.column_name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_column_name(field.column_name()), Some(field));
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(Field::from_column_name("gender"), None);
        assert_eq!(Field::from_column_name("Gender "), None);
        assert_eq!(Field::from_column_name("Gender"), Some(Field::Gender));
    }

    #[test]
    fn test_categorical_fields() {
        let categorical: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|f| !f.is_numeric())
            .collect();
        assert_eq!(
            categorical,
            vec![Field::SocialPlatformPreference, Field::Gender, Field::JobType]
        );
    }

    #[test]
    fn test_serializes_as_column_name() {
        let json = serde_json::to_string(&Field::BurnoutDaysPerMonth).unwrap();
        assert_eq!(json, "\"Days Feeling Burnout per Month\"");
    }
}
