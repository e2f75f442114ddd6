//! smboard-core - Core library for smboard
//!
//! Loads the survey dataset, computes the dashboard statistics and builds
//! renderer-independent widget sequences.

pub mod analytics;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod parsers;
pub mod report;
pub mod schema;

pub use config::DashboardConfig;
pub use error::CoreError;
pub use export::{export_report_to_json, export_report_to_markdown};
pub use models::{ChartSpec, Dataset, Record, Report, Widget};
pub use parsers::DatasetParser;
pub use report::{load_report, ReportBuilder};
pub use schema::Field;
