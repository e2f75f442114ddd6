//! Parsers for smboard input files

pub mod dataset;

pub use dataset::DatasetParser;
