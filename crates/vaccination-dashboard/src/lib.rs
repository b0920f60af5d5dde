//! Filter resolution, aggregation, and data loading for the school
//! vaccination dashboard.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod telemetry;
