mod parser;

use super::context::DashboardContext;
use super::domain::{EnrollmentRecord, VaccinationRecord};
use super::geography::Geography;
use crate::config::{DataConfig, MapConfig};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("required {resource} not found at {}", .path.display())]
    MissingResource {
        resource: &'static str,
        path: PathBuf,
    },
    #[error("failed to read {resource} at {}: {source}", .path.display())]
    Io {
        resource: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {resource} data: {source}")]
    Csv {
        resource: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("invalid geography boundary: {reason}")]
    Geography { reason: String },
    #[error("{resource} contains no rows")]
    EmptyTable { resource: &'static str },
}

pub const VACCINATION_TABLE: &str = "vaccination table";
pub const ENROLLMENT_TABLE: &str = "enrollment table";
pub const GEOGRAPHY_BOUNDARY: &str = "geography boundary";

/// Reads the vaccination table, dropping rows older than `min_year`.
pub fn read_vaccinations<R: Read>(
    reader: R,
    min_year: i32,
) -> Result<Vec<VaccinationRecord>, DataLoadError> {
    let records = parser::parse_vaccinations(reader).map_err(|source| DataLoadError::Csv {
        resource: VACCINATION_TABLE,
        source,
    })?;
    let total = records.len();
    let kept: Vec<_> = records
        .into_iter()
        .filter(|record| record.year >= min_year)
        .collect();

    debug!(total, kept = kept.len(), min_year, "applied vaccination year cutoff");
    Ok(kept)
}

pub fn read_enrollments<R: Read>(reader: R) -> Result<Vec<EnrollmentRecord>, DataLoadError> {
    parser::parse_enrollments(reader).map_err(|source| DataLoadError::Csv {
        resource: ENROLLMENT_TABLE,
        source,
    })
}

pub(crate) fn open_resource(resource: &'static str, path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            DataLoadError::MissingResource {
                resource,
                path: path.to_path_buf(),
            }
        } else {
            DataLoadError::Io {
                resource,
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Loads both tables and the boundary from disk. Any missing file is fatal.
pub fn load_context(data: &DataConfig, map: MapConfig) -> Result<DashboardContext, DataLoadError> {
    let vaccinations_path = data.vaccinations_path();
    let vaccinations = read_vaccinations(
        open_resource(VACCINATION_TABLE, &vaccinations_path)?,
        data.min_year,
    )?;
    if vaccinations.is_empty() {
        return Err(DataLoadError::EmptyTable {
            resource: VACCINATION_TABLE,
        });
    }

    let enrollments = read_enrollments(open_resource(
        ENROLLMENT_TABLE,
        &data.enrollments_path(),
    )?)?;
    let geography = Geography::from_path(&data.geography_path)?;

    info!(
        vaccinations = vaccinations.len(),
        enrollments = enrollments.len(),
        data_dir = %data.data_dir.display(),
        "dashboard tables loaded"
    );

    Ok(DashboardContext::new(vaccinations, enrollments, geography, map))
}
