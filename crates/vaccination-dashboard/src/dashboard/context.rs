use super::domain::{EnrollmentRecord, FilterState, VaccinationRecord};
use super::geography::Geography;
use super::views::DatasetInfo;
use crate::config::MapConfig;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Immutable tables and static settings shared by every resolver call.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    vaccinations: Vec<VaccinationRecord>,
    enrollments: Vec<EnrollmentRecord>,
    geography: Option<Geography>,
    map: MapConfig,
    years: Vec<i32>,
    loaded_at: DateTime<Utc>,
}

impl DashboardContext {
    pub fn new(
        vaccinations: Vec<VaccinationRecord>,
        enrollments: Vec<EnrollmentRecord>,
        geography: Geography,
        map: MapConfig,
    ) -> Self {
        Self::build(vaccinations, enrollments, Some(geography), map)
    }

    /// Context without a boundary overlay, for callers that only need the tables.
    pub fn from_tables(
        vaccinations: Vec<VaccinationRecord>,
        enrollments: Vec<EnrollmentRecord>,
    ) -> Self {
        Self::build(vaccinations, enrollments, None, MapConfig::default())
    }

    fn build(
        vaccinations: Vec<VaccinationRecord>,
        enrollments: Vec<EnrollmentRecord>,
        geography: Option<Geography>,
        map: MapConfig,
    ) -> Self {
        let mut years: Vec<i32> = vaccinations.iter().map(|record| record.year).collect();
        years.sort_unstable();
        years.dedup();

        Self {
            vaccinations,
            enrollments,
            geography,
            map,
            years,
            loaded_at: Utc::now(),
        }
    }

    pub fn vaccinations(&self) -> &[VaccinationRecord] {
        &self.vaccinations
    }

    pub fn enrollments(&self) -> &[EnrollmentRecord] {
        &self.enrollments
    }

    pub fn geography(&self) -> Option<&Geography> {
        self.geography.as_ref()
    }

    pub fn map_config(&self) -> &MapConfig {
        &self.map
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn default_year(&self) -> Option<i32> {
        self.years.last().copied()
    }

    /// Fills in the default year when the request left it unset.
    pub fn resolve(&self, filters: &FilterState) -> FilterState {
        let mut resolved = filters.clone();
        if resolved.year.is_none() {
            resolved.year = self.default_year();
        }
        resolved
    }

    pub fn distinct_students(&self) -> usize {
        self.enrollments
            .iter()
            .map(|record| record.student_id.as_str())
            .filter(|id| !id.is_empty())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            vaccination_records: self.vaccinations.len(),
            enrollment_records: self.enrollments.len(),
            distinct_students: self.distinct_students(),
            first_year: self.years.first().copied(),
            last_year: self.default_year(),
            boundary_features: self.geography.as_ref().map_or(0, Geography::feature_count),
            loaded_at: self.loaded_at,
        }
    }
}
