use super::domain::{Dimension, FilterState, ALL_SENTINEL};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

impl DropdownOption {
    pub fn all() -> Self {
        Self {
            label: ALL_SENTINEL.to_string(),
            value: ALL_SENTINEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearOption {
    pub label: String,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependentOptions {
    pub modality: Vec<DropdownOption>,
    pub unit_type: Vec<DropdownOption>,
    pub school: Vec<DropdownOption>,
    pub vaccine: Vec<DropdownOption>,
}

impl DependentOptions {
    pub fn for_dimension(&self, dimension: Dimension) -> &[DropdownOption] {
        match dimension {
            Dimension::School => &self.school,
            Dimension::Vaccine => &self.vaccine,
            Dimension::Modality => &self.modality,
            Dimension::UnitType => &self.unit_type,
        }
    }
}

/// Card values as displayed, pt-BR formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedSummary {
    pub student_count: String,
    pub vaccine_total: String,
    pub mean_age: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub student_count: usize,
    pub vaccine_total: i64,
    pub mean_age: Option<f64>,
    pub formatted: FormattedSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub school_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub total_vaccines: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStyle {
    pub width: f64,
}

/// One overlay entry in the shape the map renderer expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLayer {
    pub sourcetype: &'static str,
    pub source: serde_json::Value,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub points: Vec<MapPoint>,
    pub center: MapCenter,
    pub zoom: f64,
    pub style: String,
    pub height: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<OverlayLayer>,
}

impl MapView {
    pub fn total_vaccines(&self) -> i64 {
        self.points.iter().map(|point| point.total_vaccines).sum()
    }
}

/// Everything one interaction cycle redraws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub filters: FilterState,
    pub options: DependentOptions,
    pub summary: SummaryView,
    pub map: MapView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub vaccination_records: usize,
    pub enrollment_records: usize,
    pub distinct_students: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub boundary_features: usize,
    pub loaded_at: DateTime<Utc>,
}
