use super::loader::{open_resource, DataLoadError, GEOGRAPHY_BOUNDARY};
use super::views::OverlayLayer;
use serde_json::Value;
use std::io::Read;
use std::path::Path;

const GEOJSON_TYPES: &[&str] = &[
    "FeatureCollection",
    "Feature",
    "Point",
    "MultiPoint",
    "LineString",
    "MultiLineString",
    "Polygon",
    "MultiPolygon",
    "GeometryCollection",
];

const FILL_COLOR: &str = "rgba(0,0,255,0.2)";
const LINE_COLOR: &str = "blue";
const LINE_WIDTH: f64 = 1.0;

/// Municipal boundary drawn underneath the school markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Geography {
    document: Value,
}

impl Geography {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataLoadError> {
        let file = open_resource(GEOGRAPHY_BOUNDARY, path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataLoadError> {
        let document: Value =
            serde_json::from_reader(reader).map_err(|err| DataLoadError::Geography {
                reason: err.to_string(),
            })?;
        Self::from_value(document)
    }

    pub fn from_value(document: Value) -> Result<Self, DataLoadError> {
        let kind = document
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| DataLoadError::Geography {
                reason: "missing GeoJSON \"type\" member".to_string(),
            })?;

        if !GEOJSON_TYPES.contains(&kind) {
            return Err(DataLoadError::Geography {
                reason: format!("unsupported GeoJSON type '{kind}'"),
            });
        }

        Ok(Self { document })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Feature count for a collection, 1 for a bare feature or geometry.
    pub fn feature_count(&self) -> usize {
        self.document
            .get("features")
            .and_then(Value::as_array)
            .map_or(1, Vec::len)
    }

    /// A translucent fill followed by a thin outline.
    pub fn overlay_layers(&self) -> Vec<OverlayLayer> {
        vec![
            OverlayLayer {
                sourcetype: "geojson",
                source: self.document.clone(),
                kind: "fill",
                color: FILL_COLOR,
                line: None,
            },
            OverlayLayer {
                sourcetype: "geojson",
                source: self.document.clone(),
                kind: "line",
                color: LINE_COLOR,
                line: Some(super::views::LineStyle { width: LINE_WIDTH }),
            },
        ]
    }
}
