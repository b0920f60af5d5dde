use crate::dashboard::context::DashboardContext;
use crate::dashboard::domain::FilterState;
use crate::dashboard::views::{MapCenter, MapPoint, MapView};
use std::cmp::Ordering;

/// Per-school vaccine totals for the selected year, one point per
/// (latitude, longitude, school) triple, ordered by those keys.
pub fn compute_map_data(context: &DashboardContext, filters: &FilterState) -> Vec<MapPoint> {
    let filters = context.resolve(filters);
    if filters.year.is_none() {
        return Vec::new();
    }

    let mut rows: Vec<MapPoint> = context
        .vaccinations()
        .iter()
        .filter(|record| filters.matches_year(record))
        .filter(|record| filters.matches_selections(record, None))
        .filter_map(|record| {
            let (latitude, longitude) = record.coordinates()?;
            Some(MapPoint {
                school_name: record.school_name.clone(),
                latitude,
                longitude,
                total_vaccines: record.vaccine_count,
            })
        })
        .collect();

    rows.sort_by(compare_keys);

    let mut grouped: Vec<MapPoint> = Vec::with_capacity(rows.len());
    for row in rows {
        match grouped.last_mut() {
            Some(last) if compare_keys(last, &row) == Ordering::Equal => {
                last.total_vaccines += row.total_vaccines;
            }
            _ => grouped.push(row),
        }
    }

    grouped
}

fn compare_keys(left: &MapPoint, right: &MapPoint) -> Ordering {
    left.latitude
        .total_cmp(&right.latitude)
        .then_with(|| left.longitude.total_cmp(&right.longitude))
        .then_with(|| left.school_name.cmp(&right.school_name))
}

/// Points plus viewport. A selected school with data is focused; otherwise
/// the municipality is shown whole.
pub fn compute_map_view(context: &DashboardContext, filters: &FilterState) -> MapView {
    let points = compute_map_data(context, filters);
    let config = context.map_config();

    let focused = match (filters.school.value(), points.first()) {
        (Some(_), Some(point)) => Some(MapCenter {
            lat: point.latitude,
            lon: point.longitude,
        }),
        _ => None,
    };

    let (center, zoom) = match focused {
        Some(center) => (center, config.focus_zoom),
        None => (
            MapCenter {
                lat: config.center_latitude,
                lon: config.center_longitude,
            },
            config.overview_zoom,
        ),
    };

    MapView {
        points,
        center,
        zoom,
        style: config.style.clone(),
        height: config.height,
        layers: context
            .geography()
            .map(|geography| geography.overlay_layers())
            .unwrap_or_default(),
    }
}
