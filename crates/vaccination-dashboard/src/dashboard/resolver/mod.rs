//! Pure functions from a filter snapshot to options, aggregates, and map data.

mod interaction;
mod map;
mod options;
mod summary;

#[cfg(test)]
mod tests;

pub use interaction::{handle_clear_filters, handle_map_click, ClickPoint, MapClickEvent};
pub use map::{compute_map_data, compute_map_view};
pub use options::{compute_all_options, compute_dependent_options, year_options};
pub use summary::compute_summary;

use super::context::DashboardContext;
use super::domain::FilterState;
use super::views::DashboardSnapshot;
use tracing::debug;

/// One full recomputation cycle for the given controls.
pub fn dashboard_snapshot(context: &DashboardContext, filters: &FilterState) -> DashboardSnapshot {
    let resolved = context.resolve(filters);
    let snapshot = DashboardSnapshot {
        options: compute_all_options(context, &resolved),
        summary: compute_summary(context, &resolved),
        map: compute_map_view(context, &resolved),
        filters: resolved,
    };

    debug!(
        year = ?snapshot.filters.year,
        points = snapshot.map.points.len(),
        students = snapshot.summary.student_count,
        "dashboard snapshot computed"
    );
    snapshot
}
