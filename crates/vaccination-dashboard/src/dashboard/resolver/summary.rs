use crate::dashboard::context::DashboardContext;
use crate::dashboard::domain::FilterState;
use crate::dashboard::locale::{format_count, format_decimal, format_integer};
use crate::dashboard::views::{FormattedSummary, SummaryView};
use std::collections::HashSet;

/// Card aggregates for the active filters.
///
/// Students come from the enrollment table, which only knows school and unit
/// type. The vaccine total is limited to the selected year; the mean age is
/// taken across every year that matches the dropdowns.
pub fn compute_summary(context: &DashboardContext, filters: &FilterState) -> SummaryView {
    let filters = context.resolve(filters);

    let student_count = context
        .enrollments()
        .iter()
        .filter(|record| filters.matches_enrollment(record))
        .map(|record| record.student_id.as_str())
        .filter(|id| !id.is_empty())
        .collect::<HashSet<_>>()
        .len();

    let matching: Vec<_> = context
        .vaccinations()
        .iter()
        .filter(|record| filters.matches_selections(record, None))
        .collect();

    let vaccine_total: i64 = matching
        .iter()
        .filter(|record| filters.matches_year(record))
        .map(|record| record.vaccine_count)
        .sum();

    let mean_age = mean(matching.iter().filter_map(|record| record.age)).map(round_one_decimal);

    SummaryView {
        student_count,
        vaccine_total,
        mean_age,
        formatted: FormattedSummary {
            student_count: format_count(student_count),
            vaccine_total: format_integer(vaccine_total),
            mean_age: mean_age.map(format_decimal).unwrap_or_default(),
        },
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Ties go to the even digit, so 4.25 becomes 4.2.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
