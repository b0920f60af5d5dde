use crate::dashboard::context::DashboardContext;
use crate::dashboard::domain::{Dimension, FilterState};
use crate::dashboard::labels::format_label;
use crate::dashboard::views::{DependentOptions, DropdownOption, YearOption};
use std::collections::BTreeSet;

/// Options for `dimension` given every other active selection.
///
/// The dimension's own selection is ignored so a user can always switch to a
/// sibling value. The list always starts with the "all" sentinel.
pub fn compute_dependent_options(
    context: &DashboardContext,
    dimension: Dimension,
    filters: &FilterState,
) -> Vec<DropdownOption> {
    let filters = context.resolve(filters);
    let values: BTreeSet<&str> = context
        .vaccinations()
        .iter()
        .filter(|record| filters.matches_year(record))
        .filter(|record| filters.matches_selections(record, Some(dimension)))
        .map(|record| dimension.value_of(record))
        .filter(|value| !value.is_empty())
        .collect();

    std::iter::once(DropdownOption::all())
        .chain(values.into_iter().map(|value| DropdownOption {
            label: format_label(value),
            value: value.to_string(),
        }))
        .collect()
}

/// Recomputes all four lists from one snapshot in a single pass each.
pub fn compute_all_options(context: &DashboardContext, filters: &FilterState) -> DependentOptions {
    DependentOptions {
        modality: compute_dependent_options(context, Dimension::Modality, filters),
        unit_type: compute_dependent_options(context, Dimension::UnitType, filters),
        school: compute_dependent_options(context, Dimension::School, filters),
        vaccine: compute_dependent_options(context, Dimension::Vaccine, filters),
    }
}

pub fn year_options(context: &DashboardContext) -> Vec<YearOption> {
    context
        .years()
        .iter()
        .map(|year| YearOption {
            label: year.to_string(),
            value: *year,
        })
        .collect()
}
