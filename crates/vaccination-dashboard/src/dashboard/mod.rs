pub mod context;
pub mod domain;
pub mod geography;
pub mod labels;
pub mod loader;
pub mod locale;
pub mod resolver;
pub mod router;
pub mod views;

pub use context::DashboardContext;
pub use domain::{
    Dimension, EnrollmentRecord, FilterState, Selection, VaccinationRecord, ALL_SENTINEL,
};
pub use geography::Geography;
pub use loader::{load_context, read_enrollments, read_vaccinations, DataLoadError};
pub use resolver::{
    compute_all_options, compute_dependent_options, compute_map_data, compute_map_view,
    compute_summary, dashboard_snapshot, handle_clear_filters, handle_map_click, year_options,
    ClickPoint, MapClickEvent,
};
pub use router::dashboard_router;
pub use views::{
    DashboardSnapshot, DatasetInfo, DependentOptions, DropdownOption, MapCenter, MapPoint,
    MapView, SummaryView, YearOption,
};
