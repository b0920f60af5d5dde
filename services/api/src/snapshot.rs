use clap::Args;
use vaccination_dashboard::config::AppConfig;
use vaccination_dashboard::dashboard::{
    dashboard_snapshot, load_context, DashboardSnapshot, Dimension, DropdownOption, FilterState,
    Selection,
};
use vaccination_dashboard::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct SnapshotArgs {
    /// Vaccination year (defaults to the latest year in the data)
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// School modality, exactly as stored in the data
    #[arg(long)]
    pub(crate) modality: Option<String>,
    /// Unit type, exactly as stored in the data
    #[arg(long)]
    pub(crate) unit_type: Option<String>,
    /// School name
    #[arg(long)]
    pub(crate) school: Option<String>,
    /// Vaccine name
    #[arg(long)]
    pub(crate) vaccine: Option<String>,
    /// Print every option instead of only the counts
    #[arg(long)]
    pub(crate) list_options: bool,
}

impl SnapshotArgs {
    fn filters(&self) -> FilterState {
        FilterState {
            year: self.year,
            modality: Selection::from_raw(self.modality.as_deref()),
            unit_type: Selection::from_raw(self.unit_type.as_deref()),
            school: Selection::from_raw(self.school.as_deref()),
            vaccine: Selection::from_raw(self.vaccine.as_deref()),
        }
    }
}

pub(crate) fn run_snapshot(args: SnapshotArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let context = load_context(&config.data, config.map.clone())?;
    let snapshot = dashboard_snapshot(&context, &args.filters());

    print!("{}", render_snapshot(&snapshot, args.list_options));
    Ok(())
}

pub(crate) fn render_snapshot(snapshot: &DashboardSnapshot, list_options: bool) -> String {
    let mut out = String::new();
    let filters = &snapshot.filters;

    out.push_str("Painel de Vacinação\n");
    out.push_str(&format!(
        "Ano {} | Modalidade {} | Tipo de unidade {} | Escola {} | Vacina {}\n",
        filters
            .year
            .map_or_else(|| "-".to_string(), |year| year.to_string()),
        filters.modality.as_str(),
        filters.unit_type.as_str(),
        filters.school.as_str(),
        filters.vaccine.as_str(),
    ));

    let formatted = &snapshot.summary.formatted;
    out.push_str("\nIndicadores\n");
    out.push_str(&format!("- Total de alunos: {}\n", formatted.student_count));
    out.push_str(&format!("- Vacinas aplicadas: {}\n", formatted.vaccine_total));
    let mean_age = if formatted.mean_age.is_empty() {
        "-"
    } else {
        formatted.mean_age.as_str()
    };
    out.push_str(&format!("- Média de idade: {}\n", mean_age));

    out.push_str(&format!(
        "\nMapa: {} escolas, centro ({:.4}, {:.4}), zoom {}\n",
        snapshot.map.points.len(),
        snapshot.map.center.lat,
        snapshot.map.center.lon,
        snapshot.map.zoom
    ));

    let options = &snapshot.options;
    out.push_str("\nOpções disponíveis\n");
    for dimension in Dimension::ordered() {
        let list = options.for_dimension(dimension);
        out.push_str(&format!(
            "- {}: {}\n",
            dimension.label(),
            list.len().saturating_sub(1)
        ));
        if list_options {
            for option in list.iter().skip(1) {
                out.push_str(&format_option(option));
            }
        }
    }

    out
}

fn format_option(option: &DropdownOption) -> String {
    format!("    - {} ({})\n", option.label, option.value)
}
