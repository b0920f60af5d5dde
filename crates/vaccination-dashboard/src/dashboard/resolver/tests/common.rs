use std::io::Cursor;

use crate::config::MapConfig;
use crate::dashboard::context::DashboardContext;
use crate::dashboard::domain::{Dimension, FilterState, Selection};
use crate::dashboard::geography::Geography;
use crate::dashboard::loader::{read_enrollments, read_vaccinations};

pub(super) const VACCINATIONS: &str = "nome_unidade;tipo_unidade;modalidade;vacina;data_vacinacao_ano;idade;n_vacinas;latitude;longitude\n\
Escola A;EMEF;ENSINO FUNDAMENTAL;HPV;2023;11.0;10;-23.50;-46.78\n\
Escola B;EMEI;EDUCAÇÃO INFANTIL;TRIPLICE VIRAL;2023;4.0;15;-23.52;-46.80\n\
Escola B;EMEI;EDUCAÇÃO INFANTIL;TRIPLICE VIRAL;2023;5.0;5;-23.52;-46.80\n\
Escola C;EMEF;ENSINO DE JOVENS E ADULTOS;INFLUENZA;2023;30.0;5;-23.54;-46.82\n\
Escola A;EMEF;ENSINO FUNDAMENTAL;HPV;2022;10.0;7;-23.50;-46.78\n\
Escola C;EMEF;ENSINO DE JOVENS E ADULTOS;HPV;2021;29.0;4;-23.54;-46.82\n\
Escola Antiga;EMEF;ENSINO FUNDAMENTAL;HPV;2010;12.0;99;-23.51;-46.79\n";

pub(super) const ENROLLMENTS: &str = "nome_unidade;tipo_unidade;ra\n\
Escola A;EMEF;1\n\
Escola A;EMEF;2\n\
Escola A;EMEF;2\n\
Escola B;EMEI;3\n\
Escola C;EMEF;4\n\
Escola C;EMEF;5\n";

pub(super) const BOUNDARY: &str = r#"{"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": [[[-46.85, -23.45], [-46.75, -23.45], [-46.75, -23.58], [-46.85, -23.45]]]}}"#;

pub(super) fn context() -> DashboardContext {
    let vaccinations = read_vaccinations(Cursor::new(VACCINATIONS), 2015).expect("vaccinations");
    let enrollments = read_enrollments(Cursor::new(ENROLLMENTS)).expect("enrollments");
    DashboardContext::from_tables(vaccinations, enrollments)
}

pub(super) fn context_with_boundary() -> DashboardContext {
    let vaccinations = read_vaccinations(Cursor::new(VACCINATIONS), 2015).expect("vaccinations");
    let enrollments = read_enrollments(Cursor::new(ENROLLMENTS)).expect("enrollments");
    let geography = Geography::from_reader(Cursor::new(BOUNDARY)).expect("boundary");
    DashboardContext::new(vaccinations, enrollments, geography, MapConfig::default())
}

pub(super) fn filters(year: i32) -> FilterState {
    FilterState::for_year(year)
}

pub(super) fn select(state: FilterState, dimension: Dimension, value: &str) -> FilterState {
    state.with_selection(dimension, Selection::only(value))
}

/// Every observed value of each dimension plus one that never occurs.
pub(super) fn candidate_states(context: &DashboardContext) -> Vec<FilterState> {
    let mut states = Vec::new();
    let mut years: Vec<Option<i32>> = context.years().iter().copied().map(Some).collect();
    years.push(Some(1999));
    years.push(None);

    for year in years {
        let base = FilterState {
            year,
            ..FilterState::default()
        };
        states.push(base.clone());
        for dimension in Dimension::ordered() {
            let mut values: Vec<String> = context
                .vaccinations()
                .iter()
                .map(|record| dimension.value_of(record).to_string())
                .collect();
            values.sort();
            values.dedup();
            values.push("Valor Inexistente".to_string());
            for value in values {
                states.push(select(base.clone(), dimension, &value));
            }
        }
    }

    states
}

pub(super) fn values(options: &[crate::dashboard::views::DropdownOption]) -> Vec<&str> {
    options.iter().map(|option| option.value.as_str()).collect()
}
