use crate::dashboard::domain::{EnrollmentRecord, VaccinationRecord};
use serde::{Deserialize, Deserializer};
use std::io::Read;

const DELIMITER: u8 = b';';

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.delimiter(DELIMITER).trim(csv::Trim::All);
    builder
}

pub(crate) fn parse_vaccinations<R: Read>(reader: R) -> Result<Vec<VaccinationRecord>, csv::Error> {
    let mut csv_reader = reader_builder().from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<VaccinationRow>() {
        records.push(row?.into_record());
    }

    Ok(records)
}

pub(crate) fn parse_enrollments<R: Read>(reader: R) -> Result<Vec<EnrollmentRecord>, csv::Error> {
    let mut csv_reader = reader_builder().from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<EnrollmentRow>() {
        let row = row?;
        records.push(EnrollmentRecord {
            school_name: row.school_name.unwrap_or_default(),
            school_type: row.school_type.unwrap_or_default(),
            student_id: row.student_id.unwrap_or_default(),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct VaccinationRow {
    #[serde(rename = "nome_unidade", default, deserialize_with = "empty_string_as_none")]
    school_name: Option<String>,
    #[serde(rename = "tipo_unidade", default, deserialize_with = "empty_string_as_none")]
    school_type: Option<String>,
    #[serde(rename = "modalidade", default, deserialize_with = "empty_string_as_none")]
    modality: Option<String>,
    #[serde(rename = "vacina", default, deserialize_with = "empty_string_as_none")]
    vaccine: Option<String>,
    #[serde(rename = "data_vacinacao_ano", deserialize_with = "whole_number")]
    year: i32,
    #[serde(rename = "idade", default, deserialize_with = "optional_decimal")]
    age: Option<f64>,
    #[serde(rename = "n_vacinas", default, deserialize_with = "optional_decimal")]
    vaccine_count: Option<f64>,
    #[serde(rename = "latitude", default, deserialize_with = "optional_decimal")]
    latitude: Option<f64>,
    #[serde(rename = "longitude", default, deserialize_with = "optional_decimal")]
    longitude: Option<f64>,
}

impl VaccinationRow {
    fn into_record(self) -> VaccinationRecord {
        VaccinationRecord {
            school_name: self.school_name.unwrap_or_default(),
            school_type: self.school_type.unwrap_or_default(),
            modality: self.modality.unwrap_or_default(),
            vaccine: self.vaccine.unwrap_or_default(),
            year: self.year,
            age: self.age,
            vaccine_count: self.vaccine_count.map_or(0, |count| count.round() as i64),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EnrollmentRow {
    #[serde(rename = "nome_unidade", default, deserialize_with = "empty_string_as_none")]
    school_name: Option<String>,
    #[serde(rename = "tipo_unidade", default, deserialize_with = "empty_string_as_none")]
    school_type: Option<String>,
    #[serde(rename = "ra", default, deserialize_with = "empty_string_as_none")]
    student_id: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_decimal(raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("'{raw}' is not a number"))),
    }
}

fn whole_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_decimal(&raw)
        .filter(|value| value.fract() == 0.0)
        .map(|value| value as i32)
        .ok_or_else(|| serde::de::Error::custom(format!("'{raw}' is not a whole year")))
}

/// Accepts `12.5` and the `12,5` exports some spreadsheet tools produce.
fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| trimmed.replace(',', ".").parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

#[cfg(test)]
pub(crate) fn parse_decimal_for_tests(raw: &str) -> Option<f64> {
    parse_decimal(raw)
}
