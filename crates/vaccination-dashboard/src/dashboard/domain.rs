use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reserved filter value meaning "no restriction on this dimension".
pub const ALL_SENTINEL: &str = "Todas";

/// One pre-aggregated row of the vaccination table.
#[derive(Debug, Clone, PartialEq)]
pub struct VaccinationRecord {
    pub school_name: String,
    pub school_type: String,
    pub modality: String,
    pub vaccine: String,
    pub year: i32,
    pub age: Option<f64>,
    pub vaccine_count: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl VaccinationRecord {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
            _ => None,
        }
    }
}

/// One enrolled student at one school.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRecord {
    pub school_name: String,
    pub school_type: String,
    pub student_id: String,
}

/// A single dropdown selection. `None`, blank, and the sentinel all mean [`Selection::All`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") | Some(ALL_SENTINEL) => Self::All,
            Some(value) => Self::Only(value.to_string()),
        }
    }

    pub fn only(value: impl Into<String>) -> Self {
        let value: String = value.into();
        Self::from_raw(Some(&value))
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }

    /// Wire form: the selected value, or the sentinel.
    pub fn as_str(&self) -> &str {
        self.value().unwrap_or(ALL_SENTINEL)
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_raw(raw.as_deref()))
    }
}

/// The four dropdowns whose option sets depend on the other selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    School,
    Vaccine,
    Modality,
    UnitType,
}

impl Dimension {
    pub fn ordered() -> [Dimension; 4] {
        [
            Dimension::Modality,
            Dimension::UnitType,
            Dimension::School,
            Dimension::Vaccine,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::School => "Escola",
            Dimension::Vaccine => "Vacina",
            Dimension::Modality => "Modalidade",
            Dimension::UnitType => "Tipo de unidade",
        }
    }

    pub fn value_of(self, record: &VaccinationRecord) -> &str {
        match self {
            Dimension::School => &record.school_name,
            Dimension::Vaccine => &record.vaccine,
            Dimension::Modality => &record.modality,
            Dimension::UnitType => &record.school_type,
        }
    }
}

/// Snapshot of all five controls for one interaction cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub modality: Selection,
    #[serde(default)]
    pub unit_type: Selection,
    #[serde(default)]
    pub school: Selection,
    #[serde(default)]
    pub vaccine: Selection,
}

impl FilterState {
    pub fn for_year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn selection(&self, dimension: Dimension) -> &Selection {
        match dimension {
            Dimension::School => &self.school,
            Dimension::Vaccine => &self.vaccine,
            Dimension::Modality => &self.modality,
            Dimension::UnitType => &self.unit_type,
        }
    }

    pub fn with_selection(mut self, dimension: Dimension, selection: Selection) -> Self {
        let slot = match dimension {
            Dimension::School => &mut self.school,
            Dimension::Vaccine => &mut self.vaccine,
            Dimension::Modality => &mut self.modality,
            Dimension::UnitType => &mut self.unit_type,
        };
        *slot = selection;
        self
    }

    /// Checks the four dropdown selections, skipping `except`. The year is not consulted.
    pub fn matches_selections(
        &self,
        record: &VaccinationRecord,
        except: Option<Dimension>,
    ) -> bool {
        Dimension::ordered()
            .into_iter()
            .filter(|dimension| Some(*dimension) != except)
            .all(|dimension| self.selection(dimension).matches(dimension.value_of(record)))
    }

    /// A missing year places no restriction.
    pub fn matches_year(&self, record: &VaccinationRecord) -> bool {
        self.year.map_or(true, |year| record.year == year)
    }

    /// The enrollment table only carries school and unit type.
    pub fn matches_enrollment(&self, record: &EnrollmentRecord) -> bool {
        self.school.matches(&record.school_name) && self.unit_type.matches(&record.school_type)
    }
}
