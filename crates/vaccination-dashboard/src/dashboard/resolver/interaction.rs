use crate::dashboard::context::DashboardContext;
use crate::dashboard::domain::FilterState;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Click payload emitted by the map renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapClickEvent {
    #[serde(default)]
    pub points: Vec<ClickPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickPoint {
    #[serde(default)]
    pub hovertext: Option<String>,
    #[serde(default)]
    pub customdata: Option<Vec<Value>>,
}

impl ClickPoint {
    fn school_name(&self) -> Option<String> {
        let hovertext = self
            .hovertext
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());
        if let Some(text) = hovertext {
            return Some(text.to_string());
        }

        match self.customdata.as_deref()?.first()? {
            Value::String(name) if !name.trim().is_empty() => Some(name.trim().to_string()),
            _ => None,
        }
    }
}

/// School named by the first clicked point. `None` leaves the selector untouched.
pub fn handle_map_click(event: &MapClickEvent) -> Option<String> {
    event.points.first().and_then(ClickPoint::school_name)
}

/// Default selections: latest year, everything else "all".
pub fn handle_clear_filters(context: &DashboardContext) -> FilterState {
    FilterState {
        year: context.default_year(),
        ..FilterState::default()
    }
}
