use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A journalist voice the briefing is written in. The table lives in the
/// config file; selection is keyed by the calendar date so a given day
/// always picks the same persona.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Persona {
    pub name: String,
    pub style: String,
}

impl Persona {
    #[must_use]
    pub fn neutral() -> Persona {
        Persona {
            name: String::from("a seasoned investigative journalist"),
            style: String::from("direct, factual, and vivid without sensationalism"),
        }
    }
}

/// Pick the day's persona from the table: the date's ordinal day modulo the
/// table length. Deterministic, no RNG, no hidden state.
#[must_use]
pub fn select_persona(personas: &[Persona], date: NaiveDate) -> Persona {
    if personas.is_empty() {
        return Persona::neutral();
    }
    let ordinal = usize::try_from(date.num_days_from_ce()).unwrap_or(0);
    personas[ordinal % personas.len()].clone()
}
