use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A named group of comma-separated focus patterns, e.g.
/// `{"title": "ColdCases", "value": "cold case,dna,exonerat"}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemFilter {
    pub title: String,
    pub value: String,
}

pub struct Filters {}

impl Filters {
    #[must_use]
    pub fn compile(filters: &[ItemFilter]) -> Vec<Regex> {
        let string_filters: Vec<String> = filters
            .iter()
            .flat_map(|f| f.value.split(',').map(std::string::ToString::to_string))
            .collect();

        let mut compiled: Vec<Regex> = Vec::new();
        for filter in string_filters {
            match RegexBuilder::new(&filter.to_lowercase())
                .case_insensitive(true)
                .build()
            {
                Ok(re) => compiled.push(re),
                Err(e) => warn!("Error creating filter: {e}"),
            }
        }
        compiled
    }
}
