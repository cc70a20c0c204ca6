//! Specialty facet extraction for the filter panel.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Practitioner;

/// One checkbox in the specialty panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub name: String,
    /// Kebab form of the name, stable for element ids ("Ear-Nose-Throat-(ENT)").
    pub slug: String,
    pub selected: bool,
}

/// Distinct non-empty specialties across all records, ascending.
pub fn extract_specialties(records: &[Practitioner]) -> Vec<String> {
    records
        .iter()
        .flat_map(|p| p.specialties.iter())
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Pair each facet with its selection state.
pub fn facet_options(all_specialties: &[String], selected: &[String]) -> Vec<FacetOption> {
    all_specialties
        .iter()
        .map(|name| FacetOption {
            name: name.clone(),
            slug: facet_slug(name),
            selected: selected.contains(name),
        })
        .collect()
}

/// Whitespace runs become `-`, as does the first `/`.
pub fn facet_slug(name: &str) -> String {
    let mut dashed = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                dashed.push('-');
            }
            in_space = true;
        } else {
            dashed.push(c);
            in_space = false;
        }
    }
    dashed.replacen('/', "-", 1)
}
