//! Filter/sort engine: full record set + `QueryState` → results and suggestions.
//!
//! Filters are conjunctive. Each applies only when its field is set:
//! - name: case-insensitive substring of `search_text`
//! - mode: the practitioner offers the selected consultation mode
//! - specialty: at least one common tag with the selection (OR within the facet)
//!
//! Sorting is stable, so records equal under the active key keep source order.
//! Suggestions look only at the name, over the unfiltered set, capped at
//! `SUGGESTION_LIMIT`.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::models::{Practitioner, SortOption};
use crate::query_state::QueryState;

/// Maximum autocomplete suggestions.
pub const SUGGESTION_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub results: Vec<Practitioner>,
    pub suggestions: Vec<Practitioner>,
}

pub fn query(records: &[Practitioner], state: &QueryState) -> QueryOutcome {
    let mut results = filter(records, state);
    if let Some(sort) = state.sort_option {
        sort_by_option(&mut results, sort);
    }
    QueryOutcome {
        results,
        suggestions: suggestions(records, &state.search_text),
    }
}

/// Apply the three predicates, preserving source order.
pub fn filter(records: &[Practitioner], state: &QueryState) -> Vec<Practitioner> {
    let needle = state.search_text.to_lowercase();
    records
        .iter()
        .filter(|p| needle.is_empty() || p.name_contains(&needle))
        .filter(|p| state.consultation_mode.map_or(true, |mode| p.offers(mode)))
        .filter(|p| {
            state.selected_specialties.is_empty()
                || p.has_any_specialty(&state.selected_specialties)
        })
        .cloned()
        .collect()
}

/// Fee ascending or experience descending. `sort_by_key` is stable.
pub fn sort_by_option(records: &mut [Practitioner], sort: SortOption) {
    match sort {
        SortOption::Fee => records.sort_by_key(|p| p.fee),
        SortOption::Experience => records.sort_by_key(|p| Reverse(p.experience_years)),
    }
}

/// First name matches in source order; empty when `search_text` is empty.
/// Independent of mode, specialty and sort.
pub fn suggestions(records: &[Practitioner], search_text: &str) -> Vec<Practitioner> {
    if search_text.is_empty() {
        return Vec::new();
    }
    let needle = search_text.to_lowercase();
    records
        .iter()
        .filter(|p| p.name_contains(&needle))
        .take(SUGGESTION_LIMIT)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::practitioner::sample;
    use crate::models::ConsultationMode;

    fn doc(id: &str, name: &str) -> Practitioner {
        sample(id, name)
    }

    fn ids(records: &[Practitioner]) -> Vec<&str> {
        records.iter().map(|p| p.id.as_str()).collect()
    }

    fn roster() -> Vec<Practitioner> {
        let mut raman = doc("1", "Dr. Raman");
        raman.specialties = vec!["Dentist".into()];
        raman.consultation_modes = vec![ConsultationMode::VideoConsult];
        raman.fee = 500;
        raman.experience_years = 5;

        let mut subra = doc("2", "Dr. Subramanium");
        subra.specialties = vec!["General Physician".into(), "Dentist".into()];
        subra.consultation_modes = vec![ConsultationMode::InClinic];
        subra.fee = 100;
        subra.experience_years = 20;

        let mut anita = doc("3", "Dr. Anita");
        anita.specialties = vec!["Dermatologist".into()];
        anita.consultation_modes = vec![ConsultationMode::VideoConsult, ConsultationMode::InClinic];
        anita.fee = 300;
        anita.experience_years = 1;

        vec![raman, subra, anita]
    }

    #[test]
    fn name_search_is_case_insensitive_substring() {
        let state = QueryState {
            search_text: "RAM".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&roster(), &state)), vec!["1", "2"]);
    }

    #[test]
    fn empty_specialty_set_disables_predicate() {
        let records = roster();
        let unfiltered = filter(&records, &QueryState::default());
        let empty_set = filter(
            &records,
            &QueryState {
                selected_specialties: Vec::new(),
                ..Default::default()
            },
        );
        assert_eq!(unfiltered, empty_set);
        assert_eq!(unfiltered.len(), 3);
    }

    #[test]
    fn specialty_filter_is_or_within_facet() {
        let state = QueryState {
            selected_specialties: vec!["General Physician".into(), "Dermatologist".into()],
            ..Default::default()
        };
        assert_eq!(ids(&filter(&roster(), &state)), vec!["2", "3"]);
    }

    #[test]
    fn filters_combine_with_and() {
        let state = QueryState {
            search_text: "dr".into(),
            consultation_mode: Some(ConsultationMode::VideoConsult),
            selected_specialties: vec!["Dentist".into()],
            sort_option: None,
        };
        assert_eq!(ids(&filter(&roster(), &state)), vec!["1"]);
    }

    #[test]
    fn mode_filter_requires_offered_mode() {
        let state = QueryState {
            consultation_mode: Some(ConsultationMode::InClinic),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&roster(), &state)), vec!["2", "3"]);
    }

    #[test]
    fn sort_by_fee_ascending() {
        let state = QueryState {
            sort_option: Some(SortOption::Fee),
            ..Default::default()
        };
        let fees: Vec<u32> = query(&roster(), &state).results.iter().map(|p| p.fee).collect();
        assert_eq!(fees, vec![100, 300, 500]);
    }

    #[test]
    fn sort_by_experience_descending() {
        let state = QueryState {
            sort_option: Some(SortOption::Experience),
            ..Default::default()
        };
        let years: Vec<u32> = query(&roster(), &state)
            .results
            .iter()
            .map(|p| p.experience_years)
            .collect();
        assert_eq!(years, vec![20, 5, 1]);
    }

    #[test]
    fn ties_keep_source_order() {
        let mut records: Vec<Practitioner> = (0..6).map(|i| doc(&i.to_string(), "Dr. Tie")).collect();
        for (i, p) in records.iter_mut().enumerate() {
            p.fee = if i % 2 == 0 { 200 } else { 100 };
            p.experience_years = 10;
        }
        let mut by_fee = records.clone();
        sort_by_option(&mut by_fee, SortOption::Fee);
        assert_eq!(ids(&by_fee), vec!["1", "3", "5", "0", "2", "4"]);

        let mut by_experience = records.clone();
        sort_by_option(&mut by_experience, SortOption::Experience);
        assert_eq!(ids(&by_experience), ids(&records));
    }

    #[test]
    fn no_sort_preserves_filtered_order() {
        assert_eq!(ids(&query(&roster(), &QueryState::default()).results), vec!["1", "2", "3"]);
    }

    #[test]
    fn suggestions_capped_and_ignore_other_filters() {
        let mut records = roster();
        records.push(doc("4", "Dr. Anand"));
        records.push(doc("5", "Dr. Shantanu"));

        let state = QueryState {
            search_text: "an".into(),
            consultation_mode: Some(ConsultationMode::InClinic),
            selected_specialties: vec!["Dermatologist".into()],
            sort_option: Some(SortOption::Fee),
        };
        let outcome = query(&records, &state);
        // All five names contain "an"; only the first three in source order.
        assert_eq!(ids(&outcome.suggestions), vec!["1", "2", "3"]);
        assert_eq!(ids(&outcome.results), vec!["3"]);
    }

    #[test]
    fn suggestions_empty_without_search_text() {
        assert!(suggestions(&roster(), "").is_empty());
    }

    #[test]
    fn empty_record_set_yields_empty_outcome() {
        let state = QueryState {
            search_text: "x".into(),
            sort_option: Some(SortOption::Fee),
            ..Default::default()
        };
        assert_eq!(query(&[], &state), QueryOutcome::default());
    }
}
