//! Multi-criteria threat filtering and filter-choice extraction.
//!
//! Fields of a [`FilterSpec`] combine with AND; values inside one field's
//! list combine with OR. The tactical-task filter matches comma-split
//! entries EXACTLY while violator / object / measure filters match by
//! substring — the choice lists produced by [`unique_values`] follow the
//! same rules, so every offered choice is guaranteed to match something.

use serde::Deserialize;

use crate::models::threat::Threat;

/// Composable filter specification. Every field optional; an empty spec
/// matches everything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Free text: a positive integer matches `id`/`fstec_id`, any text
    /// matches case-insensitively over name, description, tasks, violators
    /// and objects.
    pub search: Option<String>,
    /// Exact match against comma-split, trimmed task entries.
    pub tactical_tasks: Vec<String>,
    /// Substring match against violator entries.
    pub violators: Vec<String>,
    /// Substring match against object entries.
    pub objects: Vec<String>,
    /// Substring match against protection-measure entries.
    pub protection_measures: Vec<String>,
    /// Membership match against `fstec_id`.
    pub fstec_ids: Vec<i64>,
    pub confidentiality: Option<bool>,
    pub integrity: Option<bool>,
    pub availability: Option<bool>,
}

impl FilterSpec {
    /// Whether no criterion is set. A blank search string counts as unset.
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.tactical_tasks.is_empty()
            && self.violators.is_empty()
            && self.objects.is_empty()
            && self.protection_measures.is_empty()
            && self.fstec_ids.is_empty()
            && self.confidentiality.is_none()
            && self.integrity.is_none()
            && self.availability.is_none()
    }

    fn matches(&self, threat: &Threat) -> bool {
        if let Some(search) = self.search.as_deref() {
            let search = search.trim();
            if !search.is_empty() && !matches_search(threat, search) {
                return false;
            }
        }
        if !self.tactical_tasks.is_empty()
            && !self
                .tactical_tasks
                .iter()
                .any(|wanted| threat.tactical_task_entries().any(|entry| entry == wanted))
        {
            return false;
        }
        if !matches_substring_filter(&self.violators, &threat.violator) {
            return false;
        }
        if !matches_substring_filter(&self.objects, &threat.object) {
            return false;
        }
        if !matches_substring_filter(&self.protection_measures, &threat.protection_measures) {
            return false;
        }
        if !self.fstec_ids.is_empty() && !self.fstec_ids.contains(&threat.fstec_id) {
            return false;
        }
        if let Some(flag) = self.confidentiality {
            if threat.confidentiality != flag {
                return false;
            }
        }
        if let Some(flag) = self.integrity {
            if threat.integrity != flag {
                return false;
            }
        }
        if let Some(flag) = self.availability {
            if threat.availability != flag {
                return false;
            }
        }
        true
    }
}

/// Apply a filter spec, preserving input order. Pure; the empty spec
/// short-circuits without running any predicate.
pub fn filter_threats<'a>(threats: &'a [Threat], spec: &FilterSpec) -> Vec<&'a Threat> {
    if spec.is_empty() {
        return threats.iter().collect();
    }
    threats.iter().filter(|t| spec.matches(t)).collect()
}

/// Free-text search: numeric id match OR case-insensitive substring over
/// the text fields. A non-numeric string silently skips the numeric branch.
fn matches_search(threat: &Threat, search: &str) -> bool {
    if let Ok(id) = search.parse::<i64>() {
        if id > 0 && (threat.id == id || threat.fstec_id == id) {
            return true;
        }
    }
    let needle = search.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
    contains(&threat.name)
        || contains(&threat.description)
        || threat.tactical_tasks.iter().any(|t| contains(t))
        || threat.violator.iter().any(|v| contains(v))
        || threat.object.iter().any(|o| contains(o))
}

/// OR over requested values, each matching when it is a substring of at
/// least one entry. An empty request list imposes no constraint.
fn matches_substring_filter(wanted: &[String], entries: &[String]) -> bool {
    wanted.is_empty()
        || wanted
            .iter()
            .any(|w| entries.iter().any(|entry| entry.contains(w.as_str())))
}

/// Deduplicated, alphabetically sorted filter choices for the UI.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueValues {
    pub tactical_tasks: Vec<String>,
    pub violators: Vec<String>,
    pub objects: Vec<String>,
    pub protection_measures: Vec<String>,
}

/// Scan the collection once and collect the distinct values of every
/// multi-valued field, split/trimmed exactly as the filter predicates
/// split them.
pub fn unique_values(threats: &[Threat]) -> UniqueValues {
    let mut tactical_tasks = std::collections::BTreeSet::new();
    let mut violators = std::collections::BTreeSet::new();
    let mut objects = std::collections::BTreeSet::new();
    let mut protection_measures = std::collections::BTreeSet::new();

    for threat in threats {
        tactical_tasks.extend(threat.tactical_task_entries().map(str::to_string));
        violators.extend(threat.violator.iter().map(|v| v.trim().to_string()));
        objects.extend(threat.object.iter().map(|o| o.trim().to_string()));
        protection_measures.extend(threat.protection_measure_entries().map(str::to_string));
    }
    violators.remove("");
    objects.remove("");

    UniqueValues {
        tactical_tasks: tactical_tasks.into_iter().collect(),
        violators: violators.into_iter().collect(),
        objects: objects.into_iter().collect(),
        protection_measures: protection_measures.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_threats() -> Vec<Threat> {
        vec![
            Threat {
                id: 1,
                name: "Угроза перехвата трафика".into(),
                description: "Перехват незашифрованного трафика".into(),
                fstec_id: 34,
                tactical_tasks: vec!["Сбор информации, Эксфильтрация".into()],
                violator: vec!["Внешний нарушитель".into()],
                object: vec!["Сетевой трафик".into()],
                confidentiality: true,
                integrity: false,
                availability: false,
                protection_measures: vec!["ЗИС.1".into()],
            },
            Threat {
                id: 2,
                name: "Угроза подмены данных".into(),
                description: "Модификация данных при передаче".into(),
                fstec_id: 0,
                tactical_tasks: vec!["Эксфильтрация".into()],
                violator: vec!["Внутренний нарушитель".into()],
                object: vec!["База данных".into()],
                confidentiality: false,
                integrity: true,
                availability: true,
                protection_measures: vec!["Б/Н".into()],
            },
        ]
    }

    fn ids(result: &[&Threat]) -> Vec<i64> {
        result.iter().map(|t| t.id).collect()
    }

    #[test]
    fn empty_spec_returns_input_unchanged() {
        let threats = sample_threats();
        let result = filter_threats(&threats, &FilterSpec::default());
        assert_eq!(ids(&result), vec![1, 2]);
    }

    #[test]
    fn blank_search_counts_as_unset() {
        let threats = sample_threats();
        let spec = FilterSpec {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert!(spec.is_empty());
        assert_eq!(ids(&filter_threats(&threats, &spec)), vec![1, 2]);
    }

    #[test]
    fn search_matches_id_and_fstec_id() {
        let threats = sample_threats();
        let by_id = FilterSpec {
            search: Some("2".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_threats(&threats, &by_id)), vec![2]);

        let by_fstec = FilterSpec {
            search: Some(" 34 ".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_threats(&threats, &by_fstec)), vec![1]);
    }

    #[test]
    fn search_text_is_case_insensitive() {
        let threats = sample_threats();
        let spec = FilterSpec {
            search: Some("ПЕРЕХВАТ".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_threats(&threats, &spec)), vec![1]);
    }

    #[test]
    fn search_covers_tasks_violators_objects() {
        let threats = sample_threats();
        for (needle, expected) in [
            ("сбор информации", vec![1]),
            ("внутренний", vec![2]),
            ("база данных", vec![2]),
        ] {
            let spec = FilterSpec {
                search: Some(needle.into()),
                ..Default::default()
            };
            assert_eq!(ids(&filter_threats(&threats, &spec)), expected, "{needle}");
        }
    }

    #[test]
    fn tactical_task_filter_matches_split_entries_exactly() {
        let threats = sample_threats();
        // Both threats carry "Эксфильтрация" as one of their split sub-tasks.
        let spec = FilterSpec {
            tactical_tasks: vec!["Эксфильтрация".into()],
            ..Default::default()
        };
        assert_eq!(ids(&filter_threats(&threats, &spec)), vec![1, 2]);

        // Exact match: a prefix of a task name matches nothing.
        let prefix = FilterSpec {
            tactical_tasks: vec!["Эксфильтр".into()],
            ..Default::default()
        };
        assert!(filter_threats(&threats, &prefix).is_empty());
    }

    #[test]
    fn violator_filter_is_substring() {
        let threats = sample_threats();
        let spec = FilterSpec {
            violators: vec!["нарушитель".into()],
            ..Default::default()
        };
        assert_eq!(ids(&filter_threats(&threats, &spec)), vec![1, 2]);
    }

    #[test]
    fn cia_flag_filter_is_exact() {
        let threats = sample_threats();
        let spec = FilterSpec {
            confidentiality: Some(true),
            ..Default::default()
        };
        assert_eq!(ids(&filter_threats(&threats, &spec)), vec![1]);

        let negative = FilterSpec {
            availability: Some(false),
            ..Default::default()
        };
        assert_eq!(ids(&filter_threats(&threats, &negative)), vec![1]);
    }

    #[test]
    fn fstec_id_filter_is_membership() {
        let threats = sample_threats();
        let spec = FilterSpec {
            fstec_ids: vec![34, 99],
            ..Default::default()
        };
        assert_eq!(ids(&filter_threats(&threats, &spec)), vec![1]);
    }

    #[test]
    fn fields_combine_with_and() {
        let threats = sample_threats();
        let spec = FilterSpec {
            tactical_tasks: vec!["Эксфильтрация".into()],
            integrity: Some(true),
            ..Default::default()
        };
        assert_eq!(ids(&filter_threats(&threats, &spec)), vec![2]);
    }

    #[test]
    fn adding_constraints_never_grows_the_result() {
        let threats = sample_threats();
        let base = FilterSpec {
            tactical_tasks: vec!["Эксфильтрация".into()],
            ..Default::default()
        };
        let narrowed = FilterSpec {
            tactical_tasks: vec!["Эксфильтрация".into()],
            confidentiality: Some(true),
            ..Default::default()
        };
        assert!(
            filter_threats(&threats, &narrowed).len() <= filter_threats(&threats, &base).len()
        );
    }

    #[test]
    fn unique_values_split_like_the_filter() {
        let threats = sample_threats();
        let values = unique_values(&threats);
        assert_eq!(
            values.tactical_tasks,
            vec!["Сбор информации", "Эксфильтрация"]
        );
        assert_eq!(values.protection_measures, vec!["Б/Н", "ЗИС.1"]);

        // Every offered task choice must actually match through the filter.
        for choice in &values.tactical_tasks {
            let spec = FilterSpec {
                tactical_tasks: vec![choice.clone()],
                ..Default::default()
            };
            assert!(!filter_threats(&threats, &spec).is_empty(), "{choice}");
        }
    }

    #[test]
    fn unique_values_are_sorted_and_deduplicated() {
        let mut threats = sample_threats();
        threats.push(threats[0].clone());
        let values = unique_values(&threats);
        assert_eq!(values.violators.len(), 2);
        let mut sorted = values.violators.clone();
        sorted.sort();
        assert_eq!(values.violators, sorted);
    }
}
