//! Chart-data reducers over a (possibly filtered) threat collection.
//!
//! Every builder is a pure function returning small `{name, value}` tables
//! for the dashboard's visualization components; counts with equal value
//! are tie-broken by name so identical input always yields identical
//! output.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::threat::Threat;
use crate::services::normalize::is_no_measure;

/// Default cut-off for the violators chart.
pub const TOP_VIOLATORS: usize = 10;
/// Default cut-off for the affected-objects chart.
pub const TOP_OBJECTS: usize = 15;

/// One data point of a chart series. `fill` carries a bucket id the UI maps
/// to a color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

impl ChartPoint {
    fn new(name: impl Into<String>, value: usize) -> Self {
        Self {
            name: name.into(),
            value,
            fill: None,
        }
    }

    fn with_fill(name: impl Into<String>, value: usize, fill: &str) -> Self {
        Self {
            name: name.into(),
            value,
            fill: Some(fill.to_string()),
        }
    }
}

/// Three independent CIA counts. A threat with several flags set counts in
/// each of its buckets.
pub fn cia_distribution(threats: &[&Threat]) -> Vec<ChartPoint> {
    let count = |pick: fn(&Threat) -> bool| threats.iter().filter(|t| pick(t)).count();
    vec![
        ChartPoint::with_fill("confidentiality", count(|t| t.confidentiality), "confidentiality"),
        ChartPoint::with_fill("integrity", count(|t| t.integrity), "integrity"),
        ChartPoint::with_fill("availability", count(|t| t.availability), "availability"),
    ]
}

/// Partition into the 7 non-empty subsets of {C, I, A}. Threats with no
/// flag set fall into no bucket, and zero-valued buckets are dropped — the
/// chart has nothing to show for either.
pub fn cia_combinations(threats: &[&Threat]) -> Vec<ChartPoint> {
    const BUCKETS: [(&str, bool, bool, bool); 7] = [
        ("К", true, false, false),
        ("Ц", false, true, false),
        ("Д", false, false, true),
        ("К+Ц", true, true, false),
        ("К+Д", true, false, true),
        ("Ц+Д", false, true, true),
        ("К+Ц+Д", true, true, true),
    ];
    BUCKETS
        .iter()
        .enumerate()
        .map(|(i, (name, c, int, a))| {
            let value = threats
                .iter()
                .filter(|t| {
                    t.confidentiality == *c && t.integrity == *int && t.availability == *a
                })
                .count();
            ChartPoint::with_fill(*name, value, &format!("combo-{i}"))
        })
        .filter(|p| p.value > 0)
        .collect()
}

/// Most frequent violator labels, ascending so a horizontal bar chart
/// renders the largest bar at the bottom.
pub fn top_violators(threats: &[&Threat], n: usize) -> Vec<ChartPoint> {
    top_n(threats.iter().flat_map(|t| t.violator.iter().map(|v| v.trim())), n)
}

/// Most frequent affected-object labels, ascending (see [`top_violators`]).
pub fn top_objects(threats: &[&Threat], n: usize) -> Vec<ChartPoint> {
    top_n(threats.iter().flat_map(|t| t.object.iter().map(|o| o.trim())), n)
}

/// Threat count per distinct tactical-task label, descending, uncapped.
pub fn tactic_distribution(threats: &[&Threat]) -> Vec<ChartPoint> {
    let mut points = count_labels(threats.iter().flat_map(|t| t.tactical_task_entries()));
    sort_descending(&mut points);
    points
}

/// Threats carrying at least one real measure vs. those with none (empty
/// list, blanks, or only the Б/Н sentinel).
pub fn measure_coverage(threats: &[&Threat]) -> Vec<ChartPoint> {
    let with = threats
        .iter()
        .filter(|t| t.protection_measure_entries().any(|m| !is_no_measure(m)))
        .count();
    vec![
        ChartPoint::with_fill("withMeasures", with, "covered"),
        ChartPoint::with_fill("withoutMeasures", threats.len() - with, "uncovered"),
    ]
}

fn count_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<ChartPoint> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        if !label.is_empty() {
            *counts.entry(label).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(name, value)| ChartPoint::new(name, value))
        .collect()
}

fn sort_descending(points: &mut [ChartPoint]) {
    points.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
}

/// Count, sort descending, keep the first `n`, then reverse to ascending.
fn top_n<'a>(labels: impl Iterator<Item = &'a str>, n: usize) -> Vec<ChartPoint> {
    let mut points = count_labels(labels);
    sort_descending(&mut points);
    points.truncate(n);
    points.reverse();
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threat(id: i64, c: bool, i: bool, a: bool) -> Threat {
        Threat {
            id,
            name: format!("Угроза {id}"),
            description: String::new(),
            fstec_id: 0,
            tactical_tasks: vec![],
            violator: vec![],
            object: vec![],
            confidentiality: c,
            integrity: i,
            availability: a,
            protection_measures: vec![],
        }
    }

    fn refs(threats: &[Threat]) -> Vec<&Threat> {
        threats.iter().collect()
    }

    #[test]
    fn cia_distribution_counts_independently() {
        let threats = vec![threat(1, true, true, true), threat(2, true, false, false)];
        let points = cia_distribution(&refs(&threats));
        assert_eq!(points[0].value, 2); // confidentiality
        assert_eq!(points[1].value, 1); // integrity
        assert_eq!(points[2].value, 1); // availability
        assert!(points.iter().all(|p| p.value <= threats.len()));
    }

    #[test]
    fn single_flag_threats_count_once_each() {
        let threats = vec![threat(1, true, false, false), threat(2, false, true, true)];
        let points = cia_distribution(&refs(&threats));
        assert_eq!(
            points.iter().map(|p| p.value).collect::<Vec<_>>(),
            vec![1, 1, 1]
        );
    }

    #[test]
    fn cia_combinations_partition_flagged_threats() {
        let threats = vec![
            threat(1, true, false, false),
            threat(2, true, false, false),
            threat(3, false, true, true),
            threat(4, true, true, true),
            threat(5, false, false, false), // no flags: contributes nowhere
        ];
        let points = cia_combinations(&refs(&threats));
        let total: usize = points.iter().map(|p| p.value).sum();
        let flagged = threats.iter().filter(|t| t.has_cia_impact()).count();
        assert_eq!(total, flagged);
        // Zero-valued buckets are dropped.
        assert!(points.iter().all(|p| p.value > 0));
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn top_violators_reversed_and_capped() {
        let mut threats = Vec::new();
        for i in 0..12 {
            let mut t = threat(i, false, false, false);
            t.violator = vec![format!("Нарушитель {}", i % 4)];
            threats.push(t);
        }
        let points = top_violators(&refs(&threats), 3);
        assert!(points.len() <= 3);
        // Ascending when read front-to-back, non-increasing from the end.
        for pair in points.windows(2) {
            assert!(pair[0].value <= pair[1].value);
        }
    }

    #[test]
    fn tactic_distribution_splits_and_sorts_descending() {
        let mut a = threat(1, false, false, false);
        a.tactical_tasks = vec!["Сбор информации, Эксфильтрация".into()];
        let mut b = threat(2, false, false, false);
        b.tactical_tasks = vec!["Эксфильтрация".into()];
        let threats = vec![a, b];

        let points = tactic_distribution(&refs(&threats));
        assert_eq!(points[0].name, "Эксфильтрация");
        assert_eq!(points[0].value, 2);
        assert_eq!(points[1].name, "Сбор информации");
        assert_eq!(points[1].value, 1);
    }

    #[test]
    fn measure_coverage_ignores_sentinel_and_blanks() {
        let mut covered = threat(1, false, false, false);
        covered.protection_measures = vec!["ЗИС.1".into()];
        let mut sentinel_only = threat(2, false, false, false);
        sentinel_only.protection_measures = vec!["Б/Н".into(), "  ".into()];
        let empty = threat(3, false, false, false);
        let threats = vec![covered, sentinel_only, empty];

        let points = measure_coverage(&refs(&threats));
        assert_eq!(points[0].name, "withMeasures");
        assert_eq!(points[0].value, 1);
        assert_eq!(points[1].name, "withoutMeasures");
        assert_eq!(points[1].value, 2);
    }

    #[test]
    fn builders_are_deterministic() {
        let mut a = threat(1, true, false, false);
        a.violator = vec!["А".into(), "Б".into()];
        let mut b = threat(2, false, true, false);
        b.violator = vec!["Б".into(), "В".into()];
        let threats = vec![a, b];

        assert_eq!(top_violators(&refs(&threats), 10), top_violators(&refs(&threats), 10));
        assert_eq!(cia_combinations(&refs(&threats)), cia_combinations(&refs(&threats)));
    }
}
