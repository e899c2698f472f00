//! Cross-reference index between threats, protection measures, and
//! tactical tasks.
//!
//! The dataset stores threat↔measure and threat↔task links as free-text
//! labels, not foreign keys. All label resolution happens once here, at
//! build time: labels are normalized and matched into id sets, and every
//! runtime query is a set lookup. Measure labels match by equality or
//! containment in either direction (source rows sometimes embed the code
//! inside a longer descriptive string); task labels match exactly by
//! normalized name, which is the only rule that survives locale-translated
//! task names.

use std::collections::{BTreeSet, HashMap};

use crate::models::measure::ProtectionMeasure;
use crate::models::store::DataStore;
use crate::models::task::TacticalTask;
use crate::models::threat::Threat;
use crate::services::normalize::{
    is_no_measure, normalize_measure_identifier, normalize_task_name,
};

/// Precomputed id-set index over a loaded dataset.
#[derive(Debug, Default)]
pub struct CrossRefIndex {
    threat_tasks: HashMap<i64, BTreeSet<i64>>,
    threat_measures: HashMap<i64, BTreeSet<i64>>,
    task_threats: HashMap<i64, BTreeSet<i64>>,
    measure_threats: HashMap<i64, BTreeSet<i64>>,
}

impl CrossRefIndex {
    /// Resolve every threat's task and measure labels into id sets.
    pub fn build(store: &DataStore) -> Self {
        let task_ids: HashMap<String, i64> = store
            .tactical_tasks
            .iter()
            .map(|t| (normalize_task_name(&t.name), t.id))
            .collect();

        let measure_idents: Vec<(i64, String)> = store
            .protection_measures
            .iter()
            .map(|m| (m.id, normalize_measure_identifier(&m.identifier)))
            .filter(|(_, ident)| !is_no_measure(ident))
            .collect();

        let mut index = Self::default();
        for threat in &store.threats {
            for entry in threat.tactical_task_entries() {
                if let Some(&task_id) = task_ids.get(&normalize_task_name(entry)) {
                    index.link_task(threat.id, task_id);
                }
            }
            for entry in threat.protection_measure_entries() {
                if is_no_measure(entry) {
                    continue;
                }
                let norm = normalize_measure_identifier(entry);
                for (measure_id, ident) in &measure_idents {
                    if norm == *ident || norm.contains(ident.as_str()) || ident.contains(&norm) {
                        index.link_measure(threat.id, *measure_id);
                    }
                }
            }
        }
        index
    }

    fn link_task(&mut self, threat_id: i64, task_id: i64) {
        self.threat_tasks.entry(threat_id).or_default().insert(task_id);
        self.task_threats.entry(task_id).or_default().insert(threat_id);
    }

    fn link_measure(&mut self, threat_id: i64, measure_id: i64) {
        self.threat_measures.entry(threat_id).or_default().insert(measure_id);
        self.measure_threats.entry(measure_id).or_default().insert(threat_id);
    }

    /// Threats linked to a measure, in dataset order.
    pub fn threats_for_measure<'a>(&self, measure_id: i64, store: &'a DataStore) -> Vec<&'a Threat> {
        let Some(ids) = self.measure_threats.get(&measure_id) else {
            return Vec::new();
        };
        store.threats.iter().filter(|t| ids.contains(&t.id)).collect()
    }

    /// Threats linked to a task, in dataset order.
    pub fn threats_for_task<'a>(&self, task_id: i64, store: &'a DataStore) -> Vec<&'a Threat> {
        let Some(ids) = self.task_threats.get(&task_id) else {
            return Vec::new();
        };
        store.threats.iter().filter(|t| ids.contains(&t.id)).collect()
    }

    /// Tasks linked to any threat in the input, in dataset order.
    pub fn tasks_for_threats<'a, I>(&self, threat_ids: I, store: &'a DataStore) -> Vec<&'a TacticalTask>
    where
        I: IntoIterator<Item = i64>,
    {
        let related = self.union_of(&self.threat_tasks, threat_ids);
        store
            .tactical_tasks
            .iter()
            .filter(|t| related.contains(&t.id))
            .collect()
    }

    /// Measures linked to any threat in the input, in dataset order.
    pub fn measures_for_threats<'a, I>(
        &self,
        threat_ids: I,
        store: &'a DataStore,
    ) -> Vec<&'a ProtectionMeasure>
    where
        I: IntoIterator<Item = i64>,
    {
        let related = self.union_of(&self.threat_measures, threat_ids);
        store
            .protection_measures
            .iter()
            .filter(|m| related.contains(&m.id))
            .collect()
    }

    fn union_of<I>(&self, map: &HashMap<i64, BTreeSet<i64>>, threat_ids: I) -> BTreeSet<i64>
    where
        I: IntoIterator<Item = i64>,
    {
        threat_ids
            .into_iter()
            .filter_map(|id| map.get(&id))
            .flatten()
            .copied()
            .collect()
    }
}

/// Best-effort task lookup for display annotation, not authoritative
/// filtering: exact normalized match, then task name inside the given
/// string, then the given string inside the task name. Each tier scans the
/// whole collection before falling through. A miss means the caller renders
/// the raw string unlinked.
pub fn find_task_by_name<'a>(name: &str, tasks: &'a [TacticalTask]) -> Option<&'a TacticalTask> {
    let needle = normalize_task_name(name);
    if needle.is_empty() {
        return None;
    }
    tasks
        .iter()
        .find(|t| normalize_task_name(&t.name) == needle)
        .or_else(|| tasks.iter().find(|t| needle.contains(&normalize_task_name(&t.name))))
        .or_else(|| tasks.iter().find(|t| normalize_task_name(&t.name).contains(&needle)))
}

/// Best-effort measure lookup for display annotation. Tiers: exact
/// identifier match, identifier inside the given text, text inside the
/// identifier, exact name match, name inside the text — all on normalized
/// strings.
pub fn find_measure_by_identifier<'a>(
    text: &str,
    measures: &'a [ProtectionMeasure],
) -> Option<&'a ProtectionMeasure> {
    let needle = normalize_measure_identifier(text);
    if needle.is_empty() || is_no_measure(&needle) {
        return None;
    }
    let ident = |m: &ProtectionMeasure| normalize_measure_identifier(&m.identifier);
    measures
        .iter()
        .find(|m| ident(m) == needle)
        .or_else(|| measures.iter().find(|m| !is_no_measure(&ident(m)) && needle.contains(&ident(m))))
        .or_else(|| measures.iter().find(|m| ident(m).contains(&needle)))
        .or_else(|| measures.iter().find(|m| m.name.trim() == needle))
        .or_else(|| measures.iter().find(|m| needle.contains(m.name.trim())))
}
