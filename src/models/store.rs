//! Root dataset document: the three entity collections plus generation
//! metadata. Loaded once, immutable for the process lifetime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::measure::ProtectionMeasure;
use crate::models::task::TacticalTask;
use crate::models::threat::Threat;

/// Generation metadata written by the offline CSV→JSON producer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatasetMetadata {
    pub generated_at: DateTime<Utc>,
    #[serde(default)]
    pub threat_count: i64,
    #[serde(default)]
    pub measure_count: i64,
    #[serde(default)]
    pub task_count: i64,
}

/// The full read-only dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataStore {
    #[serde(default)]
    pub threats: Vec<Threat>,
    #[serde(default)]
    pub protection_measures: Vec<ProtectionMeasure>,
    #[serde(default)]
    pub tactical_tasks: Vec<TacticalTask>,
    pub metadata: DatasetMetadata,
}

impl DataStore {
    /// Empty store substituted on load failure: zeroed counts, current
    /// timestamp. Callers see "no data", never an error.
    pub fn empty() -> Self {
        Self {
            threats: Vec::new(),
            protection_measures: Vec::new(),
            tactical_tasks: Vec::new(),
            metadata: DatasetMetadata {
                generated_at: Utc::now(),
                threat_count: 0,
                measure_count: 0,
                task_count: 0,
            },
        }
    }

    pub fn threat_by_id(&self, id: i64) -> Option<&Threat> {
        self.threats.iter().find(|t| t.id == id)
    }

    pub fn measure_by_id(&self, id: i64) -> Option<&ProtectionMeasure> {
        self.protection_measures.iter().find(|m| m.id == id)
    }

    pub fn task_by_id(&self, id: i64) -> Option<&TacticalTask> {
        self.tactical_tasks.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_zeroed_counts() {
        let store = DataStore::empty();
        assert!(store.threats.is_empty());
        assert_eq!(store.metadata.threat_count, 0);
        assert_eq!(store.metadata.measure_count, 0);
        assert_eq!(store.metadata.task_count, 0);
    }

    #[test]
    fn by_id_miss_is_none() {
        let store = DataStore::empty();
        assert!(store.threat_by_id(1).is_none());
        assert!(store.measure_by_id(1).is_none());
        assert!(store.task_by_id(1).is_none());
    }

    #[test]
    fn by_id_hit() {
        let mut store = DataStore::empty();
        store.tactical_tasks.push(TacticalTask {
            id: 42,
            name: "Эксфильтрация".into(),
            description: String::new(),
            related_threats: vec![],
            threat_count: 0,
        });
        assert_eq!(store.task_by_id(42).unwrap().name, "Эксфильтрация");
    }
}
