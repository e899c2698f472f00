//! Threat catalogue record and its multi-valued field splitting rules.

use serde::{Deserialize, Serialize};

/// A security-threat record from the static catalogue.
///
/// `tactical_tasks` and `protection_measures` entries may themselves be
/// comma-separated lists (legacy denormalization in the source spreadsheets);
/// all matching goes through the split helpers below, never the raw entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Threat {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// External FSTEC catalogue number; 0 means "not assigned".
    #[serde(default)]
    pub fstec_id: i64,
    #[serde(default)]
    pub tactical_tasks: Vec<String>,
    #[serde(default)]
    pub violator: Vec<String>,
    #[serde(default)]
    pub object: Vec<String>,
    #[serde(default)]
    pub confidentiality: bool,
    #[serde(default)]
    pub integrity: bool,
    #[serde(default)]
    pub availability: bool,
    #[serde(default)]
    pub protection_measures: Vec<String>,
}

impl Threat {
    /// Individual tactical-task names: every entry comma-split, trimmed,
    /// empties dropped.
    pub fn tactical_task_entries(&self) -> impl Iterator<Item = &str> {
        split_entries(&self.tactical_tasks)
    }

    /// Individual protection-measure identifiers, comma-split and trimmed.
    /// The `Б/Н` sentinel is NOT filtered here; callers that need real
    /// measures only must normalize and skip it themselves.
    pub fn protection_measure_entries(&self) -> impl Iterator<Item = &str> {
        split_entries(&self.protection_measures)
    }

    /// True when at least one CIA flag is set.
    pub fn has_cia_impact(&self) -> bool {
        self.confidentiality || self.integrity || self.availability
    }
}

/// Comma-split every entry of a multi-valued field, trim, drop empties.
fn split_entries(entries: &[String]) -> impl Iterator<Item = &str> {
    entries
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threat_with_tasks(tasks: &[&str]) -> Threat {
        Threat {
            id: 1,
            name: "t".into(),
            description: String::new(),
            fstec_id: 0,
            tactical_tasks: tasks.iter().map(|s| s.to_string()).collect(),
            violator: vec![],
            object: vec![],
            confidentiality: false,
            integrity: false,
            availability: false,
            protection_measures: vec![],
        }
    }

    #[test]
    fn tactical_task_entries_split_on_comma() {
        let t = threat_with_tasks(&["Сбор информации, Эксфильтрация", "Закрепление"]);
        let entries: Vec<&str> = t.tactical_task_entries().collect();
        assert_eq!(entries, vec!["Сбор информации", "Эксфильтрация", "Закрепление"]);
    }

    #[test]
    fn split_drops_blank_parts() {
        let t = threat_with_tasks(&[" , Эксфильтрация, ", ""]);
        let entries: Vec<&str> = t.tactical_task_entries().collect();
        assert_eq!(entries, vec!["Эксфильтрация"]);
    }

    #[test]
    fn camel_case_wire_names() {
        let json = serde_json::json!({
            "id": 7,
            "name": "Угроза перехвата данных",
            "description": "",
            "fstecId": 222,
            "tacticalTasks": ["Сбор информации"],
            "violator": ["Внешний нарушитель"],
            "object": ["Сетевой трафик"],
            "confidentiality": true,
            "integrity": false,
            "availability": false,
            "protectionMeasures": ["ЗИС.3"]
        });
        let t: Threat = serde_json::from_value(json).unwrap();
        assert_eq!(t.fstec_id, 222);
        assert_eq!(t.protection_measures, vec!["ЗИС.3"]);
        assert!(t.has_cia_impact());
    }

    #[test]
    fn missing_optional_fields_default() {
        let t: Threat =
            serde_json::from_value(serde_json::json!({"id": 1, "name": "x", "description": ""}))
                .unwrap();
        assert_eq!(t.fstec_id, 0);
        assert!(t.tactical_tasks.is_empty());
        assert!(!t.has_cia_impact());
    }
}
