//! Tactical-task (attacker goal) reference record.

use serde::{Deserialize, Serialize};

/// An ATT&CK-style tactical task linked to threats by name matching.
///
/// `related_threats` and `threat_count` are denormalized by the offline
/// dataset producer; they are displayed as-is. Live threat↔task linkage is
/// always recomputed from `Threat::tactical_tasks` by the cross-reference
/// index, never read from these fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TacticalTask {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub related_threats: Vec<String>,
    #[serde(default)]
    pub threat_count: i64,
}
