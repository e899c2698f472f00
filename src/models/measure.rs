//! Regulatory protection-measure reference record.

use serde::{Deserialize, Serialize};

/// A protection measure from the regulatory catalogue.
///
/// `identifier` is the regulatory code (e.g. `ЗИС.3`); the `Б/Н` sentinel
/// spellings are canonicalized by `services::normalize` before any matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionMeasure {
    pub id: i64,
    pub name: String,
    pub identifier: String,
    #[serde(default)]
    pub regulatory_document: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case() {
        let m: ProtectionMeasure = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Защита информационной системы",
            "identifier": "ЗИС.3",
            "regulatoryDocument": "Приказ ФСТЭК №17"
        }))
        .unwrap();
        assert_eq!(m.identifier, "ЗИС.3");
        assert_eq!(m.regulatory_document, "Приказ ФСТЭК №17");
    }
}
