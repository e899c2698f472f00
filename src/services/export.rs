//! Export of a filtered threat collection to download formats.
//!
//! Pure formatting over the filter engine's output: JSON keeps the wire
//! shape, CSV/TSV flatten multi-valued fields with `"; "` and render CIA
//! flags as `+`/`-`, TXT emits human-readable blocks.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::threat::Threat;

/// Supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
    Tsv,
    Txt,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json; charset=utf-8",
            Self::Csv => "text/csv; charset=utf-8",
            Self::Tsv => "text/tab-separated-values; charset=utf-8",
            Self::Txt => "text/plain; charset=utf-8",
        }
    }

    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Txt => "txt",
        }
    }
}

const COLUMNS: [&str; 11] = [
    "id",
    "name",
    "description",
    "fstecId",
    "tacticalTasks",
    "violator",
    "object",
    "confidentiality",
    "integrity",
    "availability",
    "protectionMeasures",
];

/// Serialize threats in the requested format.
pub fn export_threats(threats: &[&Threat], format: ExportFormat) -> Result<String, AppError> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(threats)?),
        ExportFormat::Csv => delimited(threats, b','),
        ExportFormat::Tsv => delimited(threats, b'\t'),
        ExportFormat::Txt => Ok(plain_text(threats)),
    }
}

fn delimited(threats: &[&Threat], delimiter: u8) -> Result<String, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record(COLUMNS)?;
    for threat in threats {
        writer.write_record([
            threat.id.to_string(),
            threat.name.clone(),
            threat.description.clone(),
            threat.fstec_id.to_string(),
            threat.tactical_tasks.join("; "),
            threat.violator.join("; "),
            threat.object.join("; "),
            flag(threat.confidentiality).to_string(),
            flag(threat.integrity).to_string(),
            flag(threat.availability).to_string(),
            threat.protection_measures.join("; "),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
}

fn plain_text(threats: &[&Threat]) -> String {
    let mut out = String::new();
    for threat in threats {
        out.push_str(&format!("#{} {}\n", threat.id, threat.name));
        if threat.fstec_id > 0 {
            out.push_str(&format!("FSTEC: УБИ.{:03}\n", threat.fstec_id));
        }
        if !threat.description.is_empty() {
            out.push_str(&threat.description);
            out.push('\n');
        }
        push_list(&mut out, "Tactical tasks", &threat.tactical_tasks);
        push_list(&mut out, "Violators", &threat.violator);
        push_list(&mut out, "Objects", &threat.object);
        out.push_str(&format!(
            "CIA: C{} I{} A{}\n",
            flag(threat.confidentiality),
            flag(threat.integrity),
            flag(threat.availability)
        ));
        push_list(&mut out, "Protection measures", &threat.protection_measures);
        out.push_str("---\n");
    }
    out
}

fn push_list(out: &mut String, label: &str, values: &[String]) {
    if !values.is_empty() {
        out.push_str(&format!("{label}: {}\n", values.join("; ")));
    }
}

fn flag(value: bool) -> char {
    if value {
        '+'
    } else {
        '-'
    }
}
