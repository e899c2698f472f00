//! Identifier normalization for measure codes and tactical-task names.
//!
//! The source spreadsheets write "no protection measure assigned" under
//! several spellings depending on locale; all of them collapse to the single
//! canonical sentinel so equality checks and coverage stats agree. Matching
//! is case-insensitive throughout (one policy for both normalizers).

/// Canonical "no protection measure specified" sentinel.
pub const NO_MEASURE: &str = "Б/Н";

/// Alternative spellings of the sentinel found in source data.
const NO_MEASURE_SPELLINGS: &[&str] = &["Б/Н", "N/A", "N/A (Not Applicable)"];

/// Canonicalize a protection-measure identifier: trim, and collapse every
/// known "not applicable" spelling to [`NO_MEASURE`]. Idempotent.
pub fn normalize_measure_identifier(raw: &str) -> String {
    let trimmed = raw.trim();
    let lowered = trimmed.to_lowercase();
    let is_sentinel = NO_MEASURE_SPELLINGS
        .iter()
        .any(|s| lowered == s.to_lowercase());
    if is_sentinel {
        NO_MEASURE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Canonicalize a tactical-task name for lookup: trim + lowercase.
/// Task names have no "absent" sentinel.
pub fn normalize_task_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// True when a raw measure entry denotes "no measure" (blank or sentinel).
pub fn is_no_measure(raw: &str) -> bool {
    let norm = normalize_measure_identifier(raw);
    norm.is_empty() || norm == NO_MEASURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_spellings_are_equivalent() {
        assert_eq!(normalize_measure_identifier("Б/Н"), NO_MEASURE);
        assert_eq!(normalize_measure_identifier("N/A"), NO_MEASURE);
        assert_eq!(normalize_measure_identifier("N/A (Not Applicable)"), NO_MEASURE);
        assert_eq!(
            normalize_measure_identifier("Б/Н"),
            normalize_measure_identifier("N/A")
        );
    }

    #[test]
    fn sentinel_matching_is_case_insensitive() {
        assert_eq!(normalize_measure_identifier("n/a"), NO_MEASURE);
        assert_eq!(normalize_measure_identifier("б/н"), NO_MEASURE);
    }

    #[test]
    fn non_sentinel_is_trimmed_only() {
        assert_eq!(normalize_measure_identifier("  ЗИС.3  "), "ЗИС.3");
        assert_eq!(normalize_measure_identifier("УПД.2"), "УПД.2");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["  N/A ", "ЗИС.3", " Б/Н", "", "  упд.2  "] {
            let once = normalize_measure_identifier(raw);
            assert_eq!(normalize_measure_identifier(&once), once);
        }
    }

    #[test]
    fn task_name_trim_and_lowercase() {
        assert_eq!(normalize_task_name("  Эксфильтрация "), "эксфильтрация");
        assert_eq!(
            normalize_task_name("СБОР ИНФОРМАЦИИ"),
            normalize_task_name("сбор информации")
        );
    }

    #[test]
    fn no_measure_detects_blank_and_sentinel() {
        assert!(is_no_measure(""));
        assert!(is_no_measure("   "));
        assert!(is_no_measure("N/A"));
        assert!(!is_no_measure("ЗИС.3"));
    }
}
