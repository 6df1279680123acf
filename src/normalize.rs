//! Free-text symptom normalization.
//!
//! User input and vocabulary columns are compared through a single canonical
//! form so that `"Skin Rash"`, `"skin_rash"` and `" SKIN_RASH "` all name the
//! same feature.

/// Canonical comparison form of a symptom name: trimmed, lower-cased,
/// internal spaces replaced with underscores.
pub fn canonical(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Splits a raw comma-separated input line into canonical tokens.
///
/// Empty pieces (consecutive commas, trailing commas, whitespace-only input)
/// are dropped. Duplicates are kept; the encoder sets the same bit twice,
/// which is idempotent.
pub fn parse_symptom_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(canonical)
        .filter(|tok| !tok.is_empty())
        .collect()
}
