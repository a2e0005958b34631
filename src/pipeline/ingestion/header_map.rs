use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::domain::CanonicalField;

/// Normalize a raw header for lookup: trim, lowercase, collapse whitespace
/// runs to a single space. Total function; never fails.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Built-in synonym table: normalized header variant -> canonical field.
///
/// The "excpected time (est)" entry matches a long-standing typo in the
/// source spreadsheets and must stay.
static BUILTIN_SYNONYMS: Lazy<HashMap<&'static str, CanonicalField>> = Lazy::new(|| {
    use CanonicalField::*;
    HashMap::from([
        // Date
        ("date", Date),
        // Case Number
        ("case number", Id),
        ("case no", Id),
        ("case #", Id),
        ("caseno", Id),
        // Agent
        ("agent", Agent),
        ("agent name", Agent),
        // Assigned Time
        ("assigned time (9am) est", AssignedTime),
        ("assigned time", AssignedTime),
        ("assigned time est", AssignedTime),
        // Priority
        ("priority", Priority),
        // Expected Time
        ("expected time (est)", ExpectedTime),
        ("excpected time (est)", ExpectedTime),
        ("expected time", ExpectedTime),
        // Touched
        ("touched (est)", Touched),
        ("touched", Touched),
        ("touched time", Touched),
        // Touched Time Fix
        ("touched time fix (est)", TouchedTimeFix),
        ("touched time fix", TouchedTimeFix),
        // Status / TAT
        ("met/not met tat", Status),
        ("met / not met tat", Status),
        ("tat", Status),
        ("status", Status),
    ])
});

/// Immutable header mapping table, built once at startup.
///
/// Holds the compiled-in synonyms plus any extras supplied through config.
/// Extra synonym keys are normalized on insertion, so config entries match
/// regardless of their casing or spacing.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    extra: HashMap<String, CanonicalField>,
}

impl HeaderMap {
    /// Table with only the built-in synonyms.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Table extended with additional synonym -> field pairs.
    pub fn with_extra_synonyms<I, S>(synonyms: I) -> Self
    where
        I: IntoIterator<Item = (S, CanonicalField)>,
        S: AsRef<str>,
    {
        let extra = synonyms
            .into_iter()
            .map(|(k, v)| (normalize_header(k.as_ref()), v))
            .collect();
        Self { extra }
    }

    /// Resolve a raw header to its canonical field, if recognized.
    pub fn resolve(&self, raw_header: &str) -> Option<CanonicalField> {
        let key = normalize_header(raw_header);
        BUILTIN_SYNONYMS
            .get(key.as_str())
            .copied()
            .or_else(|| self.extra.get(&key).copied())
    }
}
