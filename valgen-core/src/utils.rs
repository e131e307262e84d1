//! Shared string utilities.

/// Convert a string to snake_case (e.g., "ExclusiveMin" -> "exclusive_min")
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 && !result.ends_with('_') {
            result.push('_');
        }
        result.extend(c.to_lowercase());
    }
    result.replace('-', "_")
}

/// Normalize an attribute key for case-insensitive matching.
///
/// Underscores and dashes are dropped and letters lowercased, so
/// `exclusive_min`, `exclusiveMin` and `ExclusiveMin` all normalize to
/// `exclusivemin`.
pub fn normalize_key(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}
