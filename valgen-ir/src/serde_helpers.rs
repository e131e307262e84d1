use std::sync::Arc;

use serde::Serializer;
use serde::ser::SerializeSeq;

use crate::check::ValidationRule;

/// Serialize rule trait objects by their display form, e.g. `length(min=4)`.
pub fn serialize_rules<S>(rules: &[Arc<dyn ValidationRule>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(rules.len()))?;
    for rule in rules {
        seq.serialize_element(&rule.to_string())?;
    }
    seq.end()
}
