//! Generation flows.
//!
//! Each flow is one input → prompt → external-call → output unit: an input
//! contract with per-field validation, a prompt template bound to the
//! validated input, exactly one call to the generation backend, and
//! schema-validation of the raw result. Flows never touch the history store.

pub mod knowledge_base;
pub mod local_content;
pub mod visual_aid;
pub mod worksheets;

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

/// Validate a raw model result against a flow's output schema.
///
/// # Errors
///
/// Returns `Error::Generation` when the value does not deserialize into the
/// expected shape; partial results are never returned.
pub(crate) fn validate_output<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| Error::Generation(format!("response did not match the expected shape: {e}")))
}

/// Reject a text field shorter than `min` characters.
pub(crate) fn require_min_chars(field: &'static str, value: &str, min: usize) -> Result<()> {
    if value.trim().chars().count() < min {
        return Err(Error::validation(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    Ok(())
}
