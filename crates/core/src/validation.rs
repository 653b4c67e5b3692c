//! Input validation utilities.
//!
//! This module contains functions for validating user inputs to ensure they meet
//! safety and correctness requirements before being used in operations.

use crate::{PatientError, PatientResult};

/// Validates that a patient id is safe to use as a record key.
///
/// The id is used as the key in the patient collection and in the snapshot
/// file, and is embedded into request paths by clients. This function applies
/// conservative guardrails:
/// - Rejects empty or whitespace-only strings
/// - Bounds the length to avoid pathological inputs
/// - Restricts characters to a conservative ASCII set safe for keys and paths
///
/// Leading and trailing whitespace is stripped, so `" P001 "` and `"P001"`
/// refer to the same record.
///
/// # Arguments
///
/// * `id` - The candidate patient id.
///
/// # Errors
///
/// Returns a `PatientError::Validation` naming the `id` field if the id is
/// invalid.
pub(crate) fn validate_patient_id(id: &str) -> PatientResult<String> {
    const MAX_ID_LEN: usize = 64;

    let id = id.trim();

    if id.is_empty() {
        return Err(PatientError::Validation {
            field: "id",
            reason: "cannot be empty".into(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(PatientError::Validation {
            field: "id",
            reason: format!("exceeds maximum length of {} characters", MAX_ID_LEN),
        });
    }

    let ok = id
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));

    if !ok {
        return Err(PatientError::Validation {
            field: "id",
            reason: "contains invalid characters (only alphanumeric, '.', '-', '_' allowed)"
                .into(),
        });
    }

    Ok(id.to_owned())
}
