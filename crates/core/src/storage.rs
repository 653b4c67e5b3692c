//! JSON snapshot persistence for the patient store.
//!
//! The snapshot is a single pretty-printed JSON object mapping patient id to
//! record, derived fields included. The file copy of `bmi` and `verdict` is
//! informational only: on load every record is re-validated and re-derived
//! from its height and weight, so hand-edited or stale derived fields can
//! never re-enter the store. Records that fail validation are skipped with a
//! warning; a syntactically broken file is reported as an error rather than
//! silently emptied.

use crate::patient::PatientDraft;
use crate::store::PatientStore;
use crate::{PatientError, PatientResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// Caller-supplied fields as they appear in the snapshot file. The record's
/// id lives in the surrounding map key; `bmi` and `verdict` are ignored.
#[derive(Debug, Deserialize)]
struct StoredPatient {
    name: String,
    city: String,
    age: i64,
    gender: String,
    height: f64,
    weight: f64,
}

/// Loads a store from the snapshot file at `path`.
///
/// A missing file is not an error and loads as an empty store.
///
/// # Errors
///
/// Returns `PatientError::FileRead` if the file exists but cannot be read,
/// or `PatientError::Deserialization` if it is not a JSON object.
pub fn load(path: &Path) -> PatientResult<PatientStore> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(PatientStore::new()),
        Err(e) => return Err(PatientError::FileRead(e)),
    };

    let raw: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(&contents).map_err(PatientError::Deserialization)?;

    let mut store = PatientStore::new();
    for (id, value) in raw {
        let stored: StoredPatient = match serde_json::from_value(value) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("skipping malformed record '{}' in {}: {}", id, path.display(), e);
                continue;
            }
        };

        let draft = PatientDraft {
            id,
            name: stored.name,
            city: stored.city,
            age: stored.age,
            gender: stored.gender,
            height: stored.height,
            weight: stored.weight,
        };

        if let Err(e) = store.create(draft) {
            tracing::warn!("skipping invalid record in {}: {}", path.display(), e);
        }
    }

    Ok(store)
}

/// Writes the full store to the snapshot file at `path`, replacing any
/// previous contents.
///
/// # Errors
///
/// Returns `PatientError::Serialization` or `PatientError::FileWrite` on
/// failure. The in-memory store is unaffected either way.
pub fn save(path: &Path, store: &PatientStore) -> PatientResult<()> {
    let json =
        serde_json::to_string_pretty(store.records()).map_err(PatientError::Serialization)?;
    std::fs::write(path, json).map_err(PatientError::FileWrite)
}
