//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. The intent is to avoid reading process-wide environment variables
//! during request handling, which can lead to inconsistent behaviour in multi-threaded runtimes
//! and test harnesses.

use crate::{PatientError, PatientResult};
use std::path::{Path, PathBuf};

/// File used for the patient snapshot when no override is configured.
pub const DEFAULT_DATA_FILE: &str = "patients.json";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_file: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(data_file: PathBuf) -> PatientResult<Self> {
        if data_file.as_os_str().is_empty() {
            return Err(PatientError::InvalidInput(
                "data file path cannot be empty".into(),
            ));
        }

        Ok(Self { data_file })
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

/// Resolve the patient data file from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default snapshot file
/// in the current working directory.
pub fn data_file_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}
