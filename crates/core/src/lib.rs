//! # Aura Core
//!
//! Core business logic for the AuraHealth patient record manager.
//!
//! This crate contains pure data operations and snapshot persistence:
//! - Patient validation and the derived BMI / health-verdict fields
//! - The in-memory patient store with create/read/update/delete semantics
//! - Free-text search and stable field sorting over store snapshots
//! - JSON snapshot persistence under the configured data file
//!
//! **No API concerns**: HTTP servers, request DTOs, or status-code mapping belong in `api-rest`.

pub mod config;
pub mod error;
pub mod patient;
pub mod query;
pub mod service;
pub mod storage;
pub mod store;
mod validation;

pub use aura_types::NonEmptyText;
pub use config::{data_file_from_env_value, CoreConfig, DEFAULT_DATA_FILE};
pub use error::{PatientError, PatientResult};
pub use patient::{Gender, Patient, PatientDraft, Verdict};
pub use query::{SortDirection, SortField};
pub use service::PatientService;
pub use store::PatientStore;
