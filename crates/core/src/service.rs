//! Patient service and related types.
//!
//! This module provides the main service for patient operations. It wraps
//! the in-memory [`PatientStore`] in a lock shared across callers and keeps
//! the JSON snapshot in step with it: each mutation runs against a copy of
//! the store, the copy is written to the snapshot file, and only then does
//! it replace the shared store, all before the lock is released. A mutation
//! whose snapshot write fails leaves no trace in memory or on disk, and no
//! two writers can interleave a mutation with a save.

use crate::config::CoreConfig;
use crate::patient::{Patient, PatientDraft};
use crate::query::{self, SortDirection, SortField};
use crate::storage;
use crate::store::PatientStore;
use crate::PatientResult;
use std::sync::{Arc, RwLock};

/// Pure patient data operations - no API concerns
#[derive(Clone)]
pub struct PatientService {
    cfg: Arc<CoreConfig>,
    store: Arc<RwLock<PatientStore>>,
}

impl PatientService {
    /// Opens the service over the snapshot file named by the configuration.
    ///
    /// # Arguments
    ///
    /// * `cfg` - Startup configuration naming the snapshot file.
    ///
    /// # Returns
    ///
    /// A `PatientService` sharing one store across all of its clones.
    ///
    /// # Errors
    ///
    /// Returns a `PatientError` if the snapshot file exists but cannot be
    /// read or parsed.
    pub fn open(cfg: Arc<CoreConfig>) -> PatientResult<Self> {
        let store = storage::load(cfg.data_file())?;
        tracing::debug!(
            "loaded {} patient record(s) from {}",
            store.len(),
            cfg.data_file().display()
        );
        Ok(Self {
            cfg,
            store: Arc::new(RwLock::new(store)),
        })
    }

    /// Validates and inserts a new patient, then writes the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a `PatientError` on validation failure, duplicate id, or a
    /// failed snapshot write; the store is unchanged in every error case.
    pub fn create_patient(&self, draft: PatientDraft) -> PatientResult<Patient> {
        let patient = self.commit(|store| store.create(draft))?;
        tracing::debug!("created patient '{}'", patient.id);
        Ok(patient)
    }

    /// Looks up a single patient by id.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if no record has the given id.
    pub fn get_patient(&self, id: &str) -> PatientResult<Patient> {
        let store = self.store.read().expect("patient store lock poisoned");
        store.read(id).cloned()
    }

    /// Returns all patients in id order.
    pub fn list_patients(&self) -> Vec<Patient> {
        let store = self.store.read().expect("patient store lock poisoned");
        store.list()
    }

    /// Replaces the record under `id`, then writes the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a `PatientError` if the id is unknown, a field is invalid, or
    /// the snapshot write fails; the store is unchanged in every error case.
    pub fn update_patient(&self, id: &str, draft: PatientDraft) -> PatientResult<Patient> {
        let patient = self.commit(|store| store.update(id, draft))?;
        tracing::debug!("updated patient '{}'", patient.id);
        Ok(patient)
    }

    /// Removes the record under `id`, then writes the snapshot.
    ///
    /// # Errors
    ///
    /// Returns a `PatientError` if the id is unknown or the snapshot write
    /// fails; the store is unchanged in every error case.
    pub fn delete_patient(&self, id: &str) -> PatientResult<Patient> {
        let patient = self.commit(|store| store.delete(id))?;
        tracing::debug!("deleted patient '{}'", patient.id);
        Ok(patient)
    }

    /// Applies `mutate` to a copy of the store, persists the copy, and swaps
    /// it in. The shared store changes only if both steps succeed.
    fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut PatientStore) -> PatientResult<T>,
    ) -> PatientResult<T> {
        let mut store = self.store.write().expect("patient store lock poisoned");
        let mut working = store.clone();
        let value = mutate(&mut working)?;
        storage::save(self.cfg.data_file(), &working)?;
        *store = working;
        Ok(value)
    }

    /// Free-text search over a snapshot of the store.
    pub fn search_patients(&self, term: &str) -> Vec<Patient> {
        query::search(&self.list_patients(), term)
    }

    /// Ordered listing over a snapshot of the store.
    pub fn sort_patients(&self, field: SortField, direction: SortDirection) -> Vec<Patient> {
        query::sort(&self.list_patients(), field, direction)
    }
}
