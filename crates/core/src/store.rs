//! The canonical in-memory patient collection.
//!
//! `PatientStore` owns the id → record mapping and enforces the collection
//! invariants: exactly one record per id, and derived fields recomputed on
//! every admission. It is a plain single-threaded structure; concurrent
//! access and persistence are layered on top by
//! [`PatientService`](crate::service::PatientService).

use crate::patient::{Patient, PatientDraft};
use crate::{PatientError, PatientResult};
use std::collections::BTreeMap;

/// In-memory patient collection keyed by id.
///
/// A `BTreeMap` keeps listings in deterministic id order.
#[derive(Clone, Debug, Default)]
pub struct PatientStore {
    records: BTreeMap<String, Patient>,
}

impl PatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the draft and inserts the resulting record.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::Validation` if any field is invalid, or
    /// `PatientError::DuplicateId` if a record with the same id already
    /// exists. On error the collection is left untouched.
    pub fn create(&mut self, draft: PatientDraft) -> PatientResult<Patient> {
        let patient = Patient::from_draft(draft)?;
        if self.records.contains_key(&patient.id) {
            return Err(PatientError::DuplicateId(patient.id));
        }
        self.records.insert(patient.id.clone(), patient.clone());
        Ok(patient)
    }

    /// Looks up a single record by id.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if no record has the given id.
    pub fn read(&self, id: &str) -> PatientResult<&Patient> {
        self.records
            .get(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))
    }

    /// Returns all records in id order.
    pub fn list(&self) -> Vec<Patient> {
        self.records.values().cloned().collect()
    }

    /// Replaces the record stored under `id` with a freshly validated one.
    ///
    /// The target id wins: any id carried inside the draft is ignored, so a
    /// record can never change identity through an update. Derived fields
    /// are recomputed from the new height and weight.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if no record has the given id, or
    /// `PatientError::Validation` if any field is invalid. On error the
    /// existing record is left untouched.
    pub fn update(&mut self, id: &str, draft: PatientDraft) -> PatientResult<Patient> {
        if !self.records.contains_key(id) {
            return Err(PatientError::NotFound(id.to_string()));
        }
        let patient = Patient::from_draft(PatientDraft {
            id: id.to_string(),
            ..draft
        })?;
        self.records.insert(patient.id.clone(), patient.clone());
        Ok(patient)
    }

    /// Removes and returns the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns `PatientError::NotFound` if no record has the given id, so
    /// deleting the same id twice fails the second time.
    pub fn delete(&mut self, id: &str) -> PatientResult<Patient> {
        self.records
            .remove(id)
            .ok_or_else(|| PatientError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The underlying map, for snapshot serialisation.
    pub(crate) fn records(&self) -> &BTreeMap<String, Patient> {
        &self.records
    }
}
