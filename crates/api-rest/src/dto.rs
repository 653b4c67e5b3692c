//! Request and response bodies for the REST surface.
//!
//! These types define the wire shapes; all validation and derivation happens
//! in `aura-core`, which is why the request bodies carry loosely typed
//! fields (`i64` age, free-form gender) and the core reports the offending
//! field by name.

use aura_core::{Patient, PatientDraft};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

/// Simple confirmation envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

/// A patient record as returned by the API, derived fields included.
#[derive(Debug, Serialize, ToSchema)]
pub struct PatientRes {
    #[schema(example = "P001")]
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: String,
    /// Height in meters.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// `weight / height²`, rounded to two decimal places.
    pub bmi: f64,
    /// One of `underweight`, `normal`, `overweight`, `obese`.
    pub verdict: String,
}

impl From<&Patient> for PatientRes {
    fn from(patient: &Patient) -> Self {
        Self {
            id: patient.id.clone(),
            name: patient.name.to_string(),
            city: patient.city.to_string(),
            age: patient.age,
            gender: patient.gender.to_string(),
            height: patient.height,
            weight: patient.weight,
            bmi: patient.bmi,
            verdict: patient.verdict.to_string(),
        }
    }
}

/// Full id → record listing, as returned by `GET /view`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ViewRes {
    pub data: BTreeMap<String, PatientRes>,
}

/// Ordered record listing, as returned by `GET /sort`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListRes {
    pub data: Vec<PatientRes>,
}

/// Body for `POST /create`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePatientReq {
    #[schema(example = "P001")]
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: i64,
    /// `male`, `female` or `other`.
    pub gender: String,
    /// Height in meters.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
}

impl CreatePatientReq {
    pub fn into_draft(self) -> PatientDraft {
        PatientDraft {
            id: self.id,
            name: self.name,
            city: self.city,
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
        }
    }
}

/// Response for `POST /create`: confirmation plus the stored record.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatePatientRes {
    pub message: String,
    pub patient: PatientRes,
}

/// Body for `PUT /edit/{id}`.
///
/// All data fields are required; the stored record is replaced wholesale and
/// the derived fields recomputed. An `id` in the body is accepted but
/// ignored, the path id wins.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePatientReq {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub city: String,
    pub age: i64,
    /// `male`, `female` or `other`.
    pub gender: String,
    /// Height in meters.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
}

impl UpdatePatientReq {
    /// Drafts the replacement record for `target_id`, discarding any id
    /// carried in the body.
    pub fn into_draft(self, target_id: &str) -> PatientDraft {
        PatientDraft {
            id: target_id.to_string(),
            name: self.name,
            city: self.city,
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
        }
    }
}

/// Error body: every error response carries a `detail` message.
#[derive(Debug, Serialize, ToSchema)]
pub struct DetailRes {
    pub detail: String,
}

/// Query parameters for `GET /sort`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct SortQuery {
    /// Field to sort by: one of `height`, `weight`, `bmi`.
    #[serde(default)]
    pub sort_by: String,
    /// Sort order, `asc` (default) or `desc`.
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_order() -> String {
    "asc".to_string()
}
