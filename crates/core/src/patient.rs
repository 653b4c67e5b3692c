//! Patient record model and derived-field logic.
//!
//! A [`Patient`] only ever exists in validated form: callers hand over a
//! [`PatientDraft`] and [`Patient::from_draft`] either rejects it with a
//! field-level error or returns a record whose `bmi` and `verdict` have been
//! computed from `height` and `weight`. The derived fields are therefore
//! never stale and never caller-supplied.

use crate::validation::validate_patient_id;
use crate::{PatientError, PatientResult};
use aura_types::NonEmptyText;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Exclusive upper bound for `age` in years.
const MAX_AGE: i64 = 120;

/// Patient gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = PatientError;

    /// Parses a gender value. Spellings are exact, no trimming or case
    /// folding; `"others"` is accepted as a legacy spelling of `other` and
    /// normalised.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" | "others" => Ok(Gender::Other),
            _ => Err(PatientError::Validation {
                field: "gender",
                reason: "must be one of 'male', 'female', 'other'".into(),
            }),
        }
    }
}

/// Health classification derived from BMI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl Verdict {
    /// Classifies an **unrounded** BMI ratio. Thresholds are checked in
    /// ascending order and the first match wins: `< 18.5` underweight,
    /// `< 25` normal, `< 30` overweight, otherwise obese.
    ///
    /// Classification must run before the ratio is rounded for storage: a
    /// ratio of 18.49999 rounds to 18.5 but is still underweight.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Verdict::Underweight
        } else if bmi < 25.0 {
            Verdict::Normal
        } else if bmi < 30.0 {
            Verdict::Overweight
        } else {
            Verdict::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underweight => "underweight",
            Verdict::Normal => "normal",
            Verdict::Overweight => "overweight",
            Verdict::Obese => "obese",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Caller-supplied fields for a create or update, before validation.
#[derive(Debug, Clone)]
pub struct PatientDraft {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: i64,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
}

/// A validated patient record with derived fields populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    pub id: String,
    pub name: NonEmptyText,
    pub city: NonEmptyText,
    pub age: u32,
    pub gender: Gender,
    /// Height in meters.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// `weight / height²`, rounded to two decimal places.
    pub bmi: f64,
    pub verdict: Verdict,
}

impl Patient {
    /// Validates a draft and derives `bmi` and `verdict`.
    ///
    /// The verdict is classified on the full-precision ratio; the stored
    /// `bmi` is that ratio rounded to two decimal places.
    ///
    /// # Arguments
    ///
    /// * `draft` - The caller-supplied fields.
    ///
    /// # Returns
    ///
    /// A fully validated `Patient` with derived fields populated.
    ///
    /// # Errors
    ///
    /// Returns a `PatientError::Validation` naming the first offending field.
    pub fn from_draft(draft: PatientDraft) -> PatientResult<Self> {
        let id = validate_patient_id(&draft.id)?;
        let name = NonEmptyText::new(&draft.name).map_err(|_| PatientError::Validation {
            field: "name",
            reason: "cannot be empty".into(),
        })?;
        let city = NonEmptyText::new(&draft.city).map_err(|_| PatientError::Validation {
            field: "city",
            reason: "cannot be empty".into(),
        })?;
        let age = validate_age(draft.age)?;
        let gender = draft.gender.parse::<Gender>()?;
        let height = validate_measure("height", draft.height)?;
        let weight = validate_measure("weight", draft.weight)?;

        let ratio = bmi_ratio(height, weight);

        Ok(Self {
            id,
            name,
            city,
            age,
            gender,
            height,
            weight,
            bmi: round_to_2dp(ratio),
            verdict: Verdict::from_bmi(ratio),
        })
    }
}

/// BMI ratio `weight / height²` at full precision.
fn bmi_ratio(height_m: f64, weight_kg: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// Rounds half away from zero to two decimal places.
fn round_to_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn validate_age(age: i64) -> PatientResult<u32> {
    if !(1..MAX_AGE).contains(&age) {
        return Err(PatientError::Validation {
            field: "age",
            reason: format!("must be between 1 and {}", MAX_AGE - 1),
        });
    }
    Ok(age as u32)
}

fn validate_measure(field: &'static str, value: f64) -> PatientResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PatientError::Validation {
            field,
            reason: "must be a positive number".into(),
        });
    }
    Ok(value)
}
