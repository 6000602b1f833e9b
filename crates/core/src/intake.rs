//! Intake record types.
//!
//! An [`Intake`] is built once per request, validated at construction and never mutated. Vitals
//! fields are independently optional; `None` means "not measured" and is never read as zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage_types::{Age, NonEmptyText};

use crate::error::CoreResult;
use crate::validation::{validate_duration_hours, validate_symptoms_text_len, validate_vitals};

/// Sex as reported on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
    Other,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
            Sex::Other => "other",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sex {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(Sex::Female),
            "male" => Ok(Sex::Male),
            "other" => Ok(Sex::Other),
            other => Err(crate::CoreError::InvalidInput(format!(
                "sex must be one of female, male, other; got {other:?}"
            ))),
        }
    }
}

/// Optional vital signs measured at intake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub temp_c: Option<f64>,
    pub hr_bpm: Option<u16>,
    pub spo2: Option<u8>,
}

/// Unvalidated intake fields, as supplied by a caller.
#[derive(Debug, Clone)]
pub struct IntakeFields {
    pub age: i64,
    pub sex: Sex,
    pub pregnant: Option<bool>,
    pub symptoms_text: String,
    pub onset: Option<DateTime<Utc>>,
    pub duration_hours: Option<f64>,
    pub conditions: Vec<String>,
    pub meds: Vec<String>,
    pub allergies: Vec<String>,
    pub vitals: Option<Vitals>,
}

/// A validated symptom intake.
#[derive(Debug, Clone, PartialEq)]
pub struct Intake {
    age: Age,
    sex: Sex,
    pregnant: Option<bool>,
    symptoms_text: NonEmptyText,
    onset: Option<DateTime<Utc>>,
    duration_hours: Option<f64>,
    conditions: Vec<String>,
    meds: Vec<String>,
    allergies: Vec<String>,
    vitals: Option<Vitals>,
}

impl Intake {
    /// Validates raw fields and builds an `Intake`.
    ///
    /// # Errors
    ///
    /// Returns a validation [`CoreError`](crate::CoreError) if the age is outside `0..=120`,
    /// the symptom text is blank or too long, or a duration or vitals reading is out of range.
    pub fn new(fields: IntakeFields) -> CoreResult<Self> {
        let age = Age::new(fields.age)?;
        let symptoms_text = NonEmptyText::new(&fields.symptoms_text)?;
        validate_symptoms_text_len(symptoms_text.as_str())?;
        validate_duration_hours(fields.duration_hours)?;
        if let Some(vitals) = &fields.vitals {
            validate_vitals(vitals)?;
        }

        Ok(Self {
            age,
            sex: fields.sex,
            pregnant: fields.pregnant,
            symptoms_text,
            onset: fields.onset,
            duration_hours: fields.duration_hours,
            conditions: fields.conditions,
            meds: fields.meds,
            allergies: fields.allergies,
            vitals: fields.vitals,
        })
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn pregnant(&self) -> Option<bool> {
        self.pregnant
    }

    /// True only when pregnancy was explicitly reported.
    pub fn is_pregnant(&self) -> bool {
        self.pregnant == Some(true)
    }

    pub fn symptoms_text(&self) -> &str {
        self.symptoms_text.as_str()
    }

    pub fn onset(&self) -> Option<DateTime<Utc>> {
        self.onset
    }

    pub fn duration_hours(&self) -> Option<f64> {
        self.duration_hours
    }

    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn meds(&self) -> &[String] {
        &self.meds
    }

    pub fn allergies(&self) -> &[String] {
        &self.allergies
    }

    pub fn vitals(&self) -> Option<&Vitals> {
        self.vitals.as_ref()
    }

    /// Measured SpO₂, if any.
    pub fn spo2(&self) -> Option<u8> {
        self.vitals.and_then(|v| v.spo2)
    }

    /// Measured temperature in °C, if any.
    pub fn temp_c(&self) -> Option<f64> {
        self.vitals.and_then(|v| v.temp_c)
    }
}
