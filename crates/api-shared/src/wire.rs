//! JSON wire types for the triage APIs.
//!
//! These mirror the domain types in `triage-core` but stay plain and schema-friendly so they
//! can be documented with OpenAPI. Conversions live here: inbound intakes are validated on the
//! way into the domain, and analysis results are flattened on the way out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Optional vital signs. Omitted fields mean "not measured".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Vitals {
    /// Body temperature in °C
    #[serde(default)]
    pub temp_c: Option<f64>,
    /// Heart rate in beats per minute
    #[serde(default)]
    pub hr_bpm: Option<u16>,
    /// Oxygen saturation in percent (0-100)
    #[serde(default)]
    pub spo2: Option<u8>,
}

/// Symptom intake as submitted by a caller and echoed in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Intake {
    /// Age in years (0-120)
    pub age: i64,
    /// One of `female`, `male`, `other`
    pub sex: String,
    #[serde(default)]
    pub pregnant: Option<bool>,
    pub symptoms_text: String,
    #[serde(default)]
    pub onset: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_hours: Option<f64>,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub meds: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub vitals: Option<Vitals>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NormalizedSymptom {
    pub label: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Triage {
    /// One of `EMERGENCY`, `URGENT`, `ROUTINE`, `SELF_CARE`
    pub level: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SourceTopic {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GuidancePayload {
    pub summary: String,
    pub what_to_do_now: Vec<String>,
    pub what_to_avoid: Vec<String>,
    pub monitoring_signs: Vec<String>,
    pub when_to_seek_help: String,
    pub disclaimer: String,
}

/// Full result of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRes {
    pub intake: Intake,
    pub normalized_symptoms: Vec<NormalizedSymptom>,
    pub red_flags: Vec<String>,
    pub triage: Triage,
    pub retrieved_sources: Vec<SourceTopic>,
    pub llm_suggestions: GuidancePayload,
    pub disclaimer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    /// `fallback` or `model`
    pub guidance_mode: String,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl TryFrom<Intake> for triage_core::Intake {
    type Error = triage_core::CoreError;

    fn try_from(req: Intake) -> Result<Self, Self::Error> {
        triage_core::Intake::new(triage_core::IntakeFields {
            age: req.age,
            sex: req.sex.parse()?,
            pregnant: req.pregnant,
            symptoms_text: req.symptoms_text,
            onset: req.onset,
            duration_hours: req.duration_hours,
            conditions: req.conditions,
            meds: req.meds,
            allergies: req.allergies,
            vitals: req.vitals.map(|v| triage_core::Vitals {
                temp_c: v.temp_c,
                hr_bpm: v.hr_bpm,
                spo2: v.spo2,
            }),
        })
    }
}

/// Echo of a validated intake: text comes back trimmed and sex in its canonical lowercase form.
impl From<&triage_core::Intake> for Intake {
    fn from(intake: &triage_core::Intake) -> Self {
        Self {
            age: i64::from(intake.age().years()),
            sex: intake.sex().to_string(),
            pregnant: intake.pregnant(),
            symptoms_text: intake.symptoms_text().to_owned(),
            onset: intake.onset(),
            duration_hours: intake.duration_hours(),
            conditions: intake.conditions().to_vec(),
            meds: intake.meds().to_vec(),
            allergies: intake.allergies().to_vec(),
            vitals: intake.vitals().map(|v| Vitals {
                temp_c: v.temp_c,
                hr_bpm: v.hr_bpm,
                spo2: v.spo2,
            }),
        }
    }
}

impl From<triage_core::GuidancePayload> for GuidancePayload {
    fn from(p: triage_core::GuidancePayload) -> Self {
        Self {
            summary: p.summary,
            what_to_do_now: p.what_to_do_now,
            what_to_avoid: p.what_to_avoid,
            monitoring_signs: p.monitoring_signs,
            when_to_seek_help: p.when_to_seek_help,
            disclaimer: p.disclaimer,
        }
    }
}

impl From<triage_core::Analysis> for AnalyzeRes {
    fn from(analysis: triage_core::Analysis) -> Self {
        Self {
            intake: Intake::from(&analysis.intake),
            normalized_symptoms: analysis
                .normalized_symptoms
                .into_iter()
                .map(|s| NormalizedSymptom {
                    label: s.label,
                    code: s.code,
                })
                .collect(),
            red_flags: analysis
                .red_flags
                .iter()
                .map(|f| f.description().to_owned())
                .collect(),
            triage: Triage {
                level: analysis.triage.level.as_str().to_owned(),
                reason: analysis.triage.reason,
            },
            retrieved_sources: analysis
                .retrieved_sources
                .into_iter()
                .map(|t| SourceTopic {
                    title: t.title,
                    url: t.url,
                })
                .collect(),
            llm_suggestions: analysis.llm_suggestions.into(),
            disclaimer: analysis.disclaimer.to_owned(),
        }
    }
}
