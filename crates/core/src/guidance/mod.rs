//! Guarded self-care guidance.
//!
//! Guidance comes from a [`GuidanceGenerator`] chosen once at startup:
//! - [`FallbackGuidance`] returns one of two canned payloads and never does I/O.
//! - [`ModelGuidance`] asks an external text-generation service for a JSON payload under a
//!   fixed safety instruction.
//!
//! Both produce a [`GuidancePayload`] with a non-empty disclaimer.

mod fallback;
mod model;
pub mod prompt;

pub use fallback::FallbackGuidance;
pub use model::ModelGuidance;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::intake::Intake;
use crate::lexicon::NormalizedSymptom;
use crate::retrieval::SourceTopic;
use crate::triage::TriageResult;

/// Structured self-care advice. Exactly these six fields; unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuidancePayload {
    pub summary: String,
    pub what_to_do_now: Vec<String>,
    pub what_to_avoid: Vec<String>,
    pub monitoring_signs: Vec<String>,
    pub when_to_seek_help: String,
    pub disclaimer: String,
}

/// Everything guidance generation may look at for one intake.
#[derive(Debug, Clone, Copy)]
pub struct GuidanceRequest<'a> {
    pub triage: &'a TriageResult,
    pub symptoms: &'a [NormalizedSymptom],
    pub intake: &'a Intake,
    pub topics: &'a [SourceTopic],
}

/// Which guidance strategy the process is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceMode {
    Fallback,
    Model,
}

impl GuidanceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            GuidanceMode::Fallback => "fallback",
            GuidanceMode::Model => "model",
        }
    }
}

impl std::fmt::Display for GuidanceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces guidance for one triaged intake.
#[async_trait]
pub trait GuidanceGenerator: Send + Sync {
    fn mode(&self) -> GuidanceMode;

    async fn generate(&self, request: &GuidanceRequest<'_>) -> CoreResult<GuidancePayload>;
}
