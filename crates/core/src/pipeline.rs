//! Triage pipeline orchestration.
//!
//! Runs normalisation, red-flag evaluation, triage, topic retrieval and guidance in a fixed
//! order over one intake and assembles the result. The pipeline holds only read-only tables
//! and the guidance capability, so one instance serves concurrent requests.

use std::sync::Arc;

use crate::config::TriageTables;
use crate::constants::RESPONSE_DISCLAIMER;
use crate::error::CoreResult;
use crate::guidance::{GuidanceGenerator, GuidanceMode, GuidancePayload, GuidanceRequest};
use crate::intake::Intake;
use crate::lexicon::NormalizedSymptom;
use crate::red_flags::RedFlag;
use crate::retrieval::{retrieve_topics, SourceTopic};
use crate::triage::TriageResult;

/// Everything produced for one intake.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub intake: Intake,
    pub normalized_symptoms: Vec<NormalizedSymptom>,
    pub red_flags: Vec<RedFlag>,
    pub triage: TriageResult,
    pub retrieved_sources: Vec<SourceTopic>,
    pub llm_suggestions: GuidancePayload,
    pub disclaimer: &'static str,
}

/// The deterministic stages of the pipeline, before guidance.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub normalized_symptoms: Vec<NormalizedSymptom>,
    pub red_flags: Vec<RedFlag>,
    pub triage: TriageResult,
    pub retrieved_sources: Vec<SourceTopic>,
}

#[derive(Clone)]
pub struct TriagePipeline {
    tables: Arc<TriageTables>,
    guidance: Arc<dyn GuidanceGenerator>,
}

impl std::fmt::Debug for TriagePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriagePipeline")
            .field("guidance_mode", &self.guidance.mode())
            .finish_non_exhaustive()
    }
}

impl TriagePipeline {
    pub fn new(tables: Arc<TriageTables>, guidance: Arc<dyn GuidanceGenerator>) -> Self {
        Self { tables, guidance }
    }

    pub fn tables(&self) -> &TriageTables {
        &self.tables
    }

    pub fn guidance_mode(&self) -> GuidanceMode {
        self.guidance.mode()
    }

    /// Run the deterministic stages only: normalise, flag, triage and look up topics.
    pub fn assess(&self, intake: &Intake) -> Assessment {
        let text = intake.symptoms_text();
        let normalized_symptoms = self.tables.lexicon.normalize(text);
        let red_flags = self
            .tables
            .red_flags
            .evaluate(&normalized_symptoms, text, intake);
        let triage = self
            .tables
            .triage
            .classify(&red_flags, &normalized_symptoms, intake);
        let retrieved_sources = retrieve_topics(&normalized_symptoms);

        Assessment {
            normalized_symptoms,
            red_flags,
            triage,
            retrieved_sources,
        }
    }

    /// Run the full pipeline over one intake.
    ///
    /// # Errors
    ///
    /// Returns an error only from guidance generation: an upstream failure or a malformed
    /// model reply in model-assisted mode. Fallback mode never fails.
    pub async fn analyze(&self, intake: Intake) -> CoreResult<Analysis> {
        let assessment = self.assess(&intake);

        tracing::info!(
            level = %assessment.triage.level,
            symptoms = assessment.normalized_symptoms.len(),
            red_flags = assessment.red_flags.len(),
            mode = %self.guidance.mode(),
            "intake triaged"
        );

        let llm_suggestions = self
            .guidance
            .generate(&GuidanceRequest {
                triage: &assessment.triage,
                symptoms: &assessment.normalized_symptoms,
                intake: &intake,
                topics: &assessment.retrieved_sources,
            })
            .await?;

        Ok(Analysis {
            intake,
            normalized_symptoms: assessment.normalized_symptoms,
            red_flags: assessment.red_flags,
            triage: assessment.triage,
            retrieved_sources: assessment.retrieved_sources,
            llm_suggestions,
            disclaimer: RESPONSE_DISCLAIMER,
        })
    }
}
