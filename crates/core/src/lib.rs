//! # Triage Core
//!
//! Core business logic for the symptom triage service.
//!
//! This crate contains the triage pipeline and its parts:
//! - Symptom normalisation against a fixed lexicon (`lexicon`)
//! - Deterministic red-flag rules (`red_flags`) and triage classification (`triage`)
//! - Reference topic lookup (`retrieval`)
//! - Guarded guidance generation, canned or model-assisted (`guidance`, `llm`)
//! - Orchestration over one intake (`pipeline`)
//!
//! **No API concerns**: HTTP servers, wire formats and CLI parsing belong in `api-rest`,
//! `api-shared` and `triage-cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod guidance;
pub mod intake;
pub mod lexicon;
pub mod llm;
pub mod pipeline;
pub mod red_flags;
pub mod retrieval;
pub mod triage;
pub mod validation;

pub use config::{build_guidance, llm_settings_from_env_values, LlmSettings, TriageTables};
pub use constants::{DEFAULT_REST_ADDR, RESPONSE_DISCLAIMER};
pub use error::{CoreError, CoreResult};
pub use guidance::{
    FallbackGuidance, GuidanceGenerator, GuidanceMode, GuidancePayload, GuidanceRequest,
    ModelGuidance,
};
pub use intake::{Intake, IntakeFields, Sex, Vitals};
pub use lexicon::{Lexicon, LexiconEntry, NormalizedSymptom, PhraseScore};
pub use llm::{ChatCompletionsClient, LlmClient};
pub use pipeline::{Analysis, Assessment, TriagePipeline};
pub use red_flags::{RedFlag, RedFlagRules};
pub use retrieval::{retrieve_topics, SourceTopic};
pub use triage::{TriageLevel, TriageResult, TriageRules};
