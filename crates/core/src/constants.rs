//! Constants used throughout the triage core crate.
//!
//! Thresholds, keyword lists and canned text live here so the rule tables, guidance and
//! configuration all read from one place.

/// Minimum partial-match score (0-100) for a lexicon phrase to count as a match.
pub const MATCH_THRESHOLD: u8 = 80;

/// SpO₂ readings strictly below this percentage raise a red flag.
pub const LOW_SPO2_THRESHOLD: u8 = 92;

/// Temperature (°C) at or above which an infant is treated as febrile.
pub const INFANT_FEVER_TEMP_C: f64 = 38.0;

/// Free-text keywords suggesting a neurological deficit alongside a severe headache.
pub const NEURO_DEFICIT_KEYWORDS: &[&str] = &["weakness", "slurred", "droop"];

/// Free-text keywords that are concerning during pregnancy.
pub const PREGNANCY_CONCERN_KEYWORDS: &[&str] = &["bleeding", "severe pain"];

/// Separator used to join red-flag descriptions into a triage reason.
pub const REASON_SEPARATOR: &str = "; ";

/// Top-level disclaimer attached to every analysis response.
pub const RESPONSE_DISCLAIMER: &str = "This tool is not a medical diagnosis or treatment. If you think you're having a medical emergency, seek care immediately.";

/// Disclaimer carried by both canned guidance payloads.
pub const GUIDANCE_DISCLAIMER: &str = "This is general information, not medical advice.";

/// Default bind address for the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:8000";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model used in model-assisted mode.
pub const DEFAULT_LLM_MODEL: &str = "gpt-5";

/// Default timeout for one guidance request to the text-generation service.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Sampling temperature for guidance generation.
pub const LLM_TEMPERATURE: f32 = 0.2;

/// Longest accepted `symptoms_text`, in characters. Longer intakes are rejected before matching.
pub const MAX_SYMPTOMS_TEXT_CHARS: usize = 4_000;

/// Upper bound on the free-text excerpt embedded in the model prompt.
pub const MAX_PROMPT_SYMPTOMS_CHARS: usize = 2_000;

/// Upper bound on list entries (conditions, topics) embedded in the model prompt.
pub const MAX_PROMPT_LIST_ITEMS: usize = 20;
