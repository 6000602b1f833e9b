//! Core runtime configuration.
//!
//! This module defines configuration that is resolved once at process startup and then
//! passed into core services. Request handling never reads process-wide environment
//! variables; binaries read them once and hand the raw values to the functions here.

use std::sync::Arc;
use std::time::Duration;

use crate::constants::{
    DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL, DEFAULT_LLM_TIMEOUT_SECS, LLM_TEMPERATURE,
};
use crate::guidance::{FallbackGuidance, GuidanceGenerator, ModelGuidance};
use crate::lexicon::Lexicon;
use crate::llm::ChatCompletionsClient;
use crate::red_flags::RedFlagRules;
use crate::triage::TriageRules;
use crate::{CoreError, CoreResult};

/// Read-only lexicon and rule tables, built once and shared by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct TriageTables {
    pub lexicon: Lexicon,
    pub red_flags: RedFlagRules,
    pub triage: TriageRules,
}

impl Default for TriageTables {
    fn default() -> Self {
        Self {
            lexicon: Lexicon::symptoms(),
            red_flags: RedFlagRules::default(),
            triage: TriageRules::default(),
        }
    }
}

/// Connection settings for the text-generation service.
#[derive(Clone)]
pub struct LlmSettings {
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
    temperature: f32,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl LlmSettings {
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// Resolve model settings from optional raw values (typically environment variables).
///
/// A missing or blank `api_key` selects fallback mode and returns `Ok(None)`; that is never an
/// error. Blank optional values fall back to their defaults.
///
/// # Errors
///
/// Returns `CoreError::Config` if `timeout_secs` is present but not a positive integer.
pub fn llm_settings_from_env_values(
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<String>,
) -> CoreResult<Option<LlmSettings>> {
    fn non_blank(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    let Some(api_key) = non_blank(api_key) else {
        return Ok(None);
    };

    let timeout_secs = match non_blank(timeout_secs) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                return Err(CoreError::Config(format!(
                    "LLM_TIMEOUT_SECS must be a positive integer, got {raw:?}"
                )))
            }
        },
        None => DEFAULT_LLM_TIMEOUT_SECS,
    };

    Ok(Some(LlmSettings {
        api_key,
        base_url: non_blank(base_url).unwrap_or_else(|| DEFAULT_LLM_BASE_URL.into()),
        model: non_blank(model).unwrap_or_else(|| DEFAULT_LLM_MODEL.into()),
        timeout: Duration::from_secs(timeout_secs),
        temperature: LLM_TEMPERATURE,
    }))
}

/// Choose the guidance generator for this process.
///
/// Called once at startup. With settings, guidance is model-assisted; without, it is canned.
///
/// # Errors
///
/// Returns an error if the HTTP client for the model service cannot be built.
pub fn build_guidance(settings: Option<&LlmSettings>) -> CoreResult<Arc<dyn GuidanceGenerator>> {
    match settings {
        Some(settings) => {
            let client = ChatCompletionsClient::new(settings)?;
            Ok(Arc::new(ModelGuidance::new(client)))
        }
        None => Ok(Arc::new(FallbackGuidance::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::GuidanceMode;

    #[test]
    fn missing_key_selects_fallback() {
        let settings = llm_settings_from_env_values(None, None, None, None).expect("no error");
        assert!(settings.is_none());

        let blank =
            llm_settings_from_env_values(Some("  ".into()), None, None, None).expect("no error");
        assert!(blank.is_none());
    }

    #[test]
    fn key_with_defaults() {
        let settings = llm_settings_from_env_values(Some("sk-abc".into()), None, None, None)
            .expect("valid")
            .expect("present");

        assert_eq!(settings.api_key(), "sk-abc");
        assert_eq!(settings.base_url(), DEFAULT_LLM_BASE_URL);
        assert_eq!(settings.model(), DEFAULT_LLM_MODEL);
        assert_eq!(
            settings.timeout(),
            Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS)
        );
    }

    #[test]
    fn overrides_are_applied() {
        let settings = llm_settings_from_env_values(
            Some("sk-abc".into()),
            Some("http://localhost:11434/v1".into()),
            Some("local-model".into()),
            Some("12".into()),
        )
        .expect("valid")
        .expect("present");

        assert_eq!(settings.base_url(), "http://localhost:11434/v1");
        assert_eq!(settings.model(), "local-model");
        assert_eq!(settings.timeout(), Duration::from_secs(12));
    }

    #[test]
    fn invalid_timeout_is_a_config_error() {
        for raw in ["0", "-5", "soon"] {
            let err =
                llm_settings_from_env_values(Some("sk-abc".into()), None, None, Some(raw.into()))
                    .expect_err("should reject");
            assert!(matches!(err, CoreError::Config(_)), "raw={raw}");
        }
    }

    #[test]
    fn debug_hides_api_key() {
        let settings = llm_settings_from_env_values(Some("sk-secret".into()), None, None, None)
            .expect("valid")
            .expect("present");
        assert!(!format!("{settings:?}").contains("sk-secret"));
    }

    #[test]
    fn build_guidance_selects_mode() {
        let fallback = build_guidance(None).expect("fallback builds");
        assert_eq!(fallback.mode(), GuidanceMode::Fallback);

        let settings = llm_settings_from_env_values(Some("sk-abc".into()), None, None, None)
            .expect("valid")
            .expect("present");
        let model = build_guidance(Some(&settings)).expect("model builds");
        assert_eq!(model.mode(), GuidanceMode::Model);
    }
}
