use async_trait::async_trait;

use super::prompt::{build_user_prompt, parse_guidance, SAFETY_SYSTEM_PROMPT};
use super::{GuidanceGenerator, GuidanceMode, GuidancePayload, GuidanceRequest};
use crate::error::CoreResult;
use crate::llm::LlmClient;

/// Guidance from an external text-generation service.
///
/// One call per request. Upstream and parse failures are returned as errors; there is no
/// fallback to canned guidance at this point.
#[derive(Debug)]
pub struct ModelGuidance<C> {
    client: C,
}

impl<C: LlmClient> ModelGuidance<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

#[async_trait]
impl<C: LlmClient> GuidanceGenerator for ModelGuidance<C> {
    fn mode(&self) -> GuidanceMode {
        GuidanceMode::Model
    }

    async fn generate(&self, request: &GuidanceRequest<'_>) -> CoreResult<GuidancePayload> {
        let prompt = build_user_prompt(request);
        let reply = self
            .client
            .complete_json(SAFETY_SYSTEM_PROMPT, &prompt)
            .await
            .inspect_err(|e| {
                tracing::error!(model = self.client.model(), error = %e, "guidance request failed")
            })?;

        parse_guidance(&reply).inspect_err(|e| {
            tracing::error!(model = self.client.model(), error = %e, "guidance reply rejected")
        })
    }
}
