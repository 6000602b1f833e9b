use async_trait::async_trait;

use super::{GuidanceGenerator, GuidanceMode, GuidancePayload, GuidanceRequest};
use crate::constants::GUIDANCE_DISCLAIMER;
use crate::error::CoreResult;
use crate::triage::TriageLevel;

/// Canned guidance used when no model credential is configured.
///
/// The payload depends only on whether the level is `Emergency`; nothing from the intake is
/// interpolated.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackGuidance;

impl FallbackGuidance {
    pub fn new() -> Self {
        Self
    }

    pub fn payload_for(level: TriageLevel) -> GuidancePayload {
        match level {
            TriageLevel::Emergency => emergency_payload(),
            TriageLevel::Urgent | TriageLevel::Routine | TriageLevel::SelfCare => {
                non_emergency_payload()
            }
        }
    }
}

#[async_trait]
impl GuidanceGenerator for FallbackGuidance {
    fn mode(&self) -> GuidanceMode {
        GuidanceMode::Fallback
    }

    async fn generate(&self, request: &GuidanceRequest<'_>) -> CoreResult<GuidancePayload> {
        Ok(Self::payload_for(request.triage.level))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn emergency_payload() -> GuidancePayload {
    GuidancePayload {
        summary: "Your symptoms may indicate a serious condition.".into(),
        what_to_do_now: strings(&["Seek emergency care immediately."]),
        what_to_avoid: strings(&[
            "Do not drive yourself.",
            "Avoid eating or drinking until seen.",
        ]),
        monitoring_signs: strings(&["Worsening chest pain", "Fainting"]),
        when_to_seek_help: "Now".into(),
        disclaimer: GUIDANCE_DISCLAIMER.into(),
    }
}

fn non_emergency_payload() -> GuidancePayload {
    GuidancePayload {
        summary: "Your symptoms do not show urgent red flags.".into(),
        what_to_do_now: strings(&[
            "Rest",
            "Hydrate",
            "Consider over-the-counter pain relief if safe for you",
        ]),
        what_to_avoid: strings(&["Strenuous activity"]),
        monitoring_signs: strings(&["New or worsening shortness of breath", "Chest discomfort"]),
        when_to_seek_help: "If symptoms persist or worsen".into(),
        disclaimer: GUIDANCE_DISCLAIMER.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::test_support::intake;
    use crate::intake::Sex;
    use crate::triage::TriageResult;

    #[tokio::test]
    async fn emergency_returns_canned_emergency_payload() {
        let intake = intake(5, Sex::Male, "chest pain and shortness of breath");
        let triage = TriageResult {
            level: TriageLevel::Emergency,
            reason: "Chest pain + dyspnea".into(),
        };
        let request = GuidanceRequest {
            triage: &triage,
            symptoms: &[],
            intake: &intake,
            topics: &[],
        };

        let payload = FallbackGuidance::new()
            .generate(&request)
            .await
            .expect("fallback never fails");
        assert_eq!(payload.summary, "Your symptoms may indicate a serious condition.");
        assert_eq!(payload.what_to_do_now, vec!["Seek emergency care immediately."]);
        assert_eq!(payload.when_to_seek_help, "Now");
        assert_eq!(payload.disclaimer, GUIDANCE_DISCLAIMER);
    }

    #[test]
    fn every_non_emergency_level_shares_one_payload() {
        let self_care = FallbackGuidance::payload_for(TriageLevel::SelfCare);
        assert_eq!(FallbackGuidance::payload_for(TriageLevel::Urgent), self_care);
        assert_eq!(FallbackGuidance::payload_for(TriageLevel::Routine), self_care);
        assert_eq!(self_care.summary, "Your symptoms do not show urgent red flags.");
        assert_eq!(self_care.when_to_seek_help, "If symptoms persist or worsen");
    }

    #[test]
    fn canned_payloads_carry_disclaimer() {
        for level in [
            TriageLevel::Emergency,
            TriageLevel::Urgent,
            TriageLevel::Routine,
            TriageLevel::SelfCare,
        ] {
            assert!(!FallbackGuidance::payload_for(level).disclaimer.trim().is_empty());
        }
    }

    #[test]
    fn reports_fallback_mode() {
        assert_eq!(FallbackGuidance::new().mode(), GuidanceMode::Fallback);
    }
}
