//! Prompt construction and reply parsing for model-assisted guidance.

use super::{GuidancePayload, GuidanceRequest};
use crate::constants::{MAX_PROMPT_LIST_ITEMS, MAX_PROMPT_SYMPTOMS_CHARS};
use crate::error::{CoreError, CoreResult};
use crate::triage::TriageLevel;

/// Safety instruction sent as the system message on every guidance request.
pub const SAFETY_SYSTEM_PROMPT: &str = "You are a cautious medical information assistant. \
Output JSON only (valid minified json). \
Provide general self-care suggestions and when to seek care; do not diagnose or prescribe. \
Include a clear disclaimer. If emergency triage is indicated, reinforce seeking immediate help. \
Never provide dosages or medication names beyond OTC categories.";

/// The six keys the model must return.
pub const PAYLOAD_KEYS: [&str; 6] = [
    "summary",
    "what_to_do_now",
    "what_to_avoid",
    "monitoring_signs",
    "when_to_seek_help",
    "disclaimer",
];

/// Build the user message for one guidance request.
///
/// Free text and lists are truncated so the prompt stays bounded whatever the intake holds.
pub fn build_user_prompt(request: &GuidanceRequest<'_>) -> String {
    let intake = request.intake;

    let pregnant = match intake.pregnant() {
        Some(true) => "yes",
        Some(false) => "no",
        None => "not reported",
    };

    let symptoms = if request.symptoms.is_empty() {
        "none recognised".to_owned()
    } else {
        request
            .symptoms
            .iter()
            .map(|s| format!("{} ({})", s.label, s.code))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let duration = intake
        .duration_hours()
        .map_or_else(|| "not reported".to_owned(), |h| h.to_string());

    let vitals = match intake.vitals() {
        Some(v) => {
            let mut parts = Vec::new();
            if let Some(t) = v.temp_c {
                parts.push(format!("temp_c={t}"));
            }
            if let Some(hr) = v.hr_bpm {
                parts.push(format!("hr_bpm={hr}"));
            }
            if let Some(spo2) = v.spo2 {
                parts.push(format!("spo2={spo2}"));
            }
            if parts.is_empty() {
                "not measured".to_owned()
            } else {
                parts.join(", ")
            }
        }
        None => "not measured".to_owned(),
    };

    let topics = bounded_list(request.topics.iter().map(|t| t.title.as_str()));

    let emergency_note = if request.triage.level == TriageLevel::Emergency {
        "\nTriage indicates an emergency: tell the user to seek immediate help.\n"
    } else {
        ""
    };

    format!(
        "User demographics and symptoms:
- Age: {age}
- Sex: {sex}
- Pregnant: {pregnant}
- Key normalized symptoms (SNOMED): {symptoms}
- Free-text: {free_text}
- Duration (hours): {duration}
- Comorbidities: {conditions}
- Vitals: {vitals}
- Triage: {level} ({reason})
{emergency_note}
Using the retrieved topics and sources: {topics}

Return a json object with keys: {keys}.
",
        age = intake.age(),
        sex = intake.sex(),
        free_text = truncate_chars(intake.symptoms_text(), MAX_PROMPT_SYMPTOMS_CHARS),
        conditions = bounded_list(intake.conditions().iter().map(String::as_str)),
        level = request.triage.level,
        reason = request.triage.reason,
        keys = PAYLOAD_KEYS.join(", "),
    )
}

/// Parse the model's reply into a payload.
///
/// # Errors
///
/// Returns `CoreError::MalformedGuidance` if the reply is not a JSON object with exactly the
/// six fields, or if the disclaimer is blank. Nothing is patched with defaults.
pub fn parse_guidance(reply: &str) -> CoreResult<GuidancePayload> {
    let payload: GuidancePayload = serde_json::from_str(reply.trim())
        .map_err(|e| CoreError::MalformedGuidance(e.to_string()))?;

    if payload.disclaimer.trim().is_empty() {
        return Err(CoreError::MalformedGuidance(
            "disclaimer must not be empty".into(),
        ));
    }

    Ok(payload)
}

fn bounded_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let items: Vec<&str> = items.take(MAX_PROMPT_LIST_ITEMS).collect();
    if items.is_empty() {
        "none".to_owned()
    } else {
        items.join("; ")
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::test_support::fields;
    use crate::intake::{Intake, Sex, Vitals};
    use crate::lexicon::NormalizedSymptom;
    use crate::retrieval::SourceTopic;
    use crate::triage::TriageResult;

    const VALID_REPLY: &str = r#"{
        "summary": "Likely a mild tension headache.",
        "what_to_do_now": ["Rest in a quiet room", "Drink water"],
        "what_to_avoid": ["Screens"],
        "monitoring_signs": ["Sudden severe pain"],
        "when_to_seek_help": "If it worsens or lasts more than 3 days",
        "disclaimer": "Not medical advice."
    }"#;

    #[test]
    fn prompt_includes_intake_details() {
        let mut f = fields(30, Sex::Female, "chest pain while climbing stairs");
        f.pregnant = Some(true);
        f.duration_hours = Some(2.5);
        f.conditions = vec!["asthma".into()];
        f.vitals = Some(Vitals {
            temp_c: Some(37.5),
            hr_bpm: None,
            spo2: Some(97),
        });
        let intake = Intake::new(f).expect("valid intake");
        let triage = TriageResult {
            level: TriageLevel::SelfCare,
            reason: "No red flags detected".into(),
        };
        let symptoms = vec![NormalizedSymptom {
            label: "chest pain".into(),
            code: "29857009".into(),
        }];
        let topics = vec![SourceTopic {
            title: "Acute chest pain in adults".into(),
            url: String::new(),
        }];

        let prompt = build_user_prompt(&GuidanceRequest {
            triage: &triage,
            symptoms: &symptoms,
            intake: &intake,
            topics: &topics,
        });

        assert!(prompt.contains("- Age: 30"));
        assert!(prompt.contains("- Sex: female"));
        assert!(prompt.contains("- Pregnant: yes"));
        assert!(prompt.contains("chest pain (29857009)"));
        assert!(prompt.contains("- Free-text: chest pain while climbing stairs"));
        assert!(prompt.contains("- Duration (hours): 2.5"));
        assert!(prompt.contains("- Comorbidities: asthma"));
        assert!(prompt.contains("- Vitals: temp_c=37.5, spo2=97"));
        assert!(prompt.contains("Acute chest pain in adults"));
        assert!(prompt.contains("when_to_seek_help, disclaimer"));
        assert!(!prompt.contains("seek immediate help"));
    }

    #[test]
    fn emergency_prompt_reinforces_immediate_help() {
        let intake = Intake::new(fields(5, Sex::Male, "chest pain")).expect("valid intake");
        let triage = TriageResult {
            level: TriageLevel::Emergency,
            reason: "Chest pain + dyspnea".into(),
        };

        let prompt = build_user_prompt(&GuidanceRequest {
            triage: &triage,
            symptoms: &[],
            intake: &intake,
            topics: &[],
        });

        assert!(prompt.contains("- Triage: EMERGENCY (Chest pain + dyspnea)"));
        assert!(prompt.contains("seek immediate help"));
        assert!(prompt.contains("- Vitals: not measured"));
        assert!(prompt.contains("sources: none"));
    }

    #[test]
    fn prompt_truncates_long_free_text() {
        let long_text = "a".repeat(MAX_PROMPT_SYMPTOMS_CHARS + 500);
        let intake = Intake::new(fields(40, Sex::Other, &long_text)).expect("valid intake");
        let triage = TriageResult {
            level: TriageLevel::SelfCare,
            reason: "No red flags detected".into(),
        };

        let prompt = build_user_prompt(&GuidanceRequest {
            triage: &triage,
            symptoms: &[],
            intake: &intake,
            topics: &[],
        });

        assert!(prompt.contains(&"a".repeat(MAX_PROMPT_SYMPTOMS_CHARS)));
        assert!(!prompt.contains(&"a".repeat(MAX_PROMPT_SYMPTOMS_CHARS + 1)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 5), "hi");
    }

    #[test]
    fn parses_valid_reply() {
        let payload = parse_guidance(VALID_REPLY).expect("valid payload");
        assert_eq!(payload.what_to_do_now.len(), 2);
        assert_eq!(payload.disclaimer, "Not medical advice.");
    }

    #[test]
    fn rejects_non_json_reply() {
        let err = parse_guidance("Sure! Here is some advice.").expect_err("should reject");
        assert!(matches!(err, CoreError::MalformedGuidance(_)));
    }

    #[test]
    fn rejects_missing_field() {
        let reply = r#"{"summary": "s", "what_to_do_now": [], "what_to_avoid": [],
            "monitoring_signs": [], "when_to_seek_help": "now"}"#;
        let err = parse_guidance(reply).expect_err("should reject");
        match err {
            CoreError::MalformedGuidance(msg) => assert!(msg.contains("disclaimer")),
            other => panic!("expected MalformedGuidance error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_extra_field() {
        let reply = VALID_REPLY.replacen('{', r#"{"diagnosis": "migraine","#, 1);
        let err = parse_guidance(&reply).expect_err("should reject");
        match err {
            CoreError::MalformedGuidance(msg) => assert!(msg.contains("diagnosis")),
            other => panic!("expected MalformedGuidance error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_blank_disclaimer() {
        let reply = VALID_REPLY.replace("Not medical advice.", "  ");
        assert!(parse_guidance(&reply).is_err());
    }
}
