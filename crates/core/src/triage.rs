//! Triage classification.
//!
//! A fixed priority chain: the first rule that matches decides the level. `Routine` is a valid
//! level but no rule in the current chain produces it.

use serde::{Deserialize, Serialize};

use crate::constants::{INFANT_FEVER_TEMP_C, REASON_SEPARATOR};
use crate::intake::Intake;
use crate::lexicon::NormalizedSymptom;
use crate::red_flags::{RedFlag, LABEL_SHORTNESS_OF_BREATH};

/// Urgency level, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriageLevel {
    SelfCare,
    Routine,
    Urgent,
    Emergency,
}

impl TriageLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            TriageLevel::SelfCare => "SELF_CARE",
            TriageLevel::Routine => "ROUTINE",
            TriageLevel::Urgent => "URGENT",
            TriageLevel::Emergency => "EMERGENCY",
        }
    }

    /// Short care directive shown alongside the level.
    pub fn directive(self) -> &'static str {
        match self {
            TriageLevel::Emergency => "Seek urgent medical care now.",
            TriageLevel::Urgent => "Seek medical care within 24–48 hours.",
            TriageLevel::Routine => "Clinic visit when convenient.",
            TriageLevel::SelfCare => "Home care guidance below.",
        }
    }
}

impl std::fmt::Display for TriageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The level chosen for one intake and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub level: TriageLevel,
    pub reason: String,
}

impl TriageResult {
    fn new(level: TriageLevel, reason: impl Into<String>) -> Self {
        Self {
            level,
            reason: reason.into(),
        }
    }
}

/// Thresholds for the non-red-flag triage rules.
#[derive(Debug, Clone, PartialEq)]
pub struct TriageRules {
    pub infant_fever_temp_c: f64,
}

impl Default for TriageRules {
    fn default() -> Self {
        Self {
            infant_fever_temp_c: INFANT_FEVER_TEMP_C,
        }
    }
}

impl TriageRules {
    /// Classify an intake. Exactly one result is returned.
    pub fn classify(
        &self,
        flags: &[RedFlag],
        symptoms: &[NormalizedSymptom],
        intake: &Intake,
    ) -> TriageResult {
        if !flags.is_empty() {
            let reason = flags
                .iter()
                .map(|f| f.description())
                .collect::<Vec<_>>()
                .join(REASON_SEPARATOR);
            return TriageResult::new(TriageLevel::Emergency, reason);
        }

        let febrile = intake
            .temp_c()
            .is_some_and(|t| t >= self.infant_fever_temp_c);
        if intake.age().is_infant() && febrile {
            return TriageResult::new(TriageLevel::Urgent, "Fever in infant");
        }

        if symptoms.iter().any(|s| s.label == LABEL_SHORTNESS_OF_BREATH) {
            return TriageResult::new(TriageLevel::Urgent, "Breathlessness");
        }

        TriageResult::new(TriageLevel::SelfCare, "No red flags detected")
    }
}
