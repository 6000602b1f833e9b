//! Deterministic red-flag rules.
//!
//! Every rule is evaluated on every intake; any subset may fire. Flags are returned in rule
//! order. Keyword checks are case-insensitive substring matches on the raw free text.

use serde::{Serialize, Serializer};

use crate::constants::{LOW_SPO2_THRESHOLD, NEURO_DEFICIT_KEYWORDS, PREGNANCY_CONCERN_KEYWORDS};
use crate::intake::Intake;
use crate::lexicon::NormalizedSymptom;

pub const LABEL_CHEST_PAIN: &str = "chest pain";
pub const LABEL_SHORTNESS_OF_BREATH: &str = "shortness of breath";
pub const LABEL_SEVERE_HEADACHE: &str = "severe headache";

/// A triggered safety rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedFlag {
    ChestPainWithDyspnea,
    LowOxygenSaturation,
    SevereHeadacheWithNeuroDeficit,
    PregnancyWithConcerningSymptoms,
}

impl RedFlag {
    pub fn description(self) -> &'static str {
        match self {
            RedFlag::ChestPainWithDyspnea => "Chest pain + dyspnea",
            RedFlag::LowOxygenSaturation => "Low oxygen saturation (<92%)",
            RedFlag::SevereHeadacheWithNeuroDeficit => "Severe headache + neuro deficits",
            RedFlag::PregnancyWithConcerningSymptoms => "Pregnancy with concerning symptoms",
        }
    }
}

impl std::fmt::Display for RedFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

impl Serialize for RedFlag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.description())
    }
}

/// Thresholds and keyword sets used by the red-flag rules.
#[derive(Debug, Clone, PartialEq)]
pub struct RedFlagRules {
    pub low_spo2_threshold: u8,
    pub neuro_deficit_keywords: Vec<String>,
    pub pregnancy_concern_keywords: Vec<String>,
}

impl Default for RedFlagRules {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| (*w).to_owned()).collect();
        Self {
            low_spo2_threshold: LOW_SPO2_THRESHOLD,
            neuro_deficit_keywords: owned(NEURO_DEFICIT_KEYWORDS),
            pregnancy_concern_keywords: owned(PREGNANCY_CONCERN_KEYWORDS),
        }
    }
}

impl RedFlagRules {
    /// Evaluate all rules and return the flags that fired, in rule order.
    pub fn evaluate(
        &self,
        symptoms: &[NormalizedSymptom],
        text: &str,
        intake: &Intake,
    ) -> Vec<RedFlag> {
        let text = text.to_lowercase();
        let has_label = |label: &str| symptoms.iter().any(|s| s.label == label);
        let mentions_any =
            |keywords: &[String]| keywords.iter().any(|k| text.contains(&k.to_lowercase()));

        let mut flags = Vec::new();

        if has_label(LABEL_CHEST_PAIN) && has_label(LABEL_SHORTNESS_OF_BREATH) {
            flags.push(RedFlag::ChestPainWithDyspnea);
        }

        if intake
            .spo2()
            .is_some_and(|spo2| spo2 < self.low_spo2_threshold)
        {
            flags.push(RedFlag::LowOxygenSaturation);
        }

        if has_label(LABEL_SEVERE_HEADACHE) && mentions_any(&self.neuro_deficit_keywords) {
            flags.push(RedFlag::SevereHeadacheWithNeuroDeficit);
        }

        if intake.is_pregnant() && mentions_any(&self.pregnancy_concern_keywords) {
            flags.push(RedFlag::PregnancyWithConcerningSymptoms);
        }

        flags
    }
}
