//! Reference topic lookup.
//!
//! A static placeholder: each rule maps the presence of a normalised label to one fixed topic.

use serde::{Deserialize, Serialize};

use crate::lexicon::NormalizedSymptom;
use crate::red_flags::{LABEL_CHEST_PAIN, LABEL_SHORTNESS_OF_BREATH};

/// A reference entry handed to guidance generation and echoed in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTopic {
    pub title: String,
    pub url: String,
}

const TOPIC_RULES: &[(&str, &str, &str)] = &[
    (LABEL_CHEST_PAIN, "Acute chest pain in adults", ""),
    (LABEL_SHORTNESS_OF_BREATH, "Dyspnea overview", ""),
];

/// Topics for the given symptoms, in rule order. No match yields an empty list.
pub fn retrieve_topics(symptoms: &[NormalizedSymptom]) -> Vec<SourceTopic> {
    TOPIC_RULES
        .iter()
        .filter(|(label, _, _)| symptoms.iter().any(|s| s.label == *label))
        .map(|(_, title, url)| SourceTopic {
            title: (*title).to_owned(),
            url: (*url).to_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symptom(label: &str) -> NormalizedSymptom {
        NormalizedSymptom {
            label: label.into(),
            code: "0".into(),
        }
    }

    #[test]
    fn chest_pain_yields_one_topic() {
        let topics = retrieve_topics(&[symptom("chest pain")]);
        assert_eq!(
            topics,
            vec![SourceTopic {
                title: "Acute chest pain in adults".into(),
                url: String::new(),
            }]
        );
    }

    #[test]
    fn topics_follow_rule_order() {
        let topics = retrieve_topics(&[symptom("shortness of breath"), symptom("chest pain")]);
        let titles: Vec<_> = topics.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Acute chest pain in adults", "Dyspnea overview"]);
    }

    #[test]
    fn unmapped_labels_yield_nothing() {
        assert!(retrieve_topics(&[symptom("headache")]).is_empty());
        assert!(retrieve_topics(&[]).is_empty());
    }
}
