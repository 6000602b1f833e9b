//! Symptom lexicon and fuzzy phrase matching.
//!
//! The lexicon maps a vocabulary code to its canonical phrases. Matching scores every phrase
//! against the lowercased free text with a partial-match similarity on a 0-100 scale and keeps
//! the best phrase per code when it reaches the threshold.
//!
//! There is no tokenisation, stemming or negation handling: "no chest pain" still matches
//! "chest pain".

use serde::{Deserialize, Serialize};

use crate::constants::MATCH_THRESHOLD;

/// A symptom recognised in free text: the winning canonical phrase and its vocabulary code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSymptom {
    pub label: String,
    pub code: String,
}

/// One vocabulary code and its canonical phrases, in preference order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub code: String,
    pub phrases: Vec<String>,
}

/// Best phrase for one code, with its score, whether or not it met the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseScore {
    pub code: String,
    pub phrase: String,
    pub score: f64,
}

/// Fixed phrase-to-code vocabulary with a match threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    threshold: u8,
}

impl Lexicon {
    pub fn new(entries: Vec<LexiconEntry>, threshold: u8) -> Self {
        Self { entries, threshold }
    }

    /// The built-in symptom vocabulary (SNOMED CT concept ids).
    pub fn symptoms() -> Self {
        let entry = |code: &str, phrases: &[&str]| LexiconEntry {
            code: code.to_owned(),
            phrases: phrases.iter().map(|p| (*p).to_owned()).collect(),
        };

        Self::new(
            vec![
                entry(
                    "29857009",
                    &["chest pain", "pressure in chest", "tightness in chest"],
                ),
                entry(
                    "267036007",
                    &["shortness of breath", "breathless", "dyspnea"],
                ),
                entry(
                    "25064002",
                    &["headache", "severe headache", "worst headache"],
                ),
            ],
            MATCH_THRESHOLD,
        )
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Best-scoring phrase per code, in vocabulary order.
    ///
    /// Ties keep the earlier phrase. Codes with no phrases are skipped.
    pub fn score(&self, text: &str) -> Vec<PhraseScore> {
        let text = text.to_lowercase();

        self.entries
            .iter()
            .filter_map(|entry| {
                let mut best: Option<(&str, f64)> = None;
                for phrase in &entry.phrases {
                    let score = partial_ratio(&phrase.to_lowercase(), &text);
                    if best.map_or(true, |(_, b)| score > b) {
                        best = Some((phrase.as_str(), score));
                    }
                }
                best.map(|(phrase, score)| PhraseScore {
                    code: entry.code.clone(),
                    phrase: phrase.to_owned(),
                    score,
                })
            })
            .collect()
    }

    /// Normalise free text to the symptoms it mentions.
    ///
    /// Emits at most one match per code, in vocabulary order. An empty result is valid.
    pub fn normalize(&self, text: &str) -> Vec<NormalizedSymptom> {
        let threshold = f64::from(self.threshold);

        self.score(text)
            .into_iter()
            .filter(|s| s.score >= threshold)
            .map(|s| NormalizedSymptom {
                label: s.phrase,
                code: s.code,
            })
            .collect()
    }
}

/// Partial-match similarity on a 0-100 scale.
///
/// The shorter string is aligned against every window of the longer one that has the shorter
/// string's length, including windows clipped at either end, and the best indel similarity
/// is returned. Empty input scores 0.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (needle, haystack) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let m = needle.len();
    let n = haystack.len();

    let mut best = 0.0_f64;
    let mut rows = LcsRows::with_width(m);
    // Window starts run from m-1 positions before the haystack to its last char.
    for start in -(m as isize - 1)..n as isize {
        let lo = start.max(0) as usize;
        let hi = ((start + m as isize) as usize).min(n);
        let score = indel_ratio(needle, &haystack[lo..hi], &mut rows);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }

    best
}

/// Normalised indel similarity: `200 * LCS / (|a| + |b|)`.
fn indel_ratio(a: &[char], b: &[char], rows: &mut LcsRows) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    200.0 * rows.lcs_len(a, b) as f64 / total as f64
}

/// Two DP rows reused across every window of one `partial_ratio` call.
struct LcsRows {
    prev: Vec<usize>,
    curr: Vec<usize>,
}

impl LcsRows {
    fn with_width(max_b_len: usize) -> Self {
        Self {
            prev: vec![0; max_b_len + 1],
            curr: vec![0; max_b_len + 1],
        }
    }

    /// Length of the longest common subsequence.
    fn lcs_len(&mut self, a: &[char], b: &[char]) -> usize {
        let width = b.len() + 1;
        if self.prev.len() < width {
            self.prev.resize(width, 0);
            self.curr.resize(width, 0);
        }
        self.prev[..width].fill(0);
        self.curr[..width].fill(0);

        for &a_ch in a {
            for (j, &b_ch) in b.iter().enumerate() {
                self.curr[j + 1] = if a_ch == b_ch {
                    self.prev[j] + 1
                } else {
                    self.prev[j + 1].max(self.curr[j])
                };
            }
            std::mem::swap(&mut self.prev, &mut self.curr);
        }

        self.prev[b.len()]
    }
}
