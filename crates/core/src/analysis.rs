//! Fabricated interview analysis.
//!
//! Fixed fields are copied from the sample analysis; sentiment, keyword
//! selection, HR metrics and quality are drawn from the supplied random
//! source, so a seeded RNG yields reproducible output.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::fixtures::{QuestionAnswer, SampleAnalysis};

/// Summary used when the sample has none.
pub const FALLBACK_SUMMARY: &str = "Candidate shows promise with areas to explore further.";

/// Recommendation used when the sample has none.
pub const FALLBACK_RECOMMENDATIONS: &str =
    "Proceed to next round with focused technical evaluation.";

/// Inclusive bounds of every HR metric score.
pub const HR_SCORE_MIN: u8 = 6;
pub const HR_SCORE_MAX: u8 = 10;

/// Minimum number of keywords drawn when the sample has enough of them.
const MIN_KEYWORDS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

const SENTIMENTS: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewQuality {
    Excellent,
    Good,
    Fair,
}

const QUALITIES: [InterviewQuality; 3] = [
    InterviewQuality::Excellent,
    InterviewQuality::Good,
    InterviewQuality::Fair,
];

/// Per-interview HR scoring, each value in `[6, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrMetrics {
    pub overall_score: u8,
    pub communication_skills: u8,
    pub technical_competency: u8,
    pub problem_solving: u8,
    pub cultural_fit: u8,
    pub experience: u8,
}

impl HrMetrics {
    /// All six scores in declaration order.
    pub fn scores(&self) -> [u8; 6] {
        [
            self.overall_score,
            self.communication_skills,
            self.technical_competency,
            self.problem_solving,
            self.cultural_fit,
            self.experience,
        ]
    }
}

/// Structured analysis attached to a completed interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub summary: String,
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub questions: Vec<QuestionAnswer>,
    pub hr_metrics: HrMetrics,
    pub red_flags: Vec<String>,
    pub strengths: Vec<String>,
    pub recommendations: String,
    pub interview_quality: InterviewQuality,
}

/// Number of keywords drawn from a sample of `available` keywords:
/// `max(3, available / 2)`, never more than `available`.
pub fn keyword_sample_size(available: usize) -> usize {
    (available / 2).max(MIN_KEYWORDS).min(available)
}

/// Build an analysis from the sample and the random source.
pub fn generate_analysis<R: Rng + ?Sized>(sample: &SampleAnalysis, rng: &mut R) -> Analysis {
    let base_keywords = sample.keywords.as_deref().unwrap_or_default();
    let keywords = base_keywords
        .choose_multiple(rng, keyword_sample_size(base_keywords.len()))
        .cloned()
        .collect();

    let hr_metrics = HrMetrics {
        overall_score: score(rng),
        communication_skills: score(rng),
        technical_competency: score(rng),
        problem_solving: score(rng),
        cultural_fit: score(rng),
        experience: score(rng),
    };

    Analysis {
        summary: non_empty_or(sample.summary.as_deref(), FALLBACK_SUMMARY),
        sentiment: SENTIMENTS[rng.random_range(0..SENTIMENTS.len())],
        keywords,
        questions: sample.questions.clone().unwrap_or_default(),
        hr_metrics,
        red_flags: sample.red_flags.clone().unwrap_or_default(),
        strengths: sample.strengths.clone().unwrap_or_default(),
        recommendations: non_empty_or(sample.recommendations.as_deref(), FALLBACK_RECOMMENDATIONS),
        interview_quality: QUALITIES[rng.random_range(0..QUALITIES.len())],
    }
}

fn score<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(HR_SCORE_MIN..=HR_SCORE_MAX)
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
