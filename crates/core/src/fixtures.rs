//! Sample data the transcription simulator fabricates output from.
//!
//! Two fixtures are loaded once at startup and treated as read-only
//! constants afterwards: a sample transcript and a sample analysis. Both are
//! compiled in; deployments may point at their own JSON files instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const EMBEDDED_TRANSCRIPT: &str = include_str!("../fixtures/sample_transcript.json");
const EMBEDDED_ANALYSIS: &str = include_str!("../fixtures/sample_analysis.json");

/// One timed transcript segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptItem {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// A question asked during the interview and the candidate's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// The sample analysis fixture. Every key is optional; the generator
/// substitutes fallbacks for anything missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleAnalysis {
    pub summary: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub questions: Option<Vec<QuestionAnswer>>,
    pub red_flags: Option<Vec<String>>,
    pub strengths: Option<Vec<String>>,
    pub recommendations: Option<String>,
}

/// Accepts either `{"transcript": [...]}` or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum TranscriptFile {
    Wrapped { transcript: Vec<TranscriptItem> },
    Bare(Vec<TranscriptItem>),
}

impl From<TranscriptFile> for Vec<TranscriptItem> {
    fn from(file: TranscriptFile) -> Self {
        match file {
            TranscriptFile::Wrapped { transcript } => transcript,
            TranscriptFile::Bare(items) => items,
        }
    }
}

/// Both fixtures, loaded together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixtures {
    pub transcript: Vec<TranscriptItem>,
    pub analysis: SampleAnalysis,
}

impl Fixtures {
    /// Fixtures compiled into the binary.
    pub fn embedded() -> Result<Self, CoreError> {
        Self::from_json(EMBEDDED_TRANSCRIPT, EMBEDDED_ANALYSIS)
    }

    /// Parse fixtures from JSON text.
    pub fn from_json(transcript_json: &str, analysis_json: &str) -> Result<Self, CoreError> {
        let transcript: TranscriptFile = serde_json::from_str(transcript_json)
            .map_err(|e| CoreError::Validation(format!("Invalid sample transcript: {e}")))?;
        let analysis: SampleAnalysis = serde_json::from_str(analysis_json)
            .map_err(|e| CoreError::Validation(format!("Invalid sample analysis: {e}")))?;
        Ok(Self {
            transcript: transcript.into(),
            analysis,
        })
    }

    /// Load fixtures, reading each from its file when a path is given and
    /// falling back to the embedded copy otherwise.
    pub fn load(
        transcript_path: Option<&Path>,
        analysis_path: Option<&Path>,
    ) -> Result<Self, CoreError> {
        let transcript = match transcript_path {
            Some(path) => read_fixture(path)?,
            None => EMBEDDED_TRANSCRIPT.to_string(),
        };
        let analysis = match analysis_path {
            Some(path) => read_fixture(path)?,
            None => EMBEDDED_ANALYSIS.to_string(),
        };
        Self::from_json(&transcript, &analysis)
    }
}

fn read_fixture(path: &Path) -> Result<String, CoreError> {
    std::fs::read_to_string(path)
        .map_err(|e| CoreError::Storage(format!("Cannot read fixture {}: {e}", path.display())))
}
