//! Data model of an assessment: utterances, tokens, annotations and reports.
//!
//! Reports serialize to the JSON shape consumed by the web client and the
//! report store:
//!
//! ```json
//! { "sessionId": "...", "questions": [ { "id": "...",
//!   "transcript": [{ "word", "pinyin", "confidence", "start", "end" }],
//!   "alternatives": ["..."], "scores": { "fluency": 80.0 }, "overall": 80.0 } ],
//!   "overallScore": 80.0 }
//! ```

use crate::assess::diff::CharacterError;
use crate::assess::score::{DimensionScores, aggregate_session};
use crate::defaults;
use crate::error::{Result, TingshuoError};
use serde::{Deserialize, Serialize};

/// A student's transcribed answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    text: String,
    language: String,
}

impl Utterance {
    /// Fails with `InvalidInput` when `text` is empty after trimming.
    pub fn new(text: &str, language: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(TingshuoError::InvalidInput {
                message: "utterance text is empty".to_string(),
            });
        }
        let language = if language.trim().is_empty() {
            defaults::DEFAULT_LANGUAGE
        } else {
            language.trim()
        };
        Ok(Self {
            text: text.trim().to_string(),
            language: language.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

/// A segmented unit of an utterance, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// Word or character text.
    pub text: String,
    /// Position in the token sequence.
    pub index: usize,
    /// Character offset of the token within the segmented text.
    pub offset: usize,
}

impl Token {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Synthetic spoken interval of a token, in seconds.
///
/// Built only by the timing model, so `start >= 0` and `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub(crate) start: f64,
    pub(crate) end: f64,
}

impl TimeWindow {
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Phonetic annotation of one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneticAnnotation {
    pub(crate) word: String,
    pub(crate) pinyin: String,
    pub(crate) confidence: f64,
    #[serde(flatten)]
    pub(crate) window: TimeWindow,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) fallback: bool,
}

impl PhoneticAnnotation {
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn pinyin(&self) -> &str {
        &self.pinyin
    }

    /// Synthesized plausibility in `[0, 1]`.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Set when the token was missing from the pronunciation dictionary and
    /// `pinyin` holds the fallback marker.
    pub fn fallback(&self) -> bool {
        self.fallback
    }
}

/// Check the per-annotation and ordering invariants of a transcript.
fn validate_transcript(question_id: &str, transcript: &[PhoneticAnnotation]) -> Result<()> {
    let invalid =
        |message: String| TingshuoError::InvalidInput { message }.in_question(question_id);
    let mut previous_end = 0.0;
    for annotation in transcript {
        let TimeWindow { start, end } = annotation.window;
        if !(0.0..=1.0).contains(&annotation.confidence) {
            return Err(invalid(format!(
                "confidence {} of {:?} is outside 0..=1",
                annotation.confidence, annotation.word
            )));
        }
        if !start.is_finite() || !end.is_finite() || start < previous_end || end <= start {
            return Err(invalid(format!(
                "time window {start}..{end} of {:?} is not ordered",
                annotation.word
            )));
        }
        previous_end = end;
    }
    Ok(())
}

/// Complete assessment of one answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAssessment {
    id: String,
    utterance: Utterance,
    transcript: Vec<PhoneticAnnotation>,
    alternatives: Vec<String>,
    scores: DimensionScores,
    overall: f64,
    passed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<CharacterError>,
}

impl QuestionAssessment {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        utterance: Utterance,
        transcript: Vec<PhoneticAnnotation>,
        alternatives: Vec<String>,
        scores: DimensionScores,
        overall: f64,
        pass_threshold: f64,
        errors: Vec<CharacterError>,
    ) -> Self {
        Self {
            id,
            utterance,
            transcript,
            alternatives,
            scores,
            overall,
            passed: overall >= pass_threshold,
            errors,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn utterance(&self) -> &Utterance {
        &self.utterance
    }

    pub fn transcript(&self) -> &[PhoneticAnnotation] {
        &self.transcript
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn scores(&self) -> &DimensionScores {
        &self.scores
    }

    pub fn overall(&self) -> f64 {
        self.overall
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Character differences between the expected text and the answer.
    pub fn errors(&self) -> &[CharacterError] {
        &self.errors
    }

    /// Whether any token had to be transcribed with the fallback marker.
    pub fn has_fallback(&self) -> bool {
        self.transcript.iter().any(|a| a.fallback)
    }
}

/// Immutable result of assessing every question in a session.
///
/// Deserialized reports pass the same checks as [`SessionReport::assemble`]
/// and must carry the score and pass count their questions imply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SessionReportRecord")]
pub struct SessionReport {
    session_id: String,
    questions: Vec<QuestionAssessment>,
    overall_score: f64,
    passed_count: usize,
}

/// Wire form of a [`SessionReport`] before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionReportRecord {
    session_id: String,
    questions: Vec<QuestionAssessment>,
    overall_score: f64,
    passed_count: usize,
}

impl TryFrom<SessionReportRecord> for SessionReport {
    type Error = TingshuoError;

    fn try_from(record: SessionReportRecord) -> Result<Self> {
        let report = Self::assemble(&record.session_id, record.questions)?;
        if report.overall_score != record.overall_score {
            return Err(TingshuoError::InvalidInput {
                message: format!(
                    "overallScore {} does not match the question mean {}",
                    record.overall_score, report.overall_score
                ),
            });
        }
        if report.passed_count != record.passed_count {
            return Err(TingshuoError::InvalidInput {
                message: format!(
                    "passedCount {} does not match {} passed questions",
                    record.passed_count, report.passed_count
                ),
            });
        }
        Ok(report)
    }
}

impl SessionReport {
    /// Assemble a report, computing the session score from the questions.
    ///
    /// Fails with `InvalidInput` for an empty session id or question list.
    pub fn assemble(session_id: &str, questions: Vec<QuestionAssessment>) -> Result<Self> {
        if session_id.trim().is_empty() {
            return Err(TingshuoError::InvalidInput {
                message: "session id is empty".to_string(),
            });
        }
        for question in &questions {
            validate_transcript(&question.id, &question.transcript)?;
        }
        let overall_score = aggregate_session(&questions)?;
        let passed_count = questions.iter().filter(|q| q.passed).count();
        Ok(Self {
            session_id: session_id.trim().to_string(),
            questions,
            overall_score,
            passed_count,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn questions(&self) -> &[QuestionAssessment] {
        &self.questions
    }

    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    pub fn passed_count(&self) -> usize {
        self.passed_count
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
