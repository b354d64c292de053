//! Caller-supplied assessment input.

use crate::assess::score::{Dimension, DimensionScore, DimensionScores};
use crate::error::{Result, TingshuoError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The question as presented to the student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    /// Expected answer text.
    pub chinese_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinyin_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_gloss: Option<String>,
}

/// One answered question with its upstream dimension scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    pub id: String,
    pub prompt: Prompt,
    pub student_answer_text: String,
    /// Scores keyed by dimension name. Kept loose so a missing dimension is
    /// reported by aggregation rather than as a JSON error.
    #[serde(default)]
    pub provided_dimension_scores: BTreeMap<String, f64>,
}

impl QuestionInput {
    /// Parse the provided scores into typed dimension scores.
    ///
    /// Unknown dimension names fail with `InvalidInput`; two spellings of
    /// the same dimension fail with `DuplicateDimension`.
    pub fn dimension_scores(&self) -> Result<DimensionScores> {
        let scores = self
            .provided_dimension_scores
            .iter()
            .map(|(name, &value)| {
                Ok(DimensionScore {
                    dimension: name.parse::<Dimension>()?,
                    value,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        DimensionScores::from_scores(scores)
    }
}

/// A completed practice session awaiting assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInput {
    pub session_id: String,
    pub questions: Vec<QuestionInput>,
}

impl SessionInput {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "sessionId": "lesson-1",
        "questions": [{
            "id": "q1",
            "prompt": { "chineseText": "你好嗎", "englishGloss": "How are you?" },
            "studentAnswerText": "你好嗎",
            "providedDimensionScores": {
                "pronunciation": 80, "fluency": 75, "accuracy": 85,
                "comprehension": 90, "confidence": 70
            }
        }]
    }"#;

    #[test]
    fn parses_camel_case_session() {
        let session = SessionInput::from_json(SAMPLE).unwrap();
        assert_eq!(session.session_id, "lesson-1");
        let question = &session.questions[0];
        assert_eq!(question.prompt.chinese_text, "你好嗎");
        assert_eq!(question.prompt.pinyin_hint, None);
        assert_eq!(question.prompt.english_gloss.as_deref(), Some("How are you?"));

        let scores = question.dimension_scores().unwrap();
        assert_eq!(scores.len(), 5);
        assert_eq!(scores.get(Dimension::Comprehension), Some(90.0));
    }

    #[test]
    fn capitalized_dimension_names_accepted() {
        let mut question = SessionInput::from_json(SAMPLE).unwrap().questions.remove(0);
        let value = question.provided_dimension_scores.remove("fluency").unwrap();
        question
            .provided_dimension_scores
            .insert("Fluency".to_string(), value);
        assert_eq!(
            question.dimension_scores().unwrap().get(Dimension::Fluency),
            Some(75.0)
        );
    }

    #[test]
    fn duplicate_spellings_rejected() {
        let mut question = SessionInput::from_json(SAMPLE).unwrap().questions.remove(0);
        question
            .provided_dimension_scores
            .insert("Fluency".to_string(), 60.0);
        let err = question.dimension_scores().unwrap_err();
        assert!(matches!(
            err,
            TingshuoError::DuplicateDimension {
                dimension: Dimension::Fluency
            }
        ));
    }

    #[test]
    fn unknown_dimension_rejected() {
        let mut question = SessionInput::from_json(SAMPLE).unwrap().questions.remove(0);
        question
            .provided_dimension_scores
            .insert("style".to_string(), 60.0);
        assert!(matches!(
            question.dimension_scores(),
            Err(TingshuoError::InvalidInput { .. })
        ));
    }

    #[test]
    fn missing_scores_parse_as_empty() {
        let json = r#"{ "id": "q", "prompt": { "chineseText": "好" }, "studentAnswerText": "好" }"#;
        let question: QuestionInput = serde_json::from_str(json).unwrap();
        assert!(question.dimension_scores().unwrap().is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SessionInput::load(Path::new("/nonexistent/session.json")).unwrap_err();
        assert!(matches!(err, TingshuoError::Io(_)));
    }
}
