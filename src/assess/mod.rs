//! Assessment pipeline.
//!
//! Each question flows forward through the stages:
//! segment → transcribe / confidence / timing → alternatives → score.
//! Stages share one read-only [`Lexicon`]; questions are independent and a
//! session assesses them in parallel.

pub mod alternatives;
pub mod confidence;
pub mod diff;
pub mod score;
pub mod segment;
pub mod timing;
pub mod transcribe;

pub use alternatives::AlternativeGenerator;
pub use confidence::ConfidenceSynthesizer;
pub use diff::{CharacterError, CharacterErrorKind, character_errors};
pub use score::{
    Dimension, DimensionScore, DimensionScores, ScoreAggregator, ScoreBounds, WeightTable,
    aggregate_session,
};
pub use segment::Segmenter;
pub use timing::TimingModel;
pub use transcribe::{Transcriber, Transcription};

use crate::config::Config;
use crate::defaults;
use crate::error::{Result, TingshuoError};
use crate::input::QuestionInput;
use crate::lexicon::Lexicon;
use crate::report::{PhoneticAnnotation, QuestionAssessment, SessionReport, Utterance};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

/// Source of the per-session random seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionSeed {
    /// Seed from system entropy.
    #[default]
    Entropy,
    /// Fixed seed; the same input always yields the same report.
    Fixed(u64),
}

impl SessionSeed {
    fn resolve(self) -> u64 {
        match self {
            SessionSeed::Entropy => rand::random(),
            SessionSeed::Fixed(seed) => seed,
        }
    }
}

/// Tunables of an [`Assessor`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssessorSettings {
    pub weights: WeightTable,
    pub bounds: ScoreBounds,
    pub timing: TimingModel,
    pub max_alternatives: usize,
    pub pass_threshold: f64,
}

impl Default for AssessorSettings {
    fn default() -> Self {
        Self {
            weights: WeightTable::default(),
            bounds: ScoreBounds::default(),
            timing: TimingModel::default(),
            max_alternatives: defaults::MAX_ALTERNATIVES,
            pass_threshold: defaults::PASS_THRESHOLD,
        }
    }
}

/// Runs the full pipeline for questions and sessions.
#[derive(Debug, Clone)]
pub struct Assessor {
    lexicon: Arc<Lexicon>,
    segmenter: Segmenter,
    transcriber: Transcriber,
    confidence: ConfidenceSynthesizer,
    timing: TimingModel,
    alternatives: AlternativeGenerator,
    aggregator: ScoreAggregator,
    max_alternatives: usize,
    pass_threshold: f64,
}

impl Assessor {
    pub fn new(lexicon: Arc<Lexicon>, settings: AssessorSettings) -> Self {
        Self {
            segmenter: Segmenter::new(lexicon.clone()),
            transcriber: Transcriber::new(lexicon.clone()),
            confidence: ConfidenceSynthesizer::new(lexicon.clone()),
            alternatives: AlternativeGenerator::new(lexicon.clone()),
            lexicon,
            timing: settings.timing,
            aggregator: ScoreAggregator::new(settings.weights, settings.bounds),
            max_alternatives: settings.max_alternatives,
            pass_threshold: settings.pass_threshold,
        }
    }

    /// Build an assessor from validated configuration, loading the lexicon
    /// it names (or the builtin tables).
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = config.assessor_settings()?;
        let lexicon = config.load_lexicon()?;
        Ok(Self::new(Arc::new(lexicon), settings))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Replace the confidence perturbation half-width.
    pub fn with_confidence_jitter(mut self, jitter: f64) -> Self {
        self.confidence = self.confidence.with_jitter(jitter);
        self
    }

    /// Assess one question. Failures are wrapped with the question id.
    pub fn assess_question<R: Rng + ?Sized>(
        &self,
        question: &QuestionInput,
        rng: &mut R,
    ) -> Result<QuestionAssessment> {
        self.run_question(question, rng)
            .map_err(|e| e.in_question(&question.id))
    }

    fn run_question<R: Rng + ?Sized>(
        &self,
        question: &QuestionInput,
        rng: &mut R,
    ) -> Result<QuestionAssessment> {
        if question.id.trim().is_empty() {
            return Err(TingshuoError::InvalidInput {
                message: "question id is empty".to_string(),
            });
        }
        let utterance =
            Utterance::new(&question.student_answer_text, defaults::DEFAULT_LANGUAGE)?;
        let scores = question.dimension_scores()?;
        let overall = self.aggregator.aggregate_question(&scores)?;

        let tokens = self.segmenter.segment(utterance.text())?;
        let transcriptions = self.transcriber.transcribe_all(&tokens);
        let windows = self
            .timing
            .timestamps(transcriptions.iter().map(|t| t.pinyin.as_str()));

        let mut transcript = Vec::with_capacity(tokens.len());
        for ((token, transcription), window) in tokens.iter().zip(transcriptions).zip(windows) {
            transcript.push(PhoneticAnnotation {
                word: token.text.clone(),
                pinyin: transcription.pinyin,
                confidence: self.confidence.confidence(token, rng),
                window,
                fallback: transcription.fallback,
            });
        }

        let alternatives = self
            .alternatives
            .alternatives(utterance.text(), &tokens, self.max_alternatives);
        let errors = character_errors(
            &question.prompt.chinese_text,
            utterance.text(),
            &self.lexicon,
        );

        log::debug!(
            "Question {}: {} tokens, {} alternatives, {} character errors, overall {overall}",
            question.id,
            transcript.len(),
            alternatives.len(),
            errors.len()
        );

        Ok(QuestionAssessment::new(
            question.id.clone(),
            utterance,
            transcript,
            alternatives,
            scores,
            overall,
            self.pass_threshold,
            errors,
        ))
    }

    /// Assess every question of a session and assemble the report.
    ///
    /// Questions run in parallel on scoped threads. Question `i` draws its
    /// confidence perturbation from a generator seeded with `seed + i`, so a
    /// fixed seed reproduces the report exactly regardless of scheduling.
    /// Questions keep their input order. The first failing question (in
    /// input order) fails the whole session.
    pub fn assess_session(
        &self,
        session_id: &str,
        questions: &[QuestionInput],
        seed: SessionSeed,
    ) -> Result<SessionReport> {
        if session_id.trim().is_empty() {
            return Err(TingshuoError::InvalidInput {
                message: "session id is empty".to_string(),
            });
        }
        if questions.is_empty() {
            return Err(TingshuoError::InvalidInput {
                message: format!("session {session_id} has no questions"),
            });
        }

        let base_seed = seed.resolve();
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .min(questions.len());
        let chunk_size = questions.len().div_ceil(workers);
        log::info!(
            "Assessing session {session_id}: {} questions on {workers} threads (seed {base_seed})",
            questions.len()
        );

        let results: Vec<Result<QuestionAssessment>> = thread::scope(|scope| {
            let handles: Vec<_> = questions
                .chunks(chunk_size)
                .enumerate()
                .map(|(chunk_index, chunk)| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .enumerate()
                            .map(|(offset, question)| {
                                let index = (chunk_index * chunk_size + offset) as u64;
                                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(index));
                                self.assess_question(question, &mut rng)
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap_or_else(|p| std::panic::resume_unwind(p)))
                .collect()
        });

        let assessments = results.into_iter().collect::<Result<Vec<_>>>()?;
        let report = SessionReport::assemble(session_id, assessments)?;
        log::info!(
            "Session {}: overall {}, {}/{} passed",
            report.session_id(),
            report.overall_score(),
            report.passed_count(),
            report.questions().len()
        );
        Ok(report)
    }
}
