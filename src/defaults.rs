//! Default configuration constants for tingshuo.
//!
//! Shared by the configuration layer and the pipeline stages so both agree
//! on the same bounds and timing model.

/// Lowest valid dimension score.
pub const MIN_SCORE: f64 = 0.0;

/// Highest valid dimension score.
pub const MAX_SCORE: f64 = 100.0;

/// Overall score at or above which a question counts as passed.
pub const PASS_THRESHOLD: f64 = 75.0;

/// Default weight of every evaluation dimension (five equal shares).
pub const DIMENSION_WEIGHT: f64 = 0.2;

/// Allowed deviation of the weight sum from 1.0.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Spoken duration of one romanized syllable, in seconds.
///
/// 0.3s per syllable matches a deliberate learner pace of roughly
/// three syllables per second.
pub const SYLLABLE_SECS: f64 = 0.3;

/// Silence inserted between consecutive tokens, in seconds.
pub const GAP_SECS: f64 = 0.05;

/// Upper bound for the per-syllable duration.
pub const MAX_SYLLABLE_SECS: f64 = 60.0;

/// Upper bound for the inter-token gap.
pub const MAX_GAP_SECS: f64 = 60.0;

/// Maximum number of alternative readings per utterance.
pub const MAX_ALTERNATIVES: usize = 5;

/// Syllable emitted for tokens absent from the pronunciation dictionary.
pub const FALLBACK_SYLLABLE: &str = "?";

/// Language tag given to utterances when the caller does not supply one.
pub const DEFAULT_LANGUAGE: &str = "zh";

/// Baseline confidence for tokens in the most frequent class.
pub const COMMON_CONFIDENCE: f64 = 0.92;

/// Baseline confidence for ordinary dictionary tokens.
pub const REGULAR_CONFIDENCE: f64 = 0.85;

/// Baseline confidence for rare dictionary tokens.
pub const RARE_CONFIDENCE: f64 = 0.72;

/// Baseline confidence for tokens transcribed with the fallback marker.
pub const FALLBACK_CONFIDENCE: f64 = 0.4;

/// Bonus per extra character of a multi-character word.
///
/// A longer dictionary match is less likely to be a misrecognition.
pub const LENGTH_BONUS: f64 = 0.02;

/// Upper bound on the accumulated length bonus.
pub const MAX_LENGTH_BONUS: f64 = 0.06;

/// Half-width of the uniform perturbation added to every confidence.
pub const CONFIDENCE_JITTER: f64 = 0.08;

/// File name suffix used by the file-backed report store.
pub const REPORT_FILE_SUFFIX: &str = "-report.json";
