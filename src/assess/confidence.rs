//! Synthetic per-token confidence.
//!
//! No recognizer output is available, so confidence is a plausibility
//! estimate: a baseline from the token's dictionary frequency class and
//! length, plus a bounded random perturbation drawn from a caller-supplied
//! generator. Seeding that generator makes results reproducible.

use crate::defaults;
use crate::lexicon::{FrequencyClass, Lexicon};
use crate::report::Token;
use rand::Rng;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct ConfidenceSynthesizer {
    lexicon: Arc<Lexicon>,
    jitter: f64,
}

impl ConfidenceSynthesizer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            jitter: defaults::CONFIDENCE_JITTER,
        }
    }

    /// Override the perturbation half-width. Non-finite values disable it.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = if jitter.is_finite() { jitter.abs() } else { 0.0 };
        self
    }

    /// Deterministic part of the confidence.
    pub fn baseline(&self, token: &Token) -> f64 {
        let Some(class) = self.lexicon.frequency_class(&token.text) else {
            return defaults::FALLBACK_CONFIDENCE;
        };
        let base = match class {
            FrequencyClass::Common => defaults::COMMON_CONFIDENCE,
            FrequencyClass::Regular => defaults::REGULAR_CONFIDENCE,
            FrequencyClass::Rare => defaults::RARE_CONFIDENCE,
        };
        let extra_chars = token.char_count().saturating_sub(1) as f64;
        base + (extra_chars * defaults::LENGTH_BONUS).min(defaults::MAX_LENGTH_BONUS)
    }

    /// Confidence of `token` in `[0, 1]`.
    pub fn confidence<R: Rng + ?Sized>(&self, token: &Token, rng: &mut R) -> f64 {
        let perturbation = if self.jitter > 0.0 {
            rng.gen_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        (self.baseline(token) + perturbation).clamp(0.0, 1.0)
    }
}
