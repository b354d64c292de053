//! Pinyin transcription of tokens.

use crate::defaults;
use crate::lexicon::Lexicon;
use crate::report::Token;
use std::sync::Arc;

/// Romanized reading of one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcription {
    /// Tone-marked pinyin, syllables separated by single spaces.
    pub pinyin: String,
    /// The token was not in the dictionary and `pinyin` is the fallback marker.
    pub fallback: bool,
}

impl Transcription {
    /// Number of romanized syllables, never less than one.
    pub fn syllable_count(&self) -> usize {
        syllable_count(&self.pinyin)
    }
}

/// Count syllables of a space-separated pinyin string, never less than one.
pub fn syllable_count(pinyin: &str) -> usize {
    pinyin.split_whitespace().count().max(1)
}

/// Maps tokens to their primary dictionary pronunciation.
#[derive(Debug, Clone)]
pub struct Transcriber {
    lexicon: Arc<Lexicon>,
}

impl Transcriber {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Transcribe a token.
    ///
    /// Tokens with several readings get the dictionary's primary one, without
    /// looking at context. Tokens missing from the dictionary (punctuation,
    /// unknown glyphs) degrade to [`defaults::FALLBACK_SYLLABLE`] with
    /// `fallback` set instead of failing.
    pub fn transcribe(&self, token: &Token) -> Transcription {
        match self.lexicon.primary_reading(&token.text) {
            Ok(reading) => Transcription {
                pinyin: reading.to_string(),
                fallback: false,
            },
            Err(e) => {
                log::debug!("{e}, using fallback marker");
                Transcription {
                    pinyin: defaults::FALLBACK_SYLLABLE.to_string(),
                    fallback: true,
                }
            }
        }
    }

    /// Transcribe a token sequence, preserving order.
    pub fn transcribe_all(&self, tokens: &[Token]) -> Vec<Transcription> {
        tokens.iter().map(|token| self.transcribe(token)).collect()
    }
}
