//! Longest-match segmentation of answer text into tokens.

use crate::error::{Result, TingshuoError};
use crate::lexicon::Lexicon;
use crate::report::Token;
use std::sync::Arc;

/// Splits text into vocabulary words, falling back to single characters.
#[derive(Debug, Clone)]
pub struct Segmenter {
    lexicon: Arc<Lexicon>,
}

impl Segmenter {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Segment `text` into tokens in reading order.
    ///
    /// At every position the longest vocabulary word starting there wins;
    /// otherwise the single character becomes a token. Whitespace separates
    /// tokens and is never part of one. Fails with `InvalidInput` when the
    /// text is empty after trimming.
    pub fn segment(&self, text: &str) -> Result<Vec<Token>> {
        if text.trim().is_empty() {
            return Err(TingshuoError::InvalidInput {
                message: "cannot segment empty text".to_string(),
            });
        }

        let chars: Vec<char> = text.chars().collect();
        let max_word = self.lexicon.max_word_chars();
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < chars.len() {
            if chars[pos].is_whitespace() {
                pos += 1;
                continue;
            }

            let run = chars[pos..]
                .iter()
                .take_while(|c| !c.is_whitespace())
                .count();
            let mut len = 1;
            for candidate in (2..=max_word.min(run)).rev() {
                let word: String = chars[pos..pos + candidate].iter().collect();
                if self.lexicon.is_word(&word) {
                    len = candidate;
                    break;
                }
            }

            tokens.push(Token {
                text: chars[pos..pos + len].iter().collect(),
                index: tokens.len(),
                offset: pos,
            });
            pos += len;
        }

        log::debug!("Segmented {:?} into {} tokens", text, tokens.len());
        Ok(tokens)
    }
}
