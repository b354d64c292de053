//! Alternative readings built from confusion sets.

use crate::lexicon::Lexicon;
use crate::report::Token;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AlternativeGenerator {
    lexicon: Arc<Lexicon>,
}

impl AlternativeGenerator {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Whole-utterance alternatives with exactly one token substituted.
    ///
    /// `tokens` must come from segmenting `text`; each candidate keeps the
    /// rest of `text`, separators included, and swaps the token's span.
    /// Tokens are visited in reading order and each confusable neighbor yields
    /// one candidate. Candidates equal to the original or to an earlier
    /// candidate are dropped; at most `max_count` are returned.
    pub fn alternatives(&self, text: &str, tokens: &[Token], max_count: usize) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        'tokens: for token in tokens {
            let end = token.offset + token.text.chars().count();
            let (Some(before), Some(after)) = (chars.get(..token.offset), chars.get(end..))
            else {
                log::warn!("Token {:?} lies outside {:?}", token.text, text);
                continue;
            };
            for neighbor in self.lexicon.confusables(&token.text) {
                if candidates.len() >= max_count {
                    break 'tokens;
                }
                let candidate: String = before
                    .iter()
                    .copied()
                    .chain(neighbor.chars())
                    .chain(after.iter().copied())
                    .collect();
                if candidate != text && seen.insert(candidate.clone()) {
                    candidates.push(candidate);
                }
            }
        }

        log::debug!(
            "Generated {} alternatives for {:?}",
            candidates.len(),
            text
        );
        candidates
    }
}
