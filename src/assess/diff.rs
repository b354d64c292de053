//! Character-level comparison of an answer against the expected text.
//!
//! Uses a minimum edit alignment (substitution, deletion, insertion at unit
//! cost) and walks the table back from the end to list the differences.
//! Whitespace and punctuation are ignored on both sides.

use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterErrorKind {
    /// Expected character absent from the answer.
    Missing,
    /// Answer has a different character in this place.
    Wrong,
    /// Answer has a character the expected text does not.
    Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Index into the expected characters (insertion point for `Extra`).
    pub position: usize,
    #[serde(rename = "type")]
    pub kind: CharacterErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_pinyin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_pinyin: Option<String>,
}

/// List the character differences between `expected` and `actual`.
pub fn character_errors(expected: &str, actual: &str, lexicon: &Lexicon) -> Vec<CharacterError> {
    let e: Vec<char> = comparable_chars(expected);
    let a: Vec<char> = comparable_chars(actual);
    let width = a.len() + 1;

    let mut dist = vec![0usize; (e.len() + 1) * width];
    for i in 0..=e.len() {
        dist[i * width] = i;
    }
    for j in 0..=a.len() {
        dist[j] = j;
    }
    for i in 1..=e.len() {
        for j in 1..=a.len() {
            let substitution = dist[(i - 1) * width + j - 1] + usize::from(e[i - 1] != a[j - 1]);
            let deletion = dist[(i - 1) * width + j] + 1;
            let insertion = dist[i * width + j - 1] + 1;
            dist[i * width + j] = substitution.min(deletion).min(insertion);
        }
    }

    let pinyin = |c: char| {
        lexicon
            .primary_reading(&c.to_string())
            .ok()
            .map(str::to_string)
    };

    let mut errors = Vec::new();
    let (mut i, mut j) = (e.len(), a.len());
    while i > 0 || j > 0 {
        let here = dist[i * width + j];
        if i > 0 && j > 0 && e[i - 1] == a[j - 1] && here == dist[(i - 1) * width + j - 1] {
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && here == dist[(i - 1) * width + j - 1] + 1 {
            errors.push(CharacterError {
                expected: Some(e[i - 1].to_string()),
                actual: Some(a[j - 1].to_string()),
                position: i - 1,
                kind: CharacterErrorKind::Wrong,
                expected_pinyin: pinyin(e[i - 1]),
                actual_pinyin: pinyin(a[j - 1]),
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && here == dist[(i - 1) * width + j] + 1 {
            errors.push(CharacterError {
                expected: Some(e[i - 1].to_string()),
                actual: None,
                position: i - 1,
                kind: CharacterErrorKind::Missing,
                expected_pinyin: pinyin(e[i - 1]),
                actual_pinyin: None,
            });
            i -= 1;
        } else {
            errors.push(CharacterError {
                expected: None,
                actual: Some(a[j - 1].to_string()),
                position: i,
                kind: CharacterErrorKind::Extra,
                expected_pinyin: None,
                actual_pinyin: pinyin(a[j - 1]),
            });
            j -= 1;
        }
    }

    errors.reverse();
    errors
}

fn comparable_chars(text: &str) -> Vec<char> {
    text.chars().filter(|c| c.is_alphanumeric()).collect()
}
