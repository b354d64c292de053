//! Shared linguistic lookup tables.
//!
//! A [`Lexicon`] bundles the segmentation vocabulary, the pronunciation
//! dictionary, frequency classes and confusion sets. It is built once,
//! never mutated afterwards, and shared between pipeline stages (and
//! threads) behind an `Arc`.

mod builtin;

use crate::error::{Result, TingshuoError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Coarse usage frequency of a dictionary token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyClass {
    Common,
    #[default]
    Regular,
    Rare,
}

/// One pronunciation dictionary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Word or single character.
    pub text: String,
    /// Tone-marked pinyin, syllables separated by spaces. The first one is primary.
    pub readings: Vec<String>,
    #[serde(default)]
    pub frequency: FrequencyClass,
}

/// Tokens considered phonetically similar enough to substitute for each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionSet {
    pub members: Vec<String>,
}

/// On-disk lexicon layout (TOML).
///
/// ```toml
/// [[entries]]
/// text = "你好"
/// readings = ["nǐ hǎo"]
/// frequency = "common"
///
/// [[confusions]]
/// members = ["是", "事", "十"]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LexiconFile {
    entries: Vec<LexiconEntry>,
    confusions: Vec<ConfusionSet>,
}

/// Read-only vocabulary, pronunciation and confusion tables.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    readings: HashMap<String, Vec<String>>,
    frequency: HashMap<String, FrequencyClass>,
    vocabulary: HashSet<String>,
    max_word_chars: usize,
    confusions: HashMap<String, Vec<String>>,
}

impl Lexicon {
    /// Lexicon compiled into the binary.
    pub fn builtin() -> Self {
        let entries = builtin::ENTRIES
            .iter()
            .map(|(text, readings, frequency)| LexiconEntry {
                text: (*text).to_string(),
                readings: readings.iter().map(|r| (*r).to_string()).collect(),
                frequency: *frequency,
            })
            .collect();
        let confusions = builtin::CONFUSIONS
            .iter()
            .map(|members| ConfusionSet {
                members: members.iter().map(|m| (*m).to_string()).collect(),
            })
            .collect();
        Self::assemble(entries, confusions)
    }

    /// Build a lexicon from explicit records, validating them first.
    ///
    /// Repeated entries for the same text append their readings, so the
    /// reading listed first overall stays primary.
    pub fn from_entries(entries: Vec<LexiconEntry>, confusions: Vec<ConfusionSet>) -> Result<Self> {
        for entry in &entries {
            validate_entry(entry)?;
        }
        for set in &confusions {
            let distinct: HashSet<&str> = set.members.iter().map(|m| m.trim()).collect();
            if distinct.len() < 2 || distinct.contains("") {
                return Err(TingshuoError::InvalidInput {
                    message: format!(
                        "confusion set {:?} needs at least two distinct non-empty members",
                        set.members
                    ),
                });
            }
        }
        Ok(Self::assemble(entries, confusions))
    }

    /// Parse a lexicon from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: LexiconFile = toml::from_str(contents)?;
        Self::from_entries(file.entries, file.confusions)
    }

    /// Load a lexicon file.
    ///
    /// Every failure is reported as a configuration error naming the path.
    pub fn load(path: &Path) -> Result<Self> {
        let to_load_error = |message: String| TingshuoError::LexiconLoad {
            path: path.display().to_string(),
            message,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| to_load_error(e.to_string()))?;
        let lexicon = Self::from_toml_str(&contents).map_err(|e| to_load_error(e.to_string()))?;
        if lexicon.is_empty() {
            return Err(to_load_error("lexicon has no entries".to_string()));
        }
        log::info!(
            "Loaded lexicon from {} ({} entries)",
            path.display(),
            lexicon.len()
        );
        Ok(lexicon)
    }

    fn assemble(entries: Vec<LexiconEntry>, confusions: Vec<ConfusionSet>) -> Self {
        let mut lexicon = Self::default();

        for entry in entries {
            let text = entry.text.trim().to_string();
            let char_count = text.chars().count();
            if char_count > 1 {
                lexicon.max_word_chars = lexicon.max_word_chars.max(char_count);
                lexicon.vocabulary.insert(text.clone());
            }
            lexicon
                .frequency
                .entry(text.clone())
                .or_insert(entry.frequency);
            lexicon
                .readings
                .entry(text)
                .or_default()
                .extend(entry.readings.into_iter().map(|r| r.trim().to_string()));
        }

        for set in confusions {
            let members: Vec<String> = set.members.iter().map(|m| m.trim().to_string()).collect();
            for member in &members {
                let neighbors = lexicon.confusions.entry(member.clone()).or_default();
                for other in &members {
                    if other != member && !neighbors.contains(other) {
                        neighbors.push(other.clone());
                    }
                }
            }
        }

        lexicon
    }

    /// Primary (first listed) pronunciation of `token`.
    ///
    /// Context-free: a character with several readings always gets the first.
    pub fn primary_reading(&self, token: &str) -> Result<&str> {
        self.readings
            .get(token)
            .and_then(|readings| readings.first())
            .map(String::as_str)
            .ok_or_else(|| TingshuoError::UnknownToken {
                token: token.to_string(),
            })
    }

    /// All recorded pronunciations of `token`, primary first.
    pub fn readings(&self, token: &str) -> Option<&[String]> {
        self.readings.get(token).map(Vec::as_slice)
    }

    pub fn frequency_class(&self, token: &str) -> Option<FrequencyClass> {
        self.frequency.get(token).copied()
    }

    /// Whether `text` is a multi-character vocabulary word.
    pub fn is_word(&self, text: &str) -> bool {
        self.vocabulary.contains(text)
    }

    /// Length in characters of the longest vocabulary word.
    pub fn max_word_chars(&self) -> usize {
        self.max_word_chars
    }

    /// Tokens confusable with `token`, in table order. Empty when none.
    pub fn confusables(&self, token: &str) -> &[String] {
        self.confusions.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct tokens with a pronunciation.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

fn validate_entry(entry: &LexiconEntry) -> Result<()> {
    let text = entry.text.trim();
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return Err(TingshuoError::InvalidInput {
            message: format!("lexicon entry text {:?} must be non-empty without spaces", entry.text),
        });
    }
    if entry.readings.is_empty() || entry.readings.iter().any(|r| r.trim().is_empty()) {
        return Err(TingshuoError::InvalidInput {
            message: format!("lexicon entry {text:?} needs at least one non-empty reading"),
        });
    }
    Ok(())
}
