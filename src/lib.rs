//! tingshuo - Phonetic assessment of spoken Chinese practice answers
//!
//! Segments transcribed answers, annotates them with pinyin, confidence and
//! timing, proposes homophone alternatives and aggregates dimension scores
//! into session reports.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod assess;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod input;
pub mod lexicon;
pub mod report;
pub mod store;

// Pipeline
pub use assess::{Assessor, AssessorSettings, SessionSeed};
pub use assess::{Dimension, DimensionScore, DimensionScores, ScoreAggregator, WeightTable};

// Data model
pub use input::{Prompt, QuestionInput, SessionInput};
pub use report::{PhoneticAnnotation, QuestionAssessment, SessionReport, Token, Utterance};

// Lookup tables
pub use lexicon::Lexicon;

// Persistence
pub use store::{FileReportStore, MemoryReportStore, ReportStore};

// Error handling
pub use error::{Result, TingshuoError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_hash_suffix_matches_build() {
        let ver = version_string();
        match option_env!("GIT_HASH").filter(|h| !h.is_empty()) {
            Some(hash) => assert_eq!(ver, format!("{}+{}", env!("CARGO_PKG_VERSION"), hash)),
            None => assert_eq!(ver, env!("CARGO_PKG_VERSION")),
        }
    }
}
