//! Error types for tingshuo.

use crate::assess::score::Dimension;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TingshuoError {
    // Input errors
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Token has no pronunciation entry. Absorbed by the transcriber into a
    /// fallback annotation; never fails a whole assessment.
    #[error("Unknown token: {token}")]
    UnknownToken { token: String },

    // Aggregation errors
    #[error("Score for {dimension} out of range: {value} (allowed {min}..={max})")]
    ScoreRange {
        dimension: Dimension,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Missing score for dimension {dimension}")]
    MissingDimension { dimension: Dimension },

    #[error("Duplicate score for dimension {dimension}")]
    DuplicateDimension { dimension: Dimension },

    #[error("Question {id}: {source}")]
    Question {
        id: String,
        #[source]
        source: Box<TingshuoError>,
    },

    // Configuration errors
    #[error("Invalid weight table: {message}")]
    InvalidWeights { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Failed to load lexicon from {path}: {message}")]
    LexiconLoad { path: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Report store errors
    #[error("No report stored for session {session_id}")]
    ReportNotFound { session_id: String },

    #[error("Invalid session id: {session_id:?}")]
    InvalidSessionId { session_id: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TingshuoError {
    /// Attach the identifier of the question whose assessment failed.
    pub fn in_question(self, id: &str) -> Self {
        TingshuoError::Question {
            id: id.to_string(),
            source: Box::new(self),
        }
    }

    /// The underlying error with any question context stripped.
    pub fn innermost(&self) -> &TingshuoError {
        match self {
            TingshuoError::Question { source, .. } => source.innermost(),
            other => other,
        }
    }

    /// Whether this error stems from configuration rather than a single request.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self.innermost(),
            TingshuoError::InvalidWeights { .. }
                | TingshuoError::ConfigInvalidValue { .. }
                | TingshuoError::LexiconLoad { .. }
                | TingshuoError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TingshuoError>;
