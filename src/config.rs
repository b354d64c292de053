use crate::assess::score::{Dimension, ScoreBounds, WeightTable};
use crate::assess::timing::TimingModel;
use crate::assess::AssessorSettings;
use crate::defaults;
use crate::error::{Result, TingshuoError};
use crate::lexicon::Lexicon;
use crate::store::FileReportStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub timing: TimingConfig,
    pub alternatives: AlternativesConfig,
    pub lexicon: LexiconConfig,
    pub store: StoreConfig,
}

/// Score bounds, pass mark and dimension weights
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub min_score: f64,
    pub max_score: f64,
    pub pass_threshold: f64,
    /// Dimension name → weight. Must sum to 1.0.
    pub weights: BTreeMap<String, f64>,
}

/// Synthetic timestamp constants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub syllable_secs: f64,
    pub gap_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlternativesConfig {
    pub max_count: usize,
}

/// Lexicon source. The builtin tables are used when no path is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct LexiconConfig {
    pub path: Option<PathBuf>,
}

/// Report store location for the command line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StoreConfig {
    pub dir: Option<PathBuf>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_score: defaults::MIN_SCORE,
            max_score: defaults::MAX_SCORE,
            pass_threshold: defaults::PASS_THRESHOLD,
            weights: Dimension::ALL
                .iter()
                .map(|d| (d.name().to_string(), defaults::DIMENSION_WEIGHT))
                .collect(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            syllable_secs: defaults::SYLLABLE_SECS,
            gap_secs: defaults::GAP_SECS,
        }
    }
}

impl Default for AlternativesConfig {
    fn default() -> Self {
        Self {
            max_count: defaults::MAX_ALTERNATIVES,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is unreadable or contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(TingshuoError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - TINGSHUO_LEXICON → lexicon.path
    /// - TINGSHUO_MAX_ALTERNATIVES → alternatives.max_count
    /// - TINGSHUO_STORE_DIR → store.dir
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("TINGSHUO_LEXICON")
            && !path.is_empty()
        {
            self.lexicon.path = Some(PathBuf::from(path));
        }

        if let Ok(count) = std::env::var("TINGSHUO_MAX_ALTERNATIVES")
            && !count.is_empty()
        {
            match count.parse() {
                Ok(count) => self.alternatives.max_count = count,
                Err(_) => log::warn!("Ignoring TINGSHUO_MAX_ALTERNATIVES={count:?}: not a count"),
            }
        }

        if let Ok(dir) = std::env::var("TINGSHUO_STORE_DIR")
            && !dir.is_empty()
        {
            self.store.dir = Some(PathBuf::from(dir));
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/tingshuo/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("tingshuo")
            .join("config.toml")
    }

    /// Check every value the assessor depends on.
    pub fn validate(&self) -> Result<()> {
        self.score_bounds()?;
        self.weight_table()?;
        self.timing_model()?;
        if self.alternatives.max_count == 0 {
            return Err(TingshuoError::ConfigInvalidValue {
                key: "alternatives.max_count".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn score_bounds(&self) -> Result<ScoreBounds> {
        let scoring = &self.scoring;
        if !scoring.min_score.is_finite()
            || !scoring.max_score.is_finite()
            || scoring.min_score >= scoring.max_score
        {
            return Err(TingshuoError::ConfigInvalidValue {
                key: "scoring.max_score".to_string(),
                message: format!(
                    "bounds must satisfy min < max, got {}..={}",
                    scoring.min_score, scoring.max_score
                ),
            });
        }
        let bounds = ScoreBounds {
            min: scoring.min_score,
            max: scoring.max_score,
        };
        if !bounds.contains(scoring.pass_threshold) {
            return Err(TingshuoError::ConfigInvalidValue {
                key: "scoring.pass_threshold".to_string(),
                message: format!(
                    "{} is outside {}..={}",
                    scoring.pass_threshold, bounds.min, bounds.max
                ),
            });
        }
        Ok(bounds)
    }

    /// Build the validated weight table from `[scoring.weights]`.
    pub fn weight_table(&self) -> Result<WeightTable> {
        let weights = self
            .scoring
            .weights
            .iter()
            .map(|(name, &weight)| {
                let dimension = name.parse::<Dimension>().map_err(|_| {
                    TingshuoError::InvalidWeights {
                        message: format!("unknown dimension '{name}'"),
                    }
                })?;
                Ok((dimension, weight))
            })
            .collect::<Result<Vec<_>>>()?;
        WeightTable::new(weights)
    }

    pub fn timing_model(&self) -> Result<TimingModel> {
        TimingModel::new(self.timing.syllable_secs, self.timing.gap_secs)
    }

    /// Validated assessor tunables.
    pub fn assessor_settings(&self) -> Result<AssessorSettings> {
        self.validate()?;
        Ok(AssessorSettings {
            weights: self.weight_table()?,
            bounds: self.score_bounds()?,
            timing: self.timing_model()?,
            max_alternatives: self.alternatives.max_count,
            pass_threshold: self.scoring.pass_threshold,
        })
    }

    /// The configured lexicon file, or the builtin tables.
    pub fn load_lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon.path {
            Some(path) => Lexicon::load(path),
            None => Ok(Lexicon::builtin()),
        }
    }

    /// Directory the command line stores reports in.
    pub fn store_dir(&self) -> PathBuf {
        self.store
            .dir
            .clone()
            .unwrap_or_else(FileReportStore::default_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to serialize tests that modify environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // SAFETY: These helpers are only used in tests with ENV_LOCK held,
    // ensuring no concurrent access to environment variables.
    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) }
    }

    fn clear_tingshuo_env() {
        remove_env("TINGSHUO_LEXICON");
        remove_env("TINGSHUO_MAX_ALTERNATIVES");
        remove_env("TINGSHUO_STORE_DIR");
    }

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_default_config_has_correct_values() {
        let config = Config::default();

        assert_eq!(config.scoring.min_score, 0.0);
        assert_eq!(config.scoring.max_score, 100.0);
        assert_eq!(config.scoring.pass_threshold, 75.0);
        assert_eq!(config.scoring.weights.len(), 5);
        assert_eq!(config.scoring.weights["fluency"], 0.2);

        assert_eq!(config.timing.syllable_secs, 0.3);
        assert_eq!(config.timing.gap_secs, 0.05);
        assert_eq!(config.alternatives.max_count, 5);
        assert_eq!(config.lexicon.path, None);
        assert_eq!(config.store.dir, None);

        config.validate().unwrap();
        assert_eq!(config.weight_table().unwrap(), WeightTable::uniform());
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp_file = write_temp(
            r#"
            [scoring]
            min_score = 0.0
            max_score = 10.0
            pass_threshold = 6.0

            [scoring.weights]
            pronunciation = 0.4
            fluency = 0.3
            accuracy = 0.1
            comprehension = 0.1
            confidence = 0.1

            [timing]
            syllable_secs = 0.25
            gap_secs = 0.0

            [alternatives]
            max_count = 3

            [lexicon]
            path = "/usr/share/tingshuo/lexicon.toml"

            [store]
            dir = "/var/lib/tingshuo"
        "#,
        );

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.scoring.max_score, 10.0);
        assert_eq!(config.scoring.pass_threshold, 6.0);
        assert_eq!(config.scoring.weights["pronunciation"], 0.4);
        assert_eq!(config.timing.syllable_secs, 0.25);
        assert_eq!(config.timing.gap_secs, 0.0);
        assert_eq!(config.alternatives.max_count, 3);
        assert_eq!(
            config.lexicon.path,
            Some(PathBuf::from("/usr/share/tingshuo/lexicon.toml"))
        );
        assert_eq!(config.store_dir(), PathBuf::from("/var/lib/tingshuo"));

        let weights = config.weight_table().unwrap();
        assert_eq!(weights.weight(Dimension::Pronunciation), Some(0.4));
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let temp_file = write_temp(
            r#"
            [alternatives]
            max_count = 2
        "#,
        );

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.alternatives.max_count, 2);
        assert_eq!(config.scoring, ScoringConfig::default());
        assert_eq!(config.timing, TimingConfig::default());
        assert_eq!(config.lexicon.path, None);
    }

    #[test]
    fn test_env_override_max_alternatives() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_tingshuo_env();

        set_env("TINGSHUO_MAX_ALTERNATIVES", "2");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.alternatives.max_count, 2);
        assert_eq!(config.lexicon.path, None); // Not overridden

        clear_tingshuo_env();
    }

    #[test]
    fn test_env_override_unparsable_count_ignored() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_tingshuo_env();

        set_env("TINGSHUO_MAX_ALTERNATIVES", "many");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.alternatives.max_count, 5);

        clear_tingshuo_env();
    }

    #[test]
    fn test_env_override_all() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_tingshuo_env();

        set_env("TINGSHUO_LEXICON", "/tmp/lexicon.toml");
        set_env("TINGSHUO_MAX_ALTERNATIVES", "9");
        set_env("TINGSHUO_STORE_DIR", "/tmp/reports");

        let config = Config::default().with_env_overrides();

        assert_eq!(config.lexicon.path, Some(PathBuf::from("/tmp/lexicon.toml")));
        assert_eq!(config.alternatives.max_count, 9);
        assert_eq!(config.store.dir, Some(PathBuf::from("/tmp/reports")));

        clear_tingshuo_env();
    }

    #[test]
    fn test_env_override_empty_string_ignored() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_tingshuo_env();

        set_env("TINGSHUO_LEXICON", "");
        let config = Config::default().with_env_overrides();

        assert_eq!(config.lexicon.path, None);

        clear_tingshuo_env();
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let temp_file = write_temp(
            r#"
            [scoring
            min_score = "broken
        "#,
        );

        let result = Config::load(temp_file.path());

        assert!(matches!(result, Err(TingshuoError::Config(_))));
    }

    #[test]
    fn test_default_path_ends_with_tingshuo_config() {
        let path = Config::default_path();

        assert!(path.ends_with("tingshuo/config.toml"));
    }

    #[test]
    fn test_load_or_default_returns_default_for_missing_file() {
        let missing_path = Path::new("/tmp/nonexistent_tingshuo_config_12345.toml");
        let config = Config::load_or_default(missing_path).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_errors_on_invalid_toml() {
        let temp_file = write_temp("[timing\nsyllable_secs = ");

        // Should fail on invalid TOML, not return defaults
        let err = Config::load_or_default(temp_file.path()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = Config::default();
        config.scoring.weights.insert("fluency".to_string(), 0.5);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, TingshuoError::InvalidWeights { .. }));
    }

    #[test]
    fn test_unknown_weight_dimension_rejected() {
        let mut config = Config::default();
        config.scoring.weights.insert("style".to_string(), 0.0);

        let err = config.weight_table().unwrap_err();
        assert!(err.to_string().contains("style"));
    }

    #[test]
    fn test_partial_weight_table_allowed() {
        let mut config = Config::default();
        config.scoring.weights = [("accuracy".to_string(), 0.5), ("fluency".to_string(), 0.5)]
            .into_iter()
            .collect();

        let weights = config.weight_table().unwrap();
        assert_eq!(weights.dimensions().count(), 2);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.scoring.min_score = 100.0;
        assert!(matches!(
            config.validate(),
            Err(TingshuoError::ConfigInvalidValue { key, .. }) if key == "scoring.max_score"
        ));

        let mut config = Config::default();
        config.scoring.pass_threshold = 120.0;
        assert!(matches!(
            config.validate(),
            Err(TingshuoError::ConfigInvalidValue { key, .. }) if key == "scoring.pass_threshold"
        ));

        let mut config = Config::default();
        config.timing.syllable_secs = 0.0;
        assert!(matches!(
            config.validate(),
            Err(TingshuoError::ConfigInvalidValue { key, .. }) if key == "timing.syllable_secs"
        ));

        let mut config = Config::default();
        config.alternatives.max_count = 0;
        assert!(matches!(
            config.validate(),
            Err(TingshuoError::ConfigInvalidValue { key, .. }) if key == "alternatives.max_count"
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_timing() {
        let mut config = Config::default();
        config.timing.syllable_secs = 1e16;
        assert!(matches!(
            config.validate(),
            Err(TingshuoError::ConfigInvalidValue { key, .. }) if key == "timing.syllable_secs"
        ));
        assert!(crate::assess::Assessor::from_config(&config).is_err());

        let mut config = Config::default();
        config.timing.gap_secs = 61.0;
        assert!(matches!(
            config.validate(),
            Err(TingshuoError::ConfigInvalidValue { key, .. }) if key == "timing.gap_secs"
        ));
    }

    #[test]
    fn test_assessor_settings_carry_config() {
        let mut config = Config::default();
        config.alternatives.max_count = 2;
        config.scoring.pass_threshold = 60.0;

        let settings = config.assessor_settings().unwrap();
        assert_eq!(settings.max_alternatives, 2);
        assert_eq!(settings.pass_threshold, 60.0);
        assert_eq!(settings.bounds, ScoreBounds::default());
    }

    #[test]
    fn test_missing_lexicon_file_is_configuration_error() {
        let mut config = Config::default();
        config.lexicon.path = Some(PathBuf::from("/nonexistent/tingshuo-lexicon.toml"));

        let err = config.load_lexicon().unwrap_err();
        assert!(matches!(err, TingshuoError::LexiconLoad { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
