//! Evaluation dimensions, weight tables and score aggregation.

use crate::defaults;
use crate::error::{Result, TingshuoError};
use crate::report::QuestionAssessment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One axis of evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Pronunciation,
    Fluency,
    Accuracy,
    Comprehension,
    Confidence,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Pronunciation,
        Dimension::Fluency,
        Dimension::Accuracy,
        Dimension::Comprehension,
        Dimension::Confidence,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Pronunciation => "pronunciation",
            Dimension::Fluency => "fluency",
            Dimension::Accuracy => "accuracy",
            Dimension::Comprehension => "comprehension",
            Dimension::Confidence => "confidence",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dimension {
    type Err = TingshuoError;

    /// Case-insensitive dimension name.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Dimension::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TingshuoError::InvalidInput {
                message: format!("unknown score dimension {s:?}"),
            })
    }
}

/// A single named score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub value: f64,
}

/// At most one score per dimension.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionScores(BTreeMap<Dimension, f64>);

impl DimensionScores {
    /// Collect scores, rejecting a second score for the same dimension.
    pub fn from_scores(scores: impl IntoIterator<Item = DimensionScore>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for score in scores {
            if map.insert(score.dimension, score.value).is_some() {
                return Err(TingshuoError::DuplicateDimension {
                    dimension: score.dimension,
                });
            }
        }
        Ok(Self(map))
    }

    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.0.get(&dimension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = DimensionScore> + '_ {
        self.0.iter().map(|(&dimension, &value)| DimensionScore { dimension, value })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Inclusive range every dimension score must fall in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ScoreBounds {
    fn default() -> Self {
        Self {
            min: defaults::MIN_SCORE,
            max: defaults::MAX_SCORE,
        }
    }
}

impl ScoreBounds {
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

/// Non-negative per-dimension weights summing to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    weights: BTreeMap<Dimension, f64>,
}

impl WeightTable {
    /// Validate and build a weight table.
    ///
    /// Fails with `InvalidWeights` when the table is empty, names a dimension
    /// twice, holds a negative or non-finite weight, or does not sum to 1.0
    /// within [`defaults::WEIGHT_TOLERANCE`].
    pub fn new(weights: impl IntoIterator<Item = (Dimension, f64)>) -> Result<Self> {
        let mut table = BTreeMap::new();
        for (dimension, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(TingshuoError::InvalidWeights {
                    message: format!("weight for {dimension} must be non-negative, got {weight}"),
                });
            }
            if table.insert(dimension, weight).is_some() {
                return Err(TingshuoError::InvalidWeights {
                    message: format!("dimension {dimension} listed twice"),
                });
            }
        }
        if table.is_empty() {
            return Err(TingshuoError::InvalidWeights {
                message: "no dimensions weighted".to_string(),
            });
        }
        let sum: f64 = table.values().sum();
        if (sum - 1.0).abs() > defaults::WEIGHT_TOLERANCE {
            return Err(TingshuoError::InvalidWeights {
                message: format!("weights sum to {sum}, expected 1.0"),
            });
        }
        Ok(Self { weights: table })
    }

    /// Equal weight for all five dimensions.
    pub fn uniform() -> Self {
        Self {
            weights: Dimension::ALL
                .into_iter()
                .map(|d| (d, defaults::DIMENSION_WEIGHT))
                .collect(),
        }
    }

    pub fn weight(&self, dimension: Dimension) -> Option<f64> {
        self.weights.get(&dimension).copied()
    }

    /// Dimensions that must be scored, in canonical order.
    pub fn dimensions(&self) -> impl Iterator<Item = Dimension> + '_ {
        self.weights.keys().copied()
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::uniform()
    }
}

/// Combines dimension scores into overall scores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreAggregator {
    weights: WeightTable,
    bounds: ScoreBounds,
}

impl ScoreAggregator {
    pub fn new(weights: WeightTable, bounds: ScoreBounds) -> Self {
        Self { weights, bounds }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn bounds(&self) -> ScoreBounds {
        self.bounds
    }

    /// Weighted overall score of one question, rounded to one decimal.
    ///
    /// Every supplied score is range-checked before anything is computed;
    /// then every weighted dimension must be present.
    pub fn aggregate_question(&self, scores: &DimensionScores) -> Result<f64> {
        for score in scores.iter() {
            if !self.bounds.contains(score.value) {
                return Err(TingshuoError::ScoreRange {
                    dimension: score.dimension,
                    value: score.value,
                    min: self.bounds.min,
                    max: self.bounds.max,
                });
            }
        }

        let mut total = 0.0;
        for dimension in self.weights.dimensions() {
            let value = scores
                .get(dimension)
                .ok_or(TingshuoError::MissingDimension { dimension })?;
            total += self.weights.weight(dimension).unwrap_or(0.0) * value;
        }

        Ok(round_to_tenth(total).clamp(self.bounds.min, self.bounds.max))
    }
}

/// Session score: arithmetic mean of the per-question overall scores.
///
/// A session without answered questions has no score and fails with
/// `InvalidInput`.
pub fn aggregate_session(questions: &[QuestionAssessment]) -> Result<f64> {
    if questions.is_empty() {
        return Err(TingshuoError::InvalidInput {
            message: "session has no assessed questions".to_string(),
        });
    }
    let sum: f64 = questions.iter().map(QuestionAssessment::overall).sum();
    Ok(round_to_tenth(sum / questions.len() as f64))
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(values: &[(Dimension, f64)]) -> DimensionScores {
        DimensionScores::from_scores(values.iter().map(|&(dimension, value)| DimensionScore {
            dimension,
            value,
        }))
        .unwrap()
    }

    fn all(values: [f64; 5]) -> DimensionScores {
        scores(&Dimension::ALL.into_iter().zip(values).collect::<Vec<_>>())
    }

    #[test]
    fn dimension_parses_case_insensitively() {
        assert_eq!("Fluency".parse::<Dimension>().unwrap(), Dimension::Fluency);
        assert_eq!(" accuracy ".parse::<Dimension>().unwrap(), Dimension::Accuracy);
        assert!("style".parse::<Dimension>().is_err());
    }

    #[test]
    fn duplicate_dimension_rejected() {
        let result = DimensionScores::from_scores([
            DimensionScore {
                dimension: Dimension::Fluency,
                value: 80.0,
            },
            DimensionScore {
                dimension: Dimension::Fluency,
                value: 70.0,
            },
        ]);
        assert!(matches!(
            result,
            Err(TingshuoError::DuplicateDimension {
                dimension: Dimension::Fluency
            })
        ));
    }

    #[test]
    fn uniform_weights_average_example() {
        let aggregator = ScoreAggregator::default();
        let overall = aggregator
            .aggregate_question(&all([80.0, 75.0, 85.0, 90.0, 70.0]))
            .unwrap();
        assert_eq!(overall, 80.0);
    }

    #[test]
    fn all_max_scores_give_max() {
        let aggregator = ScoreAggregator::default();
        assert_eq!(aggregator.aggregate_question(&all([100.0; 5])).unwrap(), 100.0);
    }

    #[test]
    fn all_zero_scores_give_zero() {
        let aggregator = ScoreAggregator::default();
        assert_eq!(aggregator.aggregate_question(&all([0.0; 5])).unwrap(), 0.0);
    }

    #[test]
    fn custom_weights_are_applied() {
        let weights = WeightTable::new([
            (Dimension::Pronunciation, 0.4),
            (Dimension::Fluency, 0.3),
            (Dimension::Accuracy, 0.1),
            (Dimension::Comprehension, 0.1),
            (Dimension::Confidence, 0.1),
        ])
        .unwrap();
        let aggregator = ScoreAggregator::new(weights, ScoreBounds::default());
        // 0.4*90 + 0.3*80 + 0.1*(70+60+50) = 36 + 24 + 18
        let overall = aggregator
            .aggregate_question(&all([90.0, 80.0, 70.0, 60.0, 50.0]))
            .unwrap();
        assert_eq!(overall, 78.0);
    }

    #[test]
    fn overall_is_rounded_to_one_decimal() {
        let aggregator = ScoreAggregator::default();
        let overall = aggregator
            .aggregate_question(&all([81.0, 80.0, 80.0, 80.0, 80.0]))
            .unwrap();
        assert_eq!(overall, 80.2);

        let overall = aggregator
            .aggregate_question(&all([80.33, 80.0, 80.0, 80.0, 80.0]))
            .unwrap();
        assert_eq!(overall, 80.1);
    }

    #[test]
    fn missing_confidence_is_aggregation_error() {
        let aggregator = ScoreAggregator::default();
        let partial = scores(&[
            (Dimension::Pronunciation, 80.0),
            (Dimension::Fluency, 75.0),
            (Dimension::Accuracy, 85.0),
            (Dimension::Comprehension, 90.0),
        ]);
        let err = aggregator.aggregate_question(&partial).unwrap_err();
        assert!(matches!(
            err,
            TingshuoError::MissingDimension {
                dimension: Dimension::Confidence
            }
        ));
    }

    #[test]
    fn out_of_range_score_rejected_before_missing_check() {
        let aggregator = ScoreAggregator::default();
        let bad = scores(&[(Dimension::Fluency, 101.0)]);
        let err = aggregator.aggregate_question(&bad).unwrap_err();
        assert!(matches!(
            err,
            TingshuoError::ScoreRange {
                dimension: Dimension::Fluency,
                ..
            }
        ));
    }

    #[test]
    fn negative_and_nan_scores_rejected() {
        let aggregator = ScoreAggregator::default();
        let err = aggregator
            .aggregate_question(&all([80.0, -0.5, 80.0, 80.0, 80.0]))
            .unwrap_err();
        assert!(matches!(err, TingshuoError::ScoreRange { .. }));

        let err = aggregator
            .aggregate_question(&all([80.0, 80.0, f64::NAN, 80.0, 80.0]))
            .unwrap_err();
        assert!(matches!(err, TingshuoError::ScoreRange { .. }));
    }

    #[test]
    fn partial_weight_table_only_requires_its_dimensions() {
        let weights =
            WeightTable::new([(Dimension::Pronunciation, 0.5), (Dimension::Accuracy, 0.5)])
                .unwrap();
        let aggregator = ScoreAggregator::new(weights, ScoreBounds::default());
        let partial = scores(&[(Dimension::Pronunciation, 60.0), (Dimension::Accuracy, 90.0)]);
        assert_eq!(aggregator.aggregate_question(&partial).unwrap(), 75.0);
    }

    #[test]
    fn weights_must_sum_to_one() {
        let err = WeightTable::new([(Dimension::Fluency, 0.5), (Dimension::Accuracy, 0.4)])
            .unwrap_err();
        assert!(matches!(err, TingshuoError::InvalidWeights { .. }));
        assert!(err.is_configuration());
    }

    #[test]
    fn weights_within_tolerance_accepted() {
        let table = WeightTable::new([
            (Dimension::Fluency, 0.5 + 5e-7),
            (Dimension::Accuracy, 0.5),
        ]);
        assert!(table.is_ok());
    }

    #[test]
    fn negative_weight_rejected() {
        let err = WeightTable::new([(Dimension::Fluency, 1.5), (Dimension::Accuracy, -0.5)])
            .unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn empty_weight_table_rejected() {
        assert!(WeightTable::new(Vec::new()).is_err());
    }

    #[test]
    fn uniform_table_is_valid() {
        let uniform = WeightTable::uniform();
        let rebuilt = WeightTable::new(
            Dimension::ALL
                .into_iter()
                .map(|d| (d, uniform.weight(d).unwrap())),
        );
        assert_eq!(rebuilt.unwrap(), uniform);
    }

    #[test]
    fn aggregate_session_of_nothing_is_invalid_input() {
        let err = aggregate_session(&[]).unwrap_err();
        assert!(matches!(err, TingshuoError::InvalidInput { .. }));
    }

    #[test]
    fn round_to_tenth_rounds_half_away_from_zero() {
        assert_eq!(round_to_tenth(80.25), 80.3);
        assert_eq!(round_to_tenth(79.94), 79.9);
    }
}
