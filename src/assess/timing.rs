//! Synthetic token timestamps.
//!
//! Durations are computed in whole milliseconds so every boundary is exact:
//! each token lasts `syllables * syllable_ms` and the next one starts
//! `gap_ms` after it ends.

use crate::assess::transcribe::syllable_count;
use crate::defaults;
use crate::error::{Result, TingshuoError};
use crate::report::TimeWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingModel {
    syllable_ms: u64,
    gap_ms: u64,
}

impl Default for TimingModel {
    fn default() -> Self {
        Self {
            syllable_ms: secs_to_ms(defaults::SYLLABLE_SECS),
            gap_ms: secs_to_ms(defaults::GAP_SECS),
        }
    }
}

impl TimingModel {
    /// Build a model from durations in seconds.
    ///
    /// The per-syllable duration must lie in `0.001..=60` seconds and the gap
    /// in `0..=60` seconds.
    pub fn new(syllable_secs: f64, gap_secs: f64) -> Result<Self> {
        if !syllable_secs.is_finite()
            || secs_to_ms(syllable_secs) == 0
            || syllable_secs > defaults::MAX_SYLLABLE_SECS
        {
            return Err(TingshuoError::ConfigInvalidValue {
                key: "timing.syllable_secs".to_string(),
                message: format!(
                    "must be between 0.001 and {}, got {syllable_secs}",
                    defaults::MAX_SYLLABLE_SECS
                ),
            });
        }
        if !gap_secs.is_finite() || gap_secs < 0.0 || gap_secs > defaults::MAX_GAP_SECS {
            return Err(TingshuoError::ConfigInvalidValue {
                key: "timing.gap_secs".to_string(),
                message: format!(
                    "must be between 0 and {}, got {gap_secs}",
                    defaults::MAX_GAP_SECS
                ),
            });
        }
        Ok(Self {
            syllable_ms: secs_to_ms(syllable_secs),
            gap_ms: secs_to_ms(gap_secs),
        })
    }

    /// One window per pinyin string, in order. The first starts at 0.
    pub fn timestamps<I, S>(&self, pinyin: I) -> Vec<TimeWindow>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cursor_ms = 0u64;
        pinyin
            .into_iter()
            .enumerate()
            .map(|(i, reading)| {
                if i > 0 {
                    cursor_ms = cursor_ms.saturating_add(self.gap_ms);
                }
                let start_ms = cursor_ms;
                let syllables = syllable_count(reading.as_ref()) as u64;
                let end_ms = start_ms.saturating_add(syllables.saturating_mul(self.syllable_ms));
                cursor_ms = end_ms;
                TimeWindow {
                    start: ms_to_secs(start_ms),
                    end: ms_to_secs(end_ms),
                }
            })
            .collect()
    }
}

fn secs_to_ms(secs: f64) -> u64 {
    if secs <= 0.0 {
        0
    } else {
        (secs * 1000.0).round() as u64
    }
}

fn ms_to_secs(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
