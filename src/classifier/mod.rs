//! Safe/unsafe verdicts derived from a model prediction score.
//!
//! The score is the model's probability that a URL is safe. A verdict always
//! reports confidence in the side it picked, so an unsafe verdict for a score
//! of `0.25` carries `75`, not `25`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scores at or above this value are classified safe.
pub const SAFE_THRESHOLD: f64 = 0.50;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ClassifyError {
    #[error("invalid prediction score kind: {value} is not a finite number")]
    InvalidScoreKind { value: f64 },
}

/// A finite prediction score. Values outside `[0, 1]` are accepted as-is.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PredictionScore(f64);

impl PredictionScore {
    pub fn new(value: f64) -> Result<Self, ClassifyError> {
        if !value.is_finite() {
            return Err(ClassifyError::InvalidScoreKind { value });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// True when the score lies in the closed interval `[0, 1]`.
    pub fn is_nominal(self) -> bool {
        (0.0..=1.0).contains(&self.0)
    }
}

impl TryFrom<f64> for PredictionScore {
    type Error = ClassifyError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for PredictionScore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Verdict {
    pub is_safe: bool,
    pub confidence_percent: u8,
}

impl Verdict {
    pub fn from_score(score: PredictionScore) -> Self {
        let x = score.value();
        let percent = x * 100.0;

        // 0.5 itself is safe: inclusive on the safe side, exclusive on the unsafe side.
        let (is_safe, confidence) = if x >= SAFE_THRESHOLD {
            (true, percent)
        } else {
            (false, 100.0 - percent)
        };

        if !score.is_nominal() {
            log::warn!(
                "prediction score {} is outside [0, 1]; confidence saturates at 100",
                x
            );
        }

        Self {
            is_safe,
            confidence_percent: round_percent(confidence),
        }
    }

    pub fn label(&self) -> &'static str {
        if self.is_safe {
            "safe"
        } else {
            "unsafe"
        }
    }
}

fn round_percent(value: f64) -> u8 {
    // Non-negative here, so half-away-from-zero is half-up.
    value.round().clamp(0.0, 100.0) as u8
}

/// Classify a raw score. Fails only for NaN and infinities.
pub fn classify(score: f64) -> Result<Verdict, ClassifyError> {
    let score = PredictionScore::new(score)?;
    let verdict = Verdict::from_score(score);
    log::debug!(
        "classified score {} as {} ({}%)",
        score.value(),
        verdict.label(),
        verdict.confidence_percent
    );
    Ok(verdict)
}
