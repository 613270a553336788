use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

use crate::Intent;

/// Degree to which one acceptance criterion is satisfied, always within
/// `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize, Display)]
#[serde(transparent)]
pub struct CriterionScore(f64);

impl CriterionScore {
    pub const PASS: Self = Self(1.0);
    pub const FAIL: Self = Self(0.0);
    /// Could not be determined with confidence either way.
    pub const NEUTRAL: Self = Self(0.5);

    /// Creates a score, clamping to `[0.0, 1.0]`. NaN becomes
    /// [`CriterionScore::NEUTRAL`].
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::NEUTRAL
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn from_bool(satisfied: bool) -> Self {
        if satisfied { Self::PASS } else { Self::FAIL }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for CriterionScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Score of a single criterion together with the rule that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CriterionOutcome {
    pub criterion: String,
    pub intent: Intent,
    pub score: CriterionScore,
}

/// Per-criterion breakdown of an evaluation, in input order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub outcomes: Vec<CriterionOutcome>,
}

impl EvaluationResult {
    pub fn new(outcomes: Vec<CriterionOutcome>) -> Self {
        Self { outcomes }
    }

    /// Arithmetic mean of all criterion scores. An evaluation without criteria
    /// is vacuously satisfied and scores `1.0`.
    pub fn score(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 1.0;
        }
        let total: f64 = self.outcomes.iter().map(|o| o.score.value()).sum();
        total / self.outcomes.len() as f64
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
