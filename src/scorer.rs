use crate::trace::CallId;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("cannot score an empty sequence")]
    EmptySequence,
}

/// Externally trained sequence model: sequence of call ids -> raw anomaly
/// score. More negative means more anomalous. Implementations must be pure
/// and deterministic; the core never looks inside.
pub trait SequenceScorer {
    fn score(&self, calls: &[CallId]) -> Result<f64, ScoringError>;
}

/// Adapter turning any pure closure over a call slice into a scorer. Handy
/// for tests and for callers wrapping an out-of-process model.
pub struct FnScorer<F>(pub F);

impl<F> SequenceScorer for FnScorer<F>
where
    F: Fn(&[CallId]) -> f64,
{
    fn score(&self, calls: &[CallId]) -> Result<f64, ScoringError> {
        if calls.is_empty() {
            return Err(ScoringError::EmptySequence);
        }
        Ok((self.0)(calls))
    }
}

fn default_unknown_weight() -> f64 {
    -10.0
}

/// Unigram log-likelihood table: the score of a sequence is the sum of the
/// per-token weights. Stands in for the trained sequence model when running
/// from the command line; weights come from a JSON object of call id ->
/// log-likelihood weight.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenTableScorer {
    weights: HashMap<CallId, f64>,
    /// Weight applied to call ids absent from the table.
    #[serde(default = "default_unknown_weight")]
    unknown_weight: f64,
}

impl TokenTableScorer {
    pub fn new(weights: HashMap<CallId, f64>, unknown_weight: f64) -> Self {
        Self { weights, unknown_weight }
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl SequenceScorer for TokenTableScorer {
    fn score(&self, calls: &[CallId]) -> Result<f64, ScoringError> {
        if calls.is_empty() {
            return Err(ScoringError::EmptySequence);
        }
        Ok(calls
            .iter()
            .map(|c| self.weights.get(c).copied().unwrap_or(self.unknown_weight))
            .sum())
    }
}
