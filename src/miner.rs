use crate::dictionary::Dictionary;
use crate::trace::ScoredSegment;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum MinerError {
    #[error("rule mining failed: {0}")]
    Backend(String),
}

/// One mined association rule over method names.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub support: f64,
    pub confidence: f64,
}

/// Injectable association-rule-mining backend. The sibling localization
/// strategy mines rules over the segments this core produces; modeling the
/// miner as a capability keeps the core decoupled from any one backend.
pub trait RuleMiner {
    fn mine(
        &self,
        transactions: &[Vec<String>],
        min_support: f64,
        min_confidence: f64,
    ) -> Result<Vec<Rule>, MinerError>;
}

/// Render selected segments as transactions a rule miner can consume, one
/// per trace. Segments with unresolved call ids are skipped with a warning,
/// same as report assembly.
pub fn to_transactions(selections: &[ScoredSegment], dictionary: &Dictionary) -> Vec<Vec<String>> {
    let mut transactions = Vec::with_capacity(selections.len());
    for segment in selections {
        match dictionary.names_of(&segment.tokens) {
            Ok(names) => transactions.push(names),
            Err(err) => warn!(%err, "skipping transaction with unresolved call id"),
        }
    }
    transactions
}
