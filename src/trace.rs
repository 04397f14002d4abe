use serde::{Deserialize, Serialize};

/// Numeric identifier an API method name maps to in the dictionary.
pub type CallId = u32;

/// One API-call trace, possibly truncated to a fixed length upstream.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    calls: Vec<CallId>,
}

impl Sample {
    pub fn new(calls: Vec<CallId>) -> Self {
        Self { calls }
    }

    pub fn calls(&self) -> &[CallId] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// A contiguous sub-segment of a trace together with its normalized anomaly
/// score (raw score divided by segment length). Scores are log-likelihoods,
/// so more negative means more anomalous.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSegment {
    pub tokens: Vec<CallId>,
    pub normalized_score: f64,
}

impl ScoredSegment {
    pub fn new(tokens: Vec<CallId>, normalized_score: f64) -> Self {
        Self { tokens, normalized_score }
    }

    pub fn key(&self) -> SegmentKey {
        SegmentKey::new(&self.tokens)
    }
}

/// Canonical grouping key for a segment: two segments group together iff
/// their token sequences are element-wise equal. The derived `Ord` doubles
/// as the deterministic tie-break for ranked output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentKey(Vec<CallId>);

impl SegmentKey {
    pub fn new(tokens: &[CallId]) -> Self {
        Self(tokens.to_vec())
    }

    pub fn tokens(&self) -> &[CallId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
