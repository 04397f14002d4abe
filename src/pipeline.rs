use crate::aggregate::{FrequencyTable, SegmentCounts};
use crate::scorer::SequenceScorer;
use crate::selector;
use crate::splitter::{self, SplitError};
use crate::trace::{Sample, ScoredSegment};
use rayon::prelude::*;
use tracing::warn;

/// Knobs for corpus localization.
#[derive(Debug, Clone, Copy)]
pub struct LocalizeConfig {
    /// Minimum length a split block may have; splitting never descends below
    /// `2 * min_length_blocks` tokens.
    pub min_length_blocks: usize,
}

impl Default for LocalizeConfig {
    fn default() -> Self {
        Self { min_length_blocks: 2 }
    }
}

/// Corpus-level result. The counters make the percentage denominator
/// auditable: percentages are relative to `localized` only, while
/// `unlocalized` and `failed` traces are reported alongside.
#[derive(Debug, Clone)]
pub struct CorpusOutcome {
    pub table: FrequencyTable,
    /// Traces that produced a selected segment (the percentage denominator).
    pub localized: usize,
    /// Traces too short to split or whose decomposition came back empty.
    pub unlocalized: usize,
    /// Traces aborted by a scoring failure or an internal invariant breach.
    pub failed: usize,
}

/// Localize one trace: score the whole trace as the baseline, split it, and
/// select the most anomalous visited segment. Traces shorter than
/// `2 * min_length_blocks` yield `Ok(None)` without touching the scorer.
pub fn localize_trace<S>(
    sample: &Sample,
    cfg: &LocalizeConfig,
    scorer: &S,
) -> Result<Option<ScoredSegment>, SplitError>
where
    S: SequenceScorer + ?Sized,
{
    if sample.len() < 2 * cfg.min_length_blocks {
        return Ok(None);
    }
    let root_score = scorer.score(sample.calls())? / sample.len() as f64;
    let decomposition = splitter::split(sample.calls(), root_score, cfg.min_length_blocks, scorer)?;
    Ok(selector::select_most_anomalous(&decomposition))
}

/// Localize every trace and fold the selections into a frequency table.
///
/// Traces are independent, so the corpus is mapped in parallel and reduced
/// with the aggregator's associative merge; results do not depend on
/// execution order as long as the scorer is deterministic. Per-trace
/// failures are isolated: they are counted and logged, never fatal for the
/// corpus.
pub fn localize_corpus<S>(samples: &[Sample], cfg: &LocalizeConfig, scorer: &S) -> CorpusOutcome
where
    S: SequenceScorer + Sync,
{
    let (counts, unlocalized, failed) = samples
        .par_iter()
        .map(|sample| match localize_trace(sample, cfg, scorer) {
            Ok(Some(segment)) => {
                let mut counts = SegmentCounts::new();
                counts.record(&segment);
                (counts, 0usize, 0usize)
            }
            Ok(None) => (SegmentCounts::new(), 1, 0),
            Err(err) => {
                warn!(%err, trace_len = sample.len(), "trace localization failed");
                (SegmentCounts::new(), 0, 1)
            }
        })
        .reduce(
            || (SegmentCounts::new(), 0, 0),
            |a, b| (a.0.merge(b.0), a.1 + b.1, a.2 + b.2),
        );

    let localized = counts.total();
    CorpusOutcome { table: counts.into_table(), localized, unlocalized, failed }
}

/// Per-trace selections in corpus order, for callers that want the raw
/// segments (e.g. to hand them to a rule miner) instead of the aggregate.
pub fn localize_each<S>(
    samples: &[Sample],
    cfg: &LocalizeConfig,
    scorer: &S,
) -> Vec<Result<Option<ScoredSegment>, SplitError>>
where
    S: SequenceScorer + Sync,
{
    samples
        .par_iter()
        .map(|sample| localize_trace(sample, cfg, scorer))
        .collect()
}
