use crate::trace::{ScoredSegment, SegmentKey};
use std::collections::BTreeMap;

/// One ranked entry of a frequency table.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyRow {
    pub key: SegmentKey,
    pub count: usize,
    /// count / denominator, rounded to 4 decimals.
    pub percentage: f64,
}

/// Relative frequencies of the most anomalous segments across a corpus.
/// The denominator counts only traces that produced a selection, so rows
/// sum to 1.0 within rounding tolerance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    pub rows: Vec<FrequencyRow>,
    pub denominator: usize,
}

/// Running tally of selected segments. `merge` is associative and
/// commutative, so per-worker partial tallies can be combined in any order
/// when the corpus is processed in parallel.
#[derive(Debug, Clone, Default)]
pub struct SegmentCounts {
    counts: BTreeMap<SegmentKey, usize>,
    total: usize,
}

impl SegmentCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, segment: &ScoredSegment) {
        self.record_key(segment.key());
    }

    pub fn record_key(&mut self, key: SegmentKey) {
        *self.counts.entry(key).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn merge(mut self, other: SegmentCounts) -> SegmentCounts {
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
        self.total += other.total;
        self
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Rank by percentage descending; equal percentages fall back to the
    /// key's natural ordering so output is reproducible across runs.
    pub fn into_table(self) -> FrequencyTable {
        let denominator = self.total;
        let mut rows: Vec<FrequencyRow> = self
            .counts
            .into_iter()
            .map(|(key, count)| {
                let percentage = round4(count as f64 / denominator as f64);
                FrequencyRow { key, count, percentage }
            })
            .collect();
        rows.sort_by(|a, b| {
            b.percentage
                .total_cmp(&a.percentage)
                .then_with(|| a.key.cmp(&b.key))
        });
        FrequencyTable { rows, denominator }
    }
}

/// Count recurring segments and compute their relative frequencies.
pub fn aggregate(selected: &[ScoredSegment]) -> FrequencyTable {
    let mut counts = SegmentCounts::new();
    for segment in selected {
        counts.record(segment);
    }
    counts.into_table()
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
