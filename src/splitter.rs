use crate::scorer::{ScoringError, SequenceScorer};
use crate::trace::{CallId, ScoredSegment};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("split invariant violated: {0}")]
    Invariant(String),
}

/// One visited node of a trace's split tree.
#[derive(Debug, Clone)]
pub struct SplitNode {
    pub segment: ScoredSegment,
    pub children: Vec<SplitNode>,
}

/// All segments visited while recursively bisecting one trace, kept as an
/// explicit tree. Only branches whose normalized score is strictly below
/// their immediate parent's are descended into, so every root-to-leaf chain
/// is strictly anomaly-increasing.
#[derive(Debug, Clone, Default)]
pub struct Decomposition {
    pub roots: Vec<SplitNode>,
}

impl Decomposition {
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pre-order traversal over every visited segment.
    pub fn iter(&self) -> SegmentIter<'_> {
        SegmentIter { stack: self.roots.iter().rev().collect() }
    }
}

pub struct SegmentIter<'a> {
    stack: Vec<&'a SplitNode>,
}

impl<'a> Iterator for SegmentIter<'a> {
    type Item = &'a ScoredSegment;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some(&node.segment)
    }
}

/// Recursively bisect `segment`, descending only into halves that are
/// strictly more anomalous (lower normalized score) than their parent.
///
/// The split point is `len / 2` with floor division, so on odd lengths the
/// left half is the shorter one. Runs that reproduce earlier results depend
/// on this asymmetry. A half whose normalized score ties the parent's counts
/// as not more anomalous and is pruned.
pub fn split<S>(
    segment: &[CallId],
    parent_score: f64,
    min_length_blocks: usize,
    scorer: &S,
) -> Result<Decomposition, SplitError>
where
    S: SequenceScorer + ?Sized,
{
    let budget = depth_budget(segment.len());
    let roots = descend(segment, parent_score, min_length_blocks, scorer, 0, budget)?;
    Ok(Decomposition { roots })
}

// Halving can recurse at most log2(len) times; anything deeper is a defect.
fn depth_budget(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize + 1
}

fn descend<S>(
    segment: &[CallId],
    parent_score: f64,
    min_length_blocks: usize,
    scorer: &S,
    depth: usize,
    budget: usize,
) -> Result<Vec<SplitNode>, SplitError>
where
    S: SequenceScorer + ?Sized,
{
    // Stop before producing blocks shorter than min_length_blocks. This also
    // covers the very first call when the whole trace is already too short.
    if segment.len() < 2 * min_length_blocks {
        return Ok(Vec::new());
    }
    if depth > budget {
        return Err(SplitError::Invariant(format!(
            "recursion depth {depth} exceeds budget {budget} for segment of length {}",
            segment.len()
        )));
    }

    let mid = segment.len() / 2;
    let (part1, part2) = segment.split_at(mid);
    debug_assert_eq!(part1.len() + part2.len(), segment.len());

    let score1 = scorer.score(part1)? / part1.len() as f64;
    let score2 = scorer.score(part2)? / part2.len() as f64;

    // Both halves at or above the parent score: prune the whole branch. When
    // exactly one half is strictly below, the sibling is discarded entirely.
    let mut roots = Vec::new();
    if score1 < parent_score {
        roots.push(visit(part1, score1, min_length_blocks, scorer, depth, budget)?);
    }
    if score2 < parent_score {
        roots.push(visit(part2, score2, min_length_blocks, scorer, depth, budget)?);
    }
    Ok(roots)
}

fn visit<S>(
    part: &[CallId],
    normalized_score: f64,
    min_length_blocks: usize,
    scorer: &S,
    depth: usize,
    budget: usize,
) -> Result<SplitNode, SplitError>
where
    S: SequenceScorer + ?Sized,
{
    let children = descend(part, normalized_score, min_length_blocks, scorer, depth + 1, budget)?;
    Ok(SplitNode {
        segment: ScoredSegment::new(part.to_vec(), normalized_score),
        children,
    })
}
