use crate::splitter::Decomposition;
use crate::trace::ScoredSegment;

/// Pick the single most anomalous segment visited for one trace: the global
/// minimum normalized score across the whole decomposition (scores are
/// log-likelihoods, so minimum means most anomalous). Ties keep the earlier
/// segment in pre-order.
///
/// An empty decomposition yields `None`: a trace whose root is already more
/// anomalous than both of its halves deliberately contributes no
/// localization result at all.
pub fn select_most_anomalous(decomposition: &Decomposition) -> Option<ScoredSegment> {
    let mut best: Option<&ScoredSegment> = None;
    for segment in decomposition.iter() {
        match best {
            None => best = Some(segment),
            Some(b) if segment.normalized_score < b.normalized_score => best = Some(segment),
            Some(_) => {}
        }
    }
    best.cloned()
}
