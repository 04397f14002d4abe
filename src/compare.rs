use crate::levenshtein;

/// How a localized segment relates to a known injected behavior pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonResult {
    /// The pattern occurs contiguously inside the segment, in order, with no
    /// gaps.
    pub contains_pattern: bool,
    /// Token-level Levenshtein distance between segment and pattern.
    pub edit_distance: usize,
}

/// Judge one candidate segment against the ground-truth pattern. Both fields
/// are computed together; there is no partial result.
pub fn compare<T: PartialEq>(segment: &[T], pattern: &[T]) -> ComparisonResult {
    ComparisonResult {
        contains_pattern: contains(segment, pattern),
        edit_distance: levenshtein::distance(segment, pattern),
    }
}

/// Exact contiguous containment: some window of `segment` equals `pattern`
/// element-wise. The empty pattern is vacuously contained.
pub fn contains<T: PartialEq>(segment: &[T], pattern: &[T]) -> bool {
    if pattern.is_empty() {
        return true;
    }
    if pattern.len() > segment.len() {
        return false;
    }
    segment.windows(pattern.len()).any(|window| window == pattern)
}
