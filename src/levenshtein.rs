/// Token-level Levenshtein distance: unit cost for insertion, deletion, and
/// substitution of unequal tokens; equal tokens substitute for free. Works
/// on whole tokens rather than characters, so `&["httpGet"]` is one token.
///
/// Standard O(n*m) row recurrence, keeping only the previous row.
pub fn distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    // Keep the shorter sequence as the inner row.
    if a.len() < b.len() {
        return distance(b, a);
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    for (i, ta) in a.iter().enumerate() {
        let mut current = Vec::with_capacity(b.len() + 1);
        current.push(i + 1);
        for (j, tb) in b.iter().enumerate() {
            let insertion = previous[j + 1] + 1;
            let deletion = current[j] + 1;
            let substitution = previous[j] + usize::from(ta != tb);
            current.push(insertion.min(deletion).min(substitution));
        }
        previous = current;
    }
    previous[b.len()]
}
