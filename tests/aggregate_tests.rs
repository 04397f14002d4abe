use traceloc::aggregate::{aggregate, SegmentCounts};
use traceloc::trace::ScoredSegment;

fn seg(tokens: &[u32]) -> ScoredSegment {
    ScoredSegment::new(tokens.to_vec(), -1.0)
}

#[test]
fn counts_and_ranks_recurring_segments() {
    let mut selected = Vec::new();
    for _ in 0..7 {
        selected.push(seg(&[1, 2]));
    }
    for _ in 0..3 {
        selected.push(seg(&[3, 4]));
    }

    let table = aggregate(&selected);
    assert_eq!(table.denominator, 10);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].key.tokens(), &[1, 2]);
    assert_eq!(table.rows[0].count, 7);
    assert_eq!(table.rows[0].percentage, 0.7);
    assert_eq!(table.rows[1].key.tokens(), &[3, 4]);
    assert_eq!(table.rows[1].percentage, 0.3);
}

#[test]
fn percentages_sum_to_one_within_rounding_tolerance() {
    let selected = vec![seg(&[1]), seg(&[2]), seg(&[3])];
    let table = aggregate(&selected);
    let sum: f64 = table.rows.iter().map(|r| r.percentage).sum();
    let tolerance = 0.0001 * table.rows.len() as f64;
    assert!((sum - 1.0).abs() <= tolerance, "sum {sum} outside tolerance");
}

#[test]
fn equal_percentages_fall_back_to_key_order() {
    let selected = vec![seg(&[9, 9]), seg(&[1, 1]), seg(&[5, 5])];
    let table = aggregate(&selected);
    let keys: Vec<&[u32]> = table.rows.iter().map(|r| r.key.tokens()).collect();
    assert_eq!(keys, vec![&[1u32, 1][..], &[5, 5][..], &[9, 9][..]]);
}

#[test]
fn grouping_requires_exact_token_equality() {
    let selected = vec![seg(&[1, 2]), seg(&[2, 1]), seg(&[1, 2, 2])];
    let table = aggregate(&selected);
    assert_eq!(table.rows.len(), 3);
    assert!(table.rows.iter().all(|r| r.count == 1));
}

#[test]
fn partial_counts_merge_in_any_order() {
    let mut a = SegmentCounts::new();
    let mut b = SegmentCounts::new();
    let mut c = SegmentCounts::new();
    for _ in 0..3 {
        a.record(&seg(&[1, 2]));
    }
    b.record(&seg(&[3, 4]));
    c.record(&seg(&[1, 2]));
    c.record(&seg(&[3, 4]));

    let left = a.clone().merge(b.clone()).merge(c.clone()).into_table();
    let right = c.merge(b.merge(a)).into_table();
    assert_eq!(left, right);
    assert_eq!(left.denominator, 6);
}

#[test]
fn an_empty_corpus_yields_an_empty_table() {
    let table = aggregate(&[]);
    assert_eq!(table.denominator, 0);
    assert!(table.rows.is_empty());
}
