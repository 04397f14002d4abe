use traceloc::compare::{compare, contains};

#[test]
fn finds_the_pattern_inside_a_larger_segment() {
    let segment = ["x", "a", "b", "c", "y"];
    let pattern = ["a", "b", "c"];
    let result = compare(&segment, &pattern);
    assert!(result.contains_pattern);
    assert_eq!(result.edit_distance, 2);
}

#[test]
fn containment_requires_order_and_contiguity() {
    let pattern = ["a", "b", "c"];
    assert!(!contains(&["a", "x", "b", "c"], &pattern));
    assert!(!contains(&["c", "b", "a"], &pattern));
    assert!(contains(&["a", "b", "c"], &pattern));
}

#[test]
fn a_pattern_longer_than_the_segment_is_never_contained() {
    assert!(!contains(&["a", "b"], &["a", "b", "c"]));
}

#[test]
fn the_empty_pattern_is_vacuously_contained() {
    assert!(contains::<u32>(&[1, 2], &[]));
    assert!(contains::<u32>(&[], &[]));
}

#[test]
fn works_on_call_ids_as_well_as_names() {
    let result = compare(&[5u32, 1, 2, 3, 9], &[1u32, 2, 3]);
    assert!(result.contains_pattern);
    assert_eq!(result.edit_distance, 2);
}
