use super::*;

#[test]
fn short_histories_are_not_sliced() {
    assert!(sample_indices(0, 5).is_empty());
    assert!(sample_indices(1, 5).is_empty());
    assert!(sample_indices(1, 1).is_empty());
}

#[test]
fn ten_frames_five_slices() {
    assert_eq!(sample_indices(10, 5), vec![0, 2, 5, 7, 9]);
}

#[test]
fn single_slice_anchors_oldest() {
    assert_eq!(sample_indices(2, 1), vec![0]);
    assert_eq!(sample_indices(60, 1), vec![0]);
}

#[test]
fn two_slices_span_whole_history() {
    assert_eq!(sample_indices(2, 2), vec![0, 1]);
    assert_eq!(sample_indices(37, 2), vec![0, 36]);
}

#[test]
fn more_slices_than_frames_repeats_indices() {
    assert_eq!(sample_indices(3, 5), vec![0, 1, 1, 2, 2]);
}

#[test]
fn shape_holds_across_inputs() {
    for len in 2..80 {
        for slices in 2..40 {
            let idx = sample_indices(len, slices);
            assert_eq!(idx.len(), slices);
            assert_eq!(idx[0], 0);
            assert_eq!(*idx.last().unwrap(), len - 1);
            assert!(idx.iter().all(|&i| i < len));
            assert!(idx.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}

#[test]
fn sampling_is_deterministic() {
    assert_eq!(sample_indices(47, 9), sample_indices(47, 9));
}

#[test]
fn into_variant_reuses_vector() {
    let mut out = vec![99; 3];
    sample_indices_into(10, 5, &mut out);
    assert_eq!(out, vec![0, 2, 5, 7, 9]);
    sample_indices_into(1, 5, &mut out);
    assert!(out.is_empty());
}
