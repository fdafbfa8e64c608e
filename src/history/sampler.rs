/// Pick `slice_count` history indices spread evenly over a history of `len` frames.
///
/// - `len < 2` yields nothing: a lone frame is never sliced, the live frame covers it.
/// - `slice_count == 1` yields `[0]`.
/// - Otherwise exactly `slice_count` indices, first `0`, non-decreasing, each in `[0, len - 1]`.
///   Index `i` is `round(i * (len - 1) / (slice_count - 1))` with halves rounded up, so neighbouring
///   slices may repeat an index when `slice_count` approaches `len`.
pub fn sample_indices(len: usize, slice_count: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(slice_count);
    sample_indices_into(len, slice_count, &mut out);
    out
}

/// Allocation-free variant of [`sample_indices`] writing into a reusable vector.
///
/// `out` is cleared first.
pub fn sample_indices_into(len: usize, slice_count: usize, out: &mut Vec<usize>) {
    out.clear();
    if len < 2 || slice_count == 0 {
        return;
    }
    if slice_count == 1 {
        out.push(0);
        return;
    }

    let last = len - 1;
    let step = last as f64 / (slice_count - 1) as f64;
    out.push(0);
    for i in 1..slice_count {
        let idx = (i as f64 * step).round() as usize;
        out.push(idx.min(last));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/sampler.rs"]
mod tests;
