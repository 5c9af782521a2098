//! Circular right shifts of matrix rows.

use num_traits::Euclid;

/// Returns `row` rotated `k` positions to the right.
///
/// Elements pushed past the end reappear at the start. `k` may be any integer:
/// it is reduced modulo the length of the row with a non-negative remainder,
/// so a shift of `-1` is the same as a shift of `row.len() - 1`.
/// The result is always a fresh copy, even when the effective shift is zero.
pub fn shift_row<T: Clone>(row: &[T], k: i64) -> Vec<T> {
    if row.is_empty() {
        return Vec::new();
    }

    rotated(row, effective_shift(row.len(), k))
}

/// Reduces the shift amount `k` to the range `[0, len)`.
///
/// # Panics
///
/// Panics if `len` is zero.
pub fn effective_shift(len: usize, k: i64) -> usize {
    assert!(len != 0, "Can't shift an empty row.");
    // `i128` holds every `usize` and every `i64`.
    let r = Euclid::rem_euclid(&i128::from(k), &(len as i128));
    r as usize
}

/// Rotates `row` right by `effective` positions, where `effective < row.len()`.
pub(crate) fn rotated<T: Clone>(row: &[T], effective: usize) -> Vec<T> {
    debug_assert!(effective < row.len() || row.is_empty());
    let split = row.len() - effective;
    let mut out = Vec::with_capacity(row.len());
    out.extend_from_slice(&row[split..]);
    out.extend_from_slice(&row[..split]);
    out
}
