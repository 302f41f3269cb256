//! Pair indexing over the block-connection matrix.
//!
//! Every pairwise quantity this crate reports (component correlations,
//! design weights) is laid out in one canonical order: the strict upper
//! triangle of the square connection matrix, traversed column by column.
//! [`pair_labels`] produces the human-readable label for each cell and
//! [`upper_triangle`] extracts matrix values in the identical order, so
//! labels and values stay aligned by construction. Downstream consumers
//! rely on this alignment; nothing else in the crate re-derives it.

use ndarray::ArrayView2;

/// Strict-upper-triangle positions of an `n`×`n` matrix, column by
/// column: (0,1), (0,2), (1,2), (0,3), (1,3), (2,3), ...
fn upper_positions(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..n).flat_map(move |col| (0..col).map(move |row| (row, col)))
}

/// Builds one label per unordered block pair above the diagonal.
///
/// Each label concatenates the 1-based row and column indices with no
/// separator: row 1, column 2 becomes `"12"`. Labels are generated for
/// every upper-triangle cell regardless of the connection weight there,
/// so the output length is always `n * (n - 1) / 2`. An `n` of 0 or 1
/// yields an empty sequence.
pub fn pair_labels(n: usize) -> Vec<String> {
    upper_positions(n)
        .map(|(row, col)| format!("{}{}", row + 1, col + 1))
        .collect()
}

/// Extracts the strict-upper-triangle values of a square matrix, in the
/// same column-major order as [`pair_labels`].
pub fn upper_triangle(matrix: ArrayView2<'_, f64>) -> Vec<f64> {
    upper_positions(matrix.ncols())
        .map(|(row, col)| matrix[[row, col]])
        .collect()
}
