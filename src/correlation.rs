//! Pairwise Pearson correlation of first canonical components.
//!
//! Each block of an SGCCA fit carries a score matrix whose columns are
//! its extracted canonical dimensions. The summary statistics in this
//! crate describe the *first* dimension only, so every block is collapsed
//! to its first score column and the columns are correlated pairwise
//! into an `N`×`N` matrix.
//!
//! Blocks must score the same observations. The upstream fitting routine
//! guarantees this, but the check is repeated here because the function
//! is callable on its own; a mismatch is a hard error rather than a
//! silent wrong answer.

use ndarray::{Array2, ArrayView1};
use thiserror::Error;

/// Errors from collapsing block scores to a correlation matrix.
#[derive(Error, Debug)]
pub enum CorrelationError {
    #[error("Block {index} has a score matrix with zero columns; every block needs at least one canonical component.")]
    EmptyBlock { index: usize },

    #[error("Block {index} has {found} observations, but the first block has {expected}. All blocks must score the same observations.")]
    ObservationCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Pearson correlation coefficient between two equal-length vectors.
///
/// Returns a value in [-1, 1]. A zero-variance input has no defined
/// correlation; this implementation reports 0.0 for that case (and for
/// empty input) so degenerate components drop out of downstream sums
/// instead of poisoning them with NaN.
pub fn pearson(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    if x.is_empty() {
        return 0.0;
    }
    let n = x.len() as f64;
    let mean_x = x.sum() / n;
    let mean_y = y.sum() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    ndarray::Zip::from(&x).and(&y).for_each(|&xi, &yi| {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    });

    if var_x == 0.0 || var_y == 0.0 {
        log::warn!("Zero-variance component vector; reporting correlation 0.0.");
        return 0.0;
    }
    covariance / (var_x.sqrt() * var_y.sqrt())
}

/// Correlation matrix between the first canonical component of every
/// block pair.
///
/// The result is symmetric with a unit diagonal, shaped `N`×`N` for `N`
/// blocks.
pub fn component_correlations(scores: &[Array2<f64>]) -> Result<Array2<f64>, CorrelationError> {
    let mut components: Vec<ArrayView1<'_, f64>> = Vec::with_capacity(scores.len());
    let mut n_obs = None;
    for (index, block) in scores.iter().enumerate() {
        if block.ncols() == 0 {
            return Err(CorrelationError::EmptyBlock { index });
        }
        let expected = *n_obs.get_or_insert(block.nrows());
        if block.nrows() != expected {
            return Err(CorrelationError::ObservationCountMismatch {
                index,
                expected,
                found: block.nrows(),
            });
        }
        components.push(block.column(0));
    }

    let n_blocks = components.len();
    let mut correlations = Array2::<f64>::eye(n_blocks);
    for col in 1..n_blocks {
        for row in 0..col {
            let r = pearson(components[row], components[col]);
            correlations[[row, col]] = r;
            correlations[[col, row]] = r;
        }
    }
    Ok(correlations)
}
