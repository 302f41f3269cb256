//! Typed fit-result data model and its construction-boundary validation.
//!
//! The external SGCCA fitting routine reports its output as a loosely
//! structured bundle: per-block score matrices, per-block weight
//! vectors, an Average-Variance-Explained summary, and the call
//! configuration (connection matrix and scheme). This module pins that
//! bundle to the fixed-shape [`SgccaFit`] struct and checks the
//! structural invariants once, on ingestion, so every other operation in
//! the crate can rely on them:
//!
//! - the connection matrix is square, symmetric, sized to the block
//!   count, and carries only finite, non-negative weights;
//! - all score matrices share one observation count;
//! - the weight collections and per-block AVE values agree with the
//!   block count.
//!
//! The struct also owns the two reshaping operations applied to fits
//! after the fact: [`SgccaFit::relabel`] installs user-supplied block
//! names, and [`SgccaFit::simplify_ave`] collapses the per-block AVE
//! values into a rectangular table when block shapes allow it. Both
//! consume the fit and return a new one; nothing is mutated in place.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scheme::Scheme;

/// A comprehensive error type for fit ingestion and relabeling failures.
#[derive(Error, Debug)]
pub enum FitError {
    #[error("The fit contains no blocks.")]
    NoBlocks,

    #[error("The fit has {expected} score blocks but {found} {collection} entries; the per-block collections must agree.")]
    BlockCountMismatch {
        collection: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Connection matrix is {rows}x{cols}; it must be square.")]
    ConnectionNotSquare { rows: usize, cols: usize },

    #[error("Connection matrix is {found}x{found} but the fit has {expected} blocks.")]
    ConnectionSizeMismatch { expected: usize, found: usize },

    #[error("Connection matrix is not symmetric: entry ({row}, {col}) is {value} but entry ({col}, {row}) is {mirrored}.")]
    ConnectionAsymmetric {
        row: usize,
        col: usize,
        value: f64,
        mirrored: f64,
    },

    #[error("Connection matrix entry ({row}, {col}) is {value}; entries must be finite and non-negative.")]
    ConnectionInvalidEntry { row: usize, col: usize, value: f64 },

    #[error("Block {index} has {found} observations, but the first block has {expected}. All blocks must score the same observations.")]
    ObservationCountMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("No block names were given. Relabeling requires one name per block.")]
    MissingBlockNames,

    #[error("Got {found} block names for {expected} blocks.")]
    BlockNameCountMismatch { expected: usize, found: usize },
}

/// Average-Variance-Explained summary reported by the fitting routine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AveSummary {
    /// Inner AVE, one value per extracted dimension.
    pub inner: Array1<f64>,
    /// Outer AVE, one value per extracted dimension.
    pub outer: Array1<f64>,
    /// Per-block AVE values.
    pub per_block: AveBlocks,
}

/// Per-block AVE values in one of two representations.
///
/// Blocks may carry differing numbers of canonical dimensions, in which
/// case no rectangular layout exists and the per-block vectors are kept
/// as they came.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AveBlocks {
    /// Rows are dimensions, columns are blocks.
    Uniform(Array2<f64>),
    /// One vector per block; lengths may differ.
    Heterogeneous(Vec<Array1<f64>>),
}

impl AveBlocks {
    /// Number of blocks covered.
    pub fn n_blocks(&self) -> usize {
        match self {
            Self::Uniform(table) => table.ncols(),
            Self::Heterogeneous(vectors) => vectors.len(),
        }
    }

    /// Attempts the rectangular layout. Succeeds when every per-block
    /// vector has the same length; otherwise the input representation is
    /// returned unchanged. Already-uniform values pass straight through.
    fn simplify(self) -> Self {
        match self {
            Self::Uniform(table) => Self::Uniform(table),
            Self::Heterogeneous(vectors) => {
                let Some(first) = vectors.first() else {
                    return Self::Heterogeneous(vectors);
                };
                let n_dims = first.len();
                if vectors.iter().any(|vector| vector.len() != n_dims) {
                    log::debug!("Per-block AVE lengths differ; keeping the heterogeneous layout.");
                    return Self::Heterogeneous(vectors);
                }
                let mut table = Array2::zeros((n_dims, vectors.len()));
                for (col, vector) in vectors.iter().enumerate() {
                    table.column_mut(col).assign(vector);
                }
                Self::Uniform(table)
            }
        }
    }
}

/// Configuration echoed back by the fitting routine alongside its output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitCall {
    /// Square, symmetric design matrix over blocks; a nonzero entry at
    /// (i, j) links blocks i and j.
    pub connection: Array2<f64>,
    /// Weighting scheme the fit was run under.
    pub scheme: Scheme,
}

/// Validated output of an SGCCA fit.
///
/// `block_names` is the canonical block order. It labels `scores`,
/// `block_weights`, `star_weights`, and the per-block AVE values, and it
/// names both axes of the connection matrix; there is exactly one name
/// order, enforced everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SgccaFit {
    /// Per-block score matrices (`Y`): rows are observations, columns
    /// are canonical dimensions.
    pub scores: Vec<Array2<f64>>,
    /// Per-block weight vectors (`a`): rows are the block's variables,
    /// columns are dimensions.
    pub block_weights: Vec<Array2<f64>>,
    /// Derived per-block weight vectors (`astar`), same shape convention
    /// as `block_weights`.
    pub star_weights: Vec<Array2<f64>>,
    /// Average-Variance-Explained summary.
    pub ave: AveSummary,
    /// Connection matrix and scheme the fit was run under.
    pub call: FitCall,
    /// Canonical block labels, defaulting to `block1`, `block2`, ...
    pub block_names: Vec<String>,
}

impl SgccaFit {
    /// Validates and assembles a fit from the fitting routine's raw
    /// output. Block names default to `block1`, `block2`, ...; install
    /// real names afterwards with [`SgccaFit::relabel`].
    pub fn new(
        scores: Vec<Array2<f64>>,
        block_weights: Vec<Array2<f64>>,
        star_weights: Vec<Array2<f64>>,
        ave: AveSummary,
        connection: Array2<f64>,
        scheme: Scheme,
    ) -> Result<Self, FitError> {
        let n_blocks = scores.len();
        if n_blocks == 0 {
            return Err(FitError::NoBlocks);
        }
        check_block_count("block weight", block_weights.len(), n_blocks)?;
        check_block_count("star weight", star_weights.len(), n_blocks)?;
        check_block_count("per-block AVE", ave.per_block.n_blocks(), n_blocks)?;

        if connection.nrows() != connection.ncols() {
            return Err(FitError::ConnectionNotSquare {
                rows: connection.nrows(),
                cols: connection.ncols(),
            });
        }
        if connection.nrows() != n_blocks {
            return Err(FitError::ConnectionSizeMismatch {
                expected: n_blocks,
                found: connection.nrows(),
            });
        }
        for ((row, col), &value) in connection.indexed_iter() {
            if !value.is_finite() || value < 0.0 {
                return Err(FitError::ConnectionInvalidEntry { row, col, value });
            }
            let mirrored = connection[[col, row]];
            if row < col && value != mirrored {
                return Err(FitError::ConnectionAsymmetric {
                    row,
                    col,
                    value,
                    mirrored,
                });
            }
        }

        let n_obs = scores[0].nrows();
        for (index, block) in scores.iter().enumerate() {
            if block.nrows() != n_obs {
                return Err(FitError::ObservationCountMismatch {
                    index,
                    expected: n_obs,
                    found: block.nrows(),
                });
            }
        }

        let block_names = (1..=n_blocks).map(|i| format!("block{i}")).collect();
        Ok(Self {
            scores,
            block_weights,
            star_weights,
            ave,
            call: FitCall { connection, scheme },
            block_names,
        })
    }

    /// Number of blocks in the fit.
    pub fn n_blocks(&self) -> usize {
        self.scores.len()
    }

    /// Number of observations scored by every block.
    pub fn n_observations(&self) -> usize {
        self.scores[0].nrows()
    }

    /// Replaces the per-block AVE values with their rectangular layout
    /// when every block carries the same number of dimensions; otherwise
    /// the fit is returned unchanged.
    pub fn simplify_ave(mut self) -> Self {
        self.ave.per_block = self.ave.per_block.simplify();
        self
    }

    /// Installs `names` as the canonical block order (covering scores,
    /// weights, per-block AVE values, and both axes of the connection
    /// matrix), then simplifies the per-block AVE layout.
    ///
    /// The name sequence must be non-empty and match the block count
    /// exactly; a silent truncation or misalignment is never acceptable
    /// for labels that downstream reports key on.
    pub fn relabel(mut self, names: &[String]) -> Result<Self, FitError> {
        if names.is_empty() {
            return Err(FitError::MissingBlockNames);
        }
        if names.len() != self.n_blocks() {
            return Err(FitError::BlockNameCountMismatch {
                expected: self.n_blocks(),
                found: names.len(),
            });
        }
        log::debug!("Relabeling {} blocks as {:?}.", names.len(), names);
        self.block_names = names.to_vec();
        Ok(self.simplify_ave())
    }
}

fn check_block_count(
    collection: &'static str,
    found: usize,
    expected: usize,
) -> Result<(), FitError> {
    if found != expected {
        return Err(FitError::BlockCountMismatch {
            collection,
            expected,
            found,
        });
    }
    Ok(())
}
