#![deny(dead_code)]
#![deny(unused_imports)]

//! # Post-processing for Sparse Generalized CCA fits
//!
//! This crate consumes the output of a Sparse Generalized Canonical
//! Correlation Analysis (SGCCA) fitting routine and turns it into flat,
//! named summary statistics for downstream reporting. It does not fit
//! anything itself: the iterative optimization producing block weights
//! and component scores happens upstream, and this crate is a thin,
//! stateless transformation layer over its result object.
//!
//! - Typed ingestion: the fitting routine's loosely structured output
//!   bundle is pinned to the fixed-shape [`SgccaFit`] struct, with all
//!   structural invariants (connection-matrix shape and symmetry,
//!   matching observation counts) checked once at construction.
//! - Pairwise correlations: the first canonical component of every
//!   block pair is correlated, and the correlations are reported under
//!   stable pair labels derived from the connection matrix.
//! - One scalar summary: the pairwise correlations are collapsed into a
//!   single `cc1` statistic under one of three weighting [`Scheme`]s,
//!   with each pair weighted by its connection-matrix entry.
//!
//! All operations are pure, synchronous, in-memory transformations:
//! inputs are never mutated, and every public entry point returns a new
//! value or a typed error.
//!
//! ## Quick start
//!
//! ```
//! use cancor::{analyze, AveBlocks, AveSummary, Scheme, SgccaFit};
//! use ndarray::array;
//!
//! // Two blocks scored over three observations, one dimension each.
//! let scores = vec![
//!     array![[0.1], [0.4], [0.9]],
//!     array![[0.2], [0.3], [0.8]],
//! ];
//! let block_weights = vec![array![[1.0]], array![[1.0]]];
//! let star_weights = block_weights.clone();
//! let ave = AveSummary {
//!     inner: array![0.5],
//!     outer: array![0.6],
//!     per_block: AveBlocks::Heterogeneous(vec![array![0.4], array![0.7]]),
//! };
//! let connection = array![[0.0, 1.0], [1.0, 0.0]];
//!
//! let fit = SgccaFit::new(
//!     scores,
//!     block_weights,
//!     star_weights,
//!     ave,
//!     connection,
//!     Scheme::Centroid,
//! )?;
//! let summary = analyze(&fit)?;
//!
//! assert_eq!(summary.get("weights"), Some(1.0));
//! assert!(summary.get("vs12").is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod correlation;
pub mod fit;
pub mod pairs;
pub mod scheme;
pub mod summary;

pub use fit::{AveBlocks, AveSummary, FitCall, FitError, SgccaFit};
pub use scheme::{Scheme, SchemeParseError};
pub use summary::{Summary, SummaryError, analyze};
