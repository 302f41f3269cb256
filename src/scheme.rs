//! Aggregation schemes for the canonical-correlation summary.
//!
//! An SGCCA fit is run under one of three weighting rules, and the same
//! rule governs how this crate collapses the pairwise component
//! correlations into the single `cc1` scalar: the correlation matrix is
//! multiplied elementwise by the connection matrix, the strict upper
//! triangle of the product is taken, and the surviving values are summed
//! as-is (horst), in absolute value (centroid), or squared (factorial).
//!
//! Because the elementwise product runs before any reduction, block
//! pairs with a zero connection weight contribute exactly nothing under
//! every scheme.
//!
//! The scheme arrives from the fitting routine as a string tag; parsing
//! it through [`Scheme::from_str`] rejects unknown tags instead of
//! letting them fall through to an undefined summary.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::pairs::upper_triangle;

/// Weighting rule used to collapse pairwise component correlations into
/// the scalar summary reported as `cc1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Sum of absolute correlations; association counts equally in
    /// either direction.
    Centroid,
    /// Sum of signed correlations.
    Horst,
    /// Sum of squared correlations.
    Factorial,
}

/// Error for scheme tags outside the three recognized values.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unrecognized scheme '{0}'. Expected one of: centroid, horst, factorial.")]
pub struct SchemeParseError(pub String);

impl FromStr for Scheme {
    type Err = SchemeParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "centroid" => Ok(Self::Centroid),
            "horst" => Ok(Self::Horst),
            "factorial" => Ok(Self::Factorial),
            other => Err(SchemeParseError(other.to_string())),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Centroid => "centroid",
            Self::Horst => "horst",
            Self::Factorial => "factorial",
        })
    }
}

/// Errors from the scheme aggregation step.
#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Correlation matrix is {corr_rows}x{corr_cols} and connection matrix is {conn_rows}x{conn_cols}; both must be square with matching size.")]
    DimensionMismatch {
        corr_rows: usize,
        corr_cols: usize,
        conn_rows: usize,
        conn_cols: usize,
    },
}

/// Collapses a pairwise correlation matrix into one scalar under the
/// given scheme, weighting each pair by its connection-matrix entry.
pub fn canonical_correlation(
    correlations: ArrayView2<'_, f64>,
    connection: ArrayView2<'_, f64>,
    scheme: Scheme,
) -> Result<f64, AggregationError> {
    if correlations.dim() != connection.dim() || correlations.nrows() != correlations.ncols() {
        return Err(AggregationError::DimensionMismatch {
            corr_rows: correlations.nrows(),
            corr_cols: correlations.ncols(),
            conn_rows: connection.nrows(),
            conn_cols: connection.ncols(),
        });
    }

    let weighted = &correlations * &connection;
    let pairs = upper_triangle(weighted.view());
    let value: f64 = match scheme {
        Scheme::Centroid => pairs.iter().map(|v| v.abs()).sum(),
        Scheme::Horst => pairs.iter().sum(),
        Scheme::Factorial => pairs.iter().map(|v| v * v).sum(),
    };
    Ok(value)
}
