//! Flat named summary of an SGCCA fit.
//!
//! [`analyze`] is the orchestration entry point of the crate. It walks
//! the fit once and assembles a single flat, named numeric result in a
//! fixed order:
//!
//! 1. `vs<pair>`: pairwise first-component correlations, one entry per
//!    strict-upper-triangle cell of the connection matrix;
//! 2. `AVE_inner` / `AVE_outer`: the fit's AVE summary values under
//!    their natural names (1-based suffixes when vector-valued);
//! 3. `cc1`: the scheme-aggregated canonical-correlation scalar;
//! 4. `var<pair>`: the connection-matrix weights for the same pairs, in
//!    the same order as the `vs` entries;
//! 5. `weights`: the count of nonzero entries among the `var` values.
//!
//! Pairs with a zero connection weight keep their `vs` and `var` entries
//! so the output length is a function of the block count alone; they are
//! excluded from the `weights` count and contribute nothing to `cc1`.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::correlation::{CorrelationError, component_correlations};
use crate::fit::SgccaFit;
use crate::pairs::{pair_labels, upper_triangle};
use crate::scheme::{AggregationError, canonical_correlation};

/// Errors from assembling the summary. Failures of the underlying steps
/// propagate unmodified.
#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Underlying component correlation failed: {0}")]
    Correlation(#[from] CorrelationError),

    #[error("Underlying scheme aggregation failed: {0}")]
    Aggregation(#[from] AggregationError),
}

/// Ordered, named numeric result of [`analyze`].
///
/// Entries keep their insertion order, so iterating the summary yields
/// the documented layout; [`Summary::get`] looks values up by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    entries: Vec<(String, f64)>,
}

impl Summary {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, name: String, value: f64) {
        self.entries.push((name, value));
    }

    /// Looks a value up by its name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, value)| *value)
    }

    /// Number of named entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in output order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Entry values in output order.
    pub fn values(&self) -> impl Iterator<Item = f64> {
        self.entries.iter().map(|(_, value)| *value)
    }

    /// (name, value) pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }
}

/// Assembles the flat named summary of a fit.
///
/// See the module docs for the exact output layout. Errors from the
/// correlation and aggregation steps propagate unmodified; a fit built
/// through [`SgccaFit::new`] cannot trigger them, but the helpers are
/// also callable with hand-built inputs.
pub fn analyze(fit: &SgccaFit) -> Result<Summary, SummaryError> {
    let n_blocks = fit.n_blocks();
    let labels = pair_labels(n_blocks);
    log::debug!(
        "Analyzing fit: {} blocks, {} pairs, scheme {}.",
        n_blocks,
        labels.len(),
        fit.call.scheme
    );

    let correlations = component_correlations(&fit.scores)?;
    let cc1 = canonical_correlation(
        correlations.view(),
        fit.call.connection.view(),
        fit.call.scheme,
    )?;

    let vs = upper_triangle(correlations.view());
    let vars = upper_triangle(fit.call.connection.view());
    let nonzero = vars.iter().filter(|&&weight| weight != 0.0).count();

    let capacity = 2 * labels.len() + fit.ave.inner.len() + fit.ave.outer.len() + 2;
    let mut summary = Summary::with_capacity(capacity);
    for (label, &value) in labels.iter().zip(&vs) {
        summary.push(format!("vs{label}"), value);
    }
    push_flattened(&mut summary, "AVE_inner", fit.ave.inner.view());
    push_flattened(&mut summary, "AVE_outer", fit.ave.outer.view());
    summary.push("cc1".to_string(), cc1);
    for (label, &value) in labels.iter().zip(&vars) {
        summary.push(format!("var{label}"), value);
    }
    summary.push("weights".to_string(), nonzero as f64);
    Ok(summary)
}

/// Flattens a vector-valued AVE field under its natural name: a single
/// value keeps the bare name, several values get 1-based suffixes
/// (`AVE_inner1`, `AVE_inner2`, ...).
fn push_flattened(summary: &mut Summary, name: &str, values: ArrayView1<'_, f64>) {
    if values.len() == 1 {
        summary.push(name.to_string(), values[0]);
    } else {
        for (i, &value) in values.iter().enumerate() {
            summary.push(format!("{name}{}", i + 1), value);
        }
    }
}
