//! Errors raised when configuring an aligner or comparer.
//!
//! The alignment engines themselves cannot fail once configured; a query
//! with no acceptable alignment is reported in-band as [`None`].

use thiserror::Error;

/// Invalid configuration, or a refused column-buffer reallocation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignError {
    /// `min_overlap` must allow at least one aligned character.
    #[error("min_overlap must be at least 1 (got {0})")]
    MinOverlap(usize),
    /// Zero-cost indels would make every alignment optimal.
    #[error("indel_cost must be at least 1 (got {0})")]
    IndelCost(usize),
    /// With `wildcard_ref`, an all-`N` comparer reference matches
    /// everything, so its error budget over the effective length would be
    /// meaningless.
    #[error("reference cannot consist of only N wildcards")]
    OnlyWildcards,
    /// Error rates are a fraction of the aligned length.
    #[error("max_error_rate must be between 0 and 1 (got {0})")]
    MaxErrorRate(f64),
    /// The column buffer for a new reference could not be allocated; the
    /// previous reference remains configured.
    #[error("could not allocate an alignment column of {0} entries")]
    Allocation(usize),
}
