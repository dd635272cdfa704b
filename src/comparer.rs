//! Indel-free comparison of anchored sequences.
//!
//! When insertions and deletions are disallowed, locating an anchored
//! adapter reduces to counting mismatches position-by-position, which is
//! much cheaper than running the full engine. The free functions compare
//! two strings from their left ([`compare_prefixes`]) or right
//! ([`compare_suffixes`]) ends; [`PrefixComparer`] and [`SuffixComparer`]
//! are their configured, reusable counterparts with an error threshold,
//! mirroring how [`Aligner`](crate::Aligner) is bound to one reference.
//!
//! All routines return the same [`Location`] shape as
//! [`Aligner::locate()`](crate::Aligner::locate).

use crate::aligner::Location;
use crate::encoding::{characters_match, translate, ACGT_TABLE, IUPAC_TABLE};
use crate::error::AlignError;

/// Count matching positions over the first `length` characters of two
/// byte strings, under the comparison mode selected by the wildcard flags.
fn count_matches(
    reference: &[u8],
    query: &[u8],
    length: usize,
    wildcard_ref: bool,
    wildcard_query: bool,
) -> usize {
    if !wildcard_ref && !wildcard_query {
        return reference
            .iter()
            .zip(query)
            .take(length)
            .filter(|(a, b)| a == b)
            .count();
    }
    let reference = if wildcard_ref {
        translate(reference, &IUPAC_TABLE)
    } else {
        translate(reference, &ACGT_TABLE)
    };
    let query = if wildcard_query {
        translate(query, &IUPAC_TABLE)
    } else {
        translate(query, &ACGT_TABLE)
    };
    reference
        .iter()
        .zip(&query)
        .take(length)
        .filter(|(a, b)| characters_match(**a, **b))
        .count()
}

/// Compare `reference` and `query` position-by-position from their left
/// ends, over `length = min(|reference|, |query|)` characters.
///
/// No indels are considered. Always returns a [`Location`]; `errors` is
/// `length - matches`.
///
/// # Examples
/// ```
/// use semialign::compare_prefixes;
///
/// let location = compare_prefixes("ACGT", "ACGTTT", false, false);
/// assert_eq!((location.ref_stop, location.matches, location.errors), (4, 4, 0));
/// ```
pub fn compare_prefixes(
    reference: &str,
    query: &str,
    wildcard_ref: bool,
    wildcard_query: bool,
) -> Location {
    let length = reference.len().min(query.len());
    let matches = count_matches(
        reference.as_bytes(),
        query.as_bytes(),
        length,
        wildcard_ref,
        wildcard_query,
    );
    Location {
        ref_start: 0,
        ref_stop: length,
        query_start: 0,
        query_stop: length,
        matches,
        errors: length - matches,
    }
}

/// Compare `reference` and `query` position-by-position from their right
/// ends, the mirror of [`compare_prefixes`].
pub fn compare_suffixes(
    reference: &str,
    query: &str,
    wildcard_ref: bool,
    wildcard_query: bool,
) -> Location {
    let m = reference.len();
    let n = query.len();
    let length = m.min(n);
    let reference_rev: Vec<u8> = reference.bytes().rev().collect();
    let query_rev: Vec<u8> = query.bytes().rev().collect();
    let matches = count_matches(&reference_rev, &query_rev, length, wildcard_ref, wildcard_query);
    Location {
        ref_start: m - length,
        ref_stop: m,
        query_start: n - length,
        query_stop: n,
        matches,
        errors: length - matches,
    }
}

/// An indel-free counterpart of [`Aligner`](crate::Aligner), specialized
/// in finding the reference as an error-tolerant prefix of queries.
///
/// The reference is uppercased and translated once at construction; the
/// error budget is `⌊max_error_rate · effective_length⌋`.
#[derive(Debug, Clone)]
pub struct PrefixComparer {
    reference: Vec<u8>,
    wildcard_ref: bool,
    wildcard_query: bool,
    m: usize,
    max_k: usize,
    effective_length: usize,
    min_overlap: usize,
}

impl PrefixComparer {
    /// Bind a comparer to `reference`.
    pub fn new(
        reference: &str,
        max_error_rate: f64,
        wildcard_ref: bool,
        wildcard_query: bool,
        min_overlap: usize,
    ) -> Result<Self, AlignError> {
        let bytes = reference.as_bytes();
        let m = bytes.len();
        let mut effective_length = m;
        if wildcard_ref {
            effective_length -= bytes.iter().filter(|&&b| b == b'N' || b == b'n').count();
            if effective_length == 0 {
                return Err(AlignError::OnlyWildcards);
            }
        }
        if min_overlap < 1 {
            return Err(AlignError::MinOverlap(min_overlap));
        }
        if !(0.0..=1.0).contains(&max_error_rate) {
            return Err(AlignError::MaxErrorRate(max_error_rate));
        }
        let upper: Vec<u8> = bytes.iter().map(|b| b.to_ascii_uppercase()).collect();
        let reference = if wildcard_ref {
            translate(&upper, &IUPAC_TABLE)
        } else if wildcard_query {
            translate(&upper, &ACGT_TABLE)
        } else {
            upper
        };
        Ok(Self {
            reference,
            wildcard_ref,
            wildcard_query,
            m,
            max_k: (max_error_rate * effective_length as f64) as usize,
            effective_length,
            min_overlap,
        })
    }

    /// Reference length minus the number of `N` wildcards.
    pub fn effective_length(&self) -> usize {
        self.effective_length
    }

    /// Whether the reference is a prefix of `query`, within the error
    /// budget. Returns [`None`] if there are too many errors or the
    /// compared length is below `min_overlap`.
    pub fn locate(&self, query: &str) -> Option<Location> {
        let query_bytes = query.as_bytes();
        let length = self.m.min(query_bytes.len());
        let matches = if self.wildcard_query {
            let query = translate(query_bytes, &IUPAC_TABLE);
            bitwise_matches(&self.reference, &query, length)
        } else if self.wildcard_ref {
            let query = translate(query_bytes, &ACGT_TABLE);
            bitwise_matches(&self.reference, &query, length)
        } else {
            self.reference
                .iter()
                .zip(query_bytes)
                .take(length)
                .filter(|(a, b)| **a == b.to_ascii_uppercase())
                .count()
        };
        let errors = length - matches;
        if errors > self.max_k || length < self.min_overlap {
            return None;
        }
        Some(Location {
            ref_start: 0,
            ref_stop: length,
            query_start: 0,
            query_stop: length,
            matches,
            errors,
        })
    }
}

#[inline]
fn bitwise_matches(reference: &[u8], query: &[u8], length: usize) -> usize {
    reference
        .iter()
        .zip(query)
        .take(length)
        .filter(|(a, b)| characters_match(**a, **b))
        .count()
}

/// An indel-free comparer that finds the reference as an error-tolerant
/// suffix of queries. Wraps a [`PrefixComparer`] over the reversed
/// reference.
#[derive(Debug, Clone)]
pub struct SuffixComparer {
    inner: PrefixComparer,
    m: usize,
}

impl SuffixComparer {
    /// Bind a comparer to `reference`.
    pub fn new(
        reference: &str,
        max_error_rate: f64,
        wildcard_ref: bool,
        wildcard_query: bool,
        min_overlap: usize,
    ) -> Result<Self, AlignError> {
        let reversed: String = reference.chars().rev().collect();
        Ok(Self {
            inner: PrefixComparer::new(
                &reversed,
                max_error_rate,
                wildcard_ref,
                wildcard_query,
                min_overlap,
            )?,
            m: reference.len(),
        })
    }

    /// Reference length minus the number of `N` wildcards.
    pub fn effective_length(&self) -> usize {
        self.inner.effective_length()
    }

    /// Whether the reference is a suffix of `query`, within the error
    /// budget.
    pub fn locate(&self, query: &str) -> Option<Location> {
        let n = query.len();
        let reversed: String = query.chars().rev().collect();
        let location = self.inner.locate(&reversed)?;
        let length = location.ref_stop;
        Some(Location {
            ref_start: self.m - length,
            ref_stop: self.m,
            query_start: n - length,
            query_stop: n,
            matches: location.matches,
            errors: location.errors,
        })
    }
}
