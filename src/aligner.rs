//! Banded semi-global alignment of queries against a configured reference.
//!
//! An [`Aligner`] is bound to one reference string (typically an adapter)
//! and run against many queries (typically reads), or the other way around.
//! [`Aligner::locate()`] finds the best overlap under an error-rate
//! constraint, tolerating substitutions, insertions and deletions. Which
//! ends of either sequence may be skipped without penalty is controlled by
//! [`Flags`].
//!
//! The engine keeps a single column of the dynamic-programming matrix and
//! uses Ukkonen's trick to only touch rows still within the error budget,
//! so a call is `O(k·max(m, n))` in practice. No allocation happens on the
//! hot path; the column buffer is reused across calls and only resized when
//! the reference is replaced.
//!
//! # Examples
//! ```
//! use semialign::{Aligner, Flags};
//!
//! let mut aligner = Aligner::new("MISSISSIPPI", 0.1, Flags::SEMIGLOBAL, false, false).unwrap();
//! let location = aligner.locate("SISSI").unwrap();
//! assert_eq!(location.ref_start, 3);
//! assert_eq!(location.ref_stop, 8);
//! assert_eq!(location.matches, 5);
//! assert_eq!(location.errors, 0);
//! ```

use std::ops::BitOr;

use crate::encoding::{characters_match, translate, ACGT_TABLE, IUPAC_TABLE};
use crate::error::AlignError;

pub mod dp_matrix;
use crate::aligner::dp_matrix::DpMatrix;

/// Which sequence ends an alignment may skip without penalty.
///
/// Flags combine with `|`. An unset start flag anchors the alignment to the
/// beginning of that sequence; an unset stop flag anchors it to the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    /// The alignment may skip a prefix of the reference.
    pub const START_IN_REF: Flags = Flags(1);
    /// The alignment may skip a prefix of the query.
    pub const START_IN_QUERY: Flags = Flags(2);
    /// The alignment may skip a suffix of the reference.
    pub const STOP_IN_REF: Flags = Flags(4);
    /// The alignment may skip a suffix of the query.
    pub const STOP_IN_QUERY: Flags = Flags(8);
    /// All four ends free: standard semi-global alignment.
    pub const SEMIGLOBAL: Flags = Flags(1 | 2 | 4 | 8);

    /// Whether all of `other`'s flags are set in `self`.
    #[inline(always)]
    pub fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::SEMIGLOBAL
    }
}

/// Coordinates and scores of a located overlap.
///
/// Half-open intervals: the aligned part of the reference is
/// `reference[ref_start..ref_stop]`, likewise for the query. At least one
/// of `ref_start` and `query_start` is zero, and the reference interval is
/// never empty. `errors` is the edit cost of the alignment; because
/// insertions consume query characters only, `matches + errors` may be
/// smaller than the aligned reference length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Start of the aligned interval in the reference.
    pub ref_start: usize,
    /// End of the aligned interval in the reference.
    pub ref_stop: usize,
    /// Start of the aligned interval in the query.
    pub query_start: usize,
    /// End of the aligned interval in the query.
    pub query_stop: usize,
    /// Number of matching character pairs.
    pub matches: usize,
    /// Edit cost (mismatches at 1, indels at their configured cost).
    pub errors: usize,
}

/// One cell of the DP column: accumulated cost, matches along the best
/// path, and where that path entered the matrix (negative: reference row,
/// positive: query column, zero: top-left).
#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    cost: usize,
    matches: usize,
    origin: isize,
}

/// Best exit cell seen so far while scanning columns.
#[derive(Debug, Clone, Copy)]
struct Best {
    cost: usize,
    matches: usize,
    origin: isize,
    ref_stop: usize,
    query_stop: usize,
}

/// A reusable semi-global aligner bound to one reference string.
///
/// Construct once, then call [`locate()`](Aligner::locate) per query. The
/// reference, `min_overlap` and the indel cost can be replaced between
/// calls. An `Aligner` is a mutable, stateful object; for parallel
/// throughput give each worker thread its own instance.
pub struct Aligner {
    /// The reference as passed in, kept for reporting and the debug matrix.
    reference: String,
    /// The reference bytes actually compared: raw ASCII, or run through one
    /// of the translation tables depending on the wildcard flags.
    ref_bytes: Vec<u8>,
    /// Reference length.
    m: usize,
    /// Reference length minus uninformative `N` wildcards.
    effective_length: usize,
    /// Maximum rate of errors over the aligned reference length.
    max_error_rate: f64,
    flags: Flags,
    min_overlap: usize,
    insertion_cost: usize,
    deletion_cost: usize,
    wildcard_ref: bool,
    wildcard_query: bool,
    debug: bool,
    dpmatrix: Option<DpMatrix>,
    /// The single DP column, `m + 1` entries, reused across calls.
    column: Vec<Entry>,
    /// Scratch for the translated query.
    query_bytes: Vec<u8>,
}

impl Aligner {
    /// Create an aligner for `reference`.
    ///
    /// `min_overlap` defaults to 1 and both indel costs to 1; change them
    /// with [`set_min_overlap()`](Aligner::set_min_overlap) and
    /// [`set_indel_cost()`](Aligner::set_indel_cost).
    ///
    /// Returns an error if the column buffer cannot be allocated.
    pub fn new(
        reference: &str,
        max_error_rate: f64,
        flags: Flags,
        wildcard_ref: bool,
        wildcard_query: bool,
    ) -> Result<Self, AlignError> {
        let mut aligner = Self {
            reference: String::new(),
            ref_bytes: Vec::new(),
            m: 0,
            effective_length: 0,
            max_error_rate,
            flags,
            min_overlap: 1,
            insertion_cost: 1,
            deletion_cost: 1,
            wildcard_ref,
            wildcard_query,
            debug: false,
            dpmatrix: None,
            column: Vec::new(),
            query_bytes: Vec::new(),
        };
        aligner.set_reference(reference)?;
        Ok(aligner)
    }

    /// Replace the reference, resizing the column buffer.
    ///
    /// If the allocation is refused, the previously configured reference
    /// stays in effect.
    pub fn set_reference(&mut self, reference: &str) -> Result<(), AlignError> {
        let bytes = reference.as_bytes();
        let mut effective_length = bytes.len();
        if self.wildcard_ref {
            effective_length -= bytes.iter().filter(|&&b| b == b'N' || b == b'n').count();
        }
        let mut column: Vec<Entry> = Vec::new();
        column
            .try_reserve_exact(bytes.len() + 1)
            .map_err(|_| AlignError::Allocation(bytes.len() + 1))?;
        column.resize(bytes.len() + 1, Entry::default());

        self.ref_bytes = if self.wildcard_ref {
            translate(bytes, &IUPAC_TABLE)
        } else if self.wildcard_query {
            translate(bytes, &ACGT_TABLE)
        } else {
            bytes.to_vec()
        };
        self.reference = reference.to_string();
        self.m = bytes.len();
        self.effective_length = effective_length;
        self.column = column;
        log::debug!("aligner reference set ({} characters)", self.m);
        Ok(())
    }

    /// The configured reference.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Reference length minus the number of `N` wildcards (which match
    /// every base and carry no information). Equal to the reference length
    /// unless `wildcard_ref` is set.
    pub fn effective_length(&self) -> usize {
        self.effective_length
    }

    /// Require at least this many aligned reference characters. Rejects
    /// values below 1.
    pub fn set_min_overlap(&mut self, min_overlap: usize) -> Result<(), AlignError> {
        if min_overlap < 1 {
            return Err(AlignError::MinOverlap(min_overlap));
        }
        self.min_overlap = min_overlap;
        Ok(())
    }

    /// Set the cost of insertions and deletions (mismatches always cost 1,
    /// matches 0). Rejects values below 1.
    pub fn set_indel_cost(&mut self, indel_cost: usize) -> Result<(), AlignError> {
        if indel_cost < 1 {
            return Err(AlignError::IndelCost(indel_cost));
        }
        self.insertion_cost = indel_cost;
        self.deletion_cost = indel_cost;
        Ok(())
    }

    /// Record the cost matrix of subsequent [`locate()`](Aligner::locate)
    /// calls in [`dpmatrix()`](Aligner::dpmatrix). Off the hot path: when
    /// not enabled, no matrix is kept.
    pub fn enable_debug(&mut self) {
        self.debug = true;
    }

    /// The cost matrix of the last `locate` call, if debugging is enabled.
    pub fn dpmatrix(&self) -> Option<&DpMatrix> {
        self.dpmatrix.as_ref()
    }

    /// Find the best overlap between the reference and `query`.
    ///
    /// Considers every alignment allowed by the configured [`Flags`] that
    /// covers at least `min_overlap` reference characters and whose edit
    /// cost does not exceed `max_error_rate` times the aligned reference
    /// length. Among those, the one with the most matches wins; ties go to
    /// the lower cost. Returns [`None`] when no alignment qualifies.
    pub fn locate(&mut self, query: &str) -> Option<Location> {
        let query_ascii = query.as_bytes();
        let m = self.m;
        let n = query_ascii.len();

        // Comparison mode is fixed per call: translate the query through
        // the table matching the wildcard flags, or compare raw ASCII.
        let compare_ascii = !self.wildcard_ref && !self.wildcard_query;
        self.query_bytes.clear();
        if self.wildcard_query {
            self.query_bytes
                .extend(query_ascii.iter().map(|&b| IUPAC_TABLE[b as usize]));
        } else if self.wildcard_ref {
            self.query_bytes
                .extend(query_ascii.iter().map(|&b| ACGT_TABLE[b as usize]));
        } else {
            self.query_bytes.extend_from_slice(query_ascii);
        }

        let start_in_ref = self.flags.contains(Flags::START_IN_REF);
        let start_in_query = self.flags.contains(Flags::START_IN_QUERY);
        let stop_in_ref = self.flags.contains(Flags::STOP_IN_REF);
        let stop_in_query = self.flags.contains(Flags::STOP_IN_QUERY);

        // Maximum number of errors
        let k = (self.max_error_rate * m as f64) as usize;

        // Costs can only get worse towards columns that force the
        // alignment to skip more of the query than the budget allows, so
        // anchored modes restrict the column window.
        let max_n = if start_in_query { n } else { n.min(m + k) };
        let min_n = if stop_in_query {
            0
        } else {
            n.saturating_sub(m + k)
        };

        let insertion_cost = self.insertion_cost;
        let deletion_cost = self.deletion_cost;
        let max_error_rate = self.max_error_rate;
        let min_overlap = self.min_overlap as isize;

        // Seed column min_n. Free starts zero the cost in their
        // direction; the origin records where the alignment entered.
        let column = &mut self.column;
        match (start_in_ref, start_in_query) {
            (false, false) => {
                for (i, entry) in column.iter_mut().enumerate() {
                    *entry = Entry {
                        cost: i.max(min_n) * insertion_cost,
                        matches: 0,
                        origin: 0,
                    };
                }
            }
            (true, false) => {
                for (i, entry) in column.iter_mut().enumerate() {
                    *entry = Entry {
                        cost: min_n * insertion_cost,
                        matches: 0,
                        origin: (min_n as isize - i as isize).min(0),
                    };
                }
            }
            (false, true) => {
                for (i, entry) in column.iter_mut().enumerate() {
                    *entry = Entry {
                        cost: i * insertion_cost,
                        matches: 0,
                        origin: (min_n as isize - i as isize).max(0),
                    };
                }
            }
            (true, true) => {
                for (i, entry) in column.iter_mut().enumerate() {
                    *entry = Entry {
                        cost: i.min(min_n) * insertion_cost,
                        matches: 0,
                        origin: min_n as isize - i as isize,
                    };
                }
            }
        }

        if self.debug {
            let mut matrix = DpMatrix::new(&self.reference, query);
            for (i, entry) in column.iter().enumerate() {
                matrix.set_entry(i, min_n, entry.cost);
            }
            self.dpmatrix = Some(matrix);
        }

        let mut best = Best {
            cost: m + n,
            matches: 0,
            origin: 0,
            ref_stop: m,
            query_stop: n,
        };

        // Ukkonen's trick: index of the last row that can still be within
        // the error budget. A free reference start puts every row in
        // reach on the seed column, so no banding applies there.
        let mut last: isize = if start_in_ref {
            m as isize
        } else {
            (m as isize).min(k as isize + 1)
        };

        let s1 = self.ref_bytes.as_slice();
        let s2 = self.query_bytes.as_slice();
        let mut dpmatrix = if self.debug {
            self.dpmatrix.as_mut()
        } else {
            None
        };

        for j in min_n + 1..=max_n {
            // Remember the head of the previous column (the upper-left
            // neighbour of row 1) before overwriting it.
            let mut diag_entry = column[0];
            if start_in_query {
                // A fresh alignment may start at any column
                column[0].origin = j as isize;
            } else {
                column[0].cost = j * insertion_cost;
            }

            for i in 1..=last as usize {
                let characters_equal = if compare_ascii {
                    s1[i - 1] == s2[j - 1]
                } else {
                    characters_match(s1[i - 1], s2[j - 1])
                };
                let entry = if characters_equal {
                    // A free match: insertion and deletion cannot beat it
                    Entry {
                        cost: diag_entry.cost,
                        matches: diag_entry.matches + 1,
                        origin: diag_entry.origin,
                    }
                } else {
                    let cost_diag = diag_entry.cost + 1;
                    let cost_deletion = column[i].cost + deletion_cost;
                    let cost_insertion = column[i - 1].cost + insertion_cost;
                    // Tie-breaking is contractual: mismatch, then
                    // insertion, then deletion. It decides which matches
                    // count travels along equal-cost paths.
                    if cost_diag <= cost_deletion && cost_diag <= cost_insertion {
                        Entry {
                            cost: cost_diag,
                            matches: diag_entry.matches,
                            origin: diag_entry.origin,
                        }
                    } else if cost_insertion <= cost_deletion {
                        Entry {
                            cost: cost_insertion,
                            matches: column[i - 1].matches,
                            origin: column[i - 1].origin,
                        }
                    } else {
                        Entry {
                            cost: cost_deletion,
                            matches: column[i].matches,
                            origin: column[i].origin,
                        }
                    }
                };
                diag_entry = column[i];
                column[i] = entry;
            }

            if let Some(matrix) = dpmatrix.as_mut() {
                for (i, entry) in column.iter().enumerate().take(last as usize + 1) {
                    matrix.set_entry(i, j, entry.cost);
                }
            }

            // Shrink the band to rows still within budget, then let it
            // grow by at most one row for the next column.
            while last >= 0 && column[last as usize].cost > k {
                last -= 1;
            }
            if last < m as isize {
                last += 1;
            } else if stop_in_query {
                // The band reaches the final reference row: the cell in
                // the bottom row is a candidate exit.
                let length = m as isize + column[m].origin.min(0);
                let cost = column[m].cost;
                let matches = column[m].matches;
                if length >= min_overlap
                    && cost as f64 <= length as f64 * max_error_rate
                    && (matches > best.matches || (matches == best.matches && cost < best.cost))
                {
                    best = Best {
                        cost,
                        matches,
                        origin: column[m].origin,
                        ref_stop: m,
                        query_stop: j,
                    };
                    if cost == 0 && matches == m {
                        // Exact match; no later column can do better
                        break;
                    }
                }
            }
        }

        if max_n == n {
            // Last column reached: consider exits that leave part of the
            // reference unaligned (all rows if allowed, else only row m).
            let first_i = if stop_in_ref { 0 } else { m };
            for i in first_i..=m {
                let length = i as isize + column[i].origin.min(0);
                let cost = column[i].cost;
                let matches = column[i].matches;
                if length >= min_overlap
                    && cost as f64 <= length as f64 * max_error_rate
                    && (matches > best.matches || (matches == best.matches && cost < best.cost))
                {
                    best = Best {
                        cost,
                        matches,
                        origin: column[i].origin,
                        ref_stop: i,
                        query_stop: n,
                    };
                }
            }
        }

        if best.cost == m + n {
            // best was never updated
            return None;
        }
        let (ref_start, query_start) = if best.origin >= 0 {
            (0, best.origin as usize)
        } else {
            ((-best.origin) as usize, 0)
        };
        debug_assert!(best.ref_stop > ref_start);
        Some(Location {
            ref_start,
            ref_stop: best.ref_stop,
            query_start,
            query_stop: best.query_stop,
            matches: best.matches,
            errors: best.cost,
        })
    }
}
