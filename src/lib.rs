//! Error-tolerant semi-global alignment, built for locating a short query
//! string (typically an adapter) inside a reference string (typically a
//! sequencing read), or the other way around. Substitutions, insertions
//! and deletions are tolerated up to a configurable rate of errors over
//! the aligned length.
//!
//! The aligner is the compute kernel behind adapter trimming: it is called
//! once per read, millions of times per run, so it is deterministic, keeps
//! a single reusable column of the dynamic-programming matrix, and uses
//! Ukkonen's banding to skip rows that are already over the error budget.
//! It reports interval endpoints and match/error counts only; alignments
//! themselves are never reconstructed.
//!
//! ## Details
//!
//! Which overlaps are considered is governed by four boundary [`Flags`]:
//! each flag frees one end of one sequence, so anchored (prefix/suffix),
//! front/back and fully semi-global modes are all expressible. When
//! several overlaps are within the error budget, the one with the most
//! matching characters wins, with ties broken by lower cost; at equal cost
//! inside the matrix the engine prefers mismatches over insertions over
//! deletions. This tie-breaking is part of the contract.
//!
//! Matching can be exact ASCII, or ambiguity-aware using IUPAC nucleotide
//! codes on either or both sides: each character becomes a 4-bit set of
//! the bases it stands for and two characters match if their sets
//! intersect (see [`encoding`]). An `N` matches every base; a byte that is
//! no IUPAC code matches nothing.
//!
//! For anchored matching without indels, [`compare_prefixes()`] /
//! [`compare_suffixes()`] and the configured [`PrefixComparer`] /
//! [`SuffixComparer`] count mismatches position-by-position and return
//! the same [`Location`] shape as the full engine. The
//! [`environment`] module enumerates mismatch neighborhoods for consumers
//! that match adapters by exact lookup instead.
//!
//! Aligners are mutable, single-threaded objects: the intended way to
//! scale over many reads is one [`Aligner`] per worker, each with its own
//! column buffer. Nothing is shared, so no locking is needed.
//!
//! # Usage
//!
//! Locate an adapter anywhere in a read, tolerating one error per ten
//! aligned bases:
//!
//! ```rust
//! use semialign::{Aligner, Flags};
//!
//! let mut aligner = Aligner::new("AACGACGT", 0.1, Flags::SEMIGLOBAL, false, false).unwrap();
//! let location = aligner.locate("ACGACGTTTTT").unwrap();
//! assert_eq!(location.ref_start, 1);
//! assert_eq!(location.ref_stop, 8);
//! assert_eq!(location.query_start, 0);
//! assert_eq!(location.query_stop, 7);
//! assert_eq!(location.matches, 7);
//! assert_eq!(location.errors, 0);
//! ```
//!
//! A 3' adapter search anchors the reference start and frees both query
//! ends, composed from the flag constants:
//!
//! ```rust
//! use semialign::{Aligner, Flags};
//!
//! let back = Flags::START_IN_QUERY | Flags::STOP_IN_QUERY | Flags::STOP_IN_REF;
//! let mut aligner = Aligner::new("AAGACGT", 0.1, back, false, false).unwrap();
//! let location = aligner.locate("CCCCAAGACGT").unwrap();
//! assert_eq!((location.query_start, location.query_stop), (4, 11));
//! ```
//!
//! Ambiguity codes in the reference match the bases they stand for when
//! `wildcard_ref` is enabled:
//!
//! ```rust
//! use semialign::{Aligner, Flags};
//!
//! let mut aligner = Aligner::new("ANGT", 0.0, Flags::SEMIGLOBAL, true, false).unwrap();
//! let location = aligner.locate("ACGT").unwrap();
//! assert_eq!(location.matches, 4);
//! assert_eq!(aligner.effective_length(), 3);
//! ```

#![warn(missing_docs)]

pub mod aligner;
pub mod comparer;
pub mod encoding;
pub mod environment;
pub mod error;

pub use crate::aligner::{Aligner, Flags, Location};
pub use crate::comparer::{compare_prefixes, compare_suffixes, PrefixComparer, SuffixComparer};
pub use crate::error::AlignError;
