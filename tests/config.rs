use pretty_assertions::assert_eq;
use rayon::prelude::*;
use semialign::{Aligner, AlignError, Flags, PrefixComparer};

#[test]
fn min_overlap_below_one_is_rejected() {
    let mut aligner = Aligner::new("ACGT", 0.1, Flags::SEMIGLOBAL, false, false).unwrap();
    assert_eq!(aligner.set_min_overlap(0), Err(AlignError::MinOverlap(0)));
    assert_eq!(aligner.set_min_overlap(1), Ok(()));
    assert_eq!(aligner.set_min_overlap(4), Ok(()));
}

#[test]
fn indel_cost_below_one_is_rejected() {
    let mut aligner = Aligner::new("ACGT", 0.1, Flags::SEMIGLOBAL, false, false).unwrap();
    assert_eq!(aligner.set_indel_cost(0), Err(AlignError::IndelCost(0)));
    assert_eq!(aligner.set_indel_cost(2), Ok(()));
}

#[test]
fn rejected_setters_leave_configuration_unchanged() {
    let mut aligner = Aligner::new("ACGT", 0.0, Flags::SEMIGLOBAL, false, false).unwrap();
    aligner.set_min_overlap(2).unwrap();
    assert!(aligner.set_min_overlap(0).is_err());
    // A two-character exact overlap is still accepted
    let location = aligner.locate("TTTTAC").unwrap();
    assert_eq!((location.ref_start, location.ref_stop), (0, 2));
}

#[test]
fn effective_length_discounts_n_wildcards() {
    let aligner = Aligner::new("ANGTN", 0.1, Flags::SEMIGLOBAL, true, false).unwrap();
    assert_eq!(aligner.effective_length(), 3);
    // Without wildcard_ref an N is a plain character
    let plain = Aligner::new("ANGTN", 0.1, Flags::SEMIGLOBAL, false, false).unwrap();
    assert_eq!(plain.effective_length(), 5);
}

#[test]
fn all_wildcard_comparer_reference_is_rejected() {
    assert!(matches!(
        PrefixComparer::new("NNN", 0.1, true, false, 1),
        Err(AlignError::OnlyWildcards)
    ));
    // Without wildcard_ref the same reference is plain characters
    assert!(PrefixComparer::new("NNN", 0.1, false, false, 1).is_ok());
}

#[test]
fn replacing_the_reference_behaves_like_a_fresh_aligner() {
    let mut aligner = Aligner::new("AAAA", 0.1, Flags::SEMIGLOBAL, false, false).unwrap();
    assert_eq!(aligner.locate("CCGG"), None);

    aligner.set_reference("MISSISSIPPI").unwrap();
    assert_eq!(aligner.reference(), "MISSISSIPPI");
    assert_eq!(aligner.effective_length(), 11);
    let replaced = aligner.locate("SISSI").unwrap();

    let mut fresh = Aligner::new("MISSISSIPPI", 0.1, Flags::SEMIGLOBAL, false, false).unwrap();
    assert_eq!(replaced, fresh.locate("SISSI").unwrap());
}

#[test]
fn locate_is_deterministic() {
    let mut aligner = Aligner::new("ACGTACGT", 0.2, Flags::SEMIGLOBAL, false, false).unwrap();
    let first = aligner.locate("TACGTTCG");
    for _ in 0..3 {
        assert_eq!(aligner.locate("TACGTTCG"), first);
    }
}

#[test]
fn debug_matrix_records_computed_costs() {
    let mut aligner = Aligner::new("AC", 0.0, Flags::SEMIGLOBAL, false, false).unwrap();
    assert!(aligner.dpmatrix().is_none());
    aligner.enable_debug();
    aligner.locate("AC").unwrap();

    let matrix = aligner.dpmatrix().unwrap();
    // Seed column
    assert_eq!(matrix.get(0, 0), Some(0));
    assert_eq!(matrix.get(1, 0), Some(0));
    assert_eq!(matrix.get(2, 0), Some(0));
    // The diagonal stays free, off-diagonal cells cost one mismatch
    assert_eq!(matrix.get(1, 1), Some(0));
    assert_eq!(matrix.get(2, 1), Some(1));
    assert_eq!(matrix.get(1, 2), Some(1));
    assert_eq!(matrix.get(2, 2), Some(0));

    let rendered = format!("{matrix}");
    assert_eq!(
        rendered,
        "      A  C\n   0  0  0\nA  0  0  1\nC  0  1  0"
    );
}

#[test]
fn max_error_rate_validation_applies_to_comparers() {
    assert!(matches!(
        PrefixComparer::new("ACGT", 1.5, false, false, 1),
        Err(AlignError::MaxErrorRate(_))
    ));
    assert!(matches!(
        PrefixComparer::new("ACGT", 0.2, false, false, 0),
        Err(AlignError::MinOverlap(0))
    ));
}

#[test]
fn one_aligner_per_worker_matches_serial_results() {
    let reads: Vec<String> = (0..64)
        .map(|i| {
            let mut read = "TTTT".repeat(i % 4 + 1);
            read.push_str("AAGACGT");
            read.push_str(&"GG".repeat(i % 3));
            read
        })
        .collect();

    let mut serial_aligner =
        Aligner::new("AAGACGT", 0.1, Flags::SEMIGLOBAL, false, false).unwrap();
    let serial: Vec<_> = reads.iter().map(|r| serial_aligner.locate(r)).collect();

    let parallel: Vec<_> = reads
        .par_iter()
        .map_init(
            || Aligner::new("AAGACGT", 0.1, Flags::SEMIGLOBAL, false, false).unwrap(),
            |aligner, read| aligner.locate(read),
        )
        .collect();

    assert_eq!(serial, parallel);
}
