//! Property-based tests for sequence descriptions and frame-shift search
//!
//! Random DNA and peptides are generated with proptest and checked against
//! properties every description must satisfy.

use ferro_describe::extractor::{Change, Describer, DescriberConfig, Molecule};
use ferro_describe::frameshift::{enumerate, find, frame_shift_tables, Frame};
use ferro_describe::{describe, Allele};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

// =============================================================================
// Strategies
// =============================================================================

fn dna(min: usize, max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['A', 'C', 'G', 'T']), min..=max)
        .prop_map(|bases| bases.into_iter().collect())
}

/// Standard amino acids only; every pair has options in both frames.
fn peptide(min: usize, max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select("ACDEFGHIKLMNPQRSTVWY".chars().collect::<Vec<_>>()),
        min..=max,
    )
    .prop_map(|residues| residues.into_iter().collect())
}

/// A sequence and an index inside it.
fn dna_with_index() -> impl Strategy<Value = (String, usize)> {
    dna(2, 40).prop_flat_map(|seq| {
        let len = seq.len();
        (Just(seq), 0..len)
    })
}

fn other_base(base: u8, pick: u8) -> u8 {
    let others: Vec<u8> = b"ACGT".iter().copied().filter(|&b| b != base).collect();
    others[pick as usize % others.len()]
}

fn variant_sum(allele: &Allele) -> usize {
    allele
        .variants()
        .iter()
        .map(|v| v.standardized_length())
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    // -------------------------------------------------------------------------
    // DNA descriptions
    // -------------------------------------------------------------------------

    /// A sequence compared with itself is the identity allele
    #[test]
    fn test_identity(seq in dna(0, 60)) {
        let allele = describe(&seq, &seq, true).unwrap();
        prop_assert!(allele.is_identity());
        prop_assert_eq!(allele.render(), "=");
        prop_assert_eq!(allele.standardized_length(), 1);
    }

    /// One changed base is one substitution at its 1-based position, mirrored
    /// when the sequences swap
    #[test]
    fn test_single_substitution((seq, index) in dna_with_index(), pick in 0u8..3) {
        let mut observed = seq.clone().into_bytes();
        observed[index] = other_base(observed[index], pick);
        let observed = String::from_utf8(observed).unwrap();

        let forward = describe(&seq, &observed, true).unwrap();
        let backward = describe(&observed, &seq, true).unwrap();
        prop_assert_eq!(forward.len(), 1);
        prop_assert_eq!(backward.len(), 1);

        match (forward.variants()[0].change(), backward.variants()[0].change()) {
            (
                Change::Substitution { position, deleted, inserted },
                Change::Substitution { position: back_position, deleted: back_deleted, inserted: back_inserted },
            ) => {
                prop_assert_eq!(*position, index as u64 + 1);
                prop_assert_eq!(position, back_position);
                prop_assert_eq!(deleted, back_inserted);
                prop_assert_eq!(inserted, back_deleted);
            }
            other => prop_assert!(false, "expected substitutions, got {:?}", other),
        }
    }

    /// Repeating a base is a duplication, never an insertion
    #[test]
    fn test_repeated_base_is_duplication((seq, index) in dna_with_index()) {
        let mut observed = seq.clone().into_bytes();
        observed.insert(index, observed[index]);
        let observed = String::from_utf8(observed).unwrap();

        let allele = describe(&seq, &observed, true).unwrap();
        prop_assert_eq!(allele.len(), 1);
        let rendered = allele.render();
        prop_assert!(rendered.ends_with("dup"), "{} -> {}: {}", seq, observed, rendered);
        prop_assert!(!rendered.contains("ins"));
    }

    /// Removing one base is a single deletion
    #[test]
    fn test_single_deletion((seq, index) in dna_with_index()) {
        let mut observed = seq.clone().into_bytes();
        observed.remove(index);
        let observed = String::from_utf8(observed).unwrap();

        let allele = describe(&seq, &observed, true).unwrap();
        prop_assert_eq!(allele.len(), 1);
        let is_deletion = matches!(allele.variants()[0].change(), Change::Deletion { .. });
        prop_assert!(is_deletion);
    }

    /// The allele length is the sum of its variants, whatever the inputs
    #[test]
    fn test_length_additivity(reference in dna(0, 30), observed in dna(0, 30)) {
        let allele = describe(&reference, &observed, true).unwrap();
        prop_assert!(allele.standardized_length() >= 1);
        if !allele.is_identity() {
            prop_assert_eq!(allele.standardized_length(), variant_sum(&allele));
        }
    }

    // -------------------------------------------------------------------------
    // Protein descriptions
    // -------------------------------------------------------------------------

    /// Protein descriptions of differing peptides always carry a terminal
    #[test]
    fn test_protein_terminal(reference in peptide(2, 12), observed in peptide(1, 12)) {
        prop_assume!(reference != observed);
        let describer: Describer = Describer::new(DescriberConfig::default());
        let allele = describer.describe(&reference, &observed, Molecule::Protein).unwrap();
        let last = allele.variants().last().unwrap();
        prop_assert!(last.terminal().is_some());
    }

    // -------------------------------------------------------------------------
    // Frame shifts
    // -------------------------------------------------------------------------

    /// Every enumerated candidate is found whole, anchored on the last 2-mer
    #[test]
    fn test_enumerated_candidate_is_found(seq in peptide(2, 8), plus_two in any::<bool>()) {
        let frame = if plus_two { Frame::PlusTwo } else { Frame::PlusOne };
        let tables = frame_shift_tables(1).unwrap();
        let table = tables.get(frame);

        let candidate = enumerate(&seq, table).next().unwrap();
        prop_assert_eq!(candidate.len(), seq.len() - 1);

        let found = find(&seq, &candidate, table);
        prop_assert_eq!(found.length, candidate.len() as i64 - 2);
        prop_assert_eq!(found.start, 2);
    }
}
