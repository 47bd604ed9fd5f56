//! End-to-end description tests through the public API.

use ferro_describe::extractor::{Change, Describer, DescriberConfig, Molecule};
use ferro_describe::{describe, render, standardized_length, DescribeError, ErrorCode};
use rstest::rstest;

#[rstest]
#[case::identity("ACGTACGT", "ACGTACGT", "=", 1)]
#[case::both_empty("", "", "=", 1)]
#[case::substitution("ATGC", "ATAC", "3G>A", 4)]
#[case::substitution_mid("ATGCATGC", "ATGAATGC", "4C>A", 4)]
#[case::substitution_repeat("ATAGATGATAGATAGATAGAT", "ATAGATGATTGATAGATAGAT", "10A>T", 4)]
#[case::deletion("ATGCAT", "ATCAT", "3del", 4)]
#[case::insertion("ATGC", "ATGAC", "3_4insA", 7)]
#[case::duplication("ATGC", "ATGGC", "3dup", 4)]
#[case::inversion("AAAAATTACGGAAAAA", "AAAAACCGTAAAAAAA", "6_11inv", 6)]
#[case::two_substitutions("ATGCATGCAT", "CTGCATGCAG", "[1A>C;10T>G]", 8)]
#[case::insertion_before_first_base("TGC", "ATGC", "1delinsAT", 9)]
fn test_describe_dna(
    #[case] reference: &str,
    #[case] observed: &str,
    #[case] expected: &str,
    #[case] length: usize,
) {
    let allele = describe(reference, observed, true).unwrap();
    assert_eq!(render(&allele), expected);
    assert_eq!(standardized_length(&allele), length);
}

#[rstest]
#[case("?", "ACGT")]
#[case("ACGT", "?")]
fn test_describe_dna_unknown(#[case] reference: &str, #[case] observed: &str) {
    let allele = describe(reference, observed, true).unwrap();
    assert_eq!(allele.len(), 1);
    assert_eq!(allele.variants()[0].change(), &Change::Unknown);
    assert_eq!(allele.render(), "=");
}

#[test]
fn test_describe_protein_unknown() {
    assert_eq!(describe("?", "MKV", false).unwrap().render(), "?");
}

#[test]
fn test_describe_protein_identity() {
    let allele = describe("MKPLVW", "MKPLVW", false).unwrap();
    assert!(allele.is_identity());
    assert_eq!(allele.standardized_length(), 1);
}

#[test]
fn test_describe_protein_frameshift_terminal() {
    let allele = describe("MW", "C", false).unwrap();
    assert_eq!(allele.render(), "Met1_Trp2delinsCysfs*1");
    assert_eq!(allele.standardized_length(), 26);
}

#[test]
fn test_describe_protein_insertion_before_first_residue() {
    let allele = describe("KV", "MKV", false).unwrap();
    let rendered = allele.render();
    assert!(rendered.starts_with("Lys1delinsMetLys"), "{}", rendered);
    assert!(!rendered.starts_with('0'));
}

#[rstest]
#[case::reference("A\u{e9}A", "ACA", true)]
#[case::observed("ACA", "A\u{fc}A", true)]
#[case::protein("MKV", "MK\u{2014}", false)]
fn test_describe_rejects_non_ascii(
    #[case] reference: &str,
    #[case] observed: &str,
    #[case] is_dna: bool,
) {
    let err = describe(reference, observed, is_dna).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

#[test]
fn test_allele_length_is_sum_of_variants() {
    let allele = describe("ATGCATGCAT", "CTGCATGCAG", true).unwrap();
    let sum: usize = allele
        .variants()
        .iter()
        .map(|v| v.standardized_length())
        .sum();
    assert_eq!(allele.standardized_length(), sum);
}

#[rstest]
#[case(Molecule::Dna)]
#[case(Molecule::Protein)]
fn test_describer_rejects_long_sequences(#[case] molecule: Molecule) {
    let describer = Describer::new(DescriberConfig {
        max_length: 5,
        ..Default::default()
    });
    let err = describer.describe("MKVLAT", "MKVLA", molecule).unwrap_err();
    assert!(matches!(err, DescribeError::SequenceTooLong { max: 5, .. }));
    assert_eq!(err.code(), ErrorCode::SequenceTooLong);
}

#[test]
fn test_describer_unknown_genetic_code() {
    let describer = Describer::new(DescriberConfig {
        genetic_code: 99,
        ..Default::default()
    });
    let err = describer
        .describe("MKV", "MKA", Molecule::Protein)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnknownGeneticCode);
    assert!(err.detailed_message().starts_with("[E2001]"));
}

#[test]
fn test_describer_is_reusable() {
    let describer: Describer = Describer::default();
    let first = describer.describe("ATGC", "ATAC", Molecule::Dna).unwrap();
    let second = describer.describe("ATGC", "ATAC", Molecule::Dna).unwrap();
    assert_eq!(first, second);
}
