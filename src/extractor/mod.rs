//! Allele description from a reference and a sample sequence.
//!
//! The [`Describer`] compares the two sequences with a [`SequenceDiffer`],
//! classifies every non-identical edit into a [`RawVar`] and collects them
//! into an [`Allele`]. At the protein level the last variant additionally
//! records where a frame shift terminates.
//!
//! # Example
//!
//! ```
//! use ferro_describe::extractor::{Describer, Molecule};
//!
//! let describer: Describer = Describer::default();
//! let allele = describer
//!     .describe("ATGCATGC", "ATGAATGC", Molecule::Dna)
//!     .unwrap();
//!
//! assert_eq!(allele.len(), 1);
//! assert_eq!(allele.render(), "4C>A");
//! ```

mod align;
mod classify;
mod rawvar;
mod roll;

pub use align::{DiffMode, Edit, EditKind, LcsDiffer, SequenceDiffer, DEFAULT_MAX_CELLS};
pub use classify::classify_edit;
pub use rawvar::{Change, Molecule, RawVar, Span};
pub use roll::{reverse_complement_prefix, roll, Roll};

use crate::config::{DescribeConfig, DEFAULT_GENETIC_CODE, DEFAULT_MAX_LENGTH};
use crate::error::DescribeError;
use crate::frameshift::{self, Frame, FrameShiftMatch, FrameShiftTables};
use crate::sequence::is_unknown;
use serde::Serialize;
use std::fmt;

/// Configuration for the describer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriberConfig {
    /// Maximum length of either sequence (default: 100000).
    pub max_length: usize,
    /// Genetic code used for frame-shift detection (default: 1).
    pub genetic_code: u8,
}

impl Default for DescriberConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            genetic_code: DEFAULT_GENETIC_CODE,
        }
    }
}

impl From<&DescribeConfig> for DescriberConfig {
    fn from(config: &DescribeConfig) -> Self {
        Self {
            max_length: config.max_length,
            genetic_code: config.genetic_code,
        }
    }
}

/// Ordered variants describing the change from one sequence to another.
///
/// Never empty: "no change" is the single identity variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Allele {
    variants: Vec<RawVar>,
}

impl Allele {
    /// Build an allele, falling back to the identity variant when `variants`
    /// is empty.
    pub fn new(variants: Vec<RawVar>, molecule: Molecule) -> Self {
        if variants.is_empty() {
            Self::identity(molecule)
        } else {
            Self { variants }
        }
    }

    /// The allele of two identical sequences.
    pub fn identity(molecule: Molecule) -> Self {
        Self {
            variants: vec![RawVar::identity(molecule)],
        }
    }

    /// The allele of an unknown sequence.
    pub fn unknown(molecule: Molecule) -> Self {
        Self {
            variants: vec![RawVar::unknown(molecule)],
        }
    }

    /// Variants in reference order.
    pub fn variants(&self) -> &[RawVar] {
        &self.variants
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Always `false`; present for API symmetry with [`Allele::len`].
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Whether the allele describes identical sequences.
    pub fn is_identity(&self) -> bool {
        matches!(self.variants.as_slice(), [only] if *only.change() == Change::Identity)
    }

    /// One token for a single variant, `[a;b;...]` for several.
    pub fn render(&self) -> String {
        match self.variants.as_slice() {
            [only] => only.render(),
            many => format!(
                "[{}]",
                many.iter()
                    .map(RawVar::render)
                    .collect::<Vec<_>>()
                    .join(";")
            ),
        }
    }

    /// Sum of the standardized lengths of the variants. Brackets and
    /// separators are not counted.
    pub fn standardized_length(&self) -> usize {
        self.variants.iter().map(RawVar::standardized_length).sum()
    }

    /// Replace the last variant by a copy that ends in a frame shift.
    fn with_terminal(mut self, terminal: i64) -> Self {
        if let Some(last) = self.variants.pop() {
            self.variants.push(last.with_terminal(terminal));
        }
        self
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Best frame-shifted stretch between two peptides.
///
/// `reference_end` and `sample_end` delimit the parts of the peptides in front
/// of the shifted stretch; `terminal` is the distance to the new stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameShiftCandidate {
    /// Length of the reference prefix before the frame shift.
    pub reference_end: usize,
    /// Length of the sample prefix before the frame shift.
    pub sample_end: usize,
    /// Distance to the new stop codon.
    pub terminal: i64,
}

impl FrameShiftCandidate {
    /// Compare the best shift of `sample` within `reference` with the best
    /// shift of `reference` within `sample` and keep the longer one.
    pub fn detect(reference: &str, sample: &str, tables: &FrameShiftTables) -> Self {
        let best = |peptide: &str, alt: &str| -> FrameShiftMatch {
            Frame::ALL
                .iter()
                .map(|&frame| frameshift::find(peptide, alt, tables.get(frame)))
                .max()
                .unwrap_or(FrameShiftMatch { length: -1, start: 0 })
        };
        let forward = best(reference, sample);
        let reverse = best(sample, reference);

        let reference_len = reference.len();
        let sample_len = sample.len();

        if forward > reverse {
            Self {
                reference_end: forward.start.min(reference_len),
                sample_end: trimmed_len(sample_len, forward.length),
                terminal: forward.length,
            }
        } else {
            Self {
                reference_end: trimmed_len(reference_len, reverse.length),
                sample_end: reverse.start.min(sample_len),
                terminal: sample_len as i64 - reverse.start as i64,
            }
        }
    }
}

/// `len - trim`, kept within `0..=len`.
fn trimmed_len(len: usize, trim: i64) -> usize {
    (len as i64 - trim).clamp(0, len as i64) as usize
}

/// Describes the difference between two sequences as an [`Allele`].
#[derive(Debug, Clone)]
pub struct Describer<D: SequenceDiffer = LcsDiffer> {
    differ: D,
    config: DescriberConfig,
}

impl Default for Describer<LcsDiffer> {
    fn default() -> Self {
        Self::new(DescriberConfig::default())
    }
}

impl Describer<LcsDiffer> {
    /// Create a describer using the built-in differ.
    pub fn new(config: DescriberConfig) -> Self {
        Self {
            differ: LcsDiffer::new(),
            config,
        }
    }
}

impl<D: SequenceDiffer> Describer<D> {
    /// Create a describer around another differ.
    pub fn with_differ(differ: D, config: DescriberConfig) -> Self {
        Self { differ, config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &DescriberConfig {
        &self.config
    }

    /// Describe the change from `reference` to `sample`.
    ///
    /// # Errors
    ///
    /// Returns [`DescribeError::SequenceTooLong`] when either sequence exceeds
    /// the configured maximum, and [`DescribeError::UnknownGeneticCode`] when
    /// the configured genetic code has no table (protein only).
    pub fn describe(
        &self,
        reference: &str,
        sample: &str,
        molecule: Molecule,
    ) -> Result<Allele, DescribeError> {
        if is_unknown(reference) || is_unknown(sample) {
            return Ok(Allele::unknown(molecule));
        }

        for (name, seq) in [("reference", reference), ("observed", sample)] {
            if let Some(c) = seq.chars().find(|c| !c.is_ascii()) {
                return Err(DescribeError::invalid_input(format!(
                    "{} sequence contains non-ASCII character '{}'",
                    name, c
                )));
            }
        }

        if reference.len() > self.config.max_length || sample.len() > self.config.max_length {
            return Err(DescribeError::SequenceTooLong {
                reference: reference.len(),
                observed: sample.len(),
                max: self.config.max_length,
            });
        }

        match molecule {
            // Only DNA has a reverse complement, so only DNA can carry an inversion.
            Molecule::Dna => {
                Ok(self.describe_edits(reference, sample, molecule, DiffMode::ReverseComplement))
            }
            Molecule::Protein => {
                let tables = frameshift::frame_shift_tables(self.config.genetic_code)?;
                let candidate = FrameShiftCandidate::detect(reference, sample, &tables);
                log::debug!(
                    "Frame-shift candidate: reference prefix {}/{}, sample prefix {}/{}, terminal {}",
                    candidate.reference_end,
                    reference.len(),
                    candidate.sample_end,
                    sample.len(),
                    candidate.terminal
                );

                // The comparison runs on the whole peptides; the candidate
                // only contributes the terminal distance.
                let allele = self.describe_edits(reference, sample, molecule, DiffMode::Forward);
                if allele.is_identity() {
                    Ok(allele)
                } else {
                    Ok(allele.with_terminal(candidate.terminal + 2))
                }
            }
        }
    }

    fn describe_edits(
        &self,
        reference: &str,
        sample: &str,
        molecule: Molecule,
        mode: DiffMode,
    ) -> Allele {
        let variants: Vec<RawVar> = self
            .differ
            .diff(reference.as_bytes(), sample.as_bytes(), mode)
            .iter()
            .filter(|edit| !edit.is_identity())
            .map(|edit| classify_edit(reference, sample, edit, molecule))
            .collect();

        log::debug!(
            "Classified {} variant(s) between sequences of length {} and {}",
            variants.len(),
            reference.len(),
            sample.len()
        );

        Allele::new(variants, molecule)
    }
}

/// Describe the change from `sequence_a` to `sequence_b` with the default
/// settings.
///
/// ```
/// use ferro_describe::extractor::describe;
///
/// let allele = describe("ATAGATGATAGATAGATAGAT", "ATAGATGATTGATAGATAGAT", true).unwrap();
/// assert_eq!(allele.render(), "10A>T");
/// ```
pub fn describe(sequence_a: &str, sequence_b: &str, is_dna: bool) -> Result<Allele, DescribeError> {
    Describer::new(DescriberConfig::default()).describe(
        sequence_a,
        sequence_b,
        Molecule::from_is_dna(is_dna),
    )
}

/// Render an allele, see [`Allele::render`].
pub fn render(allele: &Allele) -> String {
    allele.render()
}

/// Standardized length of an allele, see [`Allele::standardized_length`].
pub fn standardized_length(allele: &Allele) -> usize {
    allele.standardized_length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_substitution() {
        let allele = describe("ATAGATGATAGATAGATAGAT", "ATAGATGATTGATAGATAGAT", true).unwrap();
        assert_eq!(allele.len(), 1);
        assert_eq!(
            allele.variants()[0].change(),
            &Change::Substitution {
                position: 10,
                deleted: "A".to_string(),
                inserted: "T".to_string(),
            }
        );
        assert_eq!(render(&allele), "10A>T");
        assert_eq!(standardized_length(&allele), 4);
    }

    #[test]
    fn test_identical_sequences() {
        let allele = describe("ACGTACGT", "ACGTACGT", true).unwrap();
        assert!(allele.is_identity());
        assert_eq!(allele.render(), "=");
        assert_eq!(allele.standardized_length(), 1);

        let allele = describe("", "", true).unwrap();
        assert_eq!(allele.render(), "=");
    }

    #[test]
    fn test_unknown_sequence() {
        let allele = describe("?", "ACGT", true).unwrap();
        assert_eq!(allele.variants()[0].change(), &Change::Unknown);
        let allele = describe("MKV", "?", false).unwrap();
        assert_eq!(allele.render(), "?");
    }

    #[test]
    fn test_multiple_variants() {
        let allele = describe("ATGCATGCAT", "CTGCATGCAG", true).unwrap();
        assert_eq!(allele.render(), "[1A>C;10T>G]");
        assert_eq!(allele.standardized_length(), 8);
    }

    #[test]
    fn test_deletion_and_insertion() {
        assert_eq!(describe("ATGCAT", "ATCAT", true).unwrap().render(), "3del");
        assert_eq!(describe("ATGC", "ATGAC", true).unwrap().render(), "3_4insA");
        assert_eq!(describe("ATGC", "ATGGC", true).unwrap().render(), "3dup");
    }

    #[test]
    fn test_inversion() {
        let allele = describe("AAAAATTACGGAAAAA", "AAAAACCGTAAAAAAA", true).unwrap();
        assert_eq!(allele.render(), "6_11inv");
    }

    #[test]
    fn test_sequence_too_long() {
        let describer = Describer::new(DescriberConfig {
            max_length: 4,
            ..Default::default()
        });
        let err = describer.describe("ACGTA", "ACGT", Molecule::Dna).unwrap_err();
        assert_eq!(
            err,
            DescribeError::SequenceTooLong {
                reference: 5,
                observed: 4,
                max: 4
            }
        );
    }

    #[test]
    fn test_non_ascii_sequences_rejected() {
        // Trace logging prints byte-offset flanks of every edit
        log::set_max_level(log::LevelFilter::Trace);

        let err = describe("A\u{e9}A", "A\u{fc}A", true).unwrap_err();
        assert_eq!(
            err,
            DescribeError::invalid_input("reference sequence contains non-ASCII character '\u{e9}'")
        );

        let err = describe("MKV", "MK\u{fc}", false).unwrap_err();
        assert!(err.to_string().contains("observed"));
    }

    #[test]
    fn test_unknown_genetic_code_for_protein() {
        let describer = Describer::new(DescriberConfig {
            genetic_code: 7,
            ..Default::default()
        });
        let err = describer.describe("MKV", "MKA", Molecule::Protein).unwrap_err();
        assert_eq!(err, DescribeError::UnknownGeneticCode { id: 7 });
        // DNA never needs the table
        assert!(describer.describe("ACG", "ACT", Molecule::Dna).is_ok());
    }

    #[test]
    fn test_protein_identity_has_no_terminal() {
        let allele = describe("MKPLVW", "MKPLVW", false).unwrap();
        assert_eq!(allele.render(), "=");
    }

    #[test]
    fn test_protein_last_variant_gets_terminal() {
        let tables = frameshift::frame_shift_tables(1).unwrap();
        let candidate = FrameShiftCandidate::detect("MKPLVW", "MKLVW", &tables);

        let allele = describe("MKPLVW", "MKLVW", false).unwrap();
        assert_eq!(allele.len(), 1);
        let last = &allele.variants()[0];
        assert_eq!(last.terminal(), Some(candidate.terminal + 2));
        assert!(allele.render().starts_with("Pro3del"));
    }

    #[test]
    fn test_frameshift_candidate() {
        let tables = frameshift::frame_shift_tables(1).unwrap();
        let candidate = FrameShiftCandidate::detect("MW", "C", &tables);
        assert_eq!(
            candidate,
            FrameShiftCandidate {
                reference_end: 2,
                sample_end: 1,
                terminal: -1,
            }
        );

        let allele = describe("MW", "C", false).unwrap();
        assert_eq!(allele.render(), "Met1_Trp2delinsCysfs*1");
        assert_eq!(allele.standardized_length(), 18 + 6 + 2);
    }

    #[test]
    fn test_custom_differ() {
        struct WholeSequence;

        impl SequenceDiffer for WholeSequence {
            fn diff(&self, reference: &[u8], sample: &[u8], _mode: DiffMode) -> Vec<Edit> {
                vec![Edit::new(0..reference.len(), 0..sample.len(), EditKind::Substitution)]
            }
        }

        let describer = Describer::with_differ(WholeSequence, DescriberConfig::default());
        let allele = describer.describe("ACGT", "TTTT", Molecule::Dna).unwrap();
        assert_eq!(allele.render(), "1_4delinsTTTT");
    }

    #[test]
    fn test_config_from_file_settings() {
        let file = DescribeConfig {
            max_length: 10,
            genetic_code: 2,
            log_level: None,
        };
        let config = DescriberConfig::from(&file);
        assert_eq!(config.max_length, 10);
        assert_eq!(config.genetic_code, 2);
    }

    #[test]
    fn test_allele_serializes_as_list() {
        let allele = describe("ATGC", "ATAC", true).unwrap();
        let json = serde_json::to_value(&allele).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["change"]["kind"], "substitution");
    }
}
