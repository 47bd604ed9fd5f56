//! Edit classification.
//!
//! Turns one low-level [`Edit`] into a [`RawVar`], shifting indels to their
//! 3'-most position and recognising duplications and inversions.

use super::align::{Edit, EditKind};
use super::rawvar::{Change, Molecule, RawVar, Span};
use super::roll::{reverse_complement_prefix, roll};
use crate::coords::{exclusive_end_to_hgvs_pos, index_to_hgvs_pos};
use crate::sequence::{is_unknown, print_flanks};
use std::ops::Range;

/// Classify a single edit between `reference` and `sample`.
///
/// Rules are tried in order; the first that applies decides the change:
///
/// 1. either sequence is unknown: unknown variant
/// 2. empty reference interval: insertion, or duplication when the shifted
///    insertion repeats the bases just before it
/// 3. empty sample interval: deletion
/// 4. one residue replaced by one residue: substitution
/// 5. one residue replaced by several: deletion-insertion at one position
/// 6. reverse-complement edit: inversion, trimmed of palindromic ends
/// 7. anything else: deletion-insertion over the reference range
///
/// # Panics
///
/// Panics when the edit intervals are outside the sequences.
///
/// ```
/// use ferro_describe::extractor::{classify_edit, Edit, EditKind, Molecule};
///
/// // Inserting a second A after the A at position 2 duplicates it
/// let edit = Edit::new(2..2, 2..3, EditKind::Substitution);
/// let var = classify_edit("CAT", "CAAT", &edit, Molecule::Dna);
/// assert_eq!(var.render(), "2dup");
/// ```
pub fn classify_edit(reference: &str, sample: &str, edit: &Edit, molecule: Molecule) -> RawVar {
    if is_unknown(reference) || is_unknown(sample) {
        return RawVar::unknown(molecule);
    }

    let s1 = reference.as_bytes();
    let s2 = sample.as_bytes();
    assert!(
        edit.reference.start <= edit.reference.end && edit.reference.end <= s1.len(),
        "reference interval {:?} outside sequence of length {}",
        edit.reference,
        s1.len()
    );
    assert!(
        edit.sample.start <= edit.sample.end && edit.sample.end <= s2.len(),
        "sample interval {:?} outside sequence of length {}",
        edit.sample,
        s2.len()
    );

    log::trace!(
        "Classifying {:?} edit: {} / {}",
        edit.kind,
        print_flanks(reference, edit.reference.start, edit.reference.end, 0),
        print_flanks(sample, edit.sample.start, edit.sample.end, 0)
    );

    let var = if edit.reference.is_empty() {
        if edit.sample.is_empty() {
            return RawVar::identity(molecule);
        }
        insertion(s1, s2, edit.reference.start, edit.sample.clone(), molecule)
    } else if edit.sample.is_empty() {
        deletion(s1, edit.reference.clone(), molecule)
    } else if edit.reference.len() == 1 && edit.sample.len() == 1 {
        RawVar::new(
            molecule,
            Change::Substitution {
                position: index_to_hgvs_pos(edit.reference.start),
                deleted: text(&s1[edit.reference.clone()]),
                inserted: text(&s2[edit.sample.clone()]),
            },
        )
    } else if edit.reference.len() == 1 {
        RawVar::new(
            molecule,
            Change::Delins {
                span: Span::point(index_to_hgvs_pos(edit.reference.start)),
                inserted: text(&s2[edit.sample.clone()]),
            },
        )
    } else if edit.kind == EditKind::ReverseComplement {
        inversion(s1, edit.reference.clone(), molecule)
    } else {
        RawVar::new(
            molecule,
            Change::Delins {
                span: Span::range(
                    index_to_hgvs_pos(edit.reference.start),
                    exclusive_end_to_hgvs_pos(edit.reference.end),
                ),
                inserted: text(&s2[edit.sample.clone()]),
            },
        )
    };

    with_protein_flanks(var, s1)
}

/// Insertion at reference index `at` of `sample[inserted]`.
fn insertion(
    s1: &[u8],
    s2: &[u8],
    at: usize,
    inserted: Range<usize>,
    molecule: Molecule,
) -> RawVar {
    let length = inserted.len();
    let freedom = roll(s2, inserted.start + 1, inserted.end);
    let at = at + freedom.three_prime;
    let inserted = inserted.start + freedom.three_prime..inserted.end + freedom.three_prime;

    let preceding = at.checked_sub(length).and_then(|from| s1.get(from..at));
    let is_duplication = inserted.start >= length && preceding == s2.get(inserted.clone());

    if at == 0 && !is_duplication {
        // Position 0 is reserved for the no-change sentinel: anchor the
        // insertion on the first residue instead.
        let Some(&first) = s1.first() else {
            return RawVar::unknown(molecule);
        };
        let mut replacement = s2[inserted].to_vec();
        replacement.push(first);
        return RawVar::new(
            molecule,
            Change::Delins {
                span: Span::point(1),
                inserted: text(&replacement),
            },
        )
        .with_shift(freedom.total());
    }

    let at = at as u64;
    let change = if is_duplication {
        let span = if length == 1 {
            Span::point(at)
        } else {
            Span::range(at - length as u64 + 1, at)
        };
        Change::Duplication { span }
    } else {
        Change::Insertion {
            span: Span::range(at, at + 1),
            inserted: text(&s2[inserted]),
        }
    };

    RawVar::new(molecule, change).with_shift(freedom.total())
}

/// Deletion of `s1[deleted]`.
fn deletion(s1: &[u8], deleted: Range<usize>, molecule: Molecule) -> RawVar {
    let freedom = roll(s1, deleted.start + 1, deleted.end);
    let start = index_to_hgvs_pos(deleted.start + freedom.three_prime);
    let end = exclusive_end_to_hgvs_pos(deleted.end + freedom.three_prime);

    RawVar::new(
        molecule,
        Change::Deletion {
            span: Span::between(start, end),
        },
    )
    .with_shift(freedom.total())
}

/// Inversion of `s1[inverted]`, without its palindromic ends.
fn inversion(s1: &[u8], inverted: Range<usize>, molecule: Molecule) -> RawVar {
    let trim = reverse_complement_prefix(&s1[inverted.clone()]).unwrap_or(0);
    let start = index_to_hgvs_pos(inverted.start + trim);
    let end = exclusive_end_to_hgvs_pos(inverted.end - trim);

    RawVar::new(
        molecule,
        Change::Inversion {
            span: Span::between(start, end),
        },
    )
}

/// Attach the reference residues at the span ends of a protein variant.
fn with_protein_flanks(var: RawVar, s1: &[u8]) -> RawVar {
    if var.molecule().is_dna() {
        return var;
    }
    let Some(span) = var.change().span() else {
        return var;
    };

    let start_aa = residue_at(s1, span.start);
    let end_aa = span.end.and_then(|end| residue_at(s1, end));
    var.with_flanks(start_aa, end_aa)
}

/// Residue at a 1-based position.
fn residue_at(seq: &[u8], position: u64) -> Option<char> {
    let index = usize::try_from(position.checked_sub(1)?).ok()?;
    seq.get(index).map(|&b| b as char)
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
