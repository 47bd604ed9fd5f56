//! Frame-shift tables for protein-level descriptions.
//!
//! For every ordered pair of amino acids, a frame-shift table lists the amino
//! acids that can be read from the underlying codon pair when the reading
//! frame slips by one (`+1`) or two (`+2`) nucleotides. Tables are derived from
//! a [`CodonTable`] and cached per genetic code for the life of the process.
//!
//! # Example
//!
//! ```
//! use ferro_describe::frameshift::{frame_shift_tables, Frame};
//!
//! let tables = frame_shift_tables(1).unwrap();
//! // ATG|GCN read from its second base gives TGG = Trp
//! assert!(tables.get(Frame::PlusOne).allows(*b"MA", b'W'));
//! ```

mod enumerate;

pub use enumerate::{enumerate, find, fits, overlaps, FrameShiftIter, FrameShiftMatch};

use crate::codon::{Base, Codon, CodonTable};
use crate::error::DescribeError;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Alternative reading frame relative to the annotated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Reading starts one nucleotide downstream.
    PlusOne,
    /// Reading starts two nucleotides downstream.
    PlusTwo,
}

impl Frame {
    /// Both alternative frames.
    pub const ALL: [Frame; 2] = [Frame::PlusOne, Frame::PlusTwo];

    /// Nucleotide offset of this frame.
    pub fn offset(self) -> usize {
        match self {
            Frame::PlusOne => 1,
            Frame::PlusTwo => 2,
        }
    }
}

/// Amino-acid pair to reachable amino acids, for one alternative frame.
#[derive(Debug, Clone)]
pub struct FrameShiftTable {
    frame: Frame,
    options: HashMap<[u8; 2], BTreeSet<u8>>,
}

impl FrameShiftTable {
    /// The frame this table describes.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Amino acids reachable from an adjacent pair, `None` for pairs that do
    /// not occur in the genetic code (e.g. containing `X`).
    pub fn options(&self, pair: [u8; 2]) -> Option<&BTreeSet<u8>> {
        self.options.get(&pair)
    }

    /// Check whether `aa` can be read from `pair` in this frame.
    pub fn allows(&self, pair: [u8; 2], aa: u8) -> bool {
        self.options
            .get(&pair)
            .is_some_and(|set| set.contains(&aa))
    }

    /// Number of amino-acid pairs in the table.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// The `+1` and `+2` tables of one genetic code.
#[derive(Debug, Clone)]
pub struct FrameShiftTables {
    genetic_code: u8,
    plus_one: FrameShiftTable,
    plus_two: FrameShiftTable,
}

impl FrameShiftTables {
    /// Derive both tables from a codon table.
    ///
    /// Every codon pair encoding `(AA_i, AA_j)` is concatenated and re-read at
    /// nucleotides `[1, 4)` for `+1` and `[2, 5)` for `+2`.
    pub fn build(table: &CodonTable) -> Self {
        let mut plus_one: HashMap<[u8; 2], BTreeSet<u8>> = HashMap::new();
        let mut plus_two: HashMap<[u8; 2], BTreeSet<u8>> = HashMap::new();

        let reverse = table.reverse_table();
        for (&aa_i, codons_i) in reverse {
            for (&aa_j, codons_j) in reverse {
                let key = [aa_i, aa_j];
                for codon_i in codons_i {
                    for codon_j in codons_j {
                        let mut bases = [Base::A; 6];
                        bases[..3].copy_from_slice(codon_i.bases());
                        bases[3..].copy_from_slice(codon_j.bases());

                        for (frame, options) in [
                            (Frame::PlusOne, &mut plus_one),
                            (Frame::PlusTwo, &mut plus_two),
                        ] {
                            let offset = frame.offset();
                            if let Some(shifted) = Codon::from_bases(&bases[offset..offset + 3]) {
                                options
                                    .entry(key)
                                    .or_default()
                                    .insert(table.translate(&shifted));
                            }
                        }
                    }
                }
            }
        }

        Self {
            genetic_code: table.id(),
            plus_one: FrameShiftTable {
                frame: Frame::PlusOne,
                options: plus_one,
            },
            plus_two: FrameShiftTable {
                frame: Frame::PlusTwo,
                options: plus_two,
            },
        }
    }

    /// Build the tables for an NCBI genetic code, bypassing the cache.
    pub fn for_genetic_code(id: u8) -> Result<Self, DescribeError> {
        Ok(Self::build(&CodonTable::from_id(id)?))
    }

    /// Genetic code the tables were derived from.
    pub fn genetic_code(&self) -> u8 {
        self.genetic_code
    }

    /// Table for one alternative frame.
    pub fn get(&self, frame: Frame) -> &FrameShiftTable {
        match frame {
            Frame::PlusOne => &self.plus_one,
            Frame::PlusTwo => &self.plus_two,
        }
    }

    /// The `+1` table.
    pub fn plus_one(&self) -> &FrameShiftTable {
        &self.plus_one
    }

    /// The `+2` table.
    pub fn plus_two(&self) -> &FrameShiftTable {
        &self.plus_two
    }
}

type TableCache = RwLock<HashMap<u8, Arc<FrameShiftTables>>>;

fn cache() -> &'static TableCache {
    static CACHE: OnceLock<TableCache> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Frame-shift tables for a genetic code, built on first use and shared
/// process-wide afterwards.
///
/// # Errors
///
/// Returns [`DescribeError::UnknownGeneticCode`] when `id` has no codon table.
pub fn frame_shift_tables(id: u8) -> Result<Arc<FrameShiftTables>, DescribeError> {
    if let Some(tables) = cache()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&id)
    {
        return Ok(Arc::clone(tables));
    }

    let built = Arc::new(FrameShiftTables::for_genetic_code(id)?);
    log::debug!(
        "Built frame-shift tables for genetic code {} ({} pairs)",
        id,
        built.plus_one().len()
    );

    let mut entries = cache().write().unwrap_or_else(PoisonError::into_inner);
    Ok(Arc::clone(entries.entry(id).or_insert(built)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_present() {
        let tables = FrameShiftTables::for_genetic_code(1).unwrap();
        // 21 symbols (20 amino acids + stop) squared
        assert_eq!(tables.plus_one().len(), 441);
        assert_eq!(tables.plus_two().len(), 441);
        assert_eq!(tables.genetic_code(), 1);
    }

    #[test]
    fn test_plus_one_options() {
        let tables = FrameShiftTables::for_genetic_code(1).unwrap();
        // ATG + TGG: +1 reads TGT = Cys, nothing else
        let options = tables.plus_one().options(*b"MW").unwrap();
        assert_eq!(options.iter().copied().collect::<Vec<_>>(), vec![b'C']);
        // TGG + ATG: +1 reads GGA = Gly
        assert!(tables.plus_one().allows(*b"WM", b'G'));
        assert!(!tables.plus_one().allows(*b"WM", b'M'));
    }

    #[test]
    fn test_plus_two_options() {
        let tables = FrameShiftTables::for_genetic_code(1).unwrap();
        // ATG + TGG: +2 reads GTG = Val
        let options = tables.plus_two().options(*b"MW").unwrap();
        assert_eq!(options.iter().copied().collect::<Vec<_>>(), vec![b'V']);
    }

    #[test]
    fn test_stop_participates() {
        let tables = FrameShiftTables::for_genetic_code(1).unwrap();
        // TAA|TAG|TGA followed by ATG: +1 reads AAA, AGA or GAA
        let options = tables.plus_one().options(*b"*M").unwrap();
        assert_eq!(
            options.iter().copied().collect::<Vec<_>>(),
            vec![b'E', b'K', b'R']
        );
    }

    #[test]
    fn test_unknown_pair() {
        let tables = FrameShiftTables::for_genetic_code(1).unwrap();
        assert!(tables.plus_one().options(*b"XA").is_none());
        assert!(!tables.plus_one().allows(*b"XA", b'A'));
    }

    #[test]
    fn test_get_by_frame() {
        let tables = FrameShiftTables::for_genetic_code(1).unwrap();
        for frame in Frame::ALL {
            assert_eq!(tables.get(frame).frame(), frame);
        }
        assert_eq!(Frame::PlusTwo.offset(), 2);
    }

    #[test]
    fn test_cache_returns_shared_tables() {
        let first = frame_shift_tables(11).unwrap();
        let second = frame_shift_tables(11).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.genetic_code(), 11);
    }

    #[test]
    fn test_cache_rejects_unknown_code() {
        assert_eq!(
            frame_shift_tables(7).unwrap_err(),
            DescribeError::UnknownGeneticCode { id: 7 }
        );
    }
}
