//! Genetic codes and codon tables.
//!
//! A [`CodonTable`] holds the forward codon to amino-acid mapping of one NCBI
//! genetic code, stop codons included as `*`, together with its inverse.

use crate::error::DescribeError;
use std::collections::{BTreeMap, HashMap};

/// A single nucleotide base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Base {
    T,
    C,
    A,
    G,
}

impl Base {
    /// Bases in the order NCBI uses to lay out its translation tables.
    pub const NCBI_ORDER: [Base; 4] = [Base::T, Base::C, Base::A, Base::G];

    /// Parse a base from a character.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Base::A),
            'T' | 'U' => Some(Base::T), // U is treated as T
            'G' => Some(Base::G),
            'C' => Some(Base::C),
            _ => None,
        }
    }

    /// Convert to character.
    pub fn to_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::T => 'T',
            Base::G => 'G',
            Base::C => 'C',
        }
    }

    fn ncbi_index(self) -> usize {
        match self {
            Base::T => 0,
            Base::C => 1,
            Base::A => 2,
            Base::G => 3,
        }
    }
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A codon (three nucleotides).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codon([Base; 3]);

impl Codon {
    /// Create a new codon from three bases.
    pub fn new(b1: Base, b2: Base, b3: Base) -> Self {
        Self([b1, b2, b3])
    }

    /// Build a codon from a window of exactly three bases.
    pub fn from_bases(bases: &[Base]) -> Option<Self> {
        match bases {
            [b1, b2, b3] => Some(Self([*b1, *b2, *b3])),
            _ => None,
        }
    }

    /// Parse a codon from a string.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let b1 = Base::from_char(chars.next()?)?;
        let b2 = Base::from_char(chars.next()?)?;
        let b3 = Base::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }

        Some(Self([b1, b2, b3]))
    }

    /// Get the three bases.
    pub fn bases(&self) -> &[Base; 3] {
        &self.0
    }

    fn ncbi_index(&self) -> usize {
        self.0[0].ncbi_index() * 16 + self.0[1].ncbi_index() * 4 + self.0[2].ncbi_index()
    }
}

impl std::fmt::Display for Codon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.0[0], self.0[1], self.0[2])
    }
}

/// Amino acids of the NCBI genetic codes, one letter per codon in TCAG order.
///
/// Reference: https://www.ncbi.nlm.nih.gov/Taxonomy/Utils/wprintgc.cgi
fn ncbi_amino_acids(id: u8) -> Option<&'static [u8; 64]> {
    let table = match id {
        1 => b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        2 => b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG",
        3 => b"FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        4 => b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        5 => b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG",
        6 => b"FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        9 => b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        10 => b"FFLLSSSSYY**CCCWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        11 => b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        12 => b"FFLLSSSSYY**CC*WLLLSPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        13 => b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSGGVVVVAAAADDEEGGGG",
        14 => b"FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        15 => b"FFLLSSSSYY*QCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        16 => b"FFLLSSSSYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        21 => b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNNKSSSSVVVVAAAADDEEGGGG",
        22 => b"FFLLSS*SYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        23 => b"FF*LSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        24 => b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG",
        25 => b"FFLLSSSSYY**CCGWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        26 => b"FFLLSSSSYY**CC*WLLLAPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        27 => b"FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        28 => b"FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        29 => b"FFLLSSSSYYYYCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        30 => b"FFLLSSSSYYEECC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        31 => b"FFLLSSSSYYEECCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        32 => b"FFLLSSSSYY*WCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
        33 => b"FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG",
        _ => return None,
    };
    Some(table)
}

/// Codon table of one NCBI genetic code.
#[derive(Debug, Clone)]
pub struct CodonTable {
    /// NCBI table identifier.
    id: u8,
    /// Codon to amino acid mapping, stop codons map to `*`.
    forward: HashMap<Codon, u8>,
    /// Amino acid to codons mapping.
    reverse: BTreeMap<u8, Vec<Codon>>,
}

impl CodonTable {
    /// Build the table for an NCBI genetic code identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DescribeError::UnknownGeneticCode`] for identifiers without a
    /// translation table (7, 8, 17-20 and anything above 33).
    pub fn from_id(id: u8) -> Result<Self, DescribeError> {
        let amino_acids = ncbi_amino_acids(id).ok_or(DescribeError::UnknownGeneticCode { id })?;

        let mut forward = HashMap::with_capacity(64);
        let mut reverse: BTreeMap<u8, Vec<Codon>> = BTreeMap::new();

        for b1 in Base::NCBI_ORDER {
            for b2 in Base::NCBI_ORDER {
                for b3 in Base::NCBI_ORDER {
                    let codon = Codon::new(b1, b2, b3);
                    let aa = amino_acids[codon.ncbi_index()];
                    forward.insert(codon, aa);
                    reverse.entry(aa).or_default().push(codon);
                }
            }
        }

        Ok(Self {
            id,
            forward,
            reverse,
        })
    }

    /// The standard genetic code (table 1).
    pub fn standard() -> Self {
        match Self::from_id(1) {
            Ok(table) => table,
            Err(_) => unreachable!("table 1 is always defined"),
        }
    }

    /// NCBI identifier of this table.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the amino acid (or `*`) encoded by a codon.
    pub fn translate(&self, codon: &Codon) -> u8 {
        self.forward[codon]
    }

    /// Get all codons that encode a given amino acid (or `*`).
    pub fn codons_for(&self, aa: u8) -> &[Codon] {
        self.reverse.get(&aa).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Forward mapping, 64 entries.
    pub fn forward_table(&self) -> &HashMap<Codon, u8> {
        &self.forward
    }

    /// Inverse mapping, ordered by amino-acid letter.
    pub fn reverse_table(&self) -> &BTreeMap<u8, Vec<Codon>> {
        &self.reverse
    }

    /// Check if a codon is a stop codon.
    pub fn is_stop(&self, codon: &Codon) -> bool {
        self.translate(codon) == b'*'
    }

    /// Get all stop codons.
    pub fn stop_codons(&self) -> &[Codon] {
        self.codons_for(b'*')
    }
}
