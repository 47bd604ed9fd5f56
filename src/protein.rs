//! Amino-acid codes for protein-level descriptions.
//!
//! Sequences are handled in one-letter form; descriptions use three-letter
//! codes. Letters outside the IUPAC protein alphabet render as `Xaa`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Amino acid enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AminoAcid {
    Ala, // A
    Arg, // R
    Asn, // N
    Asp, // D
    Asx, // B (Asn or Asp)
    Cys, // C
    Gln, // Q
    Glu, // E
    Glx, // Z (Gln or Glu)
    Gly, // G
    His, // H
    Ile, // I
    Leu, // L
    Lys, // K
    Met, // M
    Phe, // F
    Pro, // P
    Pyl, // O (pyrrolysine)
    Sec, // U (selenocysteine)
    Ser, // S
    Thr, // T
    Trp, // W
    Tyr, // Y
    Val, // V
    Xle, // J (Leu or Ile)
    Ter, // * (stop codon)
    Xaa, // X (unknown)
}

impl AminoAcid {
    /// Get 3-letter code
    pub fn to_three_letter(&self) -> &'static str {
        match self {
            Self::Ala => "Ala",
            Self::Arg => "Arg",
            Self::Asn => "Asn",
            Self::Asp => "Asp",
            Self::Asx => "Asx",
            Self::Cys => "Cys",
            Self::Gln => "Gln",
            Self::Glu => "Glu",
            Self::Glx => "Glx",
            Self::Gly => "Gly",
            Self::His => "His",
            Self::Ile => "Ile",
            Self::Leu => "Leu",
            Self::Lys => "Lys",
            Self::Met => "Met",
            Self::Phe => "Phe",
            Self::Pro => "Pro",
            Self::Pyl => "Pyl",
            Self::Sec => "Sec",
            Self::Ser => "Ser",
            Self::Thr => "Thr",
            Self::Trp => "Trp",
            Self::Tyr => "Tyr",
            Self::Val => "Val",
            Self::Xle => "Xle",
            Self::Ter => "Ter",
            Self::Xaa => "Xaa",
        }
    }

    /// Parse from 1-letter code (uppercase only)
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_describe::protein::AminoAcid;
    ///
    /// assert_eq!(AminoAcid::from_one_letter('V'), Some(AminoAcid::Val));
    /// assert_eq!(AminoAcid::from_one_letter('v'), None);
    /// assert_eq!(AminoAcid::from_one_letter('*'), Some(AminoAcid::Ter));
    /// ```
    pub fn from_one_letter(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::Ala),
            'R' => Some(Self::Arg),
            'N' => Some(Self::Asn),
            'D' => Some(Self::Asp),
            'B' => Some(Self::Asx),
            'C' => Some(Self::Cys),
            'Q' => Some(Self::Gln),
            'E' => Some(Self::Glu),
            'Z' => Some(Self::Glx),
            'G' => Some(Self::Gly),
            'H' => Some(Self::His),
            'I' => Some(Self::Ile),
            'L' => Some(Self::Leu),
            'K' => Some(Self::Lys),
            'M' => Some(Self::Met),
            'F' => Some(Self::Phe),
            'O' => Some(Self::Pyl),
            'P' => Some(Self::Pro),
            'U' => Some(Self::Sec),
            'S' => Some(Self::Ser),
            'T' => Some(Self::Thr),
            'W' => Some(Self::Trp),
            'Y' => Some(Self::Tyr),
            'V' => Some(Self::Val),
            'J' => Some(Self::Xle),
            '*' => Some(Self::Ter),
            'X' => Some(Self::Xaa),
            _ => None,
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_three_letter())
    }
}

/// Three-letter code for a one-letter residue, `Xaa` when unrecognised.
pub fn three_letter(residue: char) -> &'static str {
    AminoAcid::from_one_letter(residue)
        .unwrap_or(AminoAcid::Xaa)
        .to_three_letter()
}

/// Convert a one-letter peptide to concatenated three-letter codes.
///
/// ```
/// use ferro_describe::protein::to_three_letter;
///
/// assert_eq!(to_three_letter("MAV*"), "MetAlaValTer");
/// assert_eq!(to_three_letter(""), "");
/// ```
pub fn to_three_letter(peptide: &str) -> String {
    peptide.chars().map(three_letter).collect()
}
