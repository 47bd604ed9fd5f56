//! Elementary variants and their HGVS-style tokens.
//!
//! A [`RawVar`] holds one classified edit. Each [`Change`] case carries only
//! the fields its token needs, so rendering and the standardized length are
//! plain functions of the value.
//!
//! # Coordinate System
//!
//! | Field | Basis | Notes |
//! |-------|-------|-------|
//! | `Span.start`, `Span.end` | 1-based, inclusive | `end` is `None` for a single position |
//! | `Change::Substitution.position` | 1-based | |

use crate::protein::{three_letter, to_three_letter};
use serde::Serialize;
use std::fmt;

/// Whether a variant is described at the nucleotide or the protein level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Molecule {
    /// Nucleotide sequence.
    Dna,
    /// Amino-acid sequence.
    Protein,
}

impl Molecule {
    /// Molecule for the `is_dna` flag used by the free functions.
    pub fn from_is_dna(is_dna: bool) -> Self {
        if is_dna {
            Molecule::Dna
        } else {
            Molecule::Protein
        }
    }

    /// Whether this is the nucleotide level.
    pub fn is_dna(self) -> bool {
        self == Molecule::Dna
    }
}

/// Position or range of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// First position (1-based).
    pub start: u64,
    /// Last position (1-based, inclusive), `None` for a single position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
}

impl Span {
    /// A single position.
    pub fn point(start: u64) -> Self {
        Self { start, end: None }
    }

    /// A range of positions.
    pub fn range(start: u64, end: u64) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// A range that collapses to a point when both ends coincide.
    pub fn between(start: u64, end: u64) -> Self {
        if start == end {
            Self::point(start)
        } else {
            Self::range(start, end)
        }
    }
}

/// The change described by a [`RawVar`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    /// No change between the sequences.
    Identity,
    /// One of the sequences is not known.
    Unknown,
    /// One residue replaced by another.
    Substitution {
        position: u64,
        deleted: String,
        inserted: String,
    },
    /// Deletion.
    Deletion { span: Span },
    /// Insertion between the two flanking positions of `span`.
    Insertion { span: Span, inserted: String },
    /// Duplication.
    Duplication { span: Span },
    /// Inversion.
    Inversion { span: Span },
    /// Deletion followed by an insertion.
    Delins { span: Span, inserted: String },
    /// Extension of the protein past its stop codon.
    Extension { span: Span, inserted: String },
    /// Frame shift.
    Frameshift { span: Span, inserted: String },
    /// Premature stop.
    Stop { span: Span },
}

impl Change {
    /// Keyword of the change as it appears in a token.
    pub fn keyword(&self) -> &'static str {
        match self {
            Change::Identity => "none",
            Change::Unknown => "unknown",
            Change::Substitution { .. } => "subst",
            Change::Deletion { .. } => "del",
            Change::Insertion { .. } => "ins",
            Change::Duplication { .. } => "dup",
            Change::Inversion { .. } => "inv",
            Change::Delins { .. } => "delins",
            Change::Extension { .. } => "ext",
            Change::Frameshift { .. } => "fs",
            Change::Stop { .. } => "stop",
        }
    }

    /// Positions covered, `None` for identity and unknown.
    pub fn span(&self) -> Option<Span> {
        match self {
            Change::Identity | Change::Unknown => None,
            Change::Substitution { position, .. } => Some(Span::point(*position)),
            Change::Deletion { span }
            | Change::Insertion { span, .. }
            | Change::Duplication { span }
            | Change::Inversion { span }
            | Change::Delins { span, .. }
            | Change::Extension { span, .. }
            | Change::Frameshift { span, .. }
            | Change::Stop { span } => Some(*span),
        }
    }

    /// Inserted residues, empty when the change inserts nothing.
    pub fn inserted(&self) -> &str {
        match self {
            Change::Substitution { inserted, .. }
            | Change::Insertion { inserted, .. }
            | Change::Delins { inserted, .. }
            | Change::Extension { inserted, .. }
            | Change::Frameshift { inserted, .. } => inserted,
            _ => "",
        }
    }

    /// Whether the protein token leaves the keyword out.
    fn implicit_in_protein(&self) -> bool {
        matches!(
            self,
            Change::Substitution { .. }
                | Change::Stop { .. }
                | Change::Extension { .. }
                | Change::Frameshift { .. }
        )
    }
}

/// One elementary variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawVar {
    molecule: Molecule,
    change: Change,
    start_offset: i64,
    end_offset: i64,
    shift: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_aa: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_aa: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    terminal: Option<i64>,
}

impl RawVar {
    /// Create a variant with no offsets, shift or flanking residues.
    pub fn new(molecule: Molecule, change: Change) -> Self {
        Self {
            molecule,
            change,
            start_offset: 0,
            end_offset: 0,
            shift: 0,
            start_aa: None,
            end_aa: None,
            terminal: None,
        }
    }

    /// The "no change" variant.
    pub fn identity(molecule: Molecule) -> Self {
        Self::new(molecule, Change::Identity)
    }

    /// The variant for an unknown sequence.
    pub fn unknown(molecule: Molecule) -> Self {
        Self::new(molecule, Change::Unknown)
    }

    /// Record the positional freedom consumed by normalization.
    pub fn with_shift(mut self, shift: usize) -> Self {
        self.shift = shift;
        self
    }

    /// Record intronic offsets of the start and end positions.
    pub fn with_offsets(mut self, start_offset: i64, end_offset: i64) -> Self {
        self.start_offset = start_offset;
        self.end_offset = end_offset;
        self
    }

    /// Record the residues at the start and end positions (protein only).
    pub fn with_flanks(mut self, start_aa: Option<char>, end_aa: Option<char>) -> Self {
        self.start_aa = start_aa;
        self.end_aa = end_aa;
        self
    }

    /// A copy of this variant ending in a frame shift that terminates
    /// `terminal` residues downstream.
    pub fn with_terminal(&self, terminal: i64) -> Self {
        Self {
            terminal: Some(terminal),
            ..self.clone()
        }
    }

    /// Molecule level.
    pub fn molecule(&self) -> Molecule {
        self.molecule
    }

    /// The change.
    pub fn change(&self) -> &Change {
        &self.change
    }

    /// Intronic offset of the start position.
    pub fn start_offset(&self) -> i64 {
        self.start_offset
    }

    /// Intronic offset of the end position.
    pub fn end_offset(&self) -> i64 {
        self.end_offset
    }

    /// Positional freedom consumed by normalization.
    pub fn shift(&self) -> usize {
        self.shift
    }

    /// Residue at the start position.
    pub fn start_aa(&self) -> Option<char> {
        self.start_aa
    }

    /// Residue at the end position.
    pub fn end_aa(&self) -> Option<char> {
        self.end_aa
    }

    /// Distance to the new stop codon of a frame shift.
    pub fn terminal(&self) -> Option<i64> {
        self.terminal
    }

    fn terminal_suffix(&self) -> Option<i64> {
        self.terminal.filter(|&t| t != 0)
    }

    /// The token of this variant.
    pub fn render(&self) -> String {
        match self.molecule {
            Molecule::Dna => self.render_dna(),
            Molecule::Protein => self.render_protein(),
        }
    }

    fn render_dna(&self) -> String {
        let span = match &self.change {
            Change::Identity | Change::Unknown => return "=".to_string(),
            Change::Substitution {
                position,
                deleted,
                inserted,
            } => return format!("{}{}>{}", position, deleted, inserted),
            other => other.span(),
        };

        let mut token = String::new();
        if let Some(span) = span {
            token.push_str(&span.start.to_string());
            if let Some(end) = span.end {
                token.push_str(&format!("_{}", end));
            }
        }
        token.push_str(self.change.keyword());
        token.push_str(self.change.inserted());
        token
    }

    fn render_protein(&self) -> String {
        let span = match &self.change {
            Change::Unknown => return "?".to_string(),
            Change::Identity => return "=".to_string(),
            other => other.span(),
        };
        let Some(span) = span else {
            return "=".to_string();
        };

        let mut token = match &self.change {
            Change::Substitution { deleted, .. } => to_three_letter(deleted),
            Change::Extension { .. } => "*".to_string(),
            _ => self.start_aa.map(three_letter).unwrap_or_default().to_string(),
        };
        token.push_str(&span.start.to_string());
        if let Some(end) = span.end {
            let end_aa = self.end_aa.map(three_letter).unwrap_or_default();
            token.push_str(&format!("_{}{}", end_aa, end));
        }
        if !self.change.implicit_in_protein() {
            token.push_str(self.change.keyword());
        }
        token.push_str(&to_three_letter(self.change.inserted()));

        if matches!(self.change, Change::Stop { .. }) {
            token.push('*');
        } else if let Some(terminal) = self.terminal_suffix() {
            token.push_str(&format!("fs*{}", terminal));
        }
        token
    }

    /// Standardized length of the token.
    ///
    /// Positions count as one character and amino acids as three, whatever
    /// their rendered width.
    pub fn standardized_length(&self) -> usize {
        match self.molecule {
            Molecule::Dna => self.dna_length(),
            Molecule::Protein => self.protein_length(),
        }
    }

    fn dna_length(&self) -> usize {
        match &self.change {
            Change::Identity | Change::Unknown => 1,
            // Position, deleted base, '>' and inserted base
            Change::Substitution { .. } => 4,
            other => {
                let range = other.span().and_then(|s| s.end).map_or(0, |_| 2);
                1 + range + other.keyword().len() + other.inserted().len()
            }
        }
    }

    fn protein_length(&self) -> usize {
        let Some(span) = self.change.span() else {
            return 1;
        };

        let prefix = if matches!(self.change, Change::Extension { .. }) {
            1
        } else {
            3
        };
        let mut length = 1 + prefix;
        if span.end.is_some() {
            // '_', one amino acid and the end position
            length += 5;
        }
        if !self.change.implicit_in_protein() {
            length += self.change.keyword().len();
        }
        length += 3 * self.change.inserted().chars().count();

        if matches!(self.change, Change::Stop { .. }) {
            return length + 1;
        }
        if self.terminal_suffix().is_some() {
            // Counted with the keyword of the change, not "fs"
            return length + self.change.keyword().len() + 2;
        }
        length
    }
}

impl fmt::Display for RawVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
