// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-describe: HGVS-style descriptions of sequence differences
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! # Example
//!
//! ```
//! use ferro_describe::{describe, render, standardized_length};
//!
//! // Compare two DNA sequences
//! let allele = describe("ATGCATGCAT", "CTGCATGCAG", true).unwrap();
//!
//! assert_eq!(render(&allele), "[1A>C;10T>G]");
//! assert_eq!(standardized_length(&allele), 8);
//! ```

pub mod cli;
pub mod codon;
pub mod config;
pub mod coords;
pub mod error;
pub mod extractor;
pub mod frameshift;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod protein;
pub mod sequence;

// Re-export commonly used types
pub use codon::CodonTable;
pub use config::DescribeConfig;
pub use error::{DescribeError, ErrorCode};
pub use extractor::{
    describe, render, standardized_length, Allele, Change, Describer, DescriberConfig, Molecule,
    RawVar, Span,
};
pub use frameshift::{frame_shift_tables, Frame, FrameShiftTables};

// Re-export coordinate types for type-safe position handling
pub use coords::{index_to_hgvs_pos, OneBasedPos, ZeroBasedPos};

/// Result type alias for ferro-describe operations
pub type Result<T> = std::result::Result<T, DescribeError>;
