//! CLI utilities for ferro-describe
//!
//! This module provides testable functions used by the CLI binary.
//! By extracting pure functions and I/O-abstracted functions to the library,
//! we enable comprehensive unit testing without requiring end-to-end CLI tests.

pub mod format;

pub use format::{
    output_candidates, output_description, output_error, output_error_with_context,
    output_frameshift_match, OutputFormat, DEFAULT_CANDIDATE_LIMIT,
};

use crate::error::DescribeError;
use crate::extractor::{Describer, Molecule, SequenceDiffer};
use std::io::{BufRead, Write};

/// UTF-8 BOM (Byte Order Mark) constant
const UTF8_BOM: &str = "\u{feff}";

/// Strip UTF-8 BOM from the beginning of a string if present.
///
/// # Examples
///
/// ```
/// use ferro_describe::cli::strip_bom;
///
/// assert_eq!(strip_bom("\u{feff}ACGT\tACTT"), "ACGT\tACTT");
/// assert_eq!(strip_bom("ACGT\tACTT"), "ACGT\tACTT");
/// ```
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix(UTF8_BOM).unwrap_or(s)
}

/// Strip inline comments from an input line.
///
/// Comments start with `#` and extend to the end of the line.
/// Leading/trailing whitespace is also trimmed.
///
/// # Examples
///
/// ```
/// use ferro_describe::cli::strip_inline_comment;
///
/// assert_eq!(strip_inline_comment("ACGT\tACTT  # my note"), "ACGT\tACTT");
/// assert_eq!(strip_inline_comment("# full line comment"), "");
/// ```
pub fn strip_inline_comment(s: &str) -> &str {
    match s.find('#') {
        Some(pos) => s[..pos].trim(),
        None => s.trim(),
    }
}

/// Process an input line: trim whitespace, strip BOM (for first line), and strip inline comments.
///
/// Returns None if the line is empty or a comment-only line.
///
/// # Examples
///
/// ```
/// use ferro_describe::cli::process_input_line;
///
/// assert_eq!(process_input_line("ACGT\tACTT", false), Some("ACGT\tACTT"));
/// assert_eq!(process_input_line("\u{feff}ACGT\tACTT", true), Some("ACGT\tACTT"));
/// assert_eq!(process_input_line("# comment", false), None);
/// ```
pub fn process_input_line(line: &str, is_first_line: bool) -> Option<&str> {
    let line = line.trim();
    let line = if is_first_line { strip_bom(line) } else { line };
    let line = strip_inline_comment(line);

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

/// One line of a sequence-pair input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencePair<'a> {
    /// Optional first column naming the pair.
    pub label: Option<&'a str>,
    /// Reference sequence.
    pub reference: &'a str,
    /// Observed sequence.
    pub observed: &'a str,
}

/// Split a tab-separated `reference<TAB>observed` or
/// `label<TAB>reference<TAB>observed` line.
///
/// ```
/// use ferro_describe::cli::parse_sequence_pair;
///
/// let pair = parse_sequence_pair("ACGT\tACTT").unwrap();
/// assert_eq!((pair.reference, pair.observed), ("ACGT", "ACTT"));
///
/// let pair = parse_sequence_pair("s1\tACGT\tACTT").unwrap();
/// assert_eq!(pair.label, Some("s1"));
///
/// assert!(parse_sequence_pair("ACGT").is_err());
/// ```
pub fn parse_sequence_pair(line: &str) -> Result<SequencePair<'_>, DescribeError> {
    let parts: Vec<&str> = line.split('\t').map(str::trim).collect();
    match *parts.as_slice() {
        [reference, observed] => Ok(SequencePair {
            label: None,
            reference,
            observed,
        }),
        [label, reference, observed] => Ok(SequencePair {
            label: Some(label),
            reference,
            observed,
        }),
        _ => Err(DescribeError::invalid_input(format!(
            "expected 2 or 3 tab-separated columns, found {}",
            parts.len()
        ))),
    }
}

/// Counts from describing an input file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescribeSummary {
    /// Pairs described successfully.
    pub described: usize,
    /// Lines that failed to parse or describe.
    pub errors: usize,
}

/// Describe every sequence pair read from `reader`.
///
/// Results go to `out`; malformed lines and description failures are reported
/// to `err` and counted, and processing continues with the next line.
///
/// # Errors
///
/// Only I/O failures abort processing.
pub fn describe_reader<R, W, E, D>(
    reader: R,
    out: &mut W,
    err: &mut E,
    describer: &Describer<D>,
    molecule: Molecule,
    format: OutputFormat,
) -> Result<DescribeSummary, DescribeError>
where
    R: BufRead,
    W: Write,
    E: Write,
    D: SequenceDiffer,
{
    let mut summary = DescribeSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(content) = process_input_line(&line, index == 0) else {
            continue;
        };

        let described = parse_sequence_pair(content).and_then(|pair| {
            let allele = describer.describe(pair.reference, pair.observed, molecule)?;
            Ok((pair, allele))
        });

        match described {
            Ok((pair, allele)) => {
                output_description(
                    out,
                    pair.label,
                    pair.reference,
                    pair.observed,
                    &allele,
                    format,
                )?;
                summary.described += 1;
            }
            Err(e) => {
                log::warn!("Skipping line {}: {}", index + 1, e);
                output_error_with_context(err, content, &e, format, Some(index + 1))?;
                summary.errors += 1;
            }
        }
    }

    Ok(summary)
}
