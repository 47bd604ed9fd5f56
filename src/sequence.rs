//! Sequence utilities shared by the diff engine and the classifier

/// Sequence value standing in for "sequence not available".
///
/// Describing anything against it yields the unknown variant `?`.
pub const UNKNOWN_SEQUENCE: &str = "?";

/// Number of flanking characters shown by [`print_flanks`].
const FLANK_SIZE: usize = 10;

/// Check whether a sequence is the unknown-sequence sentinel.
pub fn is_unknown(seq: &str) -> bool {
    seq == UNKNOWN_SEQUENCE
}

/// Complement a single nucleotide, preserving case.
///
/// Non-ACGT characters pass through unchanged.
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        b'a' => b't',
        b't' => b'a',
        b'g' => b'c',
        b'c' => b'g',
        other => other,
    }
}

/// Reverse complement a DNA sequence
///
/// Reverses the sequence and complements each nucleotide:
/// - A <-> T
/// - G <-> C
/// - Case is preserved
/// - Non-ATGC characters pass through unchanged
///
/// # Examples
///
/// ```
/// use ferro_describe::sequence::reverse_complement;
///
/// assert_eq!(reverse_complement("ATGC"), "GCAT");
/// assert_eq!(reverse_complement("aattggcc"), "ggccaatt");
/// assert_eq!(reverse_complement("ATGN"), "NCAT");
/// ```
pub fn reverse_complement(seq: &str) -> String {
    String::from_utf8_lossy(&reverse_complement_bytes(seq.as_bytes())).into_owned()
}

/// Byte-level variant of [`reverse_complement`].
pub fn reverse_complement_bytes(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

/// Render the neighbourhood of `seq[start..end]` for debug output.
///
/// Offsets are byte offsets. The affected slice is separated from up to ten
/// bytes of flank on either side by single spaces; `fill` dashes pad the
/// slice so that two printouts of an insertion line up.
///
/// ```
/// use ferro_describe::sequence::print_flanks;
///
/// assert_eq!(print_flanks("AAACCCGGG", 3, 6, 0), "AAA CCC GGG");
/// assert_eq!(print_flanks("AAAGGG", 3, 3, 2), "AAA -- GGG");
/// ```
pub fn print_flanks(seq: &str, start: usize, end: usize, fill: usize) -> String {
    let bytes = seq.as_bytes();
    let end = end.min(bytes.len());
    let start = start.min(end);
    let left = start.saturating_sub(FLANK_SIZE);
    let right = (end + FLANK_SIZE).min(bytes.len());

    format!(
        "{} {}{} {}",
        String::from_utf8_lossy(&bytes[left..start]),
        String::from_utf8_lossy(&bytes[start..end]),
        "-".repeat(fill),
        String::from_utf8_lossy(&bytes[end..right])
    )
}
