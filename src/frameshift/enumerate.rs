//! Enumeration and detection of frame-shifted peptides.

use super::FrameShiftTable;

/// Overlapping 2-mers of a peptide in order of appearance.
///
/// ```
/// use ferro_describe::frameshift::overlaps;
///
/// assert_eq!(overlaps(b"MAV"), vec![*b"MA", *b"AV"]);
/// assert!(overlaps(b"M").is_empty());
/// ```
pub fn overlaps(peptide: &[u8]) -> Vec<[u8; 2]> {
    peptide.windows(2).map(|w| [w[0], w[1]]).collect()
}

/// Lazy enumeration of every peptide a frame shift could produce.
///
/// Candidates are produced depth-first: the option chosen for the first 2-mer
/// varies slowest. Memory use is linear in the peptide length, but the number
/// of candidates grows exponentially with it.
#[derive(Debug, Clone)]
pub struct FrameShiftIter {
    options: Vec<Vec<u8>>,
    cursor: Vec<usize>,
    done: bool,
}

impl FrameShiftIter {
    fn new(peptide: &[u8], table: &FrameShiftTable) -> Self {
        let options: Vec<Vec<u8>> = overlaps(peptide)
            .into_iter()
            .map(|pair| {
                table
                    .options(pair)
                    .map(|set| set.iter().copied().collect())
                    .unwrap_or_default()
            })
            .collect();
        let done = options.iter().any(Vec::is_empty);

        Self {
            cursor: vec![0; options.len()],
            options,
            done,
        }
    }

    /// Move to the next combination, flagging exhaustion after the last one.
    fn advance(&mut self) {
        for k in (0..self.cursor.len()).rev() {
            self.cursor[k] += 1;
            if self.cursor[k] < self.options[k].len() {
                return;
            }
            self.cursor[k] = 0;
        }
        self.done = true;
    }
}

impl Iterator for FrameShiftIter {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let candidate: String = self
            .cursor
            .iter()
            .zip(&self.options)
            .map(|(&i, options)| options[i] as char)
            .collect();
        self.advance();

        Some(candidate)
    }
}

/// Enumerate all peptides that could result from a frame shift of `peptide`.
///
/// Each candidate is one residue shorter than `peptide`. A peptide shorter
/// than two residues yields a single empty candidate; a 2-mer absent from the
/// table yields none. Callers must bound the peptide length.
///
/// ```
/// use ferro_describe::frameshift::{enumerate, frame_shift_tables, Frame};
///
/// let tables = frame_shift_tables(1).unwrap();
/// let candidates: Vec<String> = enumerate("MWM", tables.get(Frame::PlusOne)).collect();
/// assert_eq!(candidates, vec!["CG"]);
/// ```
pub fn enumerate(peptide: &str, table: &FrameShiftTable) -> FrameShiftIter {
    FrameShiftIter::new(peptide.as_bytes(), table)
}

/// Check whether `alt_peptide` is a possible frame shift of `peptide`.
///
/// Always `false`: the check is disabled because the detection built on it
/// crashed on real frame shifts. It stays a stub until that detection is
/// fixed; the intended rule is that every residue of `alt_peptide` is among
/// the options of the 2-mer of `peptide` at the same index.
pub fn fits(_peptide: &str, _alt_peptide: &str, _table: &FrameShiftTable) -> bool {
    false
}

/// Longest frame-shifted run found by [`find`].
///
/// Ordering compares `length` first and `start` second, so the larger of two
/// matches is the longer run, ties going to the later start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameShiftMatch {
    /// Length of the run minus one; `-1` when nothing matched.
    pub length: i64,
    /// Offset in the original peptide where the shifted run begins.
    pub start: usize,
}

/// Find the longest suffix of `alt_peptide` that fits into `peptide` under
/// the frame given by `table`.
///
/// Every 2-mer of `peptide` is tried as the anchor for the last residue of
/// `alt_peptide`, scanning from the end backwards and extending towards the
/// start of both peptides while the table allows it. Runs of equal length
/// found later in the scan (lower anchor) replace earlier ones.
///
/// ```
/// use ferro_describe::frameshift::{find, frame_shift_tables, Frame};
///
/// let tables = frame_shift_tables(1).unwrap();
/// let found = find("MWM", "CG", tables.get(Frame::PlusOne));
/// assert_eq!((found.length, found.start), (0, 2));
/// ```
pub fn find(peptide: &str, alt_peptide: &str, table: &FrameShiftTable) -> FrameShiftMatch {
    let pairs = overlaps(peptide.as_bytes());
    let alt = alt_peptide.as_bytes();

    let mut best = 0usize;
    let mut start = 0usize;

    for i in (0..pairs.len()).rev() {
        // The run stops at the first mismatch; a run that reaches either start
        // stops on its last compared residue.
        let mut j = 0usize;
        for k in 0..(i + 1).min(alt.len()) {
            j = k;
            if !table.allows(pairs[i - k], alt[alt.len() - 1 - k]) {
                break;
            }
        }

        if j >= best {
            best = j;
            start = i - j + 2;
        }
    }

    FrameShiftMatch {
        length: best as i64 - 1,
        start,
    }
}
