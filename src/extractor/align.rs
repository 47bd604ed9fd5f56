//! Sequence comparison producing low-level edits.
//!
//! The describer does not care how two sequences are compared, only that the
//! comparison yields an ordered list of [`Edit`]s that together cover both
//! sequences. [`SequenceDiffer`] is that seam; [`LcsDiffer`] is the built-in
//! implementation.
//!
//! # Coordinate System
//!
//! | Field | Basis | Notes |
//! |-------|-------|-------|
//! | `Edit.reference`, `Edit.sample` | 0-based, half-open | Converted to 1-based by the classifier |
//!
//! For type-safe coordinate handling, see [`crate::coords`].

use crate::sequence::reverse_complement_bytes;
use std::ops::Range;

/// Default number of longest-common-substring table cells one diff may fill.
pub const DEFAULT_MAX_CELLS: usize = 1 << 26;

/// Kind of a low-level edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Both intervals hold the same residues.
    Identity,
    /// The reference interval is replaced by the sample interval.
    Substitution,
    /// The sample interval is the reverse complement of the reference interval.
    ReverseComplement,
}

/// Comparison mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffMode {
    /// Only report edits on the forward strand.
    #[default]
    Forward,
    /// Also report reverse-complement matches (nucleotides only).
    ReverseComplement,
}

/// One low-level edit between a reference and a sample sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Reference interval (0-based, half-open).
    pub reference: Range<usize>,
    /// Sample interval (0-based, half-open).
    pub sample: Range<usize>,
    /// Edit kind.
    pub kind: EditKind,
}

impl Edit {
    /// Create a new edit.
    pub fn new(reference: Range<usize>, sample: Range<usize>, kind: EditKind) -> Self {
        Self {
            reference,
            sample,
            kind,
        }
    }

    /// Whether this edit leaves the sequence unchanged.
    pub fn is_identity(&self) -> bool {
        self.kind == EditKind::Identity
    }
}

/// Produces the ordered edits between two sequences.
///
/// Implementations must return edits ordered along both sequences, with
/// intervals that lie within the sequence bounds.
pub trait SequenceDiffer {
    /// Compare `reference` and `sample`.
    fn diff(&self, reference: &[u8], sample: &[u8], mode: DiffMode) -> Vec<Edit>;
}

/// Recursive longest-common-substring differ.
///
/// Common prefixes and suffixes are stripped first. The remaining region is
/// split around its longest common substring (or, in reverse-complement mode,
/// its longest reverse-complement match when that is longer) and both sides
/// are compared in turn.
///
/// Regions are kept on an explicit worklist rather than the call stack. Every
/// table filled is charged against one budget of `max_cells` per diff; once a
/// region no longer fits in what is left, it is reported as a single
/// substitution. A diff therefore never fills more than `max_cells` cells.
#[derive(Debug, Clone)]
pub struct LcsDiffer {
    max_cells: usize,
}

impl Default for LcsDiffer {
    fn default() -> Self {
        Self {
            max_cells: DEFAULT_MAX_CELLS,
        }
    }
}

/// Pending work of one diff, processed last-in first-out.
#[derive(Debug)]
enum Task {
    /// Compare these regions.
    Compare {
        reference: Range<usize>,
        sample: Range<usize>,
    },
    /// Output this edit.
    Emit(Edit),
}

/// State of one diff.
struct Comparison<'a> {
    reference: &'a [u8],
    sample: &'a [u8],
    mode: DiffMode,
    budget: usize,
    work: Vec<Task>,
}

impl LcsDiffer {
    /// Create a differ with the default budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a differ that fills at most `max_cells` table cells per diff.
    pub fn with_max_cells(max_cells: usize) -> Self {
        Self { max_cells }
    }
}

impl Comparison<'_> {
    fn run(mut self) -> Vec<Edit> {
        let mut edits = Vec::new();
        while let Some(task) = self.work.pop() {
            match task {
                Task::Emit(edit) => edits.push(edit),
                Task::Compare { reference, sample } => self.compare(reference, sample),
            }
        }
        edits
    }

    /// Strip the shared ends of a region and queue what they enclose.
    ///
    /// Tasks are pushed in reverse output order.
    fn compare(&mut self, mut ref_range: Range<usize>, mut sample_range: Range<usize>) {
        if ref_range.is_empty() && sample_range.is_empty() {
            return;
        }

        let prefix = common_prefix(
            &self.reference[ref_range.clone()],
            &self.sample[sample_range.clone()],
        );
        let prefix_edit = (prefix > 0).then(|| {
            Edit::new(
                ref_range.start..ref_range.start + prefix,
                sample_range.start..sample_range.start + prefix,
                EditKind::Identity,
            )
        });
        ref_range.start += prefix;
        sample_range.start += prefix;

        let suffix = common_suffix(
            &self.reference[ref_range.clone()],
            &self.sample[sample_range.clone()],
        );
        if suffix > 0 {
            self.work.push(Task::Emit(Edit::new(
                ref_range.end - suffix..ref_range.end,
                sample_range.end - suffix..sample_range.end,
                EditKind::Identity,
            )));
        }
        ref_range.end -= suffix;
        sample_range.end -= suffix;

        self.split(ref_range, sample_range);

        if let Some(edit) = prefix_edit {
            self.work.push(Task::Emit(edit));
        }
    }

    /// Queue a region with differing ends: around its longest shared run, or
    /// whole as a substitution.
    fn split(&mut self, ref_range: Range<usize>, sample_range: Range<usize>) {
        if ref_range.is_empty() && sample_range.is_empty() {
            return;
        }
        if ref_range.is_empty() || sample_range.is_empty() {
            self.substitute(ref_range, sample_range);
            return;
        }

        let cells = ref_range.len().saturating_mul(sample_range.len());
        let cost = match self.mode {
            DiffMode::Forward => cells,
            DiffMode::ReverseComplement => cells.saturating_mul(2),
        };
        if cost > self.budget {
            log::warn!(
                "Comparison budget exhausted ({} cells left), reporting a {}x{} region as one substitution",
                self.budget,
                ref_range.len(),
                sample_range.len()
            );
            self.substitute(ref_range, sample_range);
            return;
        }
        self.budget -= cost;

        let ref_slice = &self.reference[ref_range.clone()];
        let sample_slice = &self.sample[sample_range.clone()];

        let forward = longest_common_substring(ref_slice, sample_slice);

        if self.mode == DiffMode::ReverseComplement {
            let reversed = reverse_complement_bytes(sample_slice);
            let rc = longest_common_substring(ref_slice, &reversed);
            if rc.length >= 2 && rc.length > forward.length {
                let ref_start = ref_range.start + rc.first;
                let sample_start = sample_range.end - rc.second - rc.length;
                self.around(
                    ref_range,
                    sample_range,
                    ref_start..ref_start + rc.length,
                    sample_start..sample_start + rc.length,
                    EditKind::ReverseComplement,
                );
                return;
            }
        }

        if forward.length == 0 {
            self.substitute(ref_range, sample_range);
            return;
        }

        let ref_start = ref_range.start + forward.first;
        let sample_start = sample_range.start + forward.second;
        self.around(
            ref_range,
            sample_range,
            ref_start..ref_start + forward.length,
            sample_start..sample_start + forward.length,
            EditKind::Identity,
        );
    }

    /// Queue the left side, the anchoring edit and the right side of a split.
    fn around(
        &mut self,
        ref_range: Range<usize>,
        sample_range: Range<usize>,
        ref_anchor: Range<usize>,
        sample_anchor: Range<usize>,
        kind: EditKind,
    ) {
        self.work.push(Task::Compare {
            reference: ref_anchor.end..ref_range.end,
            sample: sample_anchor.end..sample_range.end,
        });
        self.work.push(Task::Emit(Edit::new(
            ref_anchor.clone(),
            sample_anchor.clone(),
            kind,
        )));
        self.work.push(Task::Compare {
            reference: ref_range.start..ref_anchor.start,
            sample: sample_range.start..sample_anchor.start,
        });
    }

    fn substitute(&mut self, reference: Range<usize>, sample: Range<usize>) {
        self.work.push(Task::Emit(Edit::new(
            reference,
            sample,
            EditKind::Substitution,
        )));
    }
}

impl SequenceDiffer for LcsDiffer {
    fn diff(&self, reference: &[u8], sample: &[u8], mode: DiffMode) -> Vec<Edit> {
        Comparison {
            reference,
            sample,
            mode,
            budget: self.max_cells,
            work: vec![Task::Compare {
                reference: 0..reference.len(),
                sample: 0..sample.len(),
            }],
        }
        .run()
    }
}

fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// A shared substring: `length` residues at `first` in one slice and at
/// `second` in the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct SharedRun {
    length: usize,
    first: usize,
    second: usize,
}

/// Longest common substring by dynamic programming over two rolling rows.
///
/// The first run of maximal length, in order of `a` then `b`, is returned.
fn longest_common_substring(a: &[u8], b: &[u8]) -> SharedRun {
    let mut best = SharedRun::default();
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            current[j + 1] = if x == y { previous[j] + 1 } else { 0 };
            if current[j + 1] > best.length {
                best = SharedRun {
                    length: current[j + 1],
                    first: i + 1 - current[j + 1],
                    second: j + 1 - current[j + 1],
                };
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    best
}
