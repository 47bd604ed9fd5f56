//! Positional freedom of indels and palindrome detection.

use crate::sequence::complement;

/// How far a stretch of sequence can be shifted while leaving the sequence
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Roll {
    /// Positions the stretch can move towards the 5' end.
    pub five_prime: usize,
    /// Positions the stretch can move towards the 3' end.
    pub three_prime: usize,
}

impl Roll {
    /// Total freedom in both directions.
    pub fn total(&self) -> usize {
        self.five_prime + self.three_prime
    }
}

/// Determine the positional freedom of `seq[first - 1..last]`.
///
/// `first` and `last` are 1-based inclusive. The stretch is rolled over any
/// cyclic permutation of itself in both directions.
///
/// ```
/// use ferro_describe::extractor::roll;
///
/// // The AC at positions 4-5 can move one step left and three steps right
/// let freedom = roll(b"TTCACACAGG", 4, 5);
/// assert_eq!((freedom.five_prime, freedom.three_prime), (1, 3));
/// ```
pub fn roll(seq: &[u8], first: usize, last: usize) -> Roll {
    if first == 0 || last < first || last > seq.len() {
        return Roll::default();
    }

    let pattern = &seq[first - 1..last];
    let len = pattern.len();

    let mut five_prime = 0;
    while first - 1 > five_prime && seq[first - 2 - five_prime] == pattern[len - 1 - five_prime % len]
    {
        five_prime += 1;
    }

    let mut three_prime = 0;
    while last + three_prime < seq.len() && seq[last + three_prime] == pattern[three_prime % len] {
        three_prime += 1;
    }

    Roll {
        five_prime,
        three_prime,
    }
}

/// Length of the palindromic prefix of a nucleotide stretch.
///
/// Compares `seq` with its reverse complement over the first half (rounded
/// up) and returns the index of the first mismatch, or `None` when the whole
/// stretch is its own reverse complement.
///
/// ```
/// use ferro_describe::extractor::reverse_complement_prefix;
///
/// assert_eq!(reverse_complement_prefix(b"ACGT"), None);
/// assert_eq!(reverse_complement_prefix(b"ACCGGAT"), Some(1));
/// assert_eq!(reverse_complement_prefix(b"AAAC"), Some(0));
/// ```
pub fn reverse_complement_prefix(seq: &[u8]) -> Option<usize> {
    let n = seq.len();
    (0..n.div_ceil(2)).find(|&i| seq[i] != complement(seq[n - 1 - i]))
}
