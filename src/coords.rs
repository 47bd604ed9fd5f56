//! Type-safe coordinate system wrappers
//!
//! The diff engine reports 0-based half-open intervals; descriptions use
//! 1-based inclusive positions. These newtypes make the basis explicit at the
//! conversion points.
//!
//! | Type | Basis | Use Cases |
//! |------|-------|-----------|
//! | [`ZeroBasedPos`] | 0-based | Slice indexing, diff edit intervals |
//! | [`OneBasedPos`] | 1-based | Positions in rendered variants |
//!
//! # Examples
//!
//! ```
//! use ferro_describe::coords::ZeroBasedPos;
//!
//! let ob = ZeroBasedPos::from_index(99).to_one_based();
//! assert_eq!(ob.value(), 100);
//! ```

/// A 0-based position (array-style indexing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZeroBasedPos(u64);

/// A 1-based position (human-readable indexing)
///
/// Only reachable through conversions, so it is never 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OneBasedPos(u64);

impl ZeroBasedPos {
    /// Create from a slice index
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self(index as u64)
    }

    /// Convert to 1-based position
    #[inline]
    pub const fn to_one_based(self) -> OneBasedPos {
        OneBasedPos(self.0 + 1)
    }
}

impl OneBasedPos {
    /// Last position covered by a half-open interval ending at `end`.
    ///
    /// Returns `None` for an empty interval at the start of the sequence.
    #[inline]
    pub const fn from_exclusive_end(end: usize) -> Option<Self> {
        if end > 0 {
            Some(Self(end as u64))
        } else {
            None
        }
    }

    /// Get the raw value
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Convert a 0-based slice index to a 1-based position value.
///
/// ```
/// use ferro_describe::coords::index_to_hgvs_pos;
///
/// assert_eq!(index_to_hgvs_pos(0), 1);
/// assert_eq!(index_to_hgvs_pos(8), 9);
/// ```
#[inline]
pub fn index_to_hgvs_pos(index: usize) -> u64 {
    ZeroBasedPos::from_index(index).to_one_based().value()
}

/// Convert the exclusive end of a 0-based half-open interval to the 1-based
/// inclusive end, which is the same number. An empty interval at the start
/// maps to 0, the position before the first residue.
#[inline]
pub fn exclusive_end_to_hgvs_pos(end: usize) -> u64 {
    OneBasedPos::from_exclusive_end(end).map_or(0, OneBasedPos::value)
}
