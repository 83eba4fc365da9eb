//! Vector-body / scalar-remainder split
//!
//! Every SIMD kernel in [`crate::backends`] walks its input in two phases:
//! `chunks` steps of `lanes` elements through vector registers, then the
//! `remainder` trailing elements one at a time. [`Tiling`] computes that split
//! once so every kernel agrees on where the body ends.
//!
//! # Example
//!
//! ```
//! use denso::Tiling;
//!
//! let t = Tiling::new(19, 8);
//! assert_eq!(t.chunks(), 2);
//! assert_eq!(t.body(), 16);
//! assert_eq!(t.remainder(), 3);
//! assert_eq!(t.chunk_starts().collect::<Vec<_>>(), vec![0, 8]);
//! ```

use std::ops::Range;

/// Split of a buffer of `len` elements into full lanes plus a scalar tail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tiling {
    len: usize,
    lanes: usize,
    chunks: usize,
}

impl Tiling {
    /// Computes the split for `len` elements at `lanes` floats per step
    ///
    /// A lane count of 0 is treated as 1.
    pub const fn new(len: usize, lanes: usize) -> Self {
        let lanes = if lanes == 0 { 1 } else { lanes };
        Self {
            len,
            lanes,
            chunks: len / lanes,
        }
    }

    /// Lanes per vector step
    pub const fn lanes(&self) -> usize {
        self.lanes
    }

    /// Number of full vector steps
    pub const fn chunks(&self) -> usize {
        self.chunks
    }

    /// Elements covered by the vector body: `chunks * lanes`
    pub const fn body(&self) -> usize {
        self.chunks * self.lanes
    }

    /// Elements left for the scalar tail: `len % lanes`
    pub const fn remainder(&self) -> usize {
        self.len - self.body()
    }

    /// Start offset of each vector step
    pub fn chunk_starts(&self) -> impl Iterator<Item = usize> {
        (0..self.body()).step_by(self.lanes)
    }

    /// Indices handled by the scalar tail
    pub fn remainder_range(&self) -> Range<usize> {
        self.body()..self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_short_of_a_lane_is_all_remainder() {
        for lanes in [4, 8, 16] {
            let t = Tiling::new(lanes - 1, lanes);
            assert_eq!(t.chunks(), 0);
            assert_eq!(t.body(), 0);
            assert_eq!(t.remainder(), lanes - 1);
            assert_eq!(t.chunk_starts().count(), 0);
            assert_eq!(t.remainder_range(), 0..lanes - 1);
        }
    }

    #[test]
    fn test_three_full_lanes_has_no_remainder() {
        for lanes in [4, 8, 16] {
            let t = Tiling::new(3 * lanes, lanes);
            assert_eq!(t.chunks(), 3);
            assert_eq!(t.remainder(), 0);
            assert_eq!(
                t.chunk_starts().collect::<Vec<_>>(),
                vec![0, lanes, 2 * lanes]
            );
            assert!(t.remainder_range().is_empty());
        }
    }

    #[test]
    fn test_empty_buffer() {
        let t = Tiling::new(0, 8);
        assert_eq!(t.chunks(), 0);
        assert_eq!(t.remainder(), 0);
    }

    #[test]
    fn test_zero_lanes_treated_as_one() {
        let t = Tiling::new(5, 0);
        assert_eq!(t.lanes(), 1);
        assert_eq!(t.chunks(), 5);
        assert_eq!(t.remainder(), 0);
    }

    #[test]
    fn test_single_lane_has_no_remainder() {
        let t = Tiling::new(7, 1);
        assert_eq!(t.body(), 7);
        assert_eq!(t.chunk_starts().collect::<Vec<_>>(), (0..7).collect::<Vec<_>>());
    }
}
