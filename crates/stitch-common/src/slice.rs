//! Strided slices over axis positions.

use serde::{Deserialize, Serialize};

use crate::error::{StitchError, StitchResult};

/// A start/stride/stop range over axis positions, inclusive of `stop`.
///
/// `Slice { start: 1, stride: 2, stop: 5 }` covers positions 1, 3, 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// First position covered.
    pub start: usize,
    /// Step between positions (>= 1).
    pub stride: usize,
    /// Last position covered (inclusive).
    pub stop: usize,
}

impl Slice {
    /// Create a new slice.
    pub fn new(start: usize, stride: usize, stop: usize) -> Self {
        Self {
            start,
            stride,
            stop,
        }
    }

    /// A slice covering a single position.
    pub fn single(position: usize) -> Self {
        Self::new(position, 1, position)
    }

    /// A stride-1 slice covering every position of an axis of length `len`.
    ///
    /// Returns `None` for an empty axis, which no slice can address.
    pub fn full(len: usize) -> Option<Self> {
        if len == 0 {
            None
        } else {
            Some(Self::new(0, 1, len - 1))
        }
    }

    /// Check this slice against an axis of length `axis_len`.
    pub fn validate(&self, axis_len: usize) -> StitchResult<()> {
        if self.stride == 0 || self.start > self.stop || self.stop >= axis_len {
            return Err(StitchError::InvalidSlice {
                start: self.start,
                stride: self.stride,
                stop: self.stop,
                len: axis_len,
            });
        }
        Ok(())
    }

    /// Number of positions covered.
    ///
    /// Assumes a validated slice (`stride >= 1`, `start <= stop`).
    pub fn count(&self) -> usize {
        (self.stop - self.start) / self.stride + 1
    }

    /// Iterate the covered positions in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = usize> {
        (self.start..=self.stop).step_by(self.stride.max(1))
    }
}

impl std::fmt::Display for Slice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.start, self.stride, self.stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_positions() {
        let slice = Slice::new(1, 2, 5);
        assert_eq!(slice.count(), 3);
        assert_eq!(slice.positions().collect::<Vec<_>>(), vec![1, 3, 5]);

        // Stop that falls between strides is not visited
        let slice = Slice::new(0, 3, 7);
        assert_eq!(slice.positions().collect::<Vec<_>>(), vec![0, 3, 6]);
        assert_eq!(slice.count(), 3);

        let single = Slice::single(4);
        assert_eq!(single.count(), 1);
        assert_eq!(single.positions().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_full() {
        assert_eq!(Slice::full(6), Some(Slice::new(0, 1, 5)));
        assert_eq!(Slice::full(0), None);
    }

    #[test]
    fn test_validate() {
        assert!(Slice::new(0, 1, 5).validate(6).is_ok());
        assert!(Slice::new(5, 1, 5).validate(6).is_ok());

        // stop out of range
        assert!(Slice::new(0, 1, 6).validate(6).is_err());
        // zero stride
        assert!(Slice::new(0, 0, 5).validate(6).is_err());
        // start past stop
        assert!(Slice::new(4, 1, 2).validate(6).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Slice::new(0, 2, 10).to_string(), "0:2:10");
    }
}
