//! Coordinate axes for grid dimensions.

use serde::{Deserialize, Serialize};

/// An ordered sequence of coordinate values along one grid dimension
/// (e.g., time as epoch seconds, depth in meters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Dimension name (e.g., "time").
    pub name: String,
    /// Physical units (e.g., "seconds since 1970-01-01T00:00:00Z").
    pub units: String,
    /// Coordinate values.
    pub values: Vec<f64>,
}

impl Axis {
    /// Create a new axis.
    pub fn new(name: impl Into<String>, units: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            values,
        }
    }

    /// Number of coordinate values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the axis has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the first value that breaks strict ascent, if any.
    ///
    /// Comparison is exact; a NaN anywhere counts as a violation since it
    /// cannot be ordered.
    pub fn first_descent(&self) -> Option<usize> {
        for (i, pair) in self.values.windows(2).enumerate() {
            match pair[0].partial_cmp(&pair[1]) {
                Some(std::cmp::Ordering::Less) => {}
                _ => return Some(i + 1),
            }
        }
        if !self.values.is_empty() && self.values[0].is_nan() {
            return Some(0);
        }
        None
    }

    /// Whether every value is strictly greater than the one before it.
    pub fn is_strictly_ascending(&self) -> bool {
        self.first_descent().is_none()
    }

    /// Bit-for-bit value equality with another axis.
    ///
    /// Used for the shared-dimension precondition, which requires exact
    /// identity rather than an epsilon comparison.
    pub fn same_values(&self, other: &Axis) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_descent() {
        let axis = Axis::new("time", "hours", vec![1.0, 2.0, 3.0]);
        assert_eq!(axis.first_descent(), None);
        assert!(axis.is_strictly_ascending());

        // Plateau is a violation: strict ascent required
        let axis = Axis::new("time", "hours", vec![1.0, 2.0, 2.0, 3.0]);
        assert_eq!(axis.first_descent(), Some(2));

        let axis = Axis::new("time", "hours", vec![1.0, 3.0, 2.0]);
        assert_eq!(axis.first_descent(), Some(2));

        let axis = Axis::new("time", "hours", vec![]);
        assert_eq!(axis.first_descent(), None);

        let axis = Axis::new("time", "hours", vec![5.0]);
        assert_eq!(axis.first_descent(), None);
    }

    #[test]
    fn test_first_descent_nan() {
        let axis = Axis::new("time", "hours", vec![1.0, f64::NAN, 3.0]);
        assert_eq!(axis.first_descent(), Some(1));

        let axis = Axis::new("time", "hours", vec![f64::NAN]);
        assert_eq!(axis.first_descent(), Some(0));
    }

    #[test]
    fn test_same_values() {
        let a = Axis::new("time", "hours", vec![1.0, 2.0, 3.0]);
        let b = Axis::new("time", "hours", vec![1.0, 2.0, 3.0]);
        let c = Axis::new("time", "hours", vec![1.0, 2.0]);
        let d = Axis::new("time", "hours", vec![1.0, 2.0, 3.5]);

        assert!(a.same_values(&b));
        assert!(!a.same_values(&c));
        assert!(!a.same_values(&d));

        // -0.0 and 0.0 compare equal as floats but differ bit-for-bit
        let e = Axis::new("depth", "m", vec![0.0]);
        let f = Axis::new("depth", "m", vec![-0.0]);
        assert!(!e.same_values(&f));
    }
}
