//! Child dataset interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use stitch_common::{Axis, Slice, StitchResult, Variable};

/// A constraint on one non-aggregated dimension, passed through unchanged
/// to the owning child (the shared dimensions are identical across all
/// children by precondition).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimConstraint {
    /// Name of the constrained dimension (e.g., "latitude").
    pub dimension: String,
    /// Index range within that dimension.
    pub slice: Slice,
}

impl DimConstraint {
    /// Create a new dimension constraint.
    pub fn new(dimension: impl Into<String>, slice: Slice) -> Self {
        Self {
            dimension: dimension.into(),
            slice,
        }
    }
}

/// Trait for the source grid datasets being combined side by side.
///
/// Each child owns its own values for the aggregated dimension and shares
/// all other dimensions with its siblings. Axis methods are called once,
/// when the aggregate view is built; `fetch_values` is called per run on
/// the read path.
#[async_trait]
pub trait ChildDataset: Send + Sync {
    /// Stable identifier for this dataset.
    fn id(&self) -> &str;

    /// Read the aggregated-dimension axis.
    ///
    /// Values must be strictly ascending; construction fails otherwise.
    async fn aggregated_axis(&self) -> StitchResult<Axis>;

    /// Read the non-aggregated axes, in dimension order.
    ///
    /// These must be bit-for-bit identical across all children of a view.
    async fn shared_axes(&self) -> StitchResult<Vec<Axis>>;

    /// The data variables this dataset provides.
    fn variables(&self) -> &[Variable];

    /// Fetch values for `variable` over a slice of this dataset's own
    /// aggregated axis.
    ///
    /// # Arguments
    /// * `variable` - Name of a variable returned by [`Self::variables`]
    /// * `slice` - Start/stride/stop range in this dataset's axis positions
    /// * `constraints` - Pass-through constraints for the shared dimensions
    ///
    /// # Returns
    /// Exactly `slice.count()` values, in axis order. Returning any other
    /// count is treated as an internal-consistency failure by the caller.
    async fn fetch_values(
        &self,
        variable: &str,
        slice: Slice,
        constraints: &[DimConstraint],
    ) -> StitchResult<Vec<f64>>;
}
