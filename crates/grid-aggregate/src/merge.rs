//! Merged axis construction.
//!
//! A `MergedAxis` is the sorted, duplicate-free union of the children's
//! aggregated-dimension values, together with one index map per child that
//! gives, for every merged position, the child-local axis index or `None`
//! where the child has no value. Both are built once, in a single k-way
//! merge pass, and never mutated afterwards.

use stitch_common::{Axis, StitchError, StitchResult};

/// The unified axis of an aggregate view plus per-child position lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedAxis {
    name: String,
    units: String,
    values: Vec<f64>,
    index_maps: Vec<Vec<Option<usize>>>,
}

impl MergedAxis {
    /// Build the merged axis from one aggregated axis per child.
    ///
    /// `ids` names the datasets, parallel to `axes`, and is used only for
    /// error reporting. Every axis must be strictly ascending (exact
    /// comparison, so duplicates within one child are rejected too) and
    /// all axes must agree on dimension name and units. Values that appear
    /// in more than one child coalesce into a single merged position.
    ///
    /// # Arguments
    /// * `ids` - Dataset identifier per child, in child order
    /// * `axes` - Aggregated axis per child, in the same order
    ///
    /// # Returns
    /// A `MergedAxis` whose value sequence is strictly ascending and whose
    /// index maps all have the same length as that sequence.
    pub fn build(ids: &[&str], axes: &[Axis]) -> StitchResult<Self> {
        if ids.len() != axes.len() {
            return Err(StitchError::inconsistency(format!(
                "{} dataset ids for {} axes",
                ids.len(),
                axes.len()
            )));
        }
        if axes.is_empty() {
            return Err(StitchError::configuration(
                "cannot merge an empty list of axes",
            ));
        }

        for (id, axis) in ids.iter().zip(axes) {
            if let Some(index) = axis.first_descent() {
                return Err(StitchError::UnsortedAxis {
                    dataset: id.to_string(),
                    axis: axis.name.clone(),
                    index,
                });
            }
        }

        let first = &axes[0];
        for (id, axis) in ids.iter().zip(axes).skip(1) {
            if axis.name != first.name || axis.units != first.units {
                return Err(StitchError::DimensionMismatch {
                    left: ids[0].to_string(),
                    right: id.to_string(),
                    detail: format!(
                        "aggregated axis '{}' ({}) vs '{}' ({})",
                        first.name, first.units, axis.name, axis.units
                    ),
                });
            }
        }

        let total: usize = axes.iter().map(Axis::len).sum();
        let mut values = Vec::with_capacity(total);
        let mut index_maps: Vec<Vec<Option<usize>>> = axes.iter().map(|_| Vec::new()).collect();
        let mut cursors = vec![0usize; axes.len()];

        // K-way merge: take the minimum unconsumed value, record it once,
        // and advance every child currently sitting on that value.
        loop {
            let mut min: Option<f64> = None;
            for (child, axis) in axes.iter().enumerate() {
                if let Some(&v) = axis.values.get(cursors[child]) {
                    min = Some(match min {
                        Some(m) if m <= v => m,
                        _ => v,
                    });
                }
            }
            let Some(v) = min else { break };

            values.push(v);
            for (child, axis) in axes.iter().enumerate() {
                let slot = match axis.values.get(cursors[child]) {
                    Some(&cur) if cur == v => {
                        let index = cursors[child];
                        cursors[child] += 1;
                        Some(index)
                    }
                    _ => None,
                };
                index_maps[child].push(slot);
            }
        }

        tracing::debug!(
            children = axes.len(),
            source_values = total,
            merged_values = values.len(),
            axis = %first.name,
            "built merged axis"
        );

        Ok(Self {
            name: first.name.clone(),
            units: first.units.clone(),
            values,
            index_maps,
        })
    }

    /// Dimension name shared by all children.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units shared by all children.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// The merged coordinate values, strictly ascending.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of merged positions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the merged axis has no positions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of merged positions present in the given child.
    pub fn coverage(&self, child: usize) -> usize {
        self.index_maps[child].iter().flatten().count()
    }

    /// Per-position lookup into the given child's own axis.
    pub(crate) fn index_map(&self, child: usize) -> &[Option<usize>] {
        &self.index_maps[child]
    }
}
