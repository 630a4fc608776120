//! The aggregate view over a set of child datasets.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;

use stitch_common::{Axis, Slice, StitchError, StitchResult, Variable};

use crate::child::{ChildDataset, DimConstraint};
use crate::config::AggregateConfig;
use crate::merge::MergedAxis;
use crate::runs::{plan_segments, Segment};

/// A variable together with the child that owns it.
#[derive(Debug, Clone)]
struct VariableEntry {
    child: usize,
    variable: Variable,
}

/// One virtual dataset combining sibling children along a shared axis.
///
/// Built once from the children's axes and immutable afterwards: the
/// merged axis, index maps, and variable ownership never change. Reads may
/// run concurrently against a shared `Arc<AggregateView>` without locking.
/// When any child's axis changes, the whole view is rebuilt and swapped in
/// via [`crate::ViewRegistry::reload`]; there is no incremental update.
pub struct AggregateView {
    id: String,
    children: Vec<Arc<dyn ChildDataset>>,
    merged: MergedAxis,
    shared_axes: Vec<Axis>,
    variables: HashMap<String, VariableEntry>,
    config: AggregateConfig,
    created_at: DateTime<Utc>,
}

impl AggregateView {
    /// Build a view over the given children.
    ///
    /// Reads every child's axes once and validates the combination:
    /// strictly ascending aggregated axes, bit-for-bit identical shared
    /// dimensions, and unique variable ownership. Any failure aborts
    /// construction entirely; no partially built view is ever returned.
    ///
    /// # Arguments
    /// * `id` - Identifier for the aggregate dataset
    /// * `children` - The source datasets, in child order
    /// * `config` - Engine limits (validated before use)
    pub async fn build(
        id: impl Into<String>,
        children: Vec<Arc<dyn ChildDataset>>,
        config: &AggregateConfig,
    ) -> StitchResult<Self> {
        let id = id.into();
        config.validate()?;

        if children.is_empty() {
            return Err(StitchError::configuration(format!(
                "aggregate '{}' has no children",
                id
            )));
        }
        if children.len() > config.max_children {
            return Err(StitchError::configuration(format!(
                "aggregate '{}' has {} children, limit is {}",
                id,
                children.len(),
                config.max_children
            )));
        }

        let axes = try_join_all(children.iter().map(|c| c.aggregated_axis())).await?;
        let shared = try_join_all(children.iter().map(|c| c.shared_axes())).await?;

        Self::check_shared_dimensions(&children, &shared)?;
        let variables = Self::collect_variables(&children)?;

        let merged = {
            let ids: Vec<&str> = children.iter().map(|c| c.id()).collect();
            MergedAxis::build(&ids, &axes)?
        };

        tracing::info!(
            aggregate = %id,
            children = children.len(),
            positions = merged.len(),
            variables = variables.len(),
            "built aggregate view"
        );

        Ok(Self {
            id,
            shared_axes: shared.into_iter().next().unwrap_or_default(),
            children,
            merged,
            variables,
            config: config.clone(),
            created_at: Utc::now(),
        })
    }

    /// Verify the non-aggregated dimensions are identical across children.
    ///
    /// Checked once here, against the first child; never re-verified on
    /// the read path.
    fn check_shared_dimensions(
        children: &[Arc<dyn ChildDataset>],
        shared: &[Vec<Axis>],
    ) -> StitchResult<()> {
        let reference = &shared[0];
        for (child, axes) in children.iter().zip(shared).skip(1) {
            if axes.len() != reference.len() {
                return Err(StitchError::DimensionMismatch {
                    left: children[0].id().to_string(),
                    right: child.id().to_string(),
                    detail: format!(
                        "{} shared dimensions vs {}",
                        reference.len(),
                        axes.len()
                    ),
                });
            }
            for (expected, actual) in reference.iter().zip(axes) {
                if expected.name != actual.name
                    || expected.units != actual.units
                    || !expected.same_values(actual)
                {
                    return Err(StitchError::DimensionMismatch {
                        left: children[0].id().to_string(),
                        right: child.id().to_string(),
                        detail: format!("dimension '{}' differs", expected.name),
                    });
                }
            }
        }
        Ok(())
    }

    /// Map each variable name to its owning child, rejecting duplicates.
    fn collect_variables(
        children: &[Arc<dyn ChildDataset>],
    ) -> StitchResult<HashMap<String, VariableEntry>> {
        let mut variables: HashMap<String, VariableEntry> = HashMap::new();
        for (index, child) in children.iter().enumerate() {
            for variable in child.variables() {
                if let Some(existing) = variables.get(&variable.name) {
                    return Err(StitchError::DuplicateVariable {
                        variable: variable.name.clone(),
                        first: children[existing.child].id().to_string(),
                        second: child.id().to_string(),
                    });
                }
                variables.insert(
                    variable.name.clone(),
                    VariableEntry {
                        child: index,
                        variable: variable.clone(),
                    },
                );
            }
        }
        Ok(variables)
    }

    /// Read values for a variable over a slice of merged positions.
    ///
    /// Positions absent from the owning child come back as the variable's
    /// fill value; present positions are fetched from the child in as few
    /// constant-stride requests as possible, in request order. A request
    /// covering no present position issues no child read at all.
    ///
    /// # Arguments
    /// * `variable` - Name of a variable owned by one of the children
    /// * `request` - Start/stride/stop range in merged-axis positions
    /// * `constraints` - Pass-through constraints for the shared dimensions
    ///
    /// # Returns
    /// Exactly `request.count()` values. Child read errors propagate
    /// unchanged; a child returning the wrong number of values is an
    /// internal-consistency error.
    pub async fn read_values(
        &self,
        variable: &str,
        request: Slice,
        constraints: &[DimConstraint],
    ) -> StitchResult<Vec<f64>> {
        let entry = self
            .variables
            .get(variable)
            .ok_or_else(|| StitchError::VariableNotFound(variable.to_string()))?;

        request.validate(self.merged.len())?;
        let requested = request.count();
        if requested > self.config.max_request_positions {
            return Err(StitchError::RequestTooLarge {
                requested,
                limit: self.config.max_request_positions,
            });
        }

        let child = &self.children[entry.child];
        let segments = plan_segments(self.merged.index_map(entry.child), request);

        let mut output = Vec::with_capacity(requested);
        let mut fetches = 0usize;
        for segment in segments {
            match segment {
                Segment::Fill { count } => {
                    output.extend(std::iter::repeat(entry.variable.fill_value).take(count));
                }
                Segment::Fetch { slice } => {
                    let values = child.fetch_values(variable, slice, constraints).await?;
                    if values.len() != slice.count() {
                        return Err(StitchError::inconsistency(format!(
                            "child '{}' returned {} values for slice {} of '{}', expected {}",
                            child.id(),
                            values.len(),
                            slice,
                            variable,
                            slice.count()
                        )));
                    }
                    output.extend(values);
                    fetches += 1;
                }
            }
        }

        if output.len() != requested {
            return Err(StitchError::inconsistency(format!(
                "assembled {} values for request {} of '{}', expected {}",
                output.len(),
                request,
                variable,
                requested
            )));
        }

        tracing::debug!(
            aggregate = %self.id,
            variable,
            request = %request,
            positions = requested,
            fetches,
            "assembled aggregate read"
        );

        Ok(output)
    }

    /// Read a slice of the merged axis values themselves.
    pub fn read_axis(&self, request: Slice) -> StitchResult<Vec<f64>> {
        request.validate(self.merged.len())?;
        let values = self.merged.values();
        Ok(request.positions().map(|p| values[p]).collect())
    }

    /// Identifier of this aggregate dataset.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The merged axis.
    pub fn axis(&self) -> &MergedAxis {
        &self.merged
    }

    /// Number of merged axis positions.
    pub fn len(&self) -> usize {
        self.merged.len()
    }

    /// Check if the merged axis has no positions.
    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    /// The shared (non-aggregated) axes, as read from the first child.
    pub fn shared_axes(&self) -> &[Axis] {
        &self.shared_axes
    }

    /// All variables across all children, sorted by name.
    pub fn variables(&self) -> Vec<&Variable> {
        let mut list: Vec<&Variable> = self.variables.values().map(|e| &e.variable).collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    }

    /// Id of the child that owns the given variable.
    pub fn variable_owner(&self, variable: &str) -> Option<&str> {
        self.variables
            .get(variable)
            .map(|entry| self.children[entry.child].id())
    }

    /// When this view was built.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl std::fmt::Debug for AggregateView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateView")
            .field("id", &self.id)
            .field("children", &self.children.len())
            .field("positions", &self.merged.len())
            .field("variables", &self.variables.len())
            .finish()
    }
}
