//! Scripted in-memory child datasets for tests.
//!
//! `MemoryChild` holds its data in plain vectors, records every fetch it
//! receives (so tests can assert how requests were chunked), and can be
//! told to misbehave (short reads, failing fetches) to exercise the error
//! paths.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use stitch_common::{Axis, Slice, StitchError, StitchResult, Variable};

use crate::child::{ChildDataset, DimConstraint};

/// Fault injection modes for [`MemoryChild`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fault {
    /// Behave normally.
    #[default]
    None,
    /// Drop the last value of every fetch result.
    ShortRead,
    /// Fail every fetch with a read error.
    FailFetch,
}

/// An in-memory child dataset with one aggregated axis, optional shared
/// axes, and per-variable data parallel to the axis.
pub struct MemoryChild {
    id: String,
    axis: Axis,
    shared: Vec<Axis>,
    variables: Vec<Variable>,
    data: HashMap<String, Vec<f64>>,
    fault: Fault,
    requests: Mutex<Vec<Slice>>,
}

impl MemoryChild {
    /// Create a child with the given time axis and no variables yet.
    pub fn new(id: impl Into<String>, axis_values: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            axis: Axis::new("time", "hours since 2024-01-01T00:00:00Z", axis_values),
            shared: Vec::new(),
            variables: Vec::new(),
            data: HashMap::new(),
            fault: Fault::None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Replace the aggregated axis (name/units included).
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Add a shared (non-aggregated) axis.
    pub fn with_shared_axis(mut self, axis: Axis) -> Self {
        self.shared.push(axis);
        self
    }

    /// Add a variable with data parallel to the aggregated axis.
    pub fn with_variable(
        mut self,
        name: &str,
        units: &str,
        fill_value: f64,
        data: Vec<f64>,
    ) -> Self {
        assert_eq!(
            data.len(),
            self.axis.len(),
            "variable data must be parallel to the axis"
        );
        self.variables.push(Variable::new(name, units, fill_value));
        self.data.insert(name.to_string(), data);
        self
    }

    /// Enable a fault mode.
    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = fault;
        self
    }

    /// Finish building and wrap for use as a trait object.
    pub fn into_arc(self) -> Arc<dyn ChildDataset> {
        Arc::new(self)
    }

    /// The fetch slices this child has served, in order.
    pub async fn requests(&self) -> Vec<Slice> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ChildDataset for MemoryChild {
    fn id(&self) -> &str {
        &self.id
    }

    async fn aggregated_axis(&self) -> StitchResult<Axis> {
        Ok(self.axis.clone())
    }

    async fn shared_axes(&self) -> StitchResult<Vec<Axis>> {
        Ok(self.shared.clone())
    }

    fn variables(&self) -> &[Variable] {
        &self.variables
    }

    async fn fetch_values(
        &self,
        variable: &str,
        slice: Slice,
        _constraints: &[DimConstraint],
    ) -> StitchResult<Vec<f64>> {
        if self.fault == Fault::FailFetch {
            return Err(StitchError::read_failed(format!(
                "scripted failure in '{}'",
                self.id
            )));
        }

        self.requests.lock().await.push(slice);

        let data = self
            .data
            .get(variable)
            .ok_or_else(|| StitchError::VariableNotFound(variable.to_string()))?;
        slice.validate(data.len())?;

        let mut values: Vec<f64> = slice.positions().map(|p| data[p]).collect();
        if self.fault == Fault::ShortRead {
            values.pop();
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_child_fetch() {
        let child = MemoryChild::new("c1", vec![0.0, 1.0, 2.0, 3.0]).with_variable(
            "sst",
            "degree_C",
            -9999.0,
            vec![10.0, 11.0, 12.0, 13.0],
        );

        let values = child
            .fetch_values("sst", Slice::new(1, 2, 3), &[])
            .await
            .unwrap();
        assert_eq!(values, vec![11.0, 13.0]);
        assert_eq!(child.requests().await, vec![Slice::new(1, 2, 3)]);
    }

    #[tokio::test]
    async fn test_memory_child_short_read() {
        let child = MemoryChild::new("c1", vec![0.0, 1.0])
            .with_variable("sst", "degree_C", -9999.0, vec![10.0, 11.0])
            .with_fault(Fault::ShortRead);

        let values = child
            .fetch_values("sst", Slice::new(0, 1, 1), &[])
            .await
            .unwrap();
        assert_eq!(values.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_child_unknown_variable() {
        let child = MemoryChild::new("c1", vec![0.0]);
        let err = child
            .fetch_values("missing", Slice::single(0), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, StitchError::VariableNotFound(_)));
    }
}
