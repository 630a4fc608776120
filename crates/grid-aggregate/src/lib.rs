//! Side-by-side aggregation of sibling grid datasets.
//!
//! This crate combines N grid datasets ("children") that share every
//! dimension except one (the aggregated dimension, typically time) into a
//! single virtual dataset. It enables:
//!
//! - **Unified axis**: one sorted, duplicate-free union of all children's
//!   axis values, built once and immutable afterwards
//! - **Gap-aware reads**: positions absent from a variable's owning child
//!   are filled with that variable's missing-value sentinel
//! - **Chunked fetches**: contiguous constant-stride runs are read from a
//!   child in one request instead of one value at a time
//!
//! # Architecture
//!
//! ```text
//! read_values(variable, start:stride:stop)
//!      │
//!      ▼
//! AggregateView
//!      │
//!      ├─► Resolve owning child for the variable
//!      │
//!      ├─► Plan segments over the child's index map
//!      │         │
//!      │         ├─► Absent positions: emit fill values
//!      │         │
//!      │         └─► Present runs: one fetch per constant-stride run
//!      │
//!      └─► Assemble fills and run results in request order
//!               │
//!               ▼
//!          Return to caller
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_aggregate::{AggregateConfig, AggregateView, ViewRegistry};
//! use stitch_common::Slice;
//!
//! // Build a view over two children (e.g., east and west time ranges)
//! let view = AggregateView::build("sst-combined", children, &AggregateConfig::default()).await?;
//!
//! // Read the full merged range; gaps come back as the variable's fill value
//! let request = Slice::new(0, 1, view.len() - 1);
//! let values = view.read_values("sst", request, &[]).await?;
//! ```

pub mod child;
pub mod config;
pub mod merge;
pub mod registry;
pub mod runs;
pub mod testdata;
pub mod view;

// Re-export commonly used types at crate root
pub use child::{ChildDataset, DimConstraint};
pub use config::AggregateConfig;
pub use merge::MergedAxis;
pub use registry::{PublishedView, ViewRegistry};
pub use runs::{plan_segments, Segment};
pub use view::AggregateView;

pub use stitch_common::{Axis, Slice, StitchError, StitchResult, Variable};
