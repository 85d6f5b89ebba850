//! Core types for time-varying connectivity analysis
//!
//! This crate provides the data model shared by the derivation engine, the
//! post-processing pipeline and the temporal network representation:
//!
//! - [`TimeSeries`]: a (time, node) matrix, canonicalised from either
//!   orientation via [`DimOrd`]
//! - [`ConnectivityTensor`]: an (N, N, W) stack of association matrices
//! - [`DerivationReport`]: an append-only provenance record
//! - [`Error`]: the error taxonomy used by every tvc crate
//!
//! # NaN contract
//!
//! Degenerate statistics (constant node time courses, windows whose weights
//! sum to zero) propagate as NaN rather than raising. Downstream consumers
//! are expected to treat NaN as a missing edge.
//!
//! # Example
//!
//! ```rust
//! use nalgebra::DMatrix;
//! use tvc_core::{DimOrd, TimeSeries};
//!
//! let m = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 3.0, 1.0, 5.0, 0.0]);
//! let series = TimeSeries::new(m, DimOrd::TimeNode).unwrap();
//! assert_eq!(series.n_time(), 3);
//! assert_eq!(series.n_nodes(), 2);
//! ```

pub mod error;
pub mod report;
pub mod series;
pub mod tensor;
pub mod utils;

pub use error::{Error, Result};
pub use report::{DerivationReport, EdgeLambda, ReportEntry, TensorSummary};
pub use series::{matrix_from_rows, DimOrd, TimeSeries};
pub use tensor::ConnectivityTensor;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ConnectivityTensor, DerivationReport, DimOrd, Error, ReportEntry, Result, TimeSeries,
    };
}
