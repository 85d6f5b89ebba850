//! Post-processing transforms for connectivity tensors
//!
//! - [`fisher`]: Fisher z-transform (`atanh`)
//! - [`boxcox`]: per-edge Box-Cox with a maximum likelihood exponent
//! - [`standardize`]: per-edge z-score over time
//!
//! Transforms are chained with [`postprocess`] or a parsed [`Pipeline`].
//! After the last step every ±∞ is replaced with 0.
//!
//! # Example
//!
//! ```rust
//! use tvc_core::{ConnectivityTensor, DerivationReport};
//! use tvc_postpro::postprocess;
//!
//! let tensor = ConnectivityTensor::from_fn(3, 5, |i, j, t| {
//!     if i == j { 1.0 } else { 0.1 * (t as f64) - 0.2 }
//! });
//! let (tensor, report) = postprocess(tensor, "fisher+standardize", DerivationReport::new()).unwrap();
//! assert_eq!(tensor.shape(), (3, 3, 5));
//! assert_eq!(report.steps(), vec!["fisher", "standardize"]);
//! ```

pub mod boxcox;
pub mod fisher;
pub mod pipeline;
pub mod standardize;

pub use boxcox::{boxcox, boxcox_lambda, boxcox_llf, boxcox_value};
pub use fisher::{fisher, zero_infinities};
pub use pipeline::{postprocess, Pipeline, Transform};
pub use standardize::standardize;
