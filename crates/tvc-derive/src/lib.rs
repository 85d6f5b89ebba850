//! Time-varying connectivity derivation engine
//!
//! Converts a (time, node) matrix into an (node, node, slice) tensor of
//! time-resolved association estimates.
//!
//! # Methods
//!
//! | name | slices | notes |
//! |------|--------|-------|
//! | `jackknife` | T | leave-one-out correlation, sign inverted |
//! | `slidingwindow` | T - k + 1 | uniform window of `windowsize` |
//! | `taperedslidingwindow` | T - k + 1 | window profile from a density |
//! | `distance` | T | inverse-distance weighting between observations |
//! | `temporalderivative` | T - k | multiplication of temporal derivatives |
//! | literal matrix | T | caller-supplied T×T weights |
//!
//! Weighted methods build an observation weight matrix with
//! [`tvc_weights::WeightMatrixBuilder`] and reduce it against the data with
//! [`WeightedCorrelationEngine`]. The tensor then passes through the
//! post-processing pipeline named in [`DeriveConfig::postpro`].
//!
//! # Example
//!
//! ```rust
//! use nalgebra::DMatrix;
//! use tvc_derive::{derive, DeriveConfig};
//!
//! let data = DMatrix::from_fn(20, 4, |t, n| ((t * (n + 3)) as f64).sin());
//! let config = DeriveConfig::new("sliding window")
//!     .with_windowsize(5)
//!     .with_postpro("fisher")
//!     .with_report(true);
//!
//! let derivation = derive(&data, &config).unwrap();
//! assert_eq!(derivation.shape(), (4, 4, 16));
//! assert_eq!(derivation.report.method(), Some("slidingwindow"));
//! ```

pub mod batch;
pub mod config;
pub mod connectivity;
pub mod correlation;
pub mod derivative;
pub mod derive;

pub use batch::derive_batch;
pub use config::{DeriveConfig, Method, MethodSpec, METHOD_NAMES};
pub use connectivity::{functional_connectivity, group_average};
pub use correlation::{weighted_correlation, WeightedCorrelationEngine};
pub use derivative::temporal_derivative;
pub use derive::{compute, derive, derive_with_generator, Derivation};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{derive, derive_batch, DeriveConfig, Derivation, Method};
    pub use tvc_core::prelude::*;
}
