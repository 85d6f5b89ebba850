//! Observation weight matrices for time-varying connectivity
//!
//! A weight matrix has one row per connectivity slice and one column per
//! time point. Row `w` says how much each observation contributes to the
//! weighted correlation estimate of slice `w`.
//!
//! # Schemes
//!
//! - **Jackknife**: leave-one-out, T×T ones with a zero diagonal
//! - **Sliding window**: `windowsize` contiguous ones, shifted one step per row
//! - **Tapered sliding window**: the window profile is a probability density
//!   from a fixed registry (see [`taper::known_distributions`])
//! - **Spatial distance**: normalised inverse distance between the cross-node
//!   patterns of every pair of time points
//! - **Literal**: a caller-supplied T×T matrix
//!
//! # Usage
//!
//! ```rust
//! use nalgebra::DMatrix;
//! use tvc_core::{DimOrd, TimeSeries};
//! use tvc_weights::{WeightMatrixBuilder, WeightScheme};
//!
//! let data = DMatrix::from_fn(10, 3, |t, n| ((t + 1) * (n + 2)) as f64 % 7.0);
//! let series = TimeSeries::new(data, DimOrd::TimeNode).unwrap();
//!
//! let builder = WeightMatrixBuilder::new(WeightScheme::SlidingWindow { windowsize: 3 });
//! let (weights, _report) = builder.build(&series).unwrap();
//! assert_eq!(weights.shape(), (8, 10));
//! ```

pub mod builder;
pub mod distance;
pub mod taper;
pub mod window;

pub use builder::{WeightMatrixBuilder, WeightScheme};
pub use distance::{spatial_distance, DistanceMetric};
pub use taper::{known_distributions, taper_window, TaperDistribution};
pub use window::{jackknife, sliding_window, tapered_sliding_window};
