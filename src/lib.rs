//! Time-varying functional connectivity toolkit
//!
//! Facade over the workspace crates:
//!
//! - [`core`]: time series, connectivity tensors, errors, provenance reports
//! - [`weights`]: observation weight matrices
//! - [`derive`]: the derivation engine
//! - [`postpro`]: Fisher, Box-Cox and z-score transforms
//! - [`network`]: dense and sparse temporal networks
//! - [`report`]: descriptive summaries of derived tensors
//!
//! # Example
//!
//! ```rust
//! use nalgebra::DMatrix;
//! use tvc::prelude::*;
//!
//! let data = DMatrix::from_fn(30, 4, |t, n| ((t as f64) * (0.2 + n as f64 * 0.15)).sin());
//! let config = DeriveConfig::new("jackknife").with_postpro("fisher");
//! let derivation = derive(&data, &config).unwrap();
//!
//! let network = TemporalNetwork::from_array(derivation.tensor, None, false);
//! assert_eq!(network.shape(), (4, 30));
//! ```

pub use tvc_core as core;
pub use tvc_derive as derive;
pub use tvc_network as network;
pub use tvc_postpro as postpro;
pub use tvc_report as report;
pub use tvc_weights as weights;

pub use tvc_core::{ConnectivityTensor, DerivationReport, DimOrd, Error, ReportEntry, Result, TimeSeries};
pub use tvc_derive::{derive_batch, functional_connectivity, group_average, DeriveConfig, Derivation};
pub use tvc_network::{Edge, NetworkType, TemporalNetwork};
pub use tvc_postpro::postprocess;
pub use tvc_report::{ReportGenerator, SummaryReportGenerator};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use tvc_core::prelude::*;
    pub use tvc_derive::{derive, derive_batch, DeriveConfig, Derivation};
    pub use tvc_network::{Edge, NetworkType, TemporalNetwork};
    pub use tvc_postpro::postprocess;
    pub use tvc_report::{ReportGenerator, SummaryReportGenerator};
}
