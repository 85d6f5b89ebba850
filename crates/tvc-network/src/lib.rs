//! Temporal network representation
//!
//! [`TemporalNetwork`] holds a time-indexed network either densely, as an
//! (N, N, T) [`tvc_core::ConnectivityTensor`], or sparsely, as a list of
//! [`Edge`]s. The network type ([`NetworkType`]) distinguishes binary from
//! weighted and undirected from directed networks.
//!
//! # Example
//!
//! ```rust
//! use tvc_core::ConnectivityTensor;
//! use tvc_network::{NetworkType, TemporalNetwork};
//!
//! let tensor = ConnectivityTensor::from_fn(3, 2, |i, j, t| {
//!     if i == j { 0.0 } else { 0.5 + 0.1 * t as f64 }
//! });
//! let network = TemporalNetwork::from_array(tensor.clone(), None, false);
//! assert_eq!(network.nettype(), NetworkType::Wu);
//!
//! let edges = network.to_sparse(0.0);
//! assert_eq!(edges.len(), 3 * 2);
//!
//! let rebuilt = TemporalNetwork::from_edges(edges, Some(NetworkType::Wu)).unwrap();
//! assert_eq!(rebuilt.to_dense(), tensor);
//! ```

pub mod binarize;
pub mod network;
pub mod query;
pub mod supra;
pub mod types;

pub use binarize::{binarize, Threshold, ThresholdSign};
pub use network::{TemporalNetwork, SPARSE_ZERO_FRACTION};
pub use query::{EdgeQuery, Logic};
pub use supra::SupraEdge;
pub use types::{Edge, NetworkType};
