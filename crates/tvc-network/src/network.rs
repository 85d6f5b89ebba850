//! Temporal network with dense or sparse storage
//!
//! A network is either a dense (N, N, T) tensor or a sparse list of
//! `{i, j, t, weight}` edges. Arrays that are mostly zero (more than 75%)
//! or imported with `forcesparse` are stored sparse.
//!
//! Undirected sparse storage keeps one edge per unordered pair and time
//! point, with `i < j`; dense reconstruction mirrors it. Self-contacts are
//! dropped unless the network was built with a diagonal (see
//! [`TemporalNetwork::set_diagonal`]).

use std::collections::HashMap;

use tracing::{debug, warn};
use tvc_core::{ConnectivityTensor, Error, Result};

use crate::binarize::{binarize, Threshold, ThresholdSign};
use crate::query::EdgeQuery;
use crate::types::{Edge, NetworkType, SYMMETRY_TOLERANCE};

/// Fraction of zero entries above which arrays are stored sparse
pub const SPARSE_ZERO_FRACTION: f64 = 0.75;

#[derive(Debug, Clone, PartialEq)]
enum Storage {
    Dense(ConnectivityTensor),
    Sparse(Vec<Edge>),
}

/// A time-indexed network of `n_nodes` nodes over `n_time` time points
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalNetwork {
    storage: Storage,
    nettype: NetworkType,
    n_nodes: usize,
    n_time: usize,
    diagonal: bool,
}

impl TemporalNetwork {
    /// Import an (N, N, T) tensor
    ///
    /// `nettype` is inferred when absent.
    pub fn from_array(
        tensor: ConnectivityTensor,
        nettype: Option<NetworkType>,
        forcesparse: bool,
    ) -> Self {
        let (n_nodes, _, n_time) = tensor.shape();
        let nettype = nettype.unwrap_or_else(|| NetworkType::infer(&tensor));
        let total = tensor.values().len();
        let zeros = tensor.values().iter().filter(|&&v| v == 0.0).count();

        if forcesparse || (zeros as f64) > total as f64 * SPARSE_ZERO_FRACTION {
            let edges = nonzero_edges(&tensor, nettype);
            debug!(edges = edges.len(), %nettype, "storing array sparse");
            let mut network = Self {
                storage: Storage::Sparse(edges),
                nettype,
                n_nodes,
                n_time,
                diagonal: false,
            };
            network.normalise_sparse();
            network
        } else {
            let mut tensor = tensor;
            tensor.set_diagonal(0.0);
            Self {
                storage: Storage::Dense(tensor),
                nettype,
                n_nodes,
                n_time,
                diagonal: false,
            }
        }
    }

    /// Build a sparse network from edges
    ///
    /// The shape is the smallest that holds every edge. `nettype` is
    /// inferred when absent: weighted if any weight differs from 1,
    /// undirected only if every contact is listed in both orientations with
    /// equal weight. Pass the type explicitly for edge lists that store
    /// undirected pairs once.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if an index is too large for the shape to be
    /// represented.
    pub fn from_edges(edges: Vec<Edge>, nettype: Option<NetworkType>) -> Result<Self> {
        let (n_nodes, n_time) = extent(&edges)?;
        let nettype = nettype.unwrap_or_else(|| infer_sparse(&edges));
        let mut network = Self {
            storage: Storage::Sparse(edges),
            nettype,
            n_nodes,
            n_time,
            diagonal: false,
        };
        network.normalise_sparse();
        Ok(network)
    }

    /// Build a sparse network from rows of `[i, j, t]` or `[i, j, t, weight]`
    ///
    /// All rows must have the same length. Indices must be non-negative
    /// integers.
    pub fn from_edgelist(rows: &[Vec<f64>], nettype: Option<NetworkType>) -> Result<Self> {
        let width = rows.first().map_or(3, Vec::len);
        if width != 3 && width != 4 {
            return Err(Error::InvalidInput(format!(
                "edge list rows must have 3 or 4 values, got {width}"
            )));
        }
        let edges = rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                if values.len() != width {
                    return Err(Error::InvalidInput(format!(
                        "edge list row {row} has {} values, expected {width}",
                        values.len()
                    )));
                }
                let weight = if width == 4 { values[3] } else { 1.0 };
                Ok(Edge::new(
                    index(values[0], row)?,
                    index(values[1], row)?,
                    index(values[2], row)?,
                    weight,
                ))
            })
            .collect::<Result<Vec<Edge>>>()?;
        Self::from_edges(edges, nettype)
    }

    /// Grow the network shape to at least `n_nodes` × `n_time`
    #[must_use]
    pub fn with_shape(mut self, n_nodes: usize, n_time: usize) -> Self {
        if self.is_sparse() {
            self.n_nodes = self.n_nodes.max(n_nodes);
            self.n_time = self.n_time.max(n_time);
        } else if n_nodes > self.n_nodes || n_time > self.n_time {
            warn!(n_nodes, n_time, "dense networks keep the shape of their array");
        }
        self
    }

    /// `(N, T)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_nodes, self.n_time)
    }

    pub fn nettype(&self) -> NetworkType {
        self.nettype
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self.storage, Storage::Sparse(_))
    }

    /// Stored edges of a sparse network
    pub fn edges(&self) -> Option<&[Edge]> {
        match &self.storage {
            Storage::Sparse(edges) => Some(edges),
            Storage::Dense(_) => None,
        }
    }

    /// Dense (N, N, T) tensor; unlisted entries are 0
    pub fn to_dense(&self) -> ConnectivityTensor {
        match &self.storage {
            Storage::Dense(tensor) => tensor.clone(),
            Storage::Sparse(edges) => {
                let mut tensor = ConnectivityTensor::zeros(self.n_nodes, self.n_time);
                for e in edges {
                    tensor.set(e.i, e.j, e.t, e.weight);
                    if !self.nettype.is_directed() {
                        tensor.set(e.j, e.i, e.t, e.weight);
                    }
                }
                tensor
            }
        }
    }

    /// Edges with weight above `threshold`
    ///
    /// Undirected networks list each pair once with `i < j`.
    pub fn to_sparse(&self, threshold: f64) -> Vec<Edge> {
        match &self.storage {
            Storage::Sparse(edges) => edges
                .iter()
                .filter(|e| e.weight > threshold)
                .copied()
                .collect(),
            Storage::Dense(tensor) => {
                let directed = self.nettype.is_directed();
                let mut edges = Vec::new();
                for i in 0..self.n_nodes {
                    for j in 0..self.n_nodes {
                        if (i == j && !self.diagonal) || (!directed && j < i) {
                            continue;
                        }
                        for t in 0..self.n_time {
                            let weight = tensor.get(i, j, t);
                            if weight > threshold {
                                edges.push(Edge::new(i, j, t, weight));
                            }
                        }
                    }
                }
                edges
            }
        }
    }

    /// Switch to sparse storage, dropping weights `<= threshold`
    pub fn sparsify(&mut self, threshold: f64) {
        let edges = self.to_sparse(threshold);
        self.storage = Storage::Sparse(edges);
    }

    /// Append edges to a sparse network
    ///
    /// Duplicate contacts of undirected networks keep the first occurrence.
    /// The shape grows to hold the new edges.
    pub fn add_edges(&mut self, new_edges: &[Edge]) -> Result<()> {
        let Storage::Sparse(edges) = &mut self.storage else {
            return Err(Error::Configuration(
                "adding edges is not supported for dense networks".to_string(),
            ));
        };
        let (n_nodes, n_time) = extent(new_edges)?;
        edges.extend_from_slice(new_edges);
        self.n_nodes = self.n_nodes.max(n_nodes);
        self.n_time = self.n_time.max(n_time);
        self.normalise_sparse();
        Ok(())
    }

    /// Remove contacts `(i, j, t)` from a sparse network, returning how many
    /// edges were removed
    ///
    /// In undirected networks `(i, j, t)` and `(j, i, t)` name the same
    /// contact.
    pub fn drop_edges(&mut self, contacts: &[(usize, usize, usize)]) -> Result<usize> {
        let directed = self.nettype.is_directed();
        let Storage::Sparse(edges) = &mut self.storage else {
            return Err(Error::Configuration(
                "dropping edges is not supported for dense networks".to_string(),
            ));
        };
        let before = edges.len();
        edges.retain(|e| {
            !contacts.iter().any(|&(i, j, t)| {
                e.t == t && ((e.i == i && e.j == j) || (!directed && e.i == j && e.j == i))
            })
        });
        Ok(before - edges.len())
    }

    /// Non-zero edges matching `query`
    pub fn edges_when(&self, query: &EdgeQuery) -> Result<Vec<Edge>> {
        match &self.storage {
            Storage::Sparse(edges) => query.filter(edges),
            Storage::Dense(_) => {
                let edges: Vec<Edge> = self
                    .to_sparse(f64::NEG_INFINITY)
                    .into_iter()
                    .filter(|e| e.weight != 0.0)
                    .collect();
                query.filter(&edges)
            }
        }
    }

    /// Replace the network by its binarization
    ///
    /// Storage (dense or sparse) is preserved and the type becomes binary.
    pub fn binarize(&mut self, threshold: Threshold, sign: ThresholdSign) -> Result<()> {
        let binary = binarize(&self.to_dense(), threshold, sign)?;
        self.nettype = self.nettype.binarized();
        self.diagonal = false;
        self.storage = if self.is_sparse() {
            Storage::Sparse(nonzero_edges(&binary, self.nettype))
        } else {
            Storage::Dense(binary)
        };
        if self.is_sparse() {
            self.normalise_sparse();
        }
        Ok(())
    }

    /// Set every self-contact to `value`
    ///
    /// A non-zero value keeps the diagonal in sparse storage and in
    /// [`TemporalNetwork::to_sparse`] output.
    pub fn set_diagonal(&mut self, value: f64) {
        self.diagonal = value != 0.0;
        let (n_nodes, n_time) = (self.n_nodes, self.n_time);
        match &mut self.storage {
            Storage::Dense(tensor) => tensor.set_diagonal(value),
            Storage::Sparse(edges) => {
                edges.retain(|e| !e.is_self_loop());
                if value != 0.0 {
                    for t in 0..n_time {
                        for i in 0..n_nodes {
                            edges.push(Edge::new(i, i, t, value));
                        }
                    }
                }
            }
        }
    }

    /// Whether self-contacts are kept
    pub fn has_diagonal(&self) -> bool {
        self.diagonal
    }

    /// Drop self-loops (unless kept) and, for undirected networks, repeated
    /// unordered pairs at the same time point
    fn normalise_sparse(&mut self) {
        let directed = self.nettype.is_directed();
        let diagonal = self.diagonal;
        let Storage::Sparse(edges) = &mut self.storage else {
            return;
        };
        if !diagonal {
            edges.retain(|e| !e.is_self_loop());
        }
        if !directed {
            let mut seen = std::collections::HashSet::new();
            edges.retain(|e| seen.insert((e.unordered_pair(), e.t)));
            for e in edges.iter_mut() {
                let (i, j) = e.unordered_pair();
                e.i = i;
                e.j = j;
            }
        }
    }
}

fn index(value: f64, row: usize) -> Result<usize> {
    if value < 0.0 || value.fract() != 0.0 || !value.is_finite() {
        return Err(Error::InvalidInput(format!(
            "edge list row {row} has non-integer index {value}"
        )));
    }
    // `as` saturates; usize::MAX itself is left for the extent check
    if value >= usize::MAX as f64 {
        return Err(Error::InvalidInput(format!(
            "edge list row {row} has index {value} beyond the addressable range"
        )));
    }
    Ok(value as usize)
}

/// `(N, T)` needed to hold every edge
fn extent(edges: &[Edge]) -> Result<(usize, usize)> {
    let mut n_nodes = 0;
    let mut n_time = 0;
    for e in edges {
        let (node_bound, time_bound) = e
            .i
            .max(e.j)
            .checked_add(1)
            .zip(e.t.checked_add(1))
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "edge ({}, {}, {}) has an index too large for a network shape",
                    e.i, e.j, e.t
                ))
            })?;
        n_nodes = n_nodes.max(node_bound);
        n_time = n_time.max(time_bound);
    }
    Ok((n_nodes, n_time))
}

/// Weighted unless every weight is 1; undirected only if every contact has
/// a mirror of (nearly) equal weight
fn infer_sparse(edges: &[Edge]) -> NetworkType {
    let binary = edges.iter().all(|e| e.weight == 1.0);
    let mut contacts = HashMap::with_capacity(edges.len());
    for e in edges {
        contacts.insert((e.i, e.j, e.t), e.weight);
    }
    let directed = contacts.iter().any(|(&(i, j, t), &weight)| {
        contacts
            .get(&(j, i, t))
            .map_or(true, |&mirror| (weight - mirror).abs() > SYMMETRY_TOLERANCE)
    });
    NetworkType::new(binary, directed)
}

/// Every non-zero entry, row-major over `(i, j, t)`
fn nonzero_edges(tensor: &ConnectivityTensor, nettype: NetworkType) -> Vec<Edge> {
    let (n, _, w) = tensor.shape();
    let mut edges = Vec::new();
    for i in 0..n {
        for j in 0..n {
            for t in 0..w {
                let v = tensor.get(i, j, t);
                if v != 0.0 {
                    let weight = if nettype.is_binary() { 1.0 } else { v };
                    edges.push(Edge::new(i, j, t, weight));
                }
            }
        }
    }
    edges
}
