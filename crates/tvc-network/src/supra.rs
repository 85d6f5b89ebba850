//! Supra-adjacency representation
//!
//! Node `i` at time `t` becomes supra-node `i + N * t`. Intra-slice edges
//! keep their weight; every supra-node is linked to the same node at the
//! next time point with `interslice_weight`.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::network::TemporalNetwork;

/// Edge between two supra-nodes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupraEdge {
    pub i: usize,
    pub j: usize,
    pub weight: f64,
}

impl TemporalNetwork {
    /// Supra-adjacency edge list: intra-slice edges first, then the
    /// inter-slice links `(k, k + N)` for `k < N * (T - 1)`
    pub fn supra_adjacency(&self, interslice_weight: f64) -> Vec<SupraEdge> {
        let (n_nodes, n_time) = self.shape();
        let mut supra: Vec<SupraEdge> = self
            .to_sparse(f64::NEG_INFINITY)
            .into_iter()
            .filter(|e| e.weight != 0.0)
            .map(|e| SupraEdge {
                i: e.i + n_nodes * e.t,
                j: e.j + n_nodes * e.t,
                weight: e.weight,
            })
            .collect();

        let total = n_nodes * n_time;
        supra.extend((0..total.saturating_sub(n_nodes)).map(|k| SupraEdge {
            i: k,
            j: k + n_nodes,
            weight: interslice_weight,
        }));
        supra
    }

    /// Dense (N·T, N·T) supra-adjacency matrix
    ///
    /// Undirected networks produce a symmetric matrix; inter-slice links
    /// are mirrored as well.
    pub fn supra_adjacency_matrix(&self, interslice_weight: f64) -> DMatrix<f64> {
        let (n_nodes, n_time) = self.shape();
        let size = n_nodes * n_time;
        let directed = self.nettype().is_directed();
        let mut matrix = DMatrix::zeros(size, size);
        for e in self.supra_adjacency(interslice_weight) {
            matrix[(e.i, e.j)] = e.weight;
            if !directed {
                matrix[(e.j, e.i)] = e.weight;
            }
        }
        matrix
    }
}
