//! Node × node × time connectivity tensor

use crate::{Error, Result};
use nalgebra::DMatrix;
use std::ops::{Index, IndexMut};

/// An (N, N, W) stack of association matrices
///
/// Storage is slice-major: all N×N entries of slice 0, then slice 1, and so
/// on, each slice in row-major order. Indexing uses `(i, j, t)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectivityTensor {
    n_nodes: usize,
    n_slices: usize,
    data: Vec<f64>,
}

impl ConnectivityTensor {
    /// Zero-filled tensor
    pub fn zeros(n_nodes: usize, n_slices: usize) -> Self {
        Self {
            n_nodes,
            n_slices,
            data: vec![0.0; n_nodes * n_nodes * n_slices],
        }
    }

    /// Build from flat slice-major data
    pub fn from_vec(n_nodes: usize, n_slices: usize, data: Vec<f64>) -> Result<Self> {
        let expected = n_nodes * n_nodes * n_slices;
        if data.len() != expected {
            return Err(Error::InvalidInput(format!(
                "tensor data has {} values, expected {expected} for shape ({n_nodes}, {n_nodes}, {n_slices})",
                data.len()
            )));
        }
        Ok(Self {
            n_nodes,
            n_slices,
            data,
        })
    }

    /// Stack square matrices along the time axis
    pub fn from_slices(slices: &[DMatrix<f64>]) -> Result<Self> {
        let n = slices.first().map_or(0, |s| s.nrows());
        let mut tensor = Self::zeros(n, slices.len());
        for (t, slice) in slices.iter().enumerate() {
            if slice.nrows() != n || slice.ncols() != n {
                return Err(Error::InvalidInput(format!(
                    "slice {t} has shape ({}, {}), expected ({n}, {n})",
                    slice.nrows(),
                    slice.ncols()
                )));
            }
            tensor.set_slice(t, slice);
        }
        Ok(tensor)
    }

    /// Build element-wise from a function of `(i, j, t)`
    pub fn from_fn<F>(n_nodes: usize, n_slices: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(n_nodes * n_nodes * n_slices);
        for t in 0..n_slices {
            for i in 0..n_nodes {
                for j in 0..n_nodes {
                    data.push(f(i, j, t));
                }
            }
        }
        Self {
            n_nodes,
            n_slices,
            data,
        }
    }

    /// `(N, N, W)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.n_nodes, self.n_nodes, self.n_slices)
    }

    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    pub fn n_slices(&self) -> usize {
        self.n_slices
    }

    #[inline]
    fn offset(&self, i: usize, j: usize, t: usize) -> usize {
        debug_assert!(i < self.n_nodes && j < self.n_nodes && t < self.n_slices);
        (t * self.n_nodes + i) * self.n_nodes + j
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize, t: usize) -> f64 {
        self.data[self.offset(i, j, t)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, t: usize, value: f64) {
        let idx = self.offset(i, j, t);
        self.data[idx] = value;
    }

    /// Copy of the N×N matrix at time `t`
    pub fn slice(&self, t: usize) -> DMatrix<f64> {
        let n = self.n_nodes;
        let start = t * n * n;
        DMatrix::from_row_slice(n, n, &self.data[start..start + n * n])
    }

    pub fn set_slice(&mut self, t: usize, slice: &DMatrix<f64>) {
        for i in 0..self.n_nodes {
            for j in 0..self.n_nodes {
                self.set(i, j, t, slice[(i, j)]);
            }
        }
    }

    /// Time course of edge `(i, j)`
    pub fn edge_series(&self, i: usize, j: usize) -> Vec<f64> {
        (0..self.n_slices).map(|t| self.get(i, j, t)).collect()
    }

    pub fn set_edge_series(&mut self, i: usize, j: usize, series: &[f64]) {
        debug_assert_eq!(series.len(), self.n_slices);
        for (t, &v) in series.iter().enumerate() {
            self.set(i, j, t, v);
        }
    }

    /// Overwrite the diagonal of every slice
    pub fn set_diagonal(&mut self, value: f64) {
        for t in 0..self.n_slices {
            for i in 0..self.n_nodes {
                self.set(i, i, t, value);
            }
        }
    }

    /// Apply `f` to every element in place
    pub fn map_inplace<F: FnMut(f64) -> f64>(&mut self, mut f: F) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Multiply every element by `factor`
    pub fn scale(&mut self, factor: f64) {
        self.map_inplace(|v| v * factor);
    }

    /// Flat slice-major values
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Whether every slice is symmetric within `tolerance`
    ///
    /// NaN entries compare equal to NaN at the mirrored position.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        for t in 0..self.n_slices {
            for i in 0..self.n_nodes {
                for j in (i + 1)..self.n_nodes {
                    let a = self.get(i, j, t);
                    let b = self.get(j, i, t);
                    let same = (a.is_nan() && b.is_nan()) || (a - b).abs() <= tolerance || a == b;
                    if !same {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Upper-triangle index pairs `(i, j)` with `i < j`
    pub fn upper_triangle(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.n_nodes;
        (0..n).flat_map(move |i| ((i + 1)..n).map(move |j| (i, j)))
    }
}

impl Index<(usize, usize, usize)> for ConnectivityTensor {
    type Output = f64;

    fn index(&self, (i, j, t): (usize, usize, usize)) -> &f64 {
        &self.data[self.offset(i, j, t)]
    }
}

impl IndexMut<(usize, usize, usize)> for ConnectivityTensor {
    fn index_mut(&mut self, (i, j, t): (usize, usize, usize)) -> &mut f64 {
        let idx = self.offset(i, j, t);
        &mut self.data[idx]
    }
}
