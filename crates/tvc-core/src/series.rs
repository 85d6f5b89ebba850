//! Multivariate time series in canonical `time,node` orientation

use crate::{Error, Result};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dimension order of an input matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DimOrd {
    /// Rows are time points, columns are nodes
    #[default]
    #[serde(rename = "time,node")]
    TimeNode,
    /// Rows are nodes, columns are time points
    #[serde(rename = "node,time")]
    NodeTime,
}

impl DimOrd {
    pub fn as_str(&self) -> &'static str {
        match self {
            DimOrd::TimeNode => "time,node",
            DimOrd::NodeTime => "node,time",
        }
    }
}

impl fmt::Display for DimOrd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DimOrd {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.replace(' ', "").as_str() {
            "time,node" => Ok(DimOrd::TimeNode),
            "node,time" => Ok(DimOrd::NodeTime),
            other => Err(Error::unknown("dimord", other, &["time,node", "node,time"])),
        }
    }
}

/// A real-valued (T, N) matrix of node time courses
///
/// The matrix is always stored as `time,node`; [`DimOrd::NodeTime`] input is
/// transposed on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    data: DMatrix<f64>,
}

impl TimeSeries {
    /// Wrap a matrix, canonicalising its orientation
    ///
    /// Fails if fewer than two nodes or no time points remain after
    /// canonicalisation.
    pub fn new(matrix: DMatrix<f64>, dimord: DimOrd) -> Result<Self> {
        let data = match dimord {
            DimOrd::TimeNode => matrix,
            DimOrd::NodeTime => matrix.transpose(),
        };
        if data.ncols() < 2 {
            return Err(Error::InvalidInput(format!(
                "time series needs at least 2 nodes, got {}",
                data.ncols()
            )));
        }
        if data.nrows() == 0 {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self { data })
    }

    /// Build from nested rows, rejecting ragged input
    pub fn from_rows(rows: &[Vec<f64>], dimord: DimOrd) -> Result<Self> {
        let matrix = matrix_from_rows(rows)?;
        Self::new(matrix, dimord)
    }

    /// Number of time points (T)
    pub fn n_time(&self) -> usize {
        self.data.nrows()
    }

    /// Number of nodes (N)
    pub fn n_nodes(&self) -> usize {
        self.data.ncols()
    }

    /// The canonical (T, N) matrix
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Time course of a single node
    pub fn node(&self, node: usize) -> Vec<f64> {
        self.data.column(node).iter().copied().collect()
    }

    /// Cross-node pattern at a single time point
    pub fn observation(&self, time: usize) -> Vec<f64> {
        self.data.row(time).iter().copied().collect()
    }

    pub fn into_inner(self) -> DMatrix<f64> {
        self.data
    }
}

/// Convert nested rows into a dense matrix
///
/// Every row must have the same length; an empty input yields a 0×0 matrix.
pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<DMatrix<f64>> {
    let ncols = rows.first().map_or(0, Vec::len);
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != ncols) {
        return Err(Error::InvalidInput(format!(
            "row {index} has {} columns, expected {ncols}",
            row.len()
        )));
    }
    Ok(DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j]))
}
