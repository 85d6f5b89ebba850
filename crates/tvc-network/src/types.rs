//! Network type tags and edges

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tvc_core::{ConnectivityTensor, Error, Result};

/// Absolute tolerance used when testing slices for symmetry
pub const SYMMETRY_TOLERANCE: f64 = 1e-8;

/// Binary/weighted × undirected/directed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// `bu`
    Bu,
    /// `bd`
    Bd,
    /// `wu`
    Wu,
    /// `wd`
    Wd,
}

impl NetworkType {
    pub fn new(binary: bool, directed: bool) -> Self {
        match (binary, directed) {
            (true, false) => NetworkType::Bu,
            (true, true) => NetworkType::Bd,
            (false, false) => NetworkType::Wu,
            (false, true) => NetworkType::Wd,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Bu => "bu",
            NetworkType::Bd => "bd",
            NetworkType::Wu => "wu",
            NetworkType::Wd => "wd",
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, NetworkType::Bu | NetworkType::Bd)
    }

    pub fn is_directed(&self) -> bool {
        matches!(self, NetworkType::Bd | NetworkType::Wd)
    }

    /// Same direction, binary
    pub fn binarized(&self) -> Self {
        NetworkType::new(true, self.is_directed())
    }

    /// Binary if every entry is 0 or 1, undirected if every slice is
    /// symmetric within [`SYMMETRY_TOLERANCE`]
    pub fn infer(tensor: &ConnectivityTensor) -> Self {
        let binary = tensor.values().iter().all(|&v| v == 0.0 || v == 1.0);
        let directed = !tensor.is_symmetric(SYMMETRY_TOLERANCE);
        NetworkType::new(binary, directed)
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bu" => Ok(NetworkType::Bu),
            "bd" => Ok(NetworkType::Bd),
            "wu" => Ok(NetworkType::Wu),
            "wd" => Ok(NetworkType::Wd),
            _ => Err(Error::unknown("nettype", s, &["bu", "bd", "wu", "wd"])),
        }
    }
}

/// One contact: nodes `i`, `j` at time index `t`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub i: usize,
    pub j: usize,
    pub t: usize,
    pub weight: f64,
}

impl Edge {
    pub fn new(i: usize, j: usize, t: usize, weight: f64) -> Self {
        Self { i, j, t, weight }
    }

    /// Binary contact
    pub fn contact(i: usize, j: usize, t: usize) -> Self {
        Self::new(i, j, t, 1.0)
    }

    /// Node pair with the smaller index first
    pub fn unordered_pair(&self) -> (usize, usize) {
        (self.i.min(self.j), self.i.max(self.j))
    }

    pub fn is_self_loop(&self) -> bool {
        self.i == self.j
    }
}
