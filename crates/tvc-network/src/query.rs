//! Edge selection by node and time indices

use crate::types::Edge;
use tvc_core::{Error, Result};

/// How the `i`, `j` and `t` conditions of a query combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Logic {
    #[default]
    And,
    Or,
}

/// Filter over the sparse edges of a network
///
/// `ij` matches edges with either endpoint in the set and is always
/// combined with `t` by conjunction. It cannot be given together with `i`
/// or `j`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeQuery {
    pub i: Option<Vec<usize>>,
    pub j: Option<Vec<usize>>,
    pub t: Option<Vec<usize>>,
    pub ij: Option<Vec<usize>>,
    pub logic: Logic,
}

impl EdgeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn i(mut self, nodes: impl Into<Vec<usize>>) -> Self {
        self.i = Some(nodes.into());
        self
    }

    pub fn j(mut self, nodes: impl Into<Vec<usize>>) -> Self {
        self.j = Some(nodes.into());
        self
    }

    pub fn t(mut self, times: impl Into<Vec<usize>>) -> Self {
        self.t = Some(times.into());
        self
    }

    pub fn ij(mut self, nodes: impl Into<Vec<usize>>) -> Self {
        self.ij = Some(nodes.into());
        self
    }

    pub fn logic(mut self, logic: Logic) -> Self {
        self.logic = logic;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.ij.is_some() && (self.i.is_some() || self.j.is_some()) {
            return Err(Error::Configuration(
                "ij cannot be specified along with i or j".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `edge` satisfies the query; an empty query matches everything
    pub fn matches(&self, edge: &Edge) -> bool {
        let within = |set: &Option<Vec<usize>>, v: usize| set.as_ref().map(|s| s.contains(&v));

        if let Some(nodes) = &self.ij {
            let node_hit = nodes.contains(&edge.i) || nodes.contains(&edge.j);
            return node_hit && within(&self.t, edge.t).unwrap_or(true);
        }

        let conditions = [
            within(&self.i, edge.i),
            within(&self.j, edge.j),
            within(&self.t, edge.t),
        ];
        let mut given = conditions.iter().flatten().peekable();
        if given.peek().is_none() {
            return true;
        }
        match self.logic {
            Logic::And => given.all(|&hit| hit),
            Logic::Or => given.any(|&hit| hit),
        }
    }

    /// Edges of `edges` that satisfy the query, in their original order
    pub fn filter(&self, edges: &[Edge]) -> Result<Vec<Edge>> {
        self.validate()?;
        Ok(edges.iter().filter(|e| self.matches(e)).copied().collect())
    }
}
