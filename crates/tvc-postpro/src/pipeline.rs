//! Ordered post-processing pipeline
//!
//! Transform names are joined with `+` and applied left to right, e.g.
//! `"fisher+boxcox+standardize"`. `"no"` or an empty string selects no
//! transforms.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};
use tvc_core::{ConnectivityTensor, DerivationReport, Error, ReportEntry, Result};

use crate::boxcox::boxcox;
use crate::fisher::{fisher, zero_infinities};
use crate::standardize::standardize;

/// A single post-processing transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    Fisher,
    Boxcox,
    Standardize,
}

impl Transform {
    pub const ALL: [Transform; 3] = [Transform::Fisher, Transform::Boxcox, Transform::Standardize];

    pub fn name(&self) -> &'static str {
        match self {
            Transform::Fisher => "fisher",
            Transform::Boxcox => "boxcox",
            Transform::Standardize => "standardize",
        }
    }

    /// Apply the transform in place
    pub fn apply(&self, tensor: &mut ConnectivityTensor) -> ReportEntry {
        match self {
            Transform::Fisher => fisher(tensor),
            Transform::Boxcox => boxcox(tensor),
            Transform::Standardize => standardize(tensor),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Transform::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Transform::ALL.iter().map(Transform::name).collect();
                Error::unknown("postpro transform", s.trim(), &known)
            })
    }
}

/// Parsed sequence of transforms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    steps: Vec<Transform>,
}

impl Pipeline {
    /// Parse a `+`-delimited transform list
    pub fn parse(transforms: &str) -> Result<Self> {
        let trimmed = transforms.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("no") {
            return Ok(Self::default());
        }
        let steps = trimmed
            .split('+')
            .map(str::parse)
            .collect::<Result<Vec<Transform>>>()?;
        Ok(Self { steps })
    }

    pub fn new(steps: Vec<Transform>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Transform] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every transform in order, then replace ±∞ with 0
    ///
    /// An empty pipeline leaves the tensor and report untouched.
    pub fn run(&self, tensor: &mut ConnectivityTensor) -> DerivationReport {
        let mut report = DerivationReport::new();
        if self.steps.is_empty() {
            return report;
        }
        for step in &self.steps {
            debug!(transform = step.name(), "applying post-processing step");
            report.push(step.apply(tensor));
        }
        let count = zero_infinities(tensor);
        if count > 0 {
            debug!(count, "zeroed infinite values");
            report.push(ReportEntry::InfinitiesZeroed { count });
        }
        report
    }
}

impl FromStr for Pipeline {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Pipeline::parse(s)
    }
}

/// Apply the `+`-delimited `transforms` to `tensor`
///
/// The entries of every applied step are appended to `report`.
///
/// # Errors
///
/// [`Error::Configuration`] if any transform name is unknown. Nothing is
/// applied in that case.
#[instrument(skip(tensor, report), fields(shape = ?tensor.shape()))]
pub fn postprocess(
    mut tensor: ConnectivityTensor,
    transforms: &str,
    report: DerivationReport,
) -> Result<(ConnectivityTensor, DerivationReport)> {
    let pipeline = Pipeline::parse(transforms)?;
    let steps = pipeline.run(&mut tensor);
    Ok((tensor, report.merge(steps)))
}
