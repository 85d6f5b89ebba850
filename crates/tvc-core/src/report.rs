//! Provenance report accumulated over one derivation call
//!
//! Every stage (weighting, coupling, post-processing, summary) returns the
//! entries it produced. Entries are merged by value into a
//! [`DerivationReport`]; once appended an entry is never rewritten.

use crate::Result;
use serde::{Deserialize, Serialize};

/// Box-Cox exponent fitted for a single edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeLambda {
    pub i: usize,
    pub j: usize,
    pub lambda: f64,
}

/// Descriptive statistics of a connectivity tensor
///
/// Computed over finite upper-triangle (`i < j`) entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorSummary {
    pub n_nodes: usize,
    pub n_slices: usize,
    pub count: usize,
    pub nan_count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
    /// Mean upper-triangle value of each slice
    pub slice_means: Vec<f64>,
}

/// One step of a derivation, with the parameters it resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum ReportEntry {
    /// Resolved method and input orientation
    Method {
        method: String,
        dimord: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        analysis_id: Option<String>,
    },
    /// Window over time points
    SlidingWindow { windowsize: usize, taper: String },
    /// Density taper applied to a sliding window
    Taper {
        windowsize: usize,
        distribution: String,
        distribution_params: Vec<f64>,
        taper: Vec<f64>,
        taper_window: Vec<f64>,
    },
    /// Leave-one-out weighting (output sign inverted)
    Jackknife { sign_corrected: bool },
    /// Inverse distance weighting between observations
    Distance { metric: String },
    /// Caller-supplied weight matrix
    LiteralWeights { rows: usize, cols: usize },
    /// Coupling of normalized first differences
    TemporalDerivative { windowsize: usize },
    Fisher,
    Boxcox {
        performed: bool,
        shift: f64,
        shifted_to: f64,
        lambda: Vec<EdgeLambda>,
        #[serde(skip_serializing_if = "Option::is_none")]
        failure_reason: Option<String>,
    },
    Standardize { method: String },
    /// Infinities replaced by zero after post-processing
    InfinitiesZeroed { count: usize },
    Summary(TensorSummary),
}

impl ReportEntry {
    /// Short name of the step
    pub fn name(&self) -> &'static str {
        match self {
            ReportEntry::Method { .. } => "method",
            ReportEntry::SlidingWindow { .. } => "sliding_window",
            ReportEntry::Taper { .. } => "taper",
            ReportEntry::Jackknife { .. } => "jackknife",
            ReportEntry::Distance { .. } => "distance",
            ReportEntry::LiteralWeights { .. } => "literal_weights",
            ReportEntry::TemporalDerivative { .. } => "temporal_derivative",
            ReportEntry::Fisher => "fisher",
            ReportEntry::Boxcox { .. } => "boxcox",
            ReportEntry::Standardize { .. } => "standardize",
            ReportEntry::InfinitiesZeroed { .. } => "infinities_zeroed",
            ReportEntry::Summary(_) => "summary",
        }
    }
}

/// Append-only record of a derivation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivationReport {
    entries: Vec<ReportEntry>,
}

impl DerivationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report holding a single entry
    pub fn single(entry: ReportEntry) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Append an entry, returning the extended report
    #[must_use]
    pub fn with(mut self, entry: ReportEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// Append all entries of `other` after the entries of `self`
    #[must_use]
    pub fn merge(mut self, other: DerivationReport) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Step names in the order they were applied
    pub fn steps(&self) -> Vec<&'static str> {
        self.entries.iter().map(ReportEntry::name).collect()
    }

    /// The resolved method name, if a method entry exists
    pub fn method(&self) -> Option<&str> {
        self.entries.iter().find_map(|e| match e {
            ReportEntry::Method { method, .. } => Some(method.as_str()),
            _ => None,
        })
    }

    /// Last entry with the given step name
    pub fn find(&self, step: &str) -> Option<&ReportEntry> {
        self.entries.iter().rev().find(|e| e.name() == step)
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Extend<ReportEntry> for DerivationReport {
    fn extend<I: IntoIterator<Item = ReportEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl FromIterator<ReportEntry> for DerivationReport {
    fn from_iter<I: IntoIterator<Item = ReportEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
