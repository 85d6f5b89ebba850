//! Derivation configuration
//!
//! [`DeriveConfig`] is the loosely typed, serde-deserialisable form callers
//! supply (typically parsed from JSON). [`DeriveConfig::method`] resolves it
//! once into a closed [`Method`], normalising aliases and checking that every
//! parameter the method needs is present.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tvc_core::{matrix_from_rows, DimOrd, Error, Result};
use tvc_weights::{DistanceMetric, TaperDistribution, WeightMatrixBuilder, WeightScheme};

/// Method names accepted in [`DeriveConfig::method`]
pub const METHOD_NAMES: &[&str] = &[
    "jackknife",
    "slidingwindow",
    "taperedslidingwindow",
    "distance",
    "temporalderivative",
];

/// Method as supplied by the caller: a name or a literal weight matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MethodSpec {
    Name(String),
    Matrix(Vec<Vec<f64>>),
}

impl From<&str> for MethodSpec {
    fn from(name: &str) -> Self {
        MethodSpec::Name(name.to_string())
    }
}

impl From<String> for MethodSpec {
    fn from(name: String) -> Self {
        MethodSpec::Name(name)
    }
}

impl From<Vec<Vec<f64>>> for MethodSpec {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        MethodSpec::Matrix(rows)
    }
}

impl From<&DMatrix<f64>> for MethodSpec {
    fn from(matrix: &DMatrix<f64>) -> Self {
        MethodSpec::Matrix(
            matrix
                .row_iter()
                .map(|row| row.iter().copied().collect())
                .collect(),
        )
    }
}

/// Configuration of one derivation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeriveConfig {
    pub method: MethodSpec,
    #[serde(default)]
    pub dimord: DimOrd,
    #[serde(default)]
    pub windowsize: Option<usize>,
    /// Metric name for the distance method
    #[serde(default)]
    pub distance: Option<String>,
    /// Distribution name for the tapered sliding window
    #[serde(default)]
    pub distribution: Option<String>,
    /// Shape parameters, then optional loc and scale
    #[serde(default)]
    pub distribution_params: Vec<f64>,
    /// `+`-delimited post-processing transforms, `"no"` for none
    #[serde(default = "default_postpro")]
    pub postpro: String,
    /// Append a descriptive summary to the derivation report
    #[serde(default)]
    pub report: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<String>,
}

fn default_postpro() -> String {
    "no".to_string()
}

impl DeriveConfig {
    pub fn new(method: impl Into<MethodSpec>) -> Self {
        Self {
            method: method.into(),
            dimord: DimOrd::default(),
            windowsize: None,
            distance: None,
            distribution: None,
            distribution_params: Vec::new(),
            postpro: default_postpro(),
            report: false,
            analysis_id: None,
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_dimord(mut self, dimord: DimOrd) -> Self {
        self.dimord = dimord;
        self
    }

    pub fn with_windowsize(mut self, windowsize: usize) -> Self {
        self.windowsize = Some(windowsize);
        self
    }

    pub fn with_distance(mut self, metric: impl Into<String>) -> Self {
        self.distance = Some(metric.into());
        self
    }

    pub fn with_distribution(mut self, name: impl Into<String>, params: Vec<f64>) -> Self {
        self.distribution = Some(name.into());
        self.distribution_params = params;
        self
    }

    pub fn with_postpro(mut self, transforms: impl Into<String>) -> Self {
        self.postpro = transforms.into();
        self
    }

    pub fn with_report(mut self, report: bool) -> Self {
        self.report = report;
        self
    }

    pub fn with_analysis_id(mut self, id: impl Into<String>) -> Self {
        self.analysis_id = Some(id.into());
        self
    }

    /// Resolve the method and its parameters
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] for an unknown method, distribution or
    /// metric, or a parameter the method needs but the configuration lacks.
    /// [`Error::InvalidInput`] for a ragged literal matrix.
    pub fn method(&self) -> Result<Method> {
        let name = match &self.method {
            MethodSpec::Matrix(rows) => {
                return Ok(Method::weighted(WeightScheme::Literal(matrix_from_rows(
                    rows,
                )?)))
            }
            MethodSpec::Name(name) => name,
        };

        match canonical_method(name) {
            Some("jackknife") => Ok(Method::weighted(WeightScheme::Jackknife)),
            Some("slidingwindow") => Ok(Method::weighted(WeightScheme::SlidingWindow {
                windowsize: self.require_windowsize("slidingwindow")?,
            })),
            Some("taperedslidingwindow") => {
                let windowsize = self.require_windowsize("taperedslidingwindow")?;
                let distribution = self
                    .distribution
                    .as_deref()
                    .ok_or_else(|| Error::missing_parameter("distribution", "taperedslidingwindow"))?;
                Ok(Method::weighted(WeightScheme::TaperedSlidingWindow {
                    windowsize,
                    distribution: TaperDistribution::new(distribution, &self.distribution_params)?,
                }))
            }
            Some("distance") => {
                let metric = self
                    .distance
                    .as_deref()
                    .ok_or_else(|| Error::missing_parameter("distance", "distance"))?;
                Ok(Method::weighted(WeightScheme::SpatialDistance {
                    metric: metric.parse::<DistanceMetric>()?,
                }))
            }
            Some("temporalderivative") => Ok(Method::TemporalDerivative {
                windowsize: self.require_windowsize("temporalderivative")?,
            }),
            _ => Err(Error::unknown("method", name, METHOD_NAMES)),
        }
    }

    fn require_windowsize(&self, method: &str) -> Result<usize> {
        self.windowsize
            .ok_or_else(|| Error::missing_parameter("windowsize", method))
    }
}

/// Map every accepted spelling of a method onto its canonical name
fn canonical_method(name: &str) -> Option<&'static str> {
    match name.trim().to_ascii_lowercase().as_str() {
        "jackknife" => Some("jackknife"),
        "slidingwindow" | "sliding window" => Some("slidingwindow"),
        "taperedslidingwindow" | "tapered sliding window" => Some("taperedslidingwindow"),
        "distance" | "spatial distance" | "spatialdistance" | "node distance"
        | "nodedistance" => Some("distance"),
        "temporalderivative" | "temporal derivative" => Some("temporalderivative"),
        _ => None,
    }
}

/// A fully resolved derivation method
#[derive(Debug)]
pub enum Method {
    /// Weighted Pearson correlation under an observation weighting
    Weighted(WeightMatrixBuilder),
    /// Moving average of products of normalised first differences
    TemporalDerivative { windowsize: usize },
}

impl Method {
    pub fn weighted(scheme: WeightScheme) -> Self {
        Method::Weighted(WeightMatrixBuilder::new(scheme))
    }

    /// Canonical method name, as recorded in the report
    pub fn name(&self) -> &'static str {
        match self {
            Method::Weighted(builder) => builder.scheme().name(),
            Method::TemporalDerivative { .. } => "temporalderivative",
        }
    }
}
