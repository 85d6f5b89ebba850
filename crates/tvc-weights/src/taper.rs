//! Density tapers for tapered sliding windows
//!
//! A taper is a probability density evaluated at `windowsize` evenly spaced
//! points centred on zero. Distributions are looked up in a fixed registry;
//! parameters follow the usual `(shape..., loc, scale)` convention, with
//! `loc` defaulting to 0 and `scale` to 1. The density at `x` is
//! `pdf_std((x - loc) / scale) / scale` where `pdf_std` is the standardised
//! density for the given shape parameters.

use statrs::distribution::{
    Beta, Cauchy, ChiSquared, Continuous, Exp, Gamma, Laplace, LogNormal, Normal, Pareto,
    StudentsT, Triangular, Uniform, Weibull,
};
use statrs::StatsError;
use tvc_core::{Error, Result};

type StandardDensity = Box<dyn Continuous<f64, f64>>;
type Constructor = fn(&[f64]) -> std::result::Result<StandardDensity, StatsError>;

struct DistributionEntry {
    name: &'static str,
    shape_params: usize,
    standard: Constructor,
}

static REGISTRY: &[DistributionEntry] = &[
    DistributionEntry { name: "norm", shape_params: 0, standard: standard_normal },
    DistributionEntry { name: "expon", shape_params: 0, standard: standard_exponential },
    DistributionEntry { name: "uniform", shape_params: 0, standard: standard_uniform },
    DistributionEntry { name: "cauchy", shape_params: 0, standard: standard_cauchy },
    DistributionEntry { name: "laplace", shape_params: 0, standard: standard_laplace },
    DistributionEntry { name: "t", shape_params: 1, standard: students_t },
    DistributionEntry { name: "gamma", shape_params: 1, standard: gamma },
    DistributionEntry { name: "lognorm", shape_params: 1, standard: lognormal },
    DistributionEntry { name: "chi2", shape_params: 1, standard: chi_squared },
    DistributionEntry { name: "weibull_min", shape_params: 1, standard: weibull },
    DistributionEntry { name: "triang", shape_params: 1, standard: triangular },
    DistributionEntry { name: "pareto", shape_params: 1, standard: pareto },
    DistributionEntry { name: "beta", shape_params: 2, standard: beta },
];

fn standard_normal(_: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(Normal::new(0.0, 1.0)?))
}

fn standard_exponential(_: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(Exp::new(1.0)?))
}

fn standard_uniform(_: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(Uniform::new(0.0, 1.0)?))
}

fn standard_cauchy(_: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(Cauchy::new(0.0, 1.0)?))
}

fn standard_laplace(_: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(Laplace::new(0.0, 1.0)?))
}

fn students_t(shape: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(StudentsT::new(0.0, 1.0, shape[0])?))
}

fn gamma(shape: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(Gamma::new(shape[0], 1.0)?))
}

fn lognormal(shape: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(LogNormal::new(0.0, shape[0])?))
}

fn chi_squared(shape: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(ChiSquared::new(shape[0])?))
}

fn weibull(shape: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(Weibull::new(shape[0], 1.0)?))
}

fn triangular(shape: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(Triangular::new(0.0, 1.0, shape[0])?))
}

fn pareto(shape: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(Pareto::new(1.0, shape[0])?))
}

fn beta(shape: &[f64]) -> std::result::Result<StandardDensity, StatsError> {
    Ok(Box::new(Beta::new(shape[0], shape[1])?))
}

/// Names accepted by [`TaperDistribution::new`]
pub fn known_distributions() -> Vec<&'static str> {
    REGISTRY.iter().map(|e| e.name).collect()
}

/// A named density with resolved parameters
pub struct TaperDistribution {
    name: &'static str,
    params: Vec<f64>,
    loc: f64,
    scale: f64,
    density: StandardDensity,
}

impl std::fmt::Debug for TaperDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaperDistribution")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("loc", &self.loc)
            .field("scale", &self.scale)
            .finish()
    }
}

impl TaperDistribution {
    /// Resolve a distribution by name
    ///
    /// `params` holds the shape parameters followed by optional `loc` and
    /// `scale`. Fails with [`Error::Configuration`] for an unknown name, a
    /// parameter count outside `shape..=shape + 2`, a non-positive scale, or
    /// shape parameters the distribution rejects.
    pub fn new(name: &str, params: &[f64]) -> Result<Self> {
        let entry = REGISTRY
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| Error::unknown("distribution", name, &known_distributions()))?;

        let shape = entry.shape_params;
        if params.len() < shape || params.len() > shape + 2 {
            return Err(Error::Configuration(format!(
                "distribution '{}' takes {} shape parameter(s) plus optional loc and scale, got {} parameter(s)",
                entry.name,
                shape,
                params.len()
            )));
        }

        let loc = params.get(shape).copied().unwrap_or(0.0);
        let scale = params.get(shape + 1).copied().unwrap_or(1.0);
        if !loc.is_finite() {
            return Err(Error::Configuration(format!(
                "distribution '{}' requires a finite loc, got {loc}",
                entry.name
            )));
        }
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(Error::Configuration(format!(
                "distribution '{}' requires a positive scale, got {scale}",
                entry.name
            )));
        }

        let density = (entry.standard)(&params[..shape]).map_err(|e| {
            Error::Configuration(format!(
                "invalid parameters {:?} for distribution '{}': {e}",
                &params[..shape],
                entry.name
            ))
        })?;

        Ok(Self {
            name: entry.name,
            params: params.to_vec(),
            loc,
            scale,
            density,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parameters as supplied by the caller
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Density at `x`
    pub fn pdf(&self, x: f64) -> f64 {
        self.density.pdf((x - self.loc) / self.scale) / self.scale
    }

    /// Density at every point of `xs`
    pub fn evaluate(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.pdf(x)).collect()
    }
}

/// Abscissa of a taper: `windowsize` unit-spaced points centred on zero
///
/// A window of 5 gives `[-2, -1, 0, 1, 2]`; a window of 4 gives
/// `[-1.5, -0.5, 0.5, 1.5]`.
pub fn taper_window(windowsize: usize) -> Vec<f64> {
    let start = -((windowsize as f64) - 1.0) / 2.0;
    (0..windowsize).map(|i| start + i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_taper_window() {
        assert_eq!(taper_window(5), vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(taper_window(4), vec![-1.5, -0.5, 0.5, 1.5]);
        assert_eq!(taper_window(1), vec![0.0]);
    }

    #[test]
    fn test_normal_loc_scale() {
        let dist = TaperDistribution::new("norm", &[0.0, 2.0]).unwrap();
        let expected = 1.0 / (2.0 * (2.0 * PI).sqrt());
        assert_abs_diff_eq!(dist.pdf(0.0), expected, epsilon = 1e-12);

        let shifted = TaperDistribution::new("norm", &[3.0, 2.0]).unwrap();
        assert_abs_diff_eq!(shifted.pdf(3.0), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_defaults_are_standard() {
        let dist = TaperDistribution::new("norm", &[]).unwrap();
        assert_abs_diff_eq!(dist.pdf(0.0), 1.0 / (2.0 * PI).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_exponential_support() {
        let dist = TaperDistribution::new("expon", &[0.0, 1.0]).unwrap();
        assert_eq!(dist.pdf(-1.0), 0.0);
        assert_abs_diff_eq!(dist.pdf(1.0), (-1.0f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_shape_parameter_distributions() {
        let t = TaperDistribution::new("t", &[3.0]).unwrap();
        assert!(t.pdf(0.0) > t.pdf(1.0));

        let b = TaperDistribution::new("beta", &[2.0, 2.0, -0.5]).unwrap();
        // Beta(2,2) on [-0.5, 0.5] peaks at 0 with density 1.5
        assert_abs_diff_eq!(b.pdf(0.0), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_distribution() {
        let err = TaperDistribution::new("notadist", &[0.0, 1.0]).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("norm"));
    }

    #[test]
    fn test_parameter_count_mismatch() {
        assert!(matches!(
            TaperDistribution::new("norm", &[0.0, 1.0, 2.0]),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            TaperDistribution::new("beta", &[2.0]),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_scale_and_shape() {
        assert!(matches!(
            TaperDistribution::new("norm", &[0.0, 0.0]),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            TaperDistribution::new("gamma", &[-1.0]),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_registry_names_resolve() {
        for name in known_distributions() {
            let shape = match name {
                "beta" => vec![2.0, 3.0],
                "triang" => vec![0.5],
                "t" | "gamma" | "lognorm" | "chi2" | "weibull_min" | "pareto" => vec![2.0],
                _ => vec![],
            };
            let dist = TaperDistribution::new(name, &shape).unwrap();
            assert_eq!(dist.name(), name);
        }
    }
}
