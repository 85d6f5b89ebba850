//! Weight matrix construction for every weighting scheme

use crate::distance::{spatial_distance, DistanceMetric};
use crate::taper::TaperDistribution;
use crate::window::{jackknife, sliding_window, tapered_sliding_window};
use nalgebra::DMatrix;
use tracing::instrument;
use tvc_core::{DerivationReport, Error, ReportEntry, Result, TimeSeries};

/// How observations are weighted for each connectivity slice
#[derive(Debug)]
pub enum WeightScheme {
    /// Leave-one-out over time points
    Jackknife,
    /// Uniform window of contiguous time points
    SlidingWindow { windowsize: usize },
    /// Window whose profile follows a density
    TaperedSlidingWindow {
        windowsize: usize,
        distribution: TaperDistribution,
    },
    /// Inverse distance between cross-node patterns
    SpatialDistance { metric: DistanceMetric },
    /// Caller-supplied T×T matrix
    Literal(DMatrix<f64>),
}

impl WeightScheme {
    /// Canonical method name
    pub fn name(&self) -> &'static str {
        match self {
            WeightScheme::Jackknife => "jackknife",
            WeightScheme::SlidingWindow { .. } => "slidingwindow",
            WeightScheme::TaperedSlidingWindow { .. } => "taperedslidingwindow",
            WeightScheme::SpatialDistance { .. } => "distance",
            WeightScheme::Literal(_) => "weightmatrix",
        }
    }
}

/// Builds the (W, T) observation weight matrix for a [`WeightScheme`]
#[derive(Debug)]
pub struct WeightMatrixBuilder {
    scheme: WeightScheme,
}

impl WeightMatrixBuilder {
    pub fn new(scheme: WeightScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &WeightScheme {
        &self.scheme
    }

    /// Build the weight matrix for `series`
    ///
    /// Each row is the observation weighting of one connectivity slice. The
    /// returned report holds the resolved parameters of the scheme.
    #[instrument(skip(self, series), fields(scheme = self.scheme.name()))]
    pub fn build(&self, series: &TimeSeries) -> Result<(DMatrix<f64>, DerivationReport)> {
        let n_time = series.n_time();
        match &self.scheme {
            WeightScheme::Jackknife => Ok((
                jackknife(n_time),
                DerivationReport::single(ReportEntry::Jackknife {
                    sign_corrected: true,
                }),
            )),
            WeightScheme::SlidingWindow { windowsize } => {
                let weights = sliding_window(n_time, *windowsize)?;
                let entry = ReportEntry::SlidingWindow {
                    windowsize: *windowsize,
                    taper: "untapered/uniform".to_string(),
                };
                Ok((weights, DerivationReport::single(entry)))
            }
            WeightScheme::TaperedSlidingWindow {
                windowsize,
                distribution,
            } => {
                let (weights, entry) = tapered_sliding_window(n_time, *windowsize, distribution)?;
                Ok((weights, DerivationReport::single(entry)))
            }
            WeightScheme::SpatialDistance { metric } => Ok((
                spatial_distance(series, *metric),
                DerivationReport::single(ReportEntry::Distance {
                    metric: metric.name().to_string(),
                }),
            )),
            WeightScheme::Literal(matrix) => {
                check_literal(matrix, n_time)?;
                let entry = ReportEntry::LiteralWeights {
                    rows: matrix.nrows(),
                    cols: matrix.ncols(),
                };
                Ok((matrix.clone(), DerivationReport::single(entry)))
            }
        }
    }
}

fn check_literal(matrix: &DMatrix<f64>, n_time: usize) -> Result<()> {
    if matrix.nrows() != matrix.ncols() {
        return Err(Error::Configuration(format!(
            "weight matrix should be square, got ({}, {})",
            matrix.nrows(),
            matrix.ncols()
        )));
    }
    if matrix.nrows() != n_time {
        return Err(Error::size_mismatch(
            n_time,
            matrix.nrows(),
            "weight matrix dimension vs number of time points",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvc_core::DimOrd;

    fn series(n_time: usize) -> TimeSeries {
        let m = DMatrix::from_fn(n_time, 3, |t, n| ((t * 7 + n * 3) % 5) as f64);
        TimeSeries::new(m, DimOrd::TimeNode).unwrap()
    }

    #[test]
    fn test_jackknife_report() {
        let builder = WeightMatrixBuilder::new(WeightScheme::Jackknife);
        let (w, report) = builder.build(&series(5)).unwrap();
        assert_eq!(w.shape(), (5, 5));
        assert_eq!(report.steps(), vec!["jackknife"]);
    }

    #[test]
    fn test_sliding_window_too_large() {
        let builder = WeightMatrixBuilder::new(WeightScheme::SlidingWindow { windowsize: 11 });
        assert!(matches!(
            builder.build(&series(10)),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_literal_checks() {
        let ok = WeightMatrixBuilder::new(WeightScheme::Literal(DMatrix::from_element(6, 6, 1.0)));
        assert_eq!(ok.build(&series(6)).unwrap().0.shape(), (6, 6));

        let not_square =
            WeightMatrixBuilder::new(WeightScheme::Literal(DMatrix::from_element(6, 5, 1.0)));
        assert!(matches!(
            not_square.build(&series(6)),
            Err(Error::Configuration(_))
        ));

        let wrong_size =
            WeightMatrixBuilder::new(WeightScheme::Literal(DMatrix::from_element(4, 4, 1.0)));
        assert!(matches!(
            wrong_size.build(&series(6)),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_tapered_report_records_taper() {
        let distribution = TaperDistribution::new("norm", &[0.0, 1.5]).unwrap();
        let builder = WeightMatrixBuilder::new(WeightScheme::TaperedSlidingWindow {
            windowsize: 4,
            distribution,
        });
        let (w, report) = builder.build(&series(9)).unwrap();
        assert_eq!(w.shape(), (6, 9));
        match report.find("taper") {
            Some(ReportEntry::Taper { taper, distribution, .. }) => {
                assert_eq!(taper.len(), 4);
                assert_eq!(distribution, "norm");
            }
            other => panic!("unexpected entry {other:?}"),
        }
    }
}
