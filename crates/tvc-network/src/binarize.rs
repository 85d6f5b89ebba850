//! Thresholding weighted networks into binary ones

use std::cmp::Ordering;
use std::str::FromStr;
use tvc_core::{ConnectivityTensor, Error, Result};

/// Which side of the weight distribution is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdSign {
    #[default]
    Pos,
    Neg,
    Both,
}

impl FromStr for ThresholdSign {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pos" => Ok(ThresholdSign::Pos),
            "neg" => Ok(ThresholdSign::Neg),
            "both" => Ok(ThresholdSign::Both),
            _ => Err(Error::unknown("threshold sign", s, &["pos", "neg", "both"])),
        }
    }
}

/// Binarization rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Keep the top fraction (`0..=1`) of every edge time series
    Percent(f64),
    /// Keep entries beyond a magnitude
    Magnitude(f64),
}

impl Threshold {
    fn validate(&self) -> Result<()> {
        match *self {
            Threshold::Percent(level) if !(0.0..=1.0).contains(&level) => Err(
                Error::Configuration(format!("percent threshold must be in [0, 1], got {level}")),
            ),
            Threshold::Magnitude(level) if level.is_nan() => Err(Error::Configuration(
                "magnitude threshold must not be NaN".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Binary tensor selected by `threshold`; the diagonal is always 0
pub fn binarize(
    tensor: &ConnectivityTensor,
    threshold: Threshold,
    sign: ThresholdSign,
) -> Result<ConnectivityTensor> {
    threshold.validate()?;
    let mut out = match threshold {
        Threshold::Percent(level) => binarize_percent(tensor, level, sign),
        Threshold::Magnitude(level) => binarize_magnitude(tensor, level, sign),
    };
    out.set_diagonal(0.0);
    Ok(out)
}

/// Per edge, mark the `floor(W * level)` time points ranking highest
///
/// Ranking is by value (`Pos`), negated value (`Neg`) or absolute value
/// (`Both`). NaN never ranks.
fn binarize_percent(tensor: &ConnectivityTensor, level: f64, sign: ThresholdSign) -> ConnectivityTensor {
    let (n, _, w) = tensor.shape();
    let keep = (w as f64 * level).floor() as usize;
    let mut out = ConnectivityTensor::zeros(n, w);

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let mut ranked: Vec<(usize, f64)> = tensor
                .edge_series(i, j)
                .into_iter()
                .map(|v| match sign {
                    ThresholdSign::Pos => v,
                    ThresholdSign::Neg => -v,
                    ThresholdSign::Both => v.abs(),
                })
                .enumerate()
                .filter(|(_, v)| !v.is_nan())
                .collect();
            ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
            for &(t, _) in ranked.iter().take(keep) {
                out.set(i, j, t, 1.0);
            }
        }
    }
    out
}

/// Mark entries above `level` (`Pos`), below `-level` (`Neg`) or with
/// magnitude above `level` (`Both`)
fn binarize_magnitude(tensor: &ConnectivityTensor, level: f64, sign: ThresholdSign) -> ConnectivityTensor {
    let mut out = tensor.clone();
    out.map_inplace(|v| {
        let hit = match sign {
            ThresholdSign::Pos => v > level,
            ThresholdSign::Neg => v < -level,
            ThresholdSign::Both => v.abs() > level,
        };
        if hit {
            1.0
        } else {
            0.0
        }
    });
    out
}
