//! Independent derivations over many inputs
//!
//! With the `parallel` feature the inputs are processed on the rayon thread
//! pool; otherwise sequentially. Results are always returned in input order
//! and each input fails or succeeds on its own.

use nalgebra::DMatrix;
use tracing::debug;
use tvc_core::Result;

use crate::config::DeriveConfig;
use crate::derive::{derive, Derivation};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Derive every input with the same configuration
pub fn derive_batch(inputs: &[DMatrix<f64>], config: &DeriveConfig) -> Vec<Result<Derivation>> {
    debug!(inputs = inputs.len(), parallel = cfg!(feature = "parallel"), "batch derivation");

    #[cfg(feature = "parallel")]
    {
        inputs.par_iter().map(|data| derive(data, config)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        inputs.iter().map(|data| derive(data, config)).collect()
    }
}
