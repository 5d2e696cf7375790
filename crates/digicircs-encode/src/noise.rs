//! Uniform noise on multi-hot tensors, and its removal.
//!
//! Noise is added to the indicator cells only; the parameter column is left
//! alone when parameters are encoded. Hot cells saturate at 1 and cold cells
//! stay strictly below 1, so [`remove_noise`] recovers the original
//! indicators for any noise bound.

use ndarray::{Array, Axis, Dimension};

use digicircs_qstr::RandomSource;

/// Largest `f64` below 1.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Add independent `U[0, upper_bound]` noise to every indicator cell.
///
/// One value is drawn per cell, parameter cells included, in row-major
/// order. A seeded `rng` restarts from its seed first.
pub fn add_noise<D: Dimension>(
    mhe: &Array<f64, D>,
    upper_bound: f64,
    encode_params: bool,
    rng: &mut RandomSource,
) -> Array<f64, D> {
    rng.reseed();
    let mut out = mhe.clone();
    let Some(last) = out.ndim().checked_sub(1) else {
        return out;
    };

    for mut lane in out.lanes_mut(Axis(last)) {
        let param_col = lane.len().checked_sub(1).filter(|_| encode_params);
        for (j, cell) in lane.iter_mut().enumerate() {
            let noise = upper_bound * rng.uniform();
            if Some(j) == param_col {
                continue;
            }
            let ceiling = if *cell >= 1.0 { 1.0 } else { BELOW_ONE };
            *cell = (*cell + noise).min(ceiling);
        }
    }
    out
}

/// Truncate every indicator cell to an integer.
pub fn remove_noise<D: Dimension>(mhe: &Array<f64, D>, encode_params: bool) -> Array<f64, D> {
    let mut out = mhe.clone();
    let Some(last) = out.ndim().checked_sub(1) else {
        return out;
    };

    for mut lane in out.lanes_mut(Axis(last)) {
        let n = lane.len();
        let indicators = if encode_params { n.saturating_sub(1) } else { n };
        for cell in lane.iter_mut().take(indicators) {
            *cell = cell.trunc();
        }
    }
    out
}
