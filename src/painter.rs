use rayon::prelude::*;

use crate::causal::CausalModel;
use crate::grid::Spacetime;
use crate::lightcone::past_signature;

/// Sentinel painted where a coordinate's past signature never appeared in
/// the training corpus. Distinguishable from any real score, which is a
/// finite non-negative `-ln(probability)`.
pub const UNKNOWN: f64 = f64::NEG_INFINITY;

/// A spacetime-shaped grid of statistical-complexity scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexityGrid {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl ComplexityGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Score at time `t`, column `x` (column wraps like the input grid).
    pub fn get(&self, t: usize, x: usize) -> f64 {
        debug_assert!(t < self.height);
        self.values[t * self.width + x % self.width]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Fraction of cells carrying the `UNKNOWN` sentinel.
    pub fn unknown_fraction(&self) -> f64 {
        let unknown = self.values.iter().filter(|&&v| v == UNKNOWN).count();
        unknown as f64 / self.values.len() as f64
    }

    /// Largest finite score, if any cell has one.
    pub fn max_finite(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |best, v| Some(best.map_or(v, |b: f64| b.max(v))))
    }
}

/// Annotate every coordinate of `spacetime` with the complexity of the
/// causal state owning its past-light-cone signature.
///
/// The grid painted need not be a grid the model was fitted on; coordinates
/// whose recomputed signature the model has never seen get `UNKNOWN`. Cone
/// geometry (depth, spread rate) is taken from the model so training and
/// application can never disagree.
pub fn paint(spacetime: &Spacetime, model: &CausalModel) -> ComplexityGrid {
    let depth = model.depth();
    let spread_rate = model.spread_rate();

    let rows: Vec<Vec<f64>> = (0..spacetime.height())
        .into_par_iter()
        .map(|t| {
            (0..spacetime.width())
                .map(|x| {
                    let signature = past_signature(spacetime, t, x, depth, spread_rate);
                    model.complexity_of(&signature).unwrap_or(UNKNOWN)
                })
                .collect()
        })
        .collect();

    ComplexityGrid {
        width: spacetime.width(),
        height: spacetime.height(),
        values: rows.concat(),
    }
}
