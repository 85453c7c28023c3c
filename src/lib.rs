//! Causal-state reconstruction and statistical-complexity filtering for
//! cellular-automaton spacetimes.
//!
//! A spacetime (time rows by space columns of small-alphabet symbols) is
//! scanned coordinate by coordinate: each cell's past light cone yields a
//! signature, each full future light cone a sample. Past signatures are
//! clustered into causal states by the similarity of their mean future
//! vectors, each state is scored with the negative log of its share of
//! signatures, and a grid can then be repainted with per-cell complexity —
//! highlighting defect regions against homogeneous domains.
//!
//! ```no_run
//! use conefield::{paint, Automaton, CausalModel, ComplexityConfig};
//!
//! let mut ca = Automaton::new(110, 100)?;
//! ca.seed_center();
//! let spacetime = ca.evolve(100)?;
//!
//! let model = CausalModel::fit(std::slice::from_ref(&spacetime), &ComplexityConfig::default())?;
//! let complexity = paint(&spacetime, &model);
//! # Ok::<(), conefield::AnalysisError>(())
//! ```

mod causal;
mod corpus;
mod error;
mod grid;
mod lightcone;
mod painter;
mod simulation;

pub use causal::{CausalModel, ComplexityConfig};
pub use corpus::{Corpus, FutureSamples};
pub use error::AnalysisError;
pub use grid::Spacetime;
pub use lightcone::{
    cone_coordinates, full_cone_len, future_sample, past_signature, Direction, Signature,
};
pub use painter::{paint, ComplexityGrid, UNKNOWN};
pub use simulation::Automaton;
