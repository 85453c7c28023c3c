use thiserror::Error;

/// Errors surfaced by grid validation and pipeline configuration.
///
/// Numerical edge cases inside clustering and scoring are not errors: they
/// are recovered locally with guard values (see `causal`) or the painter's
/// sentinel, so a scan never aborts halfway through a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// A grid with zero rows or zero columns has no coordinates to scan.
    #[error("spacetime must have at least one row and one column")]
    EmptyGrid,

    /// All rows of a spacetime must have the same width.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Light cones are undefined for depth zero.
    #[error("light-cone depth must be at least 1, got {0}")]
    InvalidDepth(usize),

    /// Model fitting was asked to run on an empty set of spacetimes.
    #[error("no spacetimes provided, nothing to fit")]
    NoInput,
}
