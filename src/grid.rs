use rand::Rng;

use crate::error::AnalysisError;

/// A cellular-automaton spacetime: `height` rows of evolution (time) by
/// `width` columns (space), symbols from a small non-negative alphabet
/// (binary in practice). Row-major, immutable once handed to the analysis
/// pipeline.
///
/// The space axis is toroidal: column accessors wrap modulo `width`. The
/// time axis does not wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spacetime {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Spacetime {
    /// An all-zero spacetime of the given shape.
    pub fn new(height: usize, width: usize) -> Result<Self, AnalysisError> {
        if height == 0 || width == 0 {
            return Err(AnalysisError::EmptyGrid);
        }
        Ok(Self {
            width,
            height,
            cells: vec![0; height * width],
        })
    }

    /// Build a spacetime from time-ordered rows, validating the shape up
    /// front (ragged or empty input is rejected, never partially processed).
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, AnalysisError> {
        let height = rows.len();
        if height == 0 || rows[0].is_empty() {
            return Err(AnalysisError::EmptyGrid);
        }
        let width = rows[0].len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(AnalysisError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            cells: rows.concat(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Symbol at time `t`, column `x`. The column wraps toroidally; `t` must
    /// be in range (the time axis has real boundaries).
    pub fn get(&self, t: usize, x: usize) -> u8 {
        debug_assert!(t < self.height);
        self.cells[t * self.width + x % self.width]
    }

    /// Set a symbol (column wraps). Used by the simulator and tests; grids
    /// under analysis are never mutated.
    pub fn set(&mut self, t: usize, x: usize, value: u8) {
        debug_assert!(t < self.height);
        self.cells[t * self.width + x % self.width] = value;
    }

    /// One full time row.
    pub fn row(&self, t: usize) -> &[u8] {
        &self.cells[t * self.width..(t + 1) * self.width]
    }

    /// Fill with random binary symbols at the given density.
    pub fn randomize<R: Rng>(&mut self, density: f64, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = u8::from(rng.gen_range(0.0..1.0) < density);
        }
    }

    /// Count non-zero cells.
    pub fn population(&self) -> u64 {
        self.cells.iter().map(|&c| u64::from(c)).sum()
    }
}
