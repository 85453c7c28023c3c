use rand::Rng;

use crate::error::AnalysisError;
use crate::grid::Spacetime;

/// A one-dimensional elementary cellular automaton (Wolfram rule numbering,
/// 0-255) on a toroidal lattice. Produces the spacetimes the analysis
/// pipeline consumes.
#[derive(Debug, Clone)]
pub struct Automaton {
    rule: u8,
    cells: Vec<u8>,
}

impl Automaton {
    /// A dead lattice of the given width.
    pub fn new(rule: u8, width: usize) -> Result<Self, AnalysisError> {
        if width == 0 {
            return Err(AnalysisError::EmptyGrid);
        }
        Ok(Self {
            rule,
            cells: vec![0; width],
        })
    }

    /// Start from an explicit initial row.
    pub fn from_row(rule: u8, cells: Vec<u8>) -> Result<Self, AnalysisError> {
        if cells.is_empty() {
            return Err(AnalysisError::EmptyGrid);
        }
        Ok(Self { rule, cells })
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    pub fn rule(&self) -> u8 {
        self.rule
    }

    /// Clear the lattice and set a single live cell at the center.
    pub fn seed_center(&mut self) {
        self.cells.fill(0);
        let mid = self.cells.len() / 2;
        self.cells[mid] = 1;
    }

    /// Fill the lattice with random live cells at the given density.
    pub fn randomize<R: Rng>(&mut self, density: f64, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = u8::from(rng.gen_range(0.0..1.0) < density);
        }
    }

    /// Advance one generation. Neighborhoods wrap toroidally; any non-zero
    /// symbol counts as live when indexing the rule table.
    pub fn step(&mut self) {
        let w = self.cells.len();
        let mut next = vec![0u8; w];
        for (x, slot) in next.iter_mut().enumerate() {
            let left = self.cells[(x + w - 1) % w].min(1);
            let center = self.cells[x].min(1);
            let right = self.cells[(x + 1) % w].min(1);
            let neighborhood = (left << 2) | (center << 1) | right;
            *slot = (self.rule >> neighborhood) & 1;
        }
        self.cells = next;
    }

    /// Run the automaton and collect its evolution as a spacetime of `rows`
    /// time rows, the current lattice first.
    pub fn evolve(&mut self, rows: usize) -> Result<Spacetime, AnalysisError> {
        if rows == 0 {
            return Err(AnalysisError::EmptyGrid);
        }
        let mut st = Spacetime::new(rows, self.width())?;
        for t in 0..rows {
            for (x, &value) in self.cells.iter().enumerate() {
                st.set(t, x, value);
            }
            if t + 1 < rows {
                self.step();
            }
        }
        Ok(st)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_width_rejected() {
        assert!(matches!(
            Automaton::new(110, 0),
            Err(AnalysisError::EmptyGrid)
        ));
        assert!(matches!(
            Automaton::from_row(110, vec![]),
            Err(AnalysisError::EmptyGrid)
        ));
    }

    #[test]
    fn rule_90_from_a_seed_is_sierpinski() {
        // Rule 90 is XOR of the two neighbors: a single seed doubles into
        // its flanking cells each step.
        let mut ca = Automaton::new(90, 9).unwrap();
        ca.seed_center();
        let st = ca.evolve(3).unwrap();

        assert_eq!(st.row(0), &[0, 0, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(st.row(1), &[0, 0, 0, 1, 0, 1, 0, 0, 0]);
        assert_eq!(st.row(2), &[0, 0, 1, 0, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn rule_110_matches_known_transitions() {
        // Rule 110 truth table: 111->0, 110->1, 101->1, 100->0,
        //                       011->1, 010->1, 001->1, 000->0.
        let mut ca = Automaton::from_row(110, vec![0, 0, 1, 1, 1, 0, 0, 1]).unwrap();
        ca.step();
        let st = ca.evolve(1).unwrap();
        // Neighborhoods (toroidal) of the initial row, left to right:
        // 100,001,011,111,110,100,001,010 -> 0,1,1,0,1,0,1,1
        assert_eq!(st.row(0), &[0, 1, 1, 0, 1, 0, 1, 1]);
    }

    #[test]
    fn stepping_wraps_toroidally() {
        // Rule 254: any live cell in the neighborhood turns the cell on.
        // A seed at column 0 must ignite the last column through the wrap.
        let mut ca = Automaton::from_row(254, vec![1, 0, 0, 0, 0]).unwrap();
        ca.step();
        let st = ca.evolve(1).unwrap();
        assert_eq!(st.row(0), &[1, 1, 0, 0, 1]);
    }

    #[test]
    fn evolve_keeps_the_initial_row() {
        let mut ca = Automaton::from_row(110, vec![0, 1, 0, 1]).unwrap();
        let st = ca.evolve(5).unwrap();
        assert_eq!(st.row(0), &[0, 1, 0, 1]);
        assert_eq!(st.height(), 5);
        assert_eq!(st.width(), 4);
    }
}
