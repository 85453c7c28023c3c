use crate::grid::Spacetime;

/// Which side of the apex a cone extends toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Past,
    Future,
}

/// A past-light-cone signature: the cone's symbol values concatenated in
/// geometric order into one opaque, hashable key. Two coordinates share a
/// signature iff their past cones are value-identical row by row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(Box<[u8]>);

impl Signature {
    /// Build a signature directly from a symbol sequence.
    pub fn from_symbols(symbols: impl Into<Box<[u8]>>) -> Self {
        Self(symbols.into())
    }

    pub fn as_symbols(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Enumerate the coordinates of a light cone anchored at `(t, x)`.
///
/// Row at distance `k` from the apex spans columns
/// `x - k*spread_rate ..= x + k*spread_rate`, wrapped toroidally. Wrapped
/// segments keep left-to-right geometric order: left overflow (folded onto
/// the right edge) first, then the in-range span, then right overflow.
/// Signatures are position-sensitive, so this ordering is part of the
/// contract.
///
/// Rows outside `[0, height)` are dropped when `allow_partial` is true; when
/// it is false, a cone that would run off the grid yields no coordinates at
/// all (no partial credit).
pub fn cone_coordinates(
    t: usize,
    x: usize,
    height: usize,
    width: usize,
    direction: Direction,
    depth: usize,
    spread_rate: usize,
    allow_partial: bool,
) -> Vec<(usize, usize)> {
    let x = x % width;
    let rows: Vec<usize> = match direction {
        Direction::Past => {
            if t < depth && !allow_partial {
                return Vec::new();
            }
            (1..=depth).filter_map(|k| t.checked_sub(k)).collect()
        }
        Direction::Future => {
            if t + depth >= height && !allow_partial {
                return Vec::new();
            }
            (1..=depth).map(|k| t + k).filter(|&row| row < height).collect()
        }
    };

    let mut coords = Vec::new();
    for (i, &row) in rows.iter().enumerate() {
        // Rows are consecutive, so distance from the apex is index + 1.
        let span = ((i + 1) * spread_rate) as i64;
        push_row(&mut coords, row, x as i64, span, width as i64);
    }
    coords
}

/// Append one cone row's columns, splitting out-of-range ends into wrapped
/// overflow segments while preserving geometric order.
fn push_row(out: &mut Vec<(usize, usize)>, row: usize, x: i64, span: i64, width: i64) {
    let leftmost = x - span;
    let rightmost = x + span;

    if leftmost < 0 {
        for col in (width + leftmost).max(0)..width {
            out.push((row, col as usize));
        }
    }
    for col in leftmost.max(0)..=rightmost.min(width - 1) {
        out.push((row, col as usize));
    }
    if rightmost > width - 1 {
        for col in 0..(rightmost - width + 1).min(width) {
            out.push((row, col as usize));
        }
    }
}

/// The past-light-cone signature of `(t, x)`. Partial cones are tolerated:
/// near the first rows the signature simply gets shorter, and at `t = 0` it
/// is empty.
pub fn past_signature(st: &Spacetime, t: usize, x: usize, depth: usize, spread_rate: usize) -> Signature {
    let coords = cone_coordinates(
        t,
        x,
        st.height(),
        st.width(),
        Direction::Past,
        depth,
        spread_rate,
        true,
    );
    Signature(coords.into_iter().map(|(r, c)| st.get(r, c)).collect())
}

/// The future-light-cone sample of `(t, x)`: the full `depth` rows of values
/// below the apex, or an empty vector if the grid runs out first (strict
/// policy, no partial futures).
pub fn future_sample(st: &Spacetime, t: usize, x: usize, depth: usize, spread_rate: usize) -> Vec<u8> {
    cone_coordinates(
        t,
        x,
        st.height(),
        st.width(),
        Direction::Future,
        depth,
        spread_rate,
        false,
    )
    .into_iter()
    .map(|(r, c)| st.get(r, c))
    .collect()
}

/// Number of coordinates in a full cone of the given depth and spread.
pub fn full_cone_len(depth: usize, spread_rate: usize) -> usize {
    (1..=depth).map(|k| 2 * k * spread_rate + 1).sum()
}
