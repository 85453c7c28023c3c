use std::collections::BTreeSet;

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::error::AnalysisError;
use crate::grid::Spacetime;
use crate::lightcone::{future_sample, past_signature, Signature};

/// The set of distinct future-light-cone samples observed after one past
/// signature. A `BTreeSet` both collapses duplicates and gives the set a
/// deterministic iteration order, which keeps downstream mean vectors (and
/// therefore clustering) bit-reproducible across runs.
pub type FutureSamples = BTreeSet<Vec<u8>>;

/// Statistics pooled over one or more spacetimes: for every past-light-cone
/// signature, the distinct non-trivial futures that followed it.
///
/// Entries keep first-seen (row-major scan) order; the clusterer consumes
/// them in exactly this order, so corpus order is part of the pipeline's
/// deterministic behavior.
#[derive(Debug, Clone)]
pub struct Corpus {
    entries: IndexMap<Signature, FutureSamples>,
    depth: usize,
    spread_rate: usize,
}

impl Corpus {
    /// Scan every coordinate of every spacetime: record its past signature
    /// (partial cones tolerated) and, when the coordinate has a full future
    /// cone with at least one non-zero symbol, add that future sample to the
    /// signature's set.
    ///
    /// All-zero futures are deliberately discarded: the zero symbol is inert
    /// background, and "background continues" observations would otherwise
    /// drown out the futures that actually distinguish causal states. The
    /// signature itself is still keyed, so a past that only ever leads to
    /// background maps to an empty sample set rather than being absent.
    ///
    /// Row extraction is parallel; rows are merged back in scan order so the
    /// resulting entry order is identical to a sequential scan.
    pub fn build(
        spacetimes: &[Spacetime],
        depth: usize,
        spread_rate: usize,
    ) -> Result<Self, AnalysisError> {
        if depth == 0 {
            return Err(AnalysisError::InvalidDepth(depth));
        }

        let mut entries: IndexMap<Signature, FutureSamples> = IndexMap::new();
        for st in spacetimes {
            let rows: Vec<Vec<(Signature, Vec<u8>)>> = (0..st.height())
                .into_par_iter()
                .map(|t| {
                    (0..st.width())
                        .map(|x| {
                            (
                                past_signature(st, t, x, depth, spread_rate),
                                future_sample(st, t, x, depth, spread_rate),
                            )
                        })
                        .collect()
                })
                .collect();

            for row in rows {
                for (signature, future) in row {
                    let samples = entries.entry(signature).or_default();
                    if future.iter().any(|&v| v != 0) {
                        samples.insert(future);
                    }
                }
            }
        }

        log::debug!(
            "corpus built: {} distinct past signatures from {} spacetime(s)",
            entries.len(),
            spacetimes.len()
        );

        Ok(Self {
            entries,
            depth,
            spread_rate,
        })
    }

    /// Assemble a corpus from pre-extracted entries. Used by tests to pin
    /// clustering behavior on hand-built sample sets.
    pub(crate) fn from_entries(
        depth: usize,
        spread_rate: usize,
        entries: impl IntoIterator<Item = (Signature, FutureSamples)>,
    ) -> Self {
        Self {
            entries: entries.into_iter().collect(),
            depth,
            spread_rate,
        }
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&Signature, &FutureSamples)> {
        self.entries.iter()
    }

    /// Number of distinct past signatures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn spread_rate(&self) -> usize {
        self.spread_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_depth_rejected() {
        let st = Spacetime::new(10, 8).unwrap();
        assert!(matches!(
            Corpus::build(&[st], 0, 1),
            Err(AnalysisError::InvalidDepth(0))
        ));
    }

    #[test]
    fn all_zero_grid_keys_signatures_with_empty_sets() {
        // Depth-2, width-8, 10 rows of zeros. Three distinct past signatures
        // arise from boundary truncation: empty (t=0), one partial row
        // (t=1), full two rows (t>=2). Every future is all-zero, so every
        // sample set stays empty.
        let st = Spacetime::new(10, 8).unwrap();
        let corpus = Corpus::build(&[st], 2, 1).unwrap();

        assert_eq!(corpus.len(), 3);
        for (_, samples) in corpus.iter() {
            assert!(samples.is_empty());
        }

        // First-seen order: t=0 row first, then t=1, then the interior.
        let lens: Vec<usize> = corpus.iter().map(|(sig, _)| sig.len()).collect();
        assert_eq!(lens, vec![0, 3, 8]);
    }

    #[test]
    fn nonzero_futures_are_kept_and_deduplicated() {
        // A single live column on an otherwise dead grid.
        let mut st = Spacetime::new(6, 8).unwrap();
        for t in 0..6 {
            st.set(t, 4, 1);
        }
        let corpus = Corpus::build(&[st], 1, 1).unwrap();

        let total_samples: usize = corpus.iter().map(|(_, s)| s.len()).sum();
        assert!(total_samples > 0);

        // The all-zero past (far from the live column) must still be keyed,
        // and its futures (also all-zero) filtered out.
        let dead = Signature::from_symbols(vec![0u8, 0, 0]);
        let (_, dead_samples) = corpus.iter().find(|(sig, _)| **sig == dead).unwrap();
        assert!(dead_samples.is_empty());

        // Any kept sample contains at least one non-zero symbol.
        for (_, samples) in corpus.iter() {
            for sample in samples {
                assert!(sample.iter().any(|&v| v != 0));
            }
        }
    }

    #[test]
    fn pooling_across_spacetimes_unions_sample_sets() {
        let mut a = Spacetime::new(4, 6).unwrap();
        let mut b = Spacetime::new(4, 6).unwrap();
        a.set(1, 2, 1);
        b.set(2, 3, 1);

        let pooled = Corpus::build(&[a.clone(), b.clone()], 1, 1).unwrap();
        let only_a = Corpus::build(&[a], 1, 1).unwrap();

        let pooled_samples: usize = pooled.iter().map(|(_, s)| s.len()).sum();
        let a_samples: usize = only_a.iter().map(|(_, s)| s.len()).sum();
        assert!(pooled_samples >= a_samples);
        assert!(pooled.len() >= only_a.len());
    }

    #[test]
    fn build_matches_sequential_order() {
        let mut st = Spacetime::new(8, 8).unwrap();
        let mut rng_state = 0x2545F4914F6CDD1Du64;
        for t in 0..8 {
            for x in 0..8 {
                rng_state ^= rng_state << 13;
                rng_state ^= rng_state >> 7;
                rng_state ^= rng_state << 17;
                st.set(t, x, (rng_state & 1) as u8);
            }
        }

        // A sequential reference scan over the same grid.
        let mut expected: IndexMap<Signature, FutureSamples> = IndexMap::new();
        for t in 0..st.height() {
            for x in 0..st.width() {
                let sig = past_signature(&st, t, x, 2, 1);
                let fut = future_sample(&st, t, x, 2, 1);
                let set = expected.entry(sig).or_default();
                if fut.iter().any(|&v| v != 0) {
                    set.insert(fut);
                }
            }
        }

        let corpus = Corpus::build(&[st], 2, 1).unwrap();
        assert_eq!(corpus.len(), expected.len());
        for ((sig_a, set_a), (sig_b, set_b)) in corpus.iter().zip(expected.iter()) {
            assert_eq!(sig_a, sig_b);
            assert_eq!(set_a, set_b);
        }
    }
}
