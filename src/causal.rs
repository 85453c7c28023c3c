use std::collections::HashMap;

use crate::corpus::{Corpus, FutureSamples};
use crate::error::AnalysisError;
use crate::grid::Spacetime;
use crate::lightcone::Signature;

/// Parameters for causal-state reconstruction.
#[derive(Debug, Clone)]
pub struct ComplexityConfig {
    /// Light-cone depth in rows (>= 1).
    pub depth: usize,
    /// Columns a cone widens by per row of distance from the apex.
    pub spread_rate: usize,
    /// Maximum cosine distance between mean future vectors for two pasts to
    /// share a causal state.
    pub similarity_threshold: f64,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            depth: 5,
            spread_rate: 1,
            similarity_threshold: 0.05,
        }
    }
}

/// A frozen causal-state model: which state owns each past signature, and
/// each state's statistical complexity.
///
/// States exist only as indices after inference; their accumulated future
/// sets are dropped once complexities are computed. The model remembers the
/// cone geometry it was fitted with so painting reuses it unchanged.
#[derive(Debug, Clone)]
pub struct CausalModel {
    assignment: HashMap<Signature, usize>,
    complexities: Vec<f64>,
    depth: usize,
    spread_rate: usize,
}

impl CausalModel {
    /// Fit a model from scratch: build the corpus over `spacetimes`, then
    /// cluster it. The usual entry point.
    pub fn fit(
        spacetimes: &[Spacetime],
        config: &ComplexityConfig,
    ) -> Result<Self, AnalysisError> {
        if spacetimes.is_empty() {
            return Err(AnalysisError::NoInput);
        }
        let corpus = Corpus::build(spacetimes, config.depth, config.spread_rate)?;
        Ok(Self::infer(&corpus, config.similarity_threshold))
    }

    /// Cluster a prebuilt corpus into causal states and score them.
    ///
    /// A single deterministic pass in corpus (first-seen) order. Each past
    /// signature's candidate future set is compared, via cosine distance of
    /// mean future vectors, against every existing state in creation order;
    /// the candidate's samples are unioned into *every* state within
    /// threshold, and the signature's recorded state is the last one that
    /// matched. If none matched, the signature founds a new state.
    ///
    /// Two empty sample sets (pasts that only ever lead to background) are
    /// treated as distance zero, so they pool into one state; an empty set
    /// never matches a non-empty one, and a zero-norm mean never matches
    /// anything. No comparison can produce NaN.
    pub fn infer(corpus: &Corpus, similarity_threshold: f64) -> Self {
        let mut states: Vec<FutureSamples> = Vec::new();
        let mut assignment: HashMap<Signature, usize> = HashMap::new();

        for (signature, candidate) in corpus.iter() {
            let candidate_mean = mean_vector(candidate);
            let mut assigned = None;

            for (id, futures) in states.iter_mut().enumerate() {
                let matched = match (&candidate_mean, mean_vector(futures)) {
                    (None, None) => true,
                    (Some(c), Some(s)) => {
                        cosine_distance(c, &s).is_some_and(|d| d <= similarity_threshold)
                    }
                    _ => false,
                };
                if matched {
                    futures.extend(candidate.iter().cloned());
                    assigned = Some(id);
                }
            }

            let id = assigned.unwrap_or_else(|| {
                states.push(candidate.clone());
                states.len() - 1
            });
            assignment.insert(signature.clone(), id);
        }

        // Probability = the state's share of distinct past signatures, by
        // final assignment; every state keeps at least its founder, so no
        // probability is zero and the shares partition the corpus.
        let total = corpus.len();
        let mut counts = vec![0usize; states.len()];
        for &id in assignment.values() {
            counts[id] += 1;
        }
        let complexities: Vec<f64> = counts
            .iter()
            .map(|&members| -(members as f64 / total as f64).ln())
            .collect();

        log::debug!(
            "inferred {} causal states from {} past signatures",
            states.len(),
            total
        );

        Self {
            assignment,
            complexities,
            depth: corpus.depth(),
            spread_rate: corpus.spread_rate(),
        }
    }

    /// The causal state owning a past signature, if it was seen in training.
    pub fn state_of(&self, signature: &Signature) -> Option<usize> {
        self.assignment.get(signature).copied()
    }

    /// The statistical complexity of a past signature's state, if known.
    pub fn complexity_of(&self, signature: &Signature) -> Option<f64> {
        self.state_of(signature).map(|id| self.complexities[id])
    }

    /// Per-state complexities, indexed by state id.
    pub fn complexities(&self) -> &[f64] {
        &self.complexities
    }

    pub fn num_states(&self) -> usize {
        self.complexities.len()
    }

    /// Number of distinct past signatures the model was fitted on.
    pub fn signature_count(&self) -> usize {
        self.assignment.len()
    }

    /// A model fitted on no data classifies nothing.
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn spread_rate(&self) -> usize {
        self.spread_rate
    }
}

/// Elementwise mean of a sample set, or `None` for an empty set (the mean of
/// nothing is undefined; callers decide what that implies).
fn mean_vector(samples: &FutureSamples) -> Option<Vec<f64>> {
    let len = samples.iter().next()?.len();
    let mut acc = vec![0.0f64; len];
    for sample in samples {
        debug_assert_eq!(sample.len(), len);
        for (slot, &v) in acc.iter_mut().zip(sample.iter()) {
            *slot += f64::from(v);
        }
    }
    let n = samples.len() as f64;
    for slot in &mut acc {
        *slot /= n;
    }
    Some(acc)
}

/// Cosine distance between two mean vectors, or `None` when either has zero
/// norm (the angle is undefined there; treated as "no match" upstream).
fn cosine_distance(a: &[f64], b: &[f64]) -> Option<f64> {
    debug_assert_eq!(a.len(), b.len());
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f64::EPSILON {
        return None;
    }
    Some(1.0 - dot / denom)
}
