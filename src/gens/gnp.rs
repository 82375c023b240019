use std::ops::RangeInclusive;

use super::*;

/// `G(n,p)` graphs generate every possible edge in a graph with `n` nodes with probability `p`
/// independent from each other. Each generated edge draws its weight uniformly from a range.
///
/// The generator itself emits all `n^2` ordered candidates; dropping self-loops and
/// mirrored candidates of undirected graphs is up to the caller.
#[derive(Debug, Clone)]
pub struct Gnp {
    n: NumNodes,
    p: Option<f64>,
    weights: RangeInclusive<Weight>,
}

impl Default for Gnp {
    fn default() -> Self {
        Self {
            n: 0,
            p: None,
            weights: 1..=1,
        }
    }
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `p` directly
    /// ** Panics if `p` is not in `[0, 1]` **
    pub fn prob(mut self, prob: f64) -> Self {
        assert!((0.0..=1.0).contains(&prob), "{prob} is not a valid probability");
        self.p = Some(prob);
        self
    }

    /// Updates the range weights are drawn from
    /// ** Panics if the range is empty **
    pub fn weights(mut self, weights: RangeInclusive<Weight>) -> Self {
        assert!(!weights.is_empty(), "weight range must not be empty");
        self.weights = weights;
        self
    }
}

impl NumNodesGen for Gnp {
    /// Updates `n`
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }
}

impl GraphGenerator for Gnp {
    /// Creates a streaming generator over random `G(n,p)` edges in lexicographic order
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = WeightedEdge>
    where
        R: Rng,
    {
        let p = self.p.unwrap_or_default();
        let n = self.n;
        let weights = self.weights.clone();

        (0..n)
            .flat_map(move |u| (0..n).map(move |v| Edge(u, v)))
            .filter_map(move |e| {
                if rng.random_bool(p) {
                    Some(e.with_weight(rng.random_range(weights.clone())))
                } else {
                    None
                }
            })
    }
}
