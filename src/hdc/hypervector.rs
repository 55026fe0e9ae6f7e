//! Dense bipolar hypervectors.

use crate::similarity::BlockVector;
use rand::Rng;

/// A bipolar hypervector.
///
/// Components are `+1` or `-1`. The all-zero vector stands for "no content"
/// (an utterance without tokens) and has zero norm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypervector {
    components: Vec<i8>,
}

impl Hypervector {
    /// Creates the all-zero hypervector.
    pub fn zeros(dimension: usize) -> Self {
        Self {
            components: vec![0; dimension],
        }
    }

    /// Draws a random bipolar hypervector from `rng`.
    pub fn random<R: Rng>(dimension: usize, rng: &mut R) -> Self {
        let components = (0..dimension)
            .map(|_| if rng.gen::<bool>() { 1 } else { -1 })
            .collect();
        Self { components }
    }

    /// Dimensionality.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    /// Raw components.
    #[inline]
    pub fn components(&self) -> &[i8] {
        &self.components
    }

    /// Whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|&c| c == 0)
    }

    // === HDC Operations ===

    /// **Binding (⊗)**: element-wise product.
    ///
    /// For bipolar vectors binding is self-inverse: `a ⊗ b ⊗ b = a`.
    pub fn bind(&self, other: &Hypervector) -> Self {
        let components = self
            .components
            .iter()
            .zip(other.components.iter())
            .map(|(&a, &b)| a * b)
            .collect();
        Self { components }
    }

    /// **Permutation (ρ)**: cyclic rotation by `amount` positions.
    ///
    /// Used to mark the position of a token inside an n-gram.
    pub fn permute(&self, amount: usize) -> Self {
        let mut components = self.components.clone();
        if !components.is_empty() {
            let shift = amount % components.len();
            components.rotate_right(shift);
        }
        Self { components }
    }

    /// **Bundling (⊕)**: per-dimension majority vote.
    ///
    /// Zero vectors abstain. A tied dimension takes the neighbouring
    /// component of one of the voters (`ρ^1` of the lexicographically
    /// smallest), so the result stays bipolar, does not depend on input
    /// order, and two bundles over unrelated content stay uncorrelated. If
    /// no vector carries content the result is the zero vector.
    pub fn bundle(vectors: &[&Hypervector], dimension: usize) -> Self {
        let voters: Vec<&Hypervector> = vectors.iter().copied().filter(|hv| !hv.is_zero()).collect();
        let Some(&anchor) = voters.iter().min_by(|a, b| a.components.cmp(&b.components)) else {
            return Self::zeros(dimension);
        };

        let mut votes = vec![0i32; dimension];
        for hv in &voters {
            for (acc, &c) in votes.iter_mut().zip(hv.components.iter()) {
                *acc += c as i32;
            }
        }

        let mut tie_breaker: Option<Hypervector> = None;
        let components = votes
            .iter()
            .enumerate()
            .map(|(i, &v)| match v.signum() {
                0 => {
                    let fill = tie_breaker.get_or_insert_with(|| anchor.permute(1));
                    fill.components.get(i).copied().unwrap_or(1)
                }
                s => s as i8,
            })
            .collect();

        Self { components }
    }

    /// **Cosine Similarity**: normalized dot product, 0.0 if either norm is zero.
    pub fn cosine_similarity(&self, other: &Hypervector) -> f64 {
        let mut dot = 0i64;
        let mut norm_a = 0i64;
        let mut norm_b = 0i64;
        for (&a, &b) in self.components.iter().zip(other.components.iter()) {
            dot += (a as i64) * (b as i64);
            norm_a += (a as i64) * (a as i64);
            norm_b += (b as i64) * (b as i64);
        }

        if norm_a == 0 || norm_b == 0 {
            return 0.0;
        }
        dot as f64 / ((norm_a as f64).sqrt() * (norm_b as f64).sqrt())
    }

    /// **Hamming Distance**, normalized by dimensionality.
    ///
    /// For two bipolar vectors this equals `(1 - cosine) / 2`.
    pub fn normalized_hamming(&self, other: &Hypervector) -> f64 {
        let dimension = self.dimension().max(other.dimension());
        if dimension == 0 {
            return 0.0;
        }
        let differing = self
            .components
            .iter()
            .zip(other.components.iter())
            .filter(|(a, b)| a != b)
            .count()
            + self.dimension().abs_diff(other.dimension());
        differing as f64 / dimension as f64
    }
}

impl BlockVector for Hypervector {
    fn aggregate(block: &[Self]) -> Self {
        let dimension = block.first().map(|hv| hv.dimension()).unwrap_or(0);
        let refs: Vec<&Hypervector> = block.iter().collect();
        Self::bundle(&refs, dimension)
    }

    fn dissimilarity(&self, other: &Self) -> f64 {
        1.0 - self.cosine_similarity(other)
    }
}
