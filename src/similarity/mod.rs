//! Similarity measures shared by the cohesion signal strategies.

mod cosine;

pub use cosine::{cosine_similarity, mean_vector};

/// A vector kind that can be pooled over a block of utterances and compared.
///
/// Dense embeddings pool by arithmetic mean; hypervectors pool by majority
/// bundling. Both report dissimilarity in `[0, 2]` with zero-norm inputs
/// treated as maximally dissimilar to anything (`1.0`).
pub trait BlockVector: Sized {
    /// Pools a non-empty block of vectors into one.
    fn aggregate(block: &[Self]) -> Self;

    /// Computes `1 - similarity` between two pooled vectors.
    fn dissimilarity(&self, other: &Self) -> f64;
}
