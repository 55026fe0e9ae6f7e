//! Cosine similarity for dense embedding vectors.

use crate::similarity::BlockVector;

/// Cosine similarity between two dense vectors.
///
/// Returns 0.0 when either vector has zero norm, so the result is always
/// finite. Vectors of different length are compared over their common prefix.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (x as f64, y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
    if sim.is_finite() {
        sim.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Element-wise arithmetic mean of a block of vectors.
pub fn mean_vector(block: &[Vec<f32>]) -> Vec<f32> {
    let Some(first) = block.first() else {
        return Vec::new();
    };

    let mut sum = vec![0.0f64; first.len()];
    for v in block {
        for (acc, &x) in sum.iter_mut().zip(v.iter()) {
            *acc += x as f64;
        }
    }

    let n = block.len() as f64;
    sum.into_iter().map(|s| (s / n) as f32).collect()
}

impl BlockVector for Vec<f32> {
    fn aggregate(block: &[Self]) -> Self {
        mean_vector(block)
    }

    fn dissimilarity(&self, other: &Self) -> f64 {
        1.0 - cosine_similarity(self, other)
    }
}
