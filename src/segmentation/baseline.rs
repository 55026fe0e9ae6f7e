//! Control segmenters that ignore utterance content.

use crate::error::Result;
use crate::segmentation::selector::check_k;
use crate::segmentation::Segmentation;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Draws `k - 1` distinct gaps uniformly from `[1, n - 1]`.
///
/// The same `(n, k, seed)` always yields the same segmentation.
pub fn random_segmentation(n: usize, k: usize, seed: u64) -> Result<Segmentation> {
    check_k(k, n)?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut boundaries: Vec<usize> = rand::seq::index::sample(&mut rng, n - 1, k - 1)
        .into_iter()
        .map(|gap| gap + 1)
        .collect();
    boundaries.sort_unstable();

    Segmentation::new(boundaries, n)
}

/// Places boundary `i` at `round(i * n / k)` for `i = 1..k`.
///
/// A boundary that would land on or before its predecessor shifts right to
/// the next free gap.
pub fn equidistant_segmentation(n: usize, k: usize) -> Result<Segmentation> {
    check_k(k, n)?;

    let mut boundaries: Vec<usize> = Vec::with_capacity(k - 1);
    let mut previous = 0usize;
    for i in 1..k {
        let ideal = (i as f64 * n as f64 / k as f64).round() as usize;
        let b = ideal.max(previous + 1);
        boundaries.push(b);
        previous = b;
    }

    Segmentation::new(boundaries, n)
}
