//! Boundary strength signals from sliding-window cohesion.
//!
//! For every gap `i` in `[1, n - 1]` the block of up to `W` vectors before the
//! gap is pooled and compared with the block of up to `W` vectors after it.
//! The resulting strength is `1 - cosine(left, right)`: higher means a
//! stronger topic shift. Blocks shrink at the meeting edges and a pooled
//! vector with zero norm gives strength `1.0`, so the signal is defined and
//! finite at every gap.

use crate::config::{SignalConfig, StrengthMetric};
use crate::error::{Result, SegmentError};
use crate::similarity::BlockVector;
use log::debug;

/// Raw cohesion signal: element `j` is the strength of gap `j + 1`.
///
/// A zero `window` is rejected with [`SegmentError::Config`].
pub fn cohesion_signal<V: BlockVector>(vectors: &[V], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(SegmentError::Config("signal window must be at least 1".to_string()));
    }
    let n = vectors.len();

    let signal = (1..n)
        .map(|gap| {
            let left = V::aggregate(&vectors[gap.saturating_sub(window)..gap]);
            let right = V::aggregate(&vectors[gap..(gap + window).min(n)]);
            let strength = left.dissimilarity(&right);
            if strength.is_finite() {
                strength
            } else {
                1.0
            }
        })
        .collect();
    Ok(signal)
}

/// Computes TextTiling depth scores over a strength signal.
///
/// The cohesion curve `1 - strength` is scanned for the highest peak on each
/// side of every gap; depth is the sum of both drops. A gap sitting in a
/// deep valley of cohesion scores high.
pub fn depth_scores(strengths: &[f64]) -> Vec<f64> {
    let cohesion: Vec<f64> = strengths.iter().map(|s| 1.0 - s).collect();
    let n = cohesion.len();

    let mut left_peaks = vec![0.0f64; n];
    let mut running = f64::NEG_INFINITY;
    for (i, &c) in cohesion.iter().enumerate() {
        running = running.max(c);
        left_peaks[i] = running;
    }

    let mut right_peaks = vec![0.0f64; n];
    running = f64::NEG_INFINITY;
    for (i, &c) in cohesion.iter().enumerate().rev() {
        running = running.max(c);
        right_peaks[i] = running;
    }

    cohesion
        .iter()
        .enumerate()
        .map(|(i, &c)| (left_peaks[i] - c) + (right_peaks[i] - c))
        .collect()
}

/// Applies `passes` centered moving-average passes of half-width `half_window`.
///
/// The window is clipped at the signal edges.
pub fn smooth(signal: &[f64], passes: usize, half_window: usize) -> Vec<f64> {
    let mut current = signal.to_vec();
    if half_window == 0 || current.len() < 2 {
        return current;
    }

    for _ in 0..passes {
        current = (0..current.len())
            .map(|i| {
                let start = i.saturating_sub(half_window);
                let end = (i + half_window + 1).min(current.len());
                let window = &current[start..end];
                window.iter().sum::<f64>() / window.len() as f64
            })
            .collect();
    }

    current
}

/// Builds boundary strength signals according to a [`SignalConfig`].
#[derive(Debug, Clone, Default)]
pub struct SignalBuilder {
    config: SignalConfig,
}

impl SignalBuilder {
    /// Creates a builder.
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    /// Builds the strength signal for a sequence of per-utterance vectors.
    pub fn build<V: BlockVector>(&self, vectors: &[V]) -> Result<Vec<f64>> {
        let mut signal = cohesion_signal(vectors, self.config.window)?;

        if self.config.smoothing_passes > 0 {
            signal = smooth(&signal, self.config.smoothing_passes, self.config.smoothing_window);
        }

        if self.config.metric == StrengthMetric::Depth {
            signal = depth_scores(&signal);
        }

        if !signal.is_empty() {
            let max = signal.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let mean = signal.iter().sum::<f64>() / signal.len() as f64;
            debug!(
                "Built {:?} signal over {} gaps (window={}, mean={:.4}, max={:.4})",
                self.config.metric,
                signal.len(),
                self.config.window,
                mean,
                max
            );
        }

        Ok(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(pattern: &[usize]) -> Vec<Vec<f32>> {
        pattern
            .iter()
            .map(|&t| {
                let mut v = vec![0.0f32; 4];
                v[t] = 1.0;
                v
            })
            .collect()
    }

    #[test]
    fn test_signal_length_and_peak() {
        let vectors = topics(&[0, 0, 0, 0, 1, 1, 1, 1]);
        let signal = cohesion_signal(&vectors, 2).unwrap();

        assert_eq!(signal.len(), 7);
        // gap 4 separates the two topics completely
        assert!((signal[3] - 1.0).abs() < 1e-9);
        assert!(signal[0].abs() < 1e-9);
        assert!(signal[6].abs() < 1e-9);
        for (i, &s) in signal.iter().enumerate() {
            if i != 3 {
                assert!(s < signal[3]);
            }
        }
    }

    #[test]
    fn test_edge_blocks_shrink() {
        let vectors = topics(&[0, 1]);
        let signal = cohesion_signal(&vectors, 5).unwrap();
        assert_eq!(signal.len(), 1);
        assert!((signal[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_vector_has_no_gaps() {
        assert!(cohesion_signal(&topics(&[2]), 2).unwrap().is_empty());
    }

    #[test]
    fn test_zero_norm_blocks_are_one() {
        let vectors = vec![vec![0.0f32; 3]; 4];
        let signal = cohesion_signal(&vectors, 2).unwrap();
        assert_eq!(signal, vec![1.0, 1.0, 1.0]);
        assert!(signal.iter().all(|s| !s.is_nan()));
    }

    #[test]
    fn test_zero_window_rejected() {
        let vectors = topics(&[0, 0, 1]);
        assert!(matches!(cohesion_signal(&vectors, 0), Err(SegmentError::Config(_))));

        let builder = SignalBuilder::new(SignalConfig {
            window: 0,
            ..Default::default()
        });
        assert!(builder.build(&vectors).is_err());
    }

    #[test]
    fn test_depth_scores() {
        // Three topics: shifts at gaps 2 and 5
        let strengths = cohesion_signal(&topics(&[0, 0, 1, 1, 1, 2, 2]), 1).unwrap();
        assert_eq!(strengths, vec![0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);

        let depths = depth_scores(&strengths);
        assert_eq!(depths, vec![0.0, 2.0, 0.0, 0.0, 2.0, 0.0]);

        // A partial shift sits in a shallower valley than a full one
        let strengths = cohesion_signal(&topics(&[0, 0, 0, 1, 1, 1]), 2).unwrap();
        let depths = depth_scores(&strengths);
        assert_eq!(depths.len(), 5);
        assert!(depths[2] > depths[1]);
        assert!(depths[1] > 0.0);
        assert!(depths[0].abs() < 1e-9);
    }

    #[test]
    fn test_smooth_spreads_peak() {
        let smoothed = smooth(&[0.0, 0.0, 1.0, 0.0, 0.0], 1, 1);
        assert!((smoothed[2] - 1.0 / 3.0).abs() < 1e-9);
        assert!((smoothed[1] - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(smoothed[0], 0.0);

        assert_eq!(smooth(&[0.5, 0.1], 0, 1), vec![0.5, 0.1]);
    }

    #[test]
    fn test_builder_applies_depth() {
        let builder = SignalBuilder::new(SignalConfig {
            window: 1,
            metric: StrengthMetric::Depth,
            ..Default::default()
        });
        let signal = builder.build(&topics(&[0, 0, 1, 1])).unwrap();
        assert_eq!(signal.len(), 3);
        assert!(signal[1] > signal[0]);
        assert!(signal[1] > signal[2]);
    }
}
