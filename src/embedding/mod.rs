//! Dense embedding providers.
//!
//! The segmentation core only needs one ordered batch of equal-length vectors
//! per meeting. Whatever a provider returns is checked by
//! [`validate_embeddings`]; a short, ragged or non-finite batch fails the run
//! and is never padded with zero vectors.

mod openai;
mod precomputed;

pub use openai::OpenAiEmbeddings;
pub use precomputed::PrecomputedEmbeddings;

use crate::error::{Result, SegmentError};

/// Maps utterance texts to dense vectors.
pub trait EmbeddingSource {
    /// Short provider name for logs and reports.
    fn name(&self) -> &str;

    /// Embeds every text in one call, preserving order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

impl<S: EmbeddingSource + ?Sized> EmbeddingSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        (**self).embed_batch(texts)
    }
}

/// Checks count, dimensionality and finiteness of an embedding batch.
pub fn validate_embeddings(vectors: &[Vec<f32>], expected: usize) -> Result<()> {
    if vectors.len() != expected {
        return Err(SegmentError::EmbeddingUnavailable(format!(
            "expected {} vectors, got {}",
            expected,
            vectors.len()
        )));
    }

    let Some(first) = vectors.first() else {
        return Ok(());
    };
    let dimension = first.len();
    if dimension == 0 {
        return Err(SegmentError::EmbeddingUnavailable("zero-length embedding".to_string()));
    }

    for (i, v) in vectors.iter().enumerate() {
        if v.len() != dimension {
            return Err(SegmentError::EmbeddingUnavailable(format!(
                "vector {} has dimension {}, expected {}",
                i,
                v.len(),
                dimension
            )));
        }
        if v.iter().any(|x| !x.is_finite()) {
            return Err(SegmentError::EmbeddingUnavailable(format!(
                "vector {} contains non-finite values",
                i
            )));
        }
    }

    Ok(())
}

/// Fetches and validates embeddings for a batch of texts.
pub fn embed_all<S: EmbeddingSource + ?Sized>(source: &S, texts: &[String]) -> Result<Vec<Vec<f32>>> {
    let vectors = source.embed_batch(texts)?;
    validate_embeddings(&vectors, texts.len())?;
    Ok(vectors)
}
