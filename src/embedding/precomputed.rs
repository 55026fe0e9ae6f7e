//! Embeddings looked up from a table computed ahead of time.

use crate::embedding::EmbeddingSource;
use crate::error::{Result, SegmentError};
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// An embedding source backed by a text → vector table.
///
/// Useful offline and in tests. Asking for a text that is not in the table
/// fails the whole batch.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedEmbeddings {
    vectors: HashMap<String, Vec<f32>>,
}

impl PrecomputedEmbeddings {
    /// Create a source from an in-memory table.
    pub fn new(vectors: HashMap<String, Vec<f32>>) -> Self {
        Self { vectors }
    }

    /// Load a JSON object mapping utterance text to its vector.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SegmentError::FileNotFound(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let vectors: HashMap<String, Vec<f32>> = serde_json::from_str(&raw)?;
        info!("Loaded {} precomputed embeddings from {}", vectors.len(), path.display());
        Ok(Self { vectors })
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, text: impl Into<String>, vector: Vec<f32>) {
        self.vectors.insert(text.into(), vector);
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl EmbeddingSource for PrecomputedEmbeddings {
    fn name(&self) -> &str {
        "precomputed"
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts
            .iter()
            .map(|text| {
                self.vectors.get(text).cloned().ok_or_else(|| {
                    SegmentError::EmbeddingUnavailable(format!("no precomputed embedding for {:?}", text))
                })
            })
            .collect()
    }
}
