//! OpenAI-compatible embeddings endpoint.

use crate::config::EmbeddingConfig;
use crate::embedding::EmbeddingSource;
use crate::error::{Result, SegmentError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a [String],
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    index: usize,
    embedding: Vec<f32>,
}

/// Blocking client for `POST /v1/embeddings`.
///
/// The whole meeting is sent as a single request. Any transport error,
/// non-success status or malformed body is reported as
/// [`SegmentError::EmbeddingUnavailable`]; retrying is left to the caller.
pub struct OpenAiEmbeddings {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl OpenAiEmbeddings {
    /// Create a client from explicit configuration. The API key is required.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| SegmentError::Config("embedding API key is not set".to_string()))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SegmentError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            client,
        })
    }
}

impl EmbeddingSource for OpenAiEmbeddings {
    fn name(&self) -> &str {
        &self.model
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        debug!("Requesting {} embeddings from {}", texts.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&EmbeddingRequest {
                input: texts,
                model: &self.model,
            })
            .send()?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(SegmentError::EmbeddingUnavailable(format!(
                "embeddings API error {}: {}",
                status, body
            )));
        }

        let parsed: EmbeddingResponse = response.json()?;
        let vectors = order_by_index(parsed.data, texts.len())?;

        info!(
            "Received {} embeddings ({} dims) in {:?}",
            vectors.len(),
            vectors.first().map(|v| v.len()).unwrap_or(0),
            start.elapsed()
        );
        Ok(vectors)
    }
}

/// Places each returned vector at its request index, requiring every slot to be filled once.
fn order_by_index(data: Vec<EmbeddingDatum>, expected: usize) -> Result<Vec<Vec<f32>>> {
    let mut slots: Vec<Option<Vec<f32>>> = vec![None; expected];
    for datum in data {
        let slot = slots.get_mut(datum.index).ok_or_else(|| {
            SegmentError::EmbeddingUnavailable(format!("response index {} out of range", datum.index))
        })?;
        if slot.replace(datum.embedding).is_some() {
            return Err(SegmentError::EmbeddingUnavailable(format!(
                "duplicate embedding for index {}",
                datum.index
            )));
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            v.ok_or_else(|| SegmentError::EmbeddingUnavailable(format!("missing embedding for index {}", i)))
        })
        .collect()
}
