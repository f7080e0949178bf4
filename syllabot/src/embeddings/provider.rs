use crate::config::EmbeddingsConfig;
use crate::error::{Result, SyllabotError};

use super::api::EmbeddingApiClient;

/// Order-preserving embedding pipeline.
///
/// Splits input into consecutive batches of at most `batch_size`, submits
/// them one at a time and awaits each before issuing the next. Batch
/// boundaries are purely a payload-size concern; output order and count
/// always mirror the input.
#[derive(Clone)]
pub struct EmbeddingProvider {
    client: EmbeddingApiClient,
    batch_size: usize,
    dimensions: usize,
}

impl EmbeddingProvider {
    pub fn new(config: &EmbeddingsConfig) -> Result<Self> {
        Ok(Self {
            client: EmbeddingApiClient::new(config)?,
            batch_size: config.batch_size.max(1),
            dimensions: config.dimensions,
        })
    }

    pub async fn embed_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_embeddings = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size) {
            let refs: Vec<&str> = batch.iter().map(String::as_str).collect();
            let mut embedded = self.client.embed(&refs).await?;
            all_embeddings.append(&mut embedded);
        }

        Ok(all_embeddings)
    }

    pub async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        let embeddings = self.client.embed(&[query]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| SyllabotError::Embedding("No embedding generated".to_string()))
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}
