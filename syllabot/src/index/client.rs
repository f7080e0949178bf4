use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::IndexConfig;
use crate::error::{Result, SyllabotError};
use crate::models::{ChunkMetadata, RetrievalMatch};

/// Vector index namespace for one course. Namespacing is the only
/// cross-course isolation this service provides.
pub fn namespace(course_id: u64) -> String {
    format!("course_{course_id}")
}

#[derive(Debug, Clone, Serialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<RetrievalMatch>,
}

/// Client for the Pinecone-style vector search service.
///
/// Upserts are sent in fixed-size transport batches; batch boundaries are
/// invisible to callers. Deleting a namespace clears every vector in it;
/// re-ingestion is always clear-then-rebuild, never incremental.
#[derive(Clone)]
pub struct VectorIndexClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    upsert_batch_size: usize,
}

impl VectorIndexClient {
    pub fn new(config: &IndexConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SyllabotError::IndexWrite(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            upsert_batch_size: config.upsert_batch_size.max(1),
        })
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(ref api_key) = self.api_key {
            headers.insert(
                "Api-Key",
                HeaderValue::from_str(api_key)
                    .map_err(|e| SyllabotError::IndexWrite(format!("Invalid API key: {e}")))?,
            );
        }
        Ok(headers)
    }

    pub async fn upsert(&self, course_id: u64, vectors: &[VectorRecord]) -> Result<()> {
        let url = format!("{}/vectors/upsert", self.base_url);
        let namespace = namespace(course_id);

        for batch in vectors.chunks(self.upsert_batch_size) {
            let body = json!({
                "vectors": batch,
                "namespace": namespace,
            });

            let response = self
                .http
                .post(&url)
                .headers(self.headers()?)
                .json(&body)
                .send()
                .await
                .map_err(|e| SyllabotError::IndexWrite(format!("Upsert request failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(SyllabotError::IndexWrite(format!(
                    "Upsert returned {status}: {body}"
                )));
            }
        }

        Ok(())
    }

    pub async fn delete_namespace(&self, course_id: u64) -> Result<()> {
        let url = format!("{}/vectors/delete", self.base_url);
        let body = json!({
            "deleteAll": true,
            "namespace": namespace(course_id),
        });

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| SyllabotError::IndexWrite(format!("Delete request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyllabotError::IndexWrite(format!(
                "Namespace delete returned {status}: {body}"
            )));
        }

        Ok(())
    }

    pub async fn query(
        &self,
        course_id: u64,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<RetrievalMatch>> {
        let url = format!("{}/query", self.base_url);
        let body = json!({
            "vector": vector,
            "topK": top_k,
            "namespace": namespace(course_id),
            "includeMetadata": true,
        });

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| SyllabotError::IndexQuery(format!("Query request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyllabotError::IndexQuery(format!(
                "Query returned {status}: {body}"
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| SyllabotError::IndexQuery(format!("Invalid query response: {e}")))?;

        Ok(parsed.matches)
    }
}
