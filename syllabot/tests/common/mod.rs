#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::{Request, Respond, ResponseTemplate};

use syllabot::config::{
    CanvasConfig, Config, EmbeddingsConfig, IndexConfig, LlmConfig, MemoryConfig, ProcessingConfig,
    ServerConfig,
};

pub const TEST_DIMENSIONS: usize = 8;

/// Config with every collaborator pointed at one mock server.
pub fn test_config(base_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        canvas: CanvasConfig {
            base_url: base_url.to_string(),
            access_token: "canvas-test-token".to_string(),
            timeout_secs: 5,
        },
        embeddings: EmbeddingsConfig {
            model: "text-embedding-3-large".to_string(),
            dimensions: TEST_DIMENSIONS,
            batch_size: 50,
            api_key: Some("embed-test-key".to_string()),
            base_url: base_url.to_string(),
            timeout_secs: 5,
        },
        index: IndexConfig {
            base_url: base_url.to_string(),
            api_key: Some("index-test-key".to_string()),
            upsert_batch_size: 100,
            top_k: 20,
            timeout_secs: 5,
        },
        llm: LlmConfig {
            model: "gpt-4o-mini".to_string(),
            api_key: Some("llm-test-key".to_string()),
            base_url: Some(base_url.to_string()),
            timeout_secs: 5,
            max_tokens: 400,
        },
        memory: MemoryConfig {
            session_ttl_secs: 1800,
            history_window: 5,
            sweep_interval_secs: 300,
        },
        processing: ProcessingConfig {
            max_chars: 2000,
            overlap: 200,
        },
    }
}

/// Fakes the OpenAI embeddings endpoint: one fixed-dimension vector per
/// input, so batch size and ordering checks hold regardless of payload.
pub struct EmbeddingResponder;

impl Respond for EmbeddingResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
        let count = body["input"].as_array().map(|a| a.len()).unwrap_or(1);
        let data: Vec<Value> = (0..count)
            .map(|i| {
                json!({
                    "object": "embedding",
                    "index": i,
                    "embedding": vec![0.1f32; TEST_DIMENSIONS],
                })
            })
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": data,
            "model": "text-embedding-3-large",
        }))
    }
}

/// Minimal chat-completion payload accepted by the OpenAI client.
pub fn chat_completion_json(answer: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1700000000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": answer},
            "finish_reason": "stop",
        }],
    })
}

/// A vector-query match payload in the index's wire shape.
pub fn index_match(id: &str, score: f64, kind: &str, text: &str, due_date: Option<&str>) -> Value {
    let mut metadata = json!({
        "course_id": "42",
        "kind": kind,
        "position": 0,
        "text": text,
    });
    if let Some(due) = due_date {
        metadata["due_date"] = json!(due);
    }

    json!({"id": id, "score": score, "metadata": metadata})
}
