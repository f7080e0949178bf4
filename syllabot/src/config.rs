use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub canvas: CanvasConfig,
    pub embeddings: EmbeddingsConfig,
    pub index: IndexConfig,
    pub llm: LlmConfig,
    pub memory: MemoryConfig,
    pub processing: ProcessingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection settings for the Canvas-style course record service.
#[derive(Debug, Clone, Deserialize)]
pub struct CanvasConfig {
    pub base_url: String,
    pub access_token: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsConfig {
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Vector index (Pinecone-style API) settings. Every course lives in its own
/// namespace, `course_{course_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub upsert_batch_size: usize,
    pub top_k: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

/// Session memory settings. TTL is sliding: every save pushes expiry out by
/// `session_ttl_secs` again.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    pub session_ttl_secs: u64,
    pub history_window: usize,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProcessingConfig {
    pub max_chars: usize,
    pub overlap: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("SYLLABOT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("SYLLABOT_PORT", 8000),
            },
            canvas: CanvasConfig {
                base_url: env::var("CANVAS_BASE_URL")
                    .unwrap_or_else(|_| "https://canvas.instructure.com".to_string()),
                access_token: env::var("CANVAS_ACCESS_TOKEN").unwrap_or_default(),
                timeout_secs: parse_env_or("CANVAS_TIMEOUT_SECS", 30),
            },
            embeddings: EmbeddingsConfig {
                model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "text-embedding-3-large".to_string()),
                dimensions: parse_env_or("EMBEDDING_DIMENSIONS", 3072),
                batch_size: parse_env_or("EMBEDDING_BATCH_SIZE", 50),
                api_key: env::var("OPENAI_API_KEY").ok(),
                base_url: env::var("EMBEDDING_BASE_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                timeout_secs: parse_env_or("EMBEDDING_TIMEOUT_SECS", 30),
            },
            index: IndexConfig {
                base_url: env::var("VECTOR_INDEX_URL").unwrap_or_default(),
                api_key: env::var("VECTOR_INDEX_API_KEY").ok(),
                upsert_batch_size: parse_env_or("INDEX_UPSERT_BATCH_SIZE", 100),
                top_k: parse_env_or("SEARCH_TOP_K", 20),
                timeout_secs: parse_env_or("INDEX_TIMEOUT_SECS", 30),
            },
            llm: LlmConfig {
                model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                api_key: env::var("OPENAI_API_KEY").ok(),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT_SECS", 60),
                max_tokens: parse_env_or("LLM_MAX_TOKENS", 400),
            },
            memory: MemoryConfig {
                session_ttl_secs: parse_env_or("SESSION_TTL_SECS", 1800),
                history_window: parse_env_or("SESSION_HISTORY_WINDOW", 5),
                sweep_interval_secs: parse_env_or("SESSION_SWEEP_INTERVAL_SECS", 300),
            },
            processing: ProcessingConfig {
                max_chars: parse_env_or("CHUNK_MAX_CHARS", 2000),
                overlap: parse_env_or("CHUNK_OVERLAP", 200),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
