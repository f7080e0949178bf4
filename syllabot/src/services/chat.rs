use std::sync::Arc;
use std::time::Duration;

use chrono::Local;

use crate::config::Config;
use crate::embeddings::EmbeddingProvider;
use crate::error::{Result, SyllabotError};
use crate::index::VectorIndexClient;
use crate::llm::{prompts, LlmProvider};
use crate::memory::SessionStore;
use crate::models::{session_key, ConversationTurn};
use crate::retrieval::assemble;

/// One request/response chat cycle over the course index.
///
/// A query with no retrievable context returns the fixed no-data answer
/// without calling the model or touching session memory; that is the only
/// path distinguishing "nothing to say" from an error. Known gap: two
/// overlapping exchanges on one session can lose the earlier pair of turns,
/// since history is read-modify-write with no per-key exclusion.
pub struct ChatService {
    embeddings: EmbeddingProvider,
    index: VectorIndexClient,
    llm: LlmProvider,
    store: Arc<dyn SessionStore>,
    top_k: usize,
    session_ttl: Duration,
    history_window: usize,
}

impl ChatService {
    pub fn new(
        embeddings: EmbeddingProvider,
        index: VectorIndexClient,
        llm: LlmProvider,
        store: Arc<dyn SessionStore>,
        config: &Config,
    ) -> Self {
        Self {
            embeddings,
            index,
            llm,
            store,
            top_k: config.index.top_k,
            session_ttl: Duration::from_secs(config.memory.session_ttl_secs),
            history_window: config.memory.history_window,
        }
    }

    pub async fn chat(&self, course_id: u64, session_id: &str, message: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(SyllabotError::Validation(
                "Message cannot be empty".to_string(),
            ));
        }

        let key = session_key(course_id, session_id);
        let history = self.store.get(&key).await?;
        let window_start = history.len().saturating_sub(self.history_window);
        let recent = &history[window_start..];

        let query_vector = self.embeddings.embed_query(message).await?;
        let matches = self.index.query(course_id, &query_vector, self.top_k).await?;

        if matches.is_empty() {
            tracing::debug!(course_id, "chat query matched nothing");
            return Ok(prompts::NO_DATA_ANSWER.to_string());
        }

        let today = Local::now().date_naive();
        let context = assemble(matches, today);
        if context.is_empty {
            tracing::debug!(course_id, "context assembly produced nothing usable");
            return Ok(prompts::NO_DATA_ANSWER.to_string());
        }

        let system_instruction = prompts::system_instruction(today, &context.text);
        let answer = self.llm.complete(&system_instruction, recent, message).await?;

        let mut updated = history;
        updated.push(ConversationTurn::user(message));
        updated.push(ConversationTurn::assistant(answer.clone()));
        self.store.save(&key, updated, self.session_ttl).await?;

        Ok(answer)
    }

    /// Drop the session's conversation log immediately.
    pub async fn reset(&self, course_id: u64, session_id: &str) -> Result<()> {
        self.store.clear(&session_key(course_id, session_id)).await
    }
}
