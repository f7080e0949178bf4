use std::sync::Arc;

use crate::canvas::CanvasClient;
use crate::config::Config;
use crate::embeddings::EmbeddingProvider;
use crate::index::VectorIndexClient;
use crate::llm::LlmProvider;
use crate::memory::SessionStore;
use crate::services::{ChatService, IngestionService};

/// Shared application state. Collaborator clients are constructed once at
/// startup and handed into each service by clone/Arc; nothing is ambient.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub embeddings: EmbeddingProvider,
    pub ingestion: Arc<IngestionService>,
    pub chat: Arc<ChatService>,
}

impl AppState {
    pub fn new(
        config: Config,
        canvas: CanvasClient,
        embeddings: EmbeddingProvider,
        index: VectorIndexClient,
        llm: LlmProvider,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let config = Arc::new(config);
        let ingestion = Arc::new(IngestionService::new(
            canvas,
            embeddings.clone(),
            index.clone(),
            &config,
        ));
        let chat = Arc::new(ChatService::new(
            embeddings.clone(),
            index,
            llm,
            store,
            &config,
        ));

        Self {
            config,
            embeddings,
            ingestion,
            chat,
        }
    }
}
