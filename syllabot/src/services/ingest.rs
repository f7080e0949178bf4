use crate::canvas::CanvasClient;
use crate::config::Config;
use crate::embeddings::EmbeddingProvider;
use crate::error::Result;
use crate::index::{VectorIndexClient, VectorRecord};
use crate::models::ChunkMetadata;
use crate::processing::{DocumentBuilder, KindCounts};

/// Full ingestion pipeline for one course: fetch records, build chunks,
/// embed, then clear-and-rebuild the course namespace.
///
/// Stages run strictly in sequence and any failure aborts the run. The
/// namespace is only cleared after every embedding succeeded, so an
/// embedding failure leaves the previous index intact; an upsert failure can
/// leave the namespace partially written (no rollback).
pub struct IngestionService {
    canvas: CanvasClient,
    builder: DocumentBuilder,
    embeddings: EmbeddingProvider,
    index: VectorIndexClient,
}

#[derive(Debug)]
pub struct IngestOutcome {
    pub course_name: String,
    pub chunk_count: usize,
    pub counts: KindCounts,
}

impl IngestionService {
    pub fn new(
        canvas: CanvasClient,
        embeddings: EmbeddingProvider,
        index: VectorIndexClient,
        config: &Config,
    ) -> Self {
        Self {
            canvas,
            builder: DocumentBuilder::new(&config.processing),
            embeddings,
            index,
        }
    }

    pub async fn ingest_course(&self, course_id: u64) -> Result<IngestOutcome> {
        tracing::info!(course_id, "starting course ingestion");

        let course = self.canvas.fetch_course(course_id).await?;
        let assignments = self.canvas.list_assignments(course_id).await?;
        let announcements = self.canvas.list_announcements(course_id).await?;
        let discussions = self.canvas.list_discussions(course_id).await?;
        let staff = self.canvas.list_staff(course_id).await?;

        let built = self.builder.build_course(
            &course,
            &assignments,
            &announcements,
            &discussions,
            &staff,
        )?;

        let texts: Vec<String> = built.chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embeddings.embed_texts(&texts).await?;

        let records: Vec<VectorRecord> = built
            .chunks
            .iter()
            .zip(vectors)
            .map(|(chunk, values)| VectorRecord {
                id: chunk.id.clone(),
                values,
                metadata: ChunkMetadata::from(chunk),
            })
            .collect();

        self.index.delete_namespace(course_id).await?;
        self.index.upsert(course_id, &records).await?;

        tracing::info!(
            course_id,
            course_name = %built.course_name,
            chunks = records.len(),
            "course ingested"
        );

        Ok(IngestOutcome {
            course_name: built.course_name,
            chunk_count: records.len(),
            counts: built.counts,
        })
    }

    /// Remove every vector in the course's namespace.
    pub async fn reset_course(&self, course_id: u64) -> Result<()> {
        tracing::info!(course_id, "clearing course namespace");
        self.index.delete_namespace(course_id).await
    }
}
