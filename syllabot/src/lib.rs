//! Self-hostable AI course assistant.
//!
//! Two pipelines around a vector index:
//!
//! - **Ingestion**: drain a Canvas-style course (syllabus, assignments,
//!   announcements, discussions, staff) into normalized, size-bounded chunks,
//!   embed them, and rebuild the course's index namespace.
//! - **Chat**: embed a question, retrieve the nearest chunks, assemble a
//!   prioritized context block (upcoming assignments first), and answer with
//!   one LLM call plus short-term session memory.

pub mod api;
pub mod canvas;
pub mod config;
pub mod embeddings;
pub mod error;
pub mod index;
pub mod llm;
pub mod memory;
pub mod models;
pub mod processing;
pub mod retrieval;
pub mod services;
