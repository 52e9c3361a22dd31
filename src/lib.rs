//! Svar - Course Question Answering
//!
//! A local-first CLI for asking questions about a video course, answered from
//! pre-embedded transcript chunks via retrieval-augmented generation.
//!
//! The name "Svar" comes from the Norwegian/Scandinavian word for "answer."
//!
//! # Overview
//!
//! Svar allows you to:
//! - Ask questions and get grounded answers with video, topic, and timestamp
//! - Search transcript chunks semantically without generating an answer
//! - Gate off-topic questions instead of answering them badly
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management and prompt templates
//! - `store` - The pre-built, read-only embedding store
//! - `embedding` - Query embedding via Ollama
//! - `ranker` - Cosine similarity ranking, relevance gate, top-K selection
//! - `context` - Prompt assembly from selected chunks
//! - `generation` - Answer generation via Ollama
//! - `pipeline` - The per-query orchestration
//! - `diagnostics` - Optional prompt/answer artifacts
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use svar::config::Settings;
//! use svar::embedding::OllamaEmbedder;
//! use svar::generation::OllamaGenerator;
//! use svar::pipeline::QueryPipeline;
//! use svar::store::EmbeddingStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let store = Arc::new(EmbeddingStore::load(&settings.store_path())?);
//!
//!     let embedder = Arc::new(OllamaEmbedder::new(
//!         &settings.ollama.base_url,
//!         &settings.embedding.model,
//!         settings.ollama_timeout(),
//!     ));
//!     let generator = Arc::new(OllamaGenerator::new(
//!         &settings.ollama.base_url,
//!         &settings.generation.model,
//!         settings.ollama_timeout(),
//!     ));
//!
//!     let pipeline = QueryPipeline::new(store, embedder, generator);
//!     let answer = pipeline.answer("what is flexbox?").await?;
//!     println!("{}", answer.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod embedding;
pub mod error;
pub mod generation;
pub mod pipeline;
pub mod ranker;
pub mod store;

pub use error::{Result, SvarError};
