//! The query pipeline.
//!
//! Wires the embedding client, ranker, context assembler, and generation
//! client into one request/response cycle. Each query walks the phases
//! `AwaitingInput -> Embedding -> Ranking -> Assembling -> Generating -> Done`,
//! ending in `Rejected` when the relevance gate fires or `Failed` on any
//! error. Every phase runs at most once; failures are terminal for the query
//! and nothing is retried.

use crate::config::Prompts;
use crate::context;
use crate::embedding::Embedder;
use crate::error::{Result, SvarError};
use crate::generation::Generator;
use crate::ranker::{self, DEFAULT_MIN_SCORE, DEFAULT_TOP_K};
use crate::store::{ChunkRecord, EmbeddingStore};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Phases of one query's lifecycle, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    AwaitingInput,
    Embedding,
    Ranking,
    Assembling,
    Generating,
    Done,
    Rejected,
    Failed,
}

impl std::fmt::Display for QueryPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            QueryPhase::AwaitingInput => "awaiting_input",
            QueryPhase::Embedding => "embedding",
            QueryPhase::Ranking => "ranking",
            QueryPhase::Assembling => "assembling",
            QueryPhase::Generating => "generating",
            QueryPhase::Done => "done",
            QueryPhase::Rejected => "rejected",
            QueryPhase::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// The outcome of a successful query.
#[derive(Debug, Clone)]
pub struct QueryAnswer {
    /// The generated answer.
    pub answer: String,
    /// The assembled prompt that produced it, kept for diagnostics.
    pub prompt: String,
}

/// Runs the retrieval-augmented query cycle against a read-only store.
pub struct QueryPipeline {
    store: Arc<EmbeddingStore>,
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    prompts: Prompts,
    top_k: usize,
    min_score: f32,
}

impl QueryPipeline {
    /// Create a pipeline with default retrieval settings.
    pub fn new(
        store: Arc<EmbeddingStore>,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            store,
            embedder,
            generator,
            prompts: Prompts::default(),
            top_k: DEFAULT_TOP_K,
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set the number of chunks selected as context.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the relevance gate threshold.
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }

    /// Answer one question.
    ///
    /// `Ok` is the `Done` phase; `Err(NotRelevant)` is the `Rejected` phase
    /// (a user-facing refusal, not a failure); any other error is `Failed`.
    #[instrument(skip(self, question))]
    pub async fn answer(&self, question: &str) -> Result<QueryAnswer> {
        let result = self.run(question).await;

        match &result {
            Ok(_) => info!(phase = %QueryPhase::Done, "Query answered"),
            Err(SvarError::NotRelevant) => {
                info!(phase = %QueryPhase::Rejected, "Query rejected by relevance gate")
            }
            Err(e) => debug!(phase = %QueryPhase::Failed, error = %e, "Query failed"),
        }

        result
    }

    /// Embed, rank, and assemble the prompt for one question.
    ///
    /// Walks the phases up to `Assembling` without touching the generation
    /// service, so callers can persist the prompt before generating from it.
    #[instrument(skip(self, question))]
    pub async fn prepare(&self, question: &str) -> Result<String> {
        debug!(phase = %QueryPhase::AwaitingInput, "Validating question");
        let question = question.trim();
        if question.is_empty() {
            return Err(SvarError::EmptyQuestion);
        }

        debug!(phase = %QueryPhase::Embedding, "Embedding question");
        let embeddings = self.embedder.embed(&[question.to_string()]).await?;
        let query = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| SvarError::Embedding("empty embedding response".to_string()))?;

        if query.len() != self.store.dimensions() {
            return Err(SvarError::Embedding(format!(
                "query embedding has {} dimensions, store has {}",
                query.len(),
                self.store.dimensions()
            )));
        }

        debug!(phase = %QueryPhase::Ranking, "Ranking {} chunks", self.store.len());
        let ranked = ranker::rank(&query, &self.store, self.min_score, self.top_k)?;

        debug!(phase = %QueryPhase::Assembling, "Assembling prompt from {} chunks", ranked.len());
        let selected: Vec<&ChunkRecord> = ranked
            .iter()
            .map(|r| &self.store.records()[r.index])
            .collect();
        context::assemble(question, &selected, &self.prompts)
    }

    /// Generate the answer for a prepared prompt.
    #[instrument(skip(self, prompt))]
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(phase = %QueryPhase::Generating, "Generating answer");
        self.generator.generate(prompt).await
    }

    async fn run(&self, question: &str) -> Result<QueryAnswer> {
        let prompt = self.prepare(question).await?;
        let answer = self.generate(&prompt).await?;

        Ok(QueryAnswer { answer, prompt })
    }
}
