//! Search command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::embedding::{Embedder, OllamaEmbedder};
use crate::error::SvarError;
use crate::ranker;
use crate::store::EmbeddingStore;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    query: &str,
    limit: usize,
    min_score: f32,
    settings: Settings,
) -> Result<()> {
    let store = match EmbeddingStore::load(&settings.store_path()) {
        Ok(store) => store,
        Err(e) => {
            Output::error(&format!("{}", e));
            Output::info("Run 'svar doctor' for detailed diagnostics.");
            return Err(e.into());
        }
    };

    let embedder = OllamaEmbedder::new(
        &settings.ollama.base_url,
        &settings.embedding.model,
        settings.ollama_timeout(),
    );

    let spinner = Output::spinner("Searching...");

    let result = async {
        let embeddings = embedder.embed(&[query.to_string()]).await?;
        let query_embedding = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| SvarError::Embedding("empty embedding response".to_string()))?;

        if query_embedding.len() != store.dimensions() {
            return Err(SvarError::Embedding(format!(
                "query embedding has {} dimensions, store has {}",
                query_embedding.len(),
                store.dimensions()
            )));
        }

        ranker::rank(&query_embedding, &store, min_score, limit)
    }
    .await;

    spinner.finish_and_clear();

    match result {
        Ok(ranked) => {
            Output::success(&format!("Found {} results", ranked.len()));

            for chunk in &ranked {
                let record = &store.records()[chunk.index];
                Output::search_result(
                    &record.title,
                    record.number,
                    &record.format_timestamp(),
                    chunk.score,
                    &record.text,
                );
            }
            Ok(())
        }
        Err(SvarError::NotRelevant) => {
            Output::warning("No chunks matched above the similarity threshold.");
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            Err(e.into())
        }
    }
}
