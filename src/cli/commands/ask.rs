//! Ask command implementation.

use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::diagnostics;
use crate::embedding::OllamaEmbedder;
use crate::error::SvarError;
use crate::generation::OllamaGenerator;
use crate::pipeline::QueryPipeline;
use crate::store::EmbeddingStore;
use anyhow::Result;
use std::io::Write;
use std::sync::Arc;

/// Run the ask command.
pub async fn run_ask(
    question: Option<&str>,
    model: Option<String>,
    top_k: Option<usize>,
    settings: Settings,
) -> Result<()> {
    // The store must be loadable before any question is read
    let store = match EmbeddingStore::load(&settings.store_path()) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            Output::error(&format!("{}", e));
            Output::info("Run 'svar doctor' for detailed diagnostics.");
            return Err(e.into());
        }
    };

    let question = match question {
        Some(q) => q.to_string(),
        None => read_question()?,
    };

    let model = model.unwrap_or_else(|| settings.generation.model.clone());

    let embedder = Arc::new(OllamaEmbedder::new(
        &settings.ollama.base_url,
        &settings.embedding.model,
        settings.ollama_timeout(),
    ));
    let generator = Arc::new(OllamaGenerator::new(
        &settings.ollama.base_url,
        &model,
        settings.ollama_timeout(),
    ));

    let prompts = Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    )?;

    let pipeline = QueryPipeline::new(store, embedder, generator)
        .with_prompts(prompts)
        .with_top_k(top_k.unwrap_or(settings.retrieval.top_k))
        .with_min_score(settings.retrieval.min_score);

    let spinner = Output::spinner("Answering...");
    let result = async {
        let prompt = pipeline.prepare(&question).await?;
        // Persisted before the generation call so it survives a failed one
        diagnostics::write_prompt_artifact(&settings.artifacts, &prompt);

        let answer = pipeline.generate(&prompt).await?;
        diagnostics::write_answer_artifact(&settings.artifacts, &answer);
        Ok::<_, SvarError>(answer)
    }
    .await;
    spinner.finish_and_clear();

    match result {
        Ok(answer) => {
            println!("\n{}\n", answer);
            Ok(())
        }
        Err(SvarError::NotRelevant) => {
            // A refusal, not a failure
            Output::warning("Question not related to the course.");
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("{}", e));
            Err(e.into())
        }
    }
}

/// Prompt for a question on stdin.
fn read_question() -> Result<String> {
    print!("Ask a question related to the course: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
