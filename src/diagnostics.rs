//! Diagnostic artifacts for query inspection.
//!
//! The assembled prompt and the final answer can be persisted as plain-text
//! files. The prompt is written before generation so it survives a failed
//! call. Writes are best-effort: a failure is logged and swallowed so it
//! never affects the user-visible answer.

use crate::config::ArtifactSettings;
use tracing::{debug, warn};

/// Persist the assembled prompt for one query, if enabled.
pub fn write_prompt_artifact(settings: &ArtifactSettings, prompt: &str) {
    if settings.enabled {
        write_artifact(&settings.prompt_path, prompt);
    }
}

/// Persist the generated answer for one query, if enabled.
pub fn write_answer_artifact(settings: &ArtifactSettings, answer: &str) {
    if settings.enabled {
        write_artifact(&settings.answer_path, answer);
    }
}

fn write_artifact(path: &str, content: &str) {
    match std::fs::write(path, content) {
        Ok(()) => debug!("Wrote artifact {}", path),
        Err(e) => warn!("Failed to write artifact {}: {}", path, e),
    }
}
