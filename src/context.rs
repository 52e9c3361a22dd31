//! Context assembly for answer generation.
//!
//! Serializes the selected chunks and the user's question into the answer
//! prompt. Pure: no I/O, deterministic for identical inputs.

use crate::config::Prompts;
use crate::error::Result;
use crate::store::ChunkRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Chunk fields exposed to the generation model. Embeddings stay internal.
#[derive(Serialize)]
struct PromptChunk<'a> {
    title: &'a str,
    number: u32,
    start: f64,
    end: f64,
    text: &'a str,
}

impl<'a> From<&'a ChunkRecord> for PromptChunk<'a> {
    fn from(record: &'a ChunkRecord) -> Self {
        Self {
            title: &record.title,
            number: record.number,
            start: record.start,
            end: record.end,
            text: &record.text,
        }
    }
}

/// Assemble the generation prompt from the question and the selected chunks.
///
/// Chunks are serialized as a compact JSON array of records in their ranked
/// order, then substituted into the answer template together with the
/// question.
pub fn assemble(question: &str, chunks: &[&ChunkRecord], prompts: &Prompts) -> Result<String> {
    let records: Vec<PromptChunk> = chunks.iter().map(|c| PromptChunk::from(*c)).collect();
    let serialized = serde_json::to_string(&records)?;

    let mut vars = HashMap::new();
    vars.insert("chunks".to_string(), serialized);
    vars.insert("question".to_string(), question.to_string());

    Ok(prompts.render_with_custom(&prompts.answer.template, &vars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_record;

    #[test]
    fn test_assemble_contains_question_and_chunk_fields() {
        let record = test_record("Intro to HTML", 1, vec![1.0, 0.0]);
        let prompt = assemble("what is html?", &[&record], &Prompts::default()).unwrap();

        assert!(prompt.contains("what is html?"));
        assert!(prompt.contains(r#""title":"Intro to HTML""#));
        assert!(prompt.contains(r#""number":1"#));
        assert!(prompt.contains(r#""start":10.0"#));
        assert!(prompt.contains(r#""end":95.0"#));
        assert!(prompt.contains("transcript for Intro to HTML"));
    }

    #[test]
    fn test_assemble_excludes_embeddings() {
        let record = test_record("Intro to HTML", 1, vec![0.123_456, 0.654_321]);
        let prompt = assemble("what is html?", &[&record], &Prompts::default()).unwrap();

        assert!(!prompt.contains("embedding"));
        assert!(!prompt.contains("0.123456"));
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let records = vec![
            test_record("Intro to HTML", 1, vec![1.0, 0.0]),
            test_record("CSS Selectors", 2, vec![0.0, 1.0]),
        ];
        let selected: Vec<&ChunkRecord> = records.iter().collect();
        let prompts = Prompts::default();

        let first = assemble("what is css?", &selected, &prompts).unwrap();
        let second = assemble("what is css?", &selected, &prompts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_assemble_preserves_ranked_order() {
        let records = vec![
            test_record("Second Best", 2, vec![0.0, 1.0]),
            test_record("Best Match", 1, vec![1.0, 0.0]),
        ];
        let selected: Vec<&ChunkRecord> = vec![&records[1], &records[0]];
        let prompt = assemble("q", &selected, &Prompts::default()).unwrap();

        let best = prompt.find("Best Match").unwrap();
        let second = prompt.find("Second Best").unwrap();
        assert!(best < second);
    }
}
