//! The pre-built embedding store.
//!
//! The store is an ordered, read-only table of transcript chunks with their
//! embeddings, produced by an external indexing pipeline. It is loaded once
//! at process start and shared across queries.

mod sqlite;

use crate::error::{Result, SvarError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One retrievable transcript chunk with its embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Human-readable video title.
    pub title: String,
    /// Video ordinal in the course.
    pub number: u32,
    /// Start time of the chunk in the video (seconds).
    pub start: f64,
    /// End time of the chunk in the video (seconds).
    pub end: f64,
    /// Transcript text for the interval.
    pub text: String,
    /// Embedding vector.
    pub embedding: Vec<f32>,
}

impl ChunkRecord {
    /// Format the chunk's start time for display.
    pub fn format_timestamp(&self) -> String {
        let total_seconds = self.start as u32;
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let secs = total_seconds % 60;

        if hours > 0 {
            format!("{:02}:{:02}:{:02}", hours, minutes, secs)
        } else {
            format!("{:02}:{:02}", minutes, secs)
        }
    }
}

/// In-memory table of chunk records, ordered by position.
///
/// Invariants, checked at construction: the store is non-empty and every
/// embedding has the same non-zero dimensionality.
#[derive(Debug)]
pub struct EmbeddingStore {
    records: Vec<ChunkRecord>,
    dimensions: usize,
}

impl EmbeddingStore {
    /// Build a store from records, validating the store invariants.
    pub fn new(records: Vec<ChunkRecord>) -> Result<Self> {
        let Some(first) = records.first() else {
            return Err(SvarError::Store("embedding store is empty".to_string()));
        };

        let dimensions = first.embedding.len();
        if dimensions == 0 {
            return Err(SvarError::Store(
                "chunk 0 has an empty embedding".to_string(),
            ));
        }

        for (i, record) in records.iter().enumerate() {
            if record.embedding.len() != dimensions {
                return Err(SvarError::Store(format!(
                    "chunk {} has {} dimensions, expected {}",
                    i,
                    record.embedding.len(),
                    dimensions
                )));
            }
        }

        Ok(Self {
            records,
            dimensions,
        })
    }

    /// Load the store from a SQLite database file.
    pub fn load(path: &Path) -> Result<Self> {
        let records = sqlite::load_records(path)?;
        let store = Self::new(records)?;

        info!(
            "Loaded {} chunks ({} dimensions) from {:?}",
            store.len(),
            store.dimensions(),
            path
        );

        Ok(store)
    }

    /// All records in store order.
    pub fn records(&self) -> &[ChunkRecord] {
        &self.records
    }

    /// Number of chunks in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// The store can never be empty; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding dimensionality shared by every chunk.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
pub(crate) fn test_record(title: &str, number: u32, embedding: Vec<f32>) -> ChunkRecord {
    ChunkRecord {
        title: title.to_string(),
        number,
        start: 10.0,
        end: 95.0,
        text: format!("transcript for {}", title),
        embedding,
    }
}
