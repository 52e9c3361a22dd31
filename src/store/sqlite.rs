//! SQLite reader for the pre-built embedding store.
//!
//! The database is produced by an external indexing pipeline; this module
//! only reads it. Embeddings are stored as little-endian f32 BLOBs, and
//! rowid order defines store order.

use super::ChunkRecord;
use crate::error::{Result, SvarError};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::debug;

/// Load all chunk records from the database, in rowid order.
pub fn load_records(path: &Path) -> Result<Vec<ChunkRecord>> {
    if !path.exists() {
        return Err(SvarError::Store(format!(
            "embedding store not found at {}",
            path.display()
        )));
    }

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let mut stmt = conn.prepare(
        "SELECT title, number, start_seconds, end_seconds, text, embedding
         FROM chunks ORDER BY rowid",
    )?;

    let rows = stmt.query_map([], |row| {
        let embedding_bytes: Vec<u8> = row.get(5)?;
        Ok(ChunkRecord {
            title: row.get(0)?,
            number: row.get(1)?,
            start: row.get(2)?,
            end: row.get(3)?,
            text: row.get(4)?,
            embedding: bytes_to_embedding(&embedding_bytes),
        })
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }

    debug!("Read {} chunk rows from {:?}", records.len(), path);

    Ok(records)
}

/// Deserialize an embedding from little-endian f32 bytes.
fn bytes_to_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| {
            let arr: [u8; 4] = chunk.try_into().unwrap_or_default();
            f32::from_le_bytes(arr)
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn embedding_to_bytes(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EmbeddingStore;
    use rusqlite::params;

    fn write_fixture(path: &Path, chunks: &[(&str, u32, f64, f64, &str, Vec<f32>)]) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE chunks (
                title TEXT NOT NULL,
                number INTEGER NOT NULL,
                start_seconds REAL NOT NULL,
                end_seconds REAL NOT NULL,
                text TEXT NOT NULL,
                embedding BLOB NOT NULL
            );",
        )
        .unwrap();

        for (title, number, start, end, text, embedding) in chunks {
            conn.execute(
                "INSERT INTO chunks (title, number, start_seconds, end_seconds, text, embedding)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![title, number, start, end, text, embedding_to_bytes(embedding)],
            )
            .unwrap();
        }
    }

    #[test]
    fn test_embedding_byte_round_trip() {
        let embedding = vec![0.25, -1.5, 3.0];
        let bytes = embedding_to_bytes(&embedding);
        assert_eq!(bytes.len(), 12);
        assert_eq!(bytes_to_embedding(&bytes), embedding);
    }

    #[test]
    fn test_load_records_in_row_order() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("embeddings.db");
        write_fixture(
            &db_path,
            &[
                ("Intro to HTML", 1, 0.0, 120.0, "html basics", vec![1.0, 0.0]),
                ("CSS Selectors", 2, 30.0, 180.0, "selectors", vec![0.0, 1.0]),
            ],
        );

        let records = load_records(&db_path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Intro to HTML");
        assert_eq!(records[0].number, 1);
        assert_eq!(records[0].embedding, vec![1.0, 0.0]);
        assert_eq!(records[1].title, "CSS Selectors");
        assert_eq!(records[1].end, 180.0);
    }

    #[test]
    fn test_missing_database_is_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(&dir.path().join("absent.db")).unwrap_err();
        assert!(matches!(err, SvarError::Store(_)));
    }

    #[test]
    fn test_empty_database_fails_store_load() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("embeddings.db");
        write_fixture(&db_path, &[]);

        let err = EmbeddingStore::load(&db_path).unwrap_err();
        assert!(matches!(err, SvarError::Store(_)));
    }

    #[test]
    fn test_store_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("embeddings.db");
        write_fixture(
            &db_path,
            &[
                ("Intro to HTML", 1, 0.0, 120.0, "html basics", vec![1.0, 0.0, 0.0]),
                ("CSS Selectors", 2, 30.0, 180.0, "selectors", vec![0.0, 1.0, 0.0]),
                ("Flexbox", 3, 60.0, 240.0, "flexbox layout", vec![0.0, 0.0, 1.0]),
            ],
        );

        let store = EmbeddingStore::load(&db_path).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.dimensions(), 3);
    }
}
