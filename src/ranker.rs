//! Similarity ranking over the embedding store.
//!
//! Scores every stored chunk against the query embedding with cosine
//! similarity, applies the relevance gate, and selects the top-K chunks.

use crate::error::{Result, SvarError};
use crate::store::EmbeddingStore;
use std::cmp::Ordering;
use tracing::debug;

/// Default number of chunks selected as generation context.
pub const DEFAULT_TOP_K: usize = 5;

/// Default relevance gate: queries whose best chunk scores below this are rejected.
pub const DEFAULT_MIN_SCORE: f32 = 0.30;

/// One ranked chunk: its position in the store and its similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedChunk {
    pub index: usize,
    pub score: f32,
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Score every chunk in the store against the query, parallel to store order.
pub fn score_chunks(query: &[f32], store: &EmbeddingStore) -> Vec<f32> {
    store
        .records()
        .iter()
        .map(|record| cosine_similarity(query, &record.embedding))
        .collect()
}

/// Rank the store against a query embedding.
///
/// Rejects the query with [`SvarError::NotRelevant`] when no chunk scores at
/// least `min_score`. Otherwise returns up to `top_k` chunks sorted by
/// descending score; ties keep store order so results are deterministic. The
/// gate applies to the maximum score only, so selected chunks below the
/// threshold stay selected.
pub fn rank(
    query: &[f32],
    store: &EmbeddingStore,
    min_score: f32,
    top_k: usize,
) -> Result<Vec<RankedChunk>> {
    let scores = score_chunks(query, store);

    let max_score = scores.iter().cloned().fold(f32::MIN, f32::max);
    if max_score < min_score {
        debug!(
            "Best similarity {:.3} below threshold {:.3}, rejecting query",
            max_score, min_score
        );
        return Err(SvarError::NotRelevant);
    }

    let mut ranked: Vec<RankedChunk> = scores
        .into_iter()
        .enumerate()
        .map(|(index, score)| RankedChunk { index, score })
        .collect();

    // Stable sort keeps store order for equal scores
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked.truncate(top_k);

    debug!(
        "Selected {} chunks, best score {:.3}",
        ranked.len(),
        max_score
    );

    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_record;

    fn store_with_embeddings(embeddings: Vec<Vec<f32>>) -> EmbeddingStore {
        let records = embeddings
            .into_iter()
            .enumerate()
            .map(|(i, e)| test_record(&format!("video {}", i), i as u32 + 1, e))
            .collect();
        EmbeddingStore::new(records).unwrap()
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);

        let c = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &c).abs() < 1e-6);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_self_similarity_is_one() {
        let v = vec![0.3, -0.7, 0.2, 0.9];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_score_chunks_parallel_to_store_order() {
        let store = store_with_embeddings(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 1.0],
        ]);
        let scores = score_chunks(&[1.0, 0.0], &store);
        assert_eq!(scores.len(), 3);
        assert!((scores[0] - 1.0).abs() < 1e-6);
        assert!(scores[1].abs() < 1e-6);
        assert!((scores[2] - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn test_rank_returns_unique_in_bounds_descending() {
        let store = store_with_embeddings(vec![
            vec![0.2, 1.0],
            vec![1.0, 0.1],
            vec![0.5, 0.5],
            vec![1.0, 0.0],
        ]);
        let ranked = rank(&[1.0, 0.0], &store, DEFAULT_MIN_SCORE, DEFAULT_TOP_K).unwrap();

        let mut seen = std::collections::HashSet::new();
        for chunk in &ranked {
            assert!(chunk.index < store.len());
            assert!(seen.insert(chunk.index));
        }
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_rank_gates_irrelevant_query() {
        let store = store_with_embeddings(vec![vec![0.0, 1.0], vec![0.1, 1.0]]);
        let err = rank(&[1.0, 0.0], &store, DEFAULT_MIN_SCORE, DEFAULT_TOP_K).unwrap_err();
        assert!(matches!(err, SvarError::NotRelevant));
    }

    #[test]
    fn test_rank_returns_all_chunks_when_store_smaller_than_k() {
        // similarities to the query: [0.9, 0.5, 0.1] within rounding
        let store = store_with_embeddings(vec![
            vec![0.9, (1.0f32 - 0.81).sqrt()],
            vec![0.5, (1.0f32 - 0.25).sqrt()],
            vec![0.1, (1.0f32 - 0.01).sqrt()],
        ]);
        let ranked = rank(&[1.0, 0.0], &store, DEFAULT_MIN_SCORE, 5).unwrap();

        assert_eq!(ranked.len(), 3);
        assert_eq!(
            ranked.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!((ranked[0].score - 0.9).abs() < 1e-3);
        assert!((ranked[1].score - 0.5).abs() < 1e-3);
        assert!((ranked[2].score - 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_rank_caps_selection_at_k() {
        let store = store_with_embeddings(vec![vec![1.0, 0.0]; 8]);
        let ranked = rank(&[1.0, 0.0], &store, DEFAULT_MIN_SCORE, DEFAULT_TOP_K).unwrap();
        assert_eq!(ranked.len(), DEFAULT_TOP_K);
    }

    #[test]
    fn test_tie_scores_keep_store_order() {
        let store = store_with_embeddings(vec![vec![1.0, 0.0]; 4]);
        let ranked = rank(&[1.0, 0.0], &store, DEFAULT_MIN_SCORE, DEFAULT_TOP_K).unwrap();
        assert_eq!(
            ranked.iter().map(|r| r.index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_selected_chunks_below_threshold_stay_selected() {
        // One chunk passes the gate; weaker chunks still rank behind it.
        let store = store_with_embeddings(vec![
            vec![1.0, 0.0],
            vec![0.1, (1.0f32 - 0.01).sqrt()],
        ]);
        let ranked = rank(&[1.0, 0.0], &store, DEFAULT_MIN_SCORE, DEFAULT_TOP_K).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].index, 0);
        assert_eq!(ranked[1].index, 1);
    }
}
