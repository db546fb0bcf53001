use pgvector::Vector;
use uuid::Uuid;

use crate::domain::repositories::chunk_repository::ScoredChunk;

/// A scoped candidate loaded from the store, before scoring.
#[derive(Debug, Clone)]
pub struct ChunkCandidate {
    pub chunk_id: Uuid,
    pub document_id: Uuid,
    pub document_filename: String,
    pub chunk_index: i32,
    pub chunk_text: String,
    pub embedding: Vector,
}

/// Cosine similarity between two vectors. Equals `1 - cosine_distance`.
/// Mismatched dimensions or zero-length vectors score 0.0.
pub fn cosine_similarity(a: &Vector, b: &Vector) -> f32 {
    let a_slice = a.as_slice();
    let b_slice = b.as_slice();

    if a_slice.len() != b_slice.len() {
        return 0.0;
    }

    let dot_product: f32 = a_slice.iter().zip(b_slice.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a_slice.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b_slice.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Scores candidates against the query vector and returns at most `top_k`
/// results ordered by descending similarity. Ties break on ascending chunk
/// id so repeated searches over the same corpus are deterministic.
pub fn rank(query: &Vector, candidates: Vec<ChunkCandidate>, top_k: usize) -> Vec<ScoredChunk> {
    let mut results: Vec<ScoredChunk> = candidates
        .into_iter()
        .map(|candidate| {
            let similarity_score = cosine_similarity(query, &candidate.embedding);
            ScoredChunk {
                chunk_id: candidate.chunk_id,
                document_id: candidate.document_id,
                document_filename: candidate.document_filename,
                chunk_index: candidate.chunk_index,
                chunk_text: candidate.chunk_text,
                similarity_score,
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.similarity_score
            .total_cmp(&a.similarity_score)
            .then_with(|| a.chunk_id.cmp(&b.chunk_id))
    });
    results.truncate(top_k);

    results
}
