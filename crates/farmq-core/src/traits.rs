//! Seams between the core and the embedding runtime.

/// Sentence-embedding provider.
///
/// Implementations must be deterministic for a fixed model: the same text
/// always maps to the same vector, and every vector has length `dim()`.
/// Category embeddings and question embeddings go through the same provider.
pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}
