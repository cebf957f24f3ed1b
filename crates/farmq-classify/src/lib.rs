//! Embedding-based domain classification.
//!
//! A [`ClassifierContext`] is built once from an embedder and a category
//! set, computing one embedding per category keyword phrase. After that it
//! is immutable and safe to share read-only; `classify` is a pure function
//! of the question text.

use anyhow::{anyhow, Result};
use farmq_core::domains::CategorySet;
use farmq_core::traits::Embedder;
use farmq_core::Error;

pub struct ClassifierContext {
    categories: CategorySet,
    category_embeddings: Vec<Vec<f32>>,
    embedder: Box<dyn Embedder>,
}

impl ClassifierContext {
    /// Embed every category phrase up front. Fails fast on an empty set
    /// (argmax over nothing is undefined) and propagates any embedding
    /// failure untouched.
    pub fn new(embedder: Box<dyn Embedder>, categories: CategorySet) -> Result<Self> {
        if categories.is_empty() {
            return Err(Error::InvalidConfig(
                "cannot build a classifier over an empty category set".to_string(),
            )
            .into());
        }
        let phrases = categories.keyword_phrases();
        let category_embeddings = embedder.embed_batch(&phrases)?;
        for e in &category_embeddings {
            assert_eq!(e.len(), embedder.dim());
        }
        Ok(Self { categories, category_embeddings, embedder })
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Label of the category whose embedding has maximum cosine similarity
    /// with the question embedding. Ties resolve to the earliest category
    /// in insertion order (strict `>` argmax).
    pub fn classify(&self, question: &str) -> Result<&str> {
        let q_vec = self.embedder.embed_batch(&[question.to_string()])?.remove(0);
        let mut best_idx = 0usize;
        let mut best_score = f32::NEG_INFINITY;
        for (idx, cat_vec) in self.category_embeddings.iter().enumerate() {
            let score = cosine_similarity(&q_vec, cat_vec);
            if score > best_score {
                best_score = score;
                best_idx = idx;
            }
        }
        self.categories
            .label_at(best_idx)
            .ok_or_else(|| anyhow!("category index {} out of range", best_idx))
    }
}

/// Dot product over the product of L2 norms. Zero vectors score 0 rather
/// than NaN so a degenerate embedding never wins the argmax.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denom = norm_a * norm_b;
    if denom <= f32::EPSILON { 0.0 } else { dot / denom }
}
