use farmq_classify::{cosine_similarity, ClassifierContext};
use farmq_core::domains::CategorySet;
use farmq_core::traits::Embedder;
use farmq_embed::FakeEmbedder;

/// Embedder returning fixed vectors so similarity outcomes are pinned
/// exactly, independent of any hashing scheme.
struct StaticEmbedder;

impl Embedder for StaticEmbedder {
    fn dim(&self) -> usize { 3 }
    fn max_len(&self) -> usize { 16 }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|t| match t.as_str() {
                "water phrase" => vec![1.0, 0.0, 0.0],
                "pest phrase" => vec![0.0, 1.0, 0.0],
                "general phrase" => vec![0.0, 0.0, 1.0],
                "mostly about water" => vec![0.9, 0.1, 0.0],
                _ => vec![0.0, 0.0, 0.0],
            })
            .collect())
    }
}

/// Every category phrase maps to the same vector, forcing a full tie.
struct ConstantEmbedder;

impl Embedder for ConstantEmbedder {
    fn dim(&self) -> usize { 2 }
    fn max_len(&self) -> usize { 16 }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }
}

fn three_category_set() -> CategorySet {
    farmq_core::domains::CategorySetBuilder::empty()
        .category("Irrigation", "water phrase")
        .category("Pests", "pest phrase")
        .category("General", "general phrase")
        .build()
        .expect("set")
}

#[test]
fn closest_category_wins() {
    let ctx = ClassifierContext::new(Box::new(StaticEmbedder), three_category_set()).expect("ctx");
    let label = ctx.classify("mostly about water").expect("classify");
    assert_eq!(label, "Irrigation");
}

#[test]
fn tie_resolves_to_first_in_insertion_order() {
    let ctx =
        ClassifierContext::new(Box::new(ConstantEmbedder), three_category_set()).expect("ctx");
    let label = ctx.classify("anything at all").expect("classify");
    assert_eq!(label, "Irrigation", "first category of the set wins ties");
}

#[test]
fn question_matching_a_phrase_classifies_to_that_label() {
    let set = CategorySet::builder().build().expect("base set");
    let ctx = ClassifierContext::new(Box::new(FakeEmbedder::new(384)), set).expect("ctx");

    let label = ctx
        .classify("pest attacks, insects, locusts, pest management")
        .expect("classify");
    assert_eq!(label, "Pests");
}

#[test]
fn label_always_comes_from_the_set_and_is_deterministic() {
    let set = CategorySet::builder().build().expect("base set");
    let ctx = ClassifierContext::new(Box::new(FakeEmbedder::new(384)), set).expect("ctx");

    for q in [
        "my paddy leaves are turning yellow",
        "how much urea per acre",
        "completely unrelated text about spaceships",
    ] {
        let first = ctx.classify(q).expect("classify").to_string();
        assert!(ctx.categories().contains_label(&first), "{first} not in set");
        let second = ctx.classify(q).expect("classify");
        assert_eq!(first, second, "same question, same label");
    }
}

#[test]
fn cosine_similarity_basics() {
    assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    // Zero vectors score 0, never NaN
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
}
