//! Agricultural category model used as the classification target set.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One classification target: a label and the keyword phrase that is
/// embedded to represent it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    pub keywords: String,
}

/// Ordered, label-unique set of categories.
///
/// Insertion order is load-bearing: the classifier breaks similarity ties
/// in favor of the earliest category. The set is immutable once built;
/// enrichment happens through [`CategorySetBuilder`] before any embedding
/// is derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    entries: Vec<Category>,
}

/// The nine base domains of the assistant. "General" is an ordinary member
/// that wins only by being the best match, not via special-casing.
const BASE_DOMAINS: [(&str, &str); 9] = [
    ("Soil", "soil quality, soil fertility, moisture, nutrients"),
    ("Seed Quality", "seed germination, seed quality, seed planting"),
    ("Irrigation", "water supply, irrigation, drought, flooding"),
    ("Pests", "pest attacks, insects, locusts, pest management"),
    ("Fertilizers", "fertilizer, nutrients, manure, chemical treatment"),
    ("Diseases", "plant diseases, yellow leaves, fungus, infection"),
    ("Weed Management", "weeds, invasive plants, grass, weed removal"),
    ("Ambient Conditions", "weather, temperature, cold, heat, climate"),
    ("General", "general agricultural questions"),
];

impl CategorySet {
    /// Builder seeded with the base agricultural domains.
    pub fn builder() -> CategorySetBuilder {
        let mut b = CategorySetBuilder::empty();
        for (label, keywords) in BASE_DOMAINS {
            b = b.category(label, keywords);
        }
        b
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|c| c.label.as_str())
    }

    pub fn keyword_phrases(&self) -> Vec<String> {
        self.entries.iter().map(|c| c.keywords.clone()).collect()
    }

    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|c| c.label.as_str())
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.entries.iter().any(|c| c.label == label)
    }
}

/// Two-step construction: seed (base literal or empty), then apply ordered
/// override rows, then `build()` a final immutable set.
#[derive(Debug, Default)]
pub struct CategorySetBuilder {
    entries: Vec<Category>,
}

impl CategorySetBuilder {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Insert or replace one category. A known label keeps its original
    /// position and only its keyword phrase changes; an unknown label is
    /// appended.
    #[must_use]
    pub fn category(mut self, label: impl Into<String>, keywords: impl Into<String>) -> Self {
        let label = label.into();
        let keywords = keywords.into();
        match self.entries.iter_mut().find(|c| c.label == label) {
            Some(existing) => existing.keywords = keywords,
            None => self.entries.push(Category { label, keywords }),
        }
        self
    }

    /// Apply ordered `(label, keywords)` override rows; later rows win over
    /// earlier rows sharing a label.
    #[must_use]
    pub fn overrides<I, L, K>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = (L, K)>,
        L: Into<String>,
        K: Into<String>,
    {
        for (label, keywords) in rows {
            self = self.category(label, keywords);
        }
        self
    }

    pub fn build(self) -> Result<CategorySet> {
        if self.entries.is_empty() {
            return Err(Error::InvalidConfig(
                "category set must contain at least one category".to_string(),
            ));
        }
        Ok(CategorySet { entries: self.entries })
    }
}
