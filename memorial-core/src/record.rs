use std::collections::BTreeMap;

use crate::format::ValidationPolicy;
use crate::normalize::{clean_category, clean_description, normalize_model};

/// One normalized (model, category, description) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    /// Canonical model name (e.g., `"FY 550"`).
    pub model: String,
    /// Item category, trimmed.
    pub category: String,
    /// Item description, trimmed and stripped of one layer of quotes.
    pub description: String,
}

impl ItemRecord {
    /// Build a record from raw source cells, applying normalization.
    ///
    /// No validation happens here; see [`ItemRecord::satisfies`].
    pub fn from_raw(model: &str, category: &str, description: &str) -> Self {
        Self {
            model: normalize_model(model),
            category: clean_category(category),
            description: clean_description(description),
        }
    }

    /// Name of the first field the policy requires that is empty, if any.
    pub fn missing_field(&self, policy: ValidationPolicy) -> Option<&'static str> {
        if self.model.is_empty() {
            return Some("model");
        }
        if policy == ValidationPolicy::RequireAll {
            if self.category.is_empty() {
                return Some("category");
            }
            if self.description.is_empty() {
                return Some("description");
            }
        }
        None
    }

    /// Whether every field the policy requires is non-empty.
    pub fn satisfies(&self, policy: ValidationPolicy) -> bool {
        self.missing_field(policy).is_none()
    }
}

/// Count of records per normalized model name, ordered by model name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionSummary {
    counts: BTreeMap<String, usize>,
}

impl DistributionSummary {
    /// Tally the models of a record sequence.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ItemRecord>,
    {
        let mut counts = BTreeMap::new();
        for record in records {
            *counts.entry(record.model.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of records for a model, zero if absent.
    pub fn count(&self, model: &str) -> usize {
        self.counts.get(model).copied().unwrap_or(0)
    }

    /// Total number of records counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct models.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(model, count)` pairs in ascending model order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(m, &c)| (m.as_str(), c))
    }

    /// Distinct model names in ascending order.
    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }
}

impl std::fmt::Display for DistributionSummary {
    /// Inline form: `FY 550: 12, FY 670: 3`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (model, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{model}: {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
