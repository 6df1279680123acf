//! The symptom vocabulary: the model's fixed, ordered input space.

use crate::normalize::canonical;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered set of symptom feature columns, fixed at preprocessing time.
///
/// `columns` holds the original column names in the exact order the training
/// matrix used; `lookup` maps the canonical form of each name to its column
/// index. The order must never change between training and inference — a
/// mismatch silently corrupts every prediction, so the vocabulary travels
/// inside the model bundle instead of being rebuilt from the CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomVocabulary {
    columns: Vec<String>,
    lookup: BTreeMap<String, usize>,
}

impl SymptomVocabulary {
    /// Builds the vocabulary from the training-time column list, preserving
    /// its order.
    pub fn from_columns(columns: Vec<String>) -> Self {
        let lookup = columns
            .iter()
            .enumerate()
            .map(|(i, col)| (canonical(col), i))
            .collect();
        SymptomVocabulary { columns, lookup }
    }

    /// Number of feature columns, i.e. the width of every feature vector.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column index for an already-canonical token, if the symptom is known.
    pub fn resolve(&self, token: &str) -> Option<usize> {
        self.lookup.get(token).copied()
    }

    /// Original column name at `index`.
    pub fn column(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }

    /// Canonical symptom names in alphabetical order, for `list` and
    /// `GET /symptoms`.
    pub fn sorted_names(&self) -> Vec<String> {
        self.lookup.keys().cloned().collect()
    }
}
