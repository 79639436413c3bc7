use crate::product::{ProductRow, Tier};
use crate::similarity::SimilarityMatrix;
use crate::tfidf::TfIdfModel;
use crate::{Error, Result};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

/// Number of products returned when the caller gives no limit
pub const DEFAULT_RECOMMENDATIONS: usize = 8;

/// A recommended product, projected to what the UI renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub description: String,
}

/// A product ranked by similarity-matrix score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProduct {
    pub position: usize,
    pub name: String,
    pub description: String,
    pub score: f32,
}

/// Snapshot of one tier plus everything derived from it.
///
/// Built once and never mutated; a tier switch builds a new one.
#[derive(Debug, Clone)]
pub struct IndexState {
    tier: Tier,
    snapshot: Arc<[ProductRow]>,
    model: TfIdfModel,
    matrix: SimilarityMatrix,
    categories: Vec<String>,
    built_at: SystemTime,
    build_time: Duration,
}

impl IndexState {
    /// Build the vector space and similarity matrix for `rows`.
    ///
    /// Never fails: an empty snapshot or empty vocabulary yields an
    /// all-zero (possibly 0 x 0) matrix.
    pub fn build(tier: Tier, rows: Vec<ProductRow>) -> Self {
        let started = Instant::now();
        let labels: Vec<&str> = rows.iter().map(ProductRow::label).collect();
        let model = TfIdfModel::fit_transform(&labels);
        let matrix = SimilarityMatrix::from_vectors(model.vectors());

        let mut seen = AHashSet::new();
        let categories = rows
            .iter()
            .filter_map(|row| row.category.as_deref())
            .filter(|label| seen.insert(*label))
            .map(str::to_string)
            .collect();

        let build_time = started.elapsed();
        tracing::debug!(
            tier = %tier,
            products = rows.len(),
            vocabulary = model.vocabulary_len(),
            ?build_time,
            "index built"
        );

        Self {
            tier,
            snapshot: rows.into(),
            model,
            matrix,
            categories,
            built_at: SystemTime::now(),
            build_time,
        }
    }

    /// Empty state for `tier`, used before any catalog data is available
    #[must_use]
    pub fn empty(tier: Tier) -> Self {
        Self::build(tier, Vec::new())
    }

    #[inline]
    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &[ProductRow] {
        &self.snapshot
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn model(&self) -> &TfIdfModel {
        &self.model
    }

    #[inline]
    #[must_use]
    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    /// Distinct non-null category labels, first-seen order
    #[inline]
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[inline]
    #[must_use]
    pub fn built_at(&self) -> SystemTime {
        self.built_at
    }

    #[inline]
    #[must_use]
    pub fn build_time(&self) -> Duration {
        self.build_time
    }

    /// Snapshot positions matching `category`: exact label matches first,
    /// then labels containing it as a substring, deduplicated, at most `limit`.
    pub fn matching_positions(&self, category: &str, limit: usize) -> Vec<usize> {
        let exact = self
            .snapshot
            .iter()
            .enumerate()
            .filter(|(_, row)| row.label() == category)
            .map(|(i, _)| i);
        let related = self
            .snapshot
            .iter()
            .enumerate()
            .filter(|(_, row)| row.label().contains(category))
            .map(|(i, _)| i);

        let mut seen = AHashSet::new();
        exact
            .chain(related)
            .filter(|i| seen.insert(*i))
            .take(limit)
            .collect()
    }

    /// Recommend products for a category label.
    ///
    /// Label matching only; the similarity matrix is not consulted.
    /// Matching is case-sensitive and an empty `category` matches every
    /// product (empty labels first).
    pub fn recommend(&self, category: &str, limit: usize) -> Vec<Recommendation> {
        self.matching_positions(category, limit)
            .into_iter()
            .map(|i| {
                let row = &self.snapshot[i];
                Recommendation {
                    name: row.name.clone(),
                    description: row.description.clone(),
                }
            })
            .collect()
    }

    /// Products closest to the one at `position` by matrix score,
    /// excluding itself and anything scoring zero. Ties keep snapshot order.
    pub fn similar_products(&self, position: usize, limit: usize) -> Result<Vec<ScoredProduct>> {
        let row = self
            .matrix
            .row(position)
            .ok_or(Error::ProductNotFound(position))?;

        let mut scored: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(j, score)| j != position && score > 0.0)
            .collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(limit);

        Ok(scored
            .into_iter()
            .map(|(j, score)| {
                let product = &self.snapshot[j];
                ScoredProduct {
                    position: j,
                    name: product.name.clone(),
                    description: product.description.clone(),
                    score,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<ProductRow> {
        vec![
            ProductRow::new("A", "wireless", Some("mouse")),
            ProductRow::new("B", "cloth", Some("mouse pad")),
            ProductRow::new("C", "mechanical", Some("keyboard")),
        ]
    }

    fn names(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_mouse_scenario() {
        let state = IndexState::build(Tier::Mainstream, sample_rows());
        let recs = state.recommend("mouse", DEFAULT_RECOMMENDATIONS);
        assert_eq!(
            recs,
            vec![
                Recommendation { name: "A".into(), description: "wireless".into() },
                Recommendation { name: "B".into(), description: "cloth".into() },
            ]
        );
    }

    #[test]
    fn test_exact_matches_take_priority() {
        let rows = vec![
            ProductRow::new("P1", "", Some("gaming mouse")),
            ProductRow::new("P2", "", Some("mouse")),
            ProductRow::new("P3", "", Some("mouse")),
        ];
        let state = IndexState::build(Tier::Star, rows);
        assert_eq!(names(&state.recommend("mouse", 8)), vec!["P2", "P3", "P1"]);
        assert_eq!(names(&state.recommend("mouse", 2)), vec!["P2", "P3"]);
    }

    #[test]
    fn test_no_duplicates_and_truncation() {
        let rows: Vec<ProductRow> = (0..20)
            .map(|i| ProductRow::new(format!("P{}", i), "", Some(if i % 2 == 0 { "mouse" } else { "mouse pad" })))
            .collect();
        let state = IndexState::build(Tier::Star, rows);

        for limit in [0, 1, 5, 8, 20, 100] {
            let positions = state.matching_positions("mouse", limit);
            assert!(positions.len() <= limit);
            let unique: AHashSet<_> = positions.iter().collect();
            assert_eq!(unique.len(), positions.len());
        }
        assert_eq!(state.recommend("mouse", DEFAULT_RECOMMENDATIONS).len(), 8);
        assert_eq!(state.matching_positions("mouse", 100).len(), 20);
        assert_eq!(state.matching_positions("mouse", 10), vec![0, 2, 4, 6, 8, 10, 12, 14, 16, 18]);
    }

    #[test]
    fn test_case_sensitive_and_no_match() {
        let state = IndexState::build(Tier::Mainstream, sample_rows());
        assert!(state.recommend("Mouse", 8).is_empty());
        assert!(state.recommend("monitor", 8).is_empty());
    }

    #[test]
    fn test_empty_category_matches_everything() {
        let mut rows = sample_rows();
        rows.push(ProductRow::new("D", "unlabeled", None));
        let state = IndexState::build(Tier::Mainstream, rows);
        assert_eq!(names(&state.recommend("", 8)), vec!["D", "A", "B", "C"]);
    }

    #[test]
    fn test_null_category_matches_nothing_but_empty() {
        let rows = vec![ProductRow::new("X", "", None)];
        let state = IndexState::build(Tier::Flagship, rows);
        assert!(state.recommend("mouse", 8).is_empty());
        assert!(state.categories().is_empty());
    }

    #[test]
    fn test_order_invariant_and_determinism() {
        let rows = vec![
            ProductRow::new("A", "", Some("mouse")),
            ProductRow::new("B", "", Some("keyboard")),
            ProductRow::new("C", "", Some("mouse pad")),
        ];
        let first = IndexState::build(Tier::Mainstream, rows.clone());
        let second = IndexState::build(Tier::Mainstream, rows);
        assert_eq!(first.matrix().size(), first.len());
        assert!(first.matrix().max_abs_diff(second.matrix()).unwrap() < 1e-6);

        // row i belongs to snapshot row i: A and C share "mouse", B is unrelated
        assert!(first.matrix().get(0, 2).unwrap() > 0.0);
        assert_eq!(first.matrix().get(0, 1).unwrap(), 0.0);
        assert_eq!(first.matrix().get(1, 2).unwrap(), 0.0);
    }

    #[test]
    fn test_empty_snapshot() {
        let state = IndexState::empty(Tier::Mainstream);
        assert!(state.is_empty());
        assert!(state.matrix().is_empty());
        assert_eq!(state.model().vocabulary_len(), 0);
        assert!(state.recommend("mouse", 8).is_empty());
        assert!(state.recommend("", 8).is_empty());
    }

    #[test]
    fn test_categories_distinct_in_order() {
        let rows = vec![
            ProductRow::new("A", "", Some("mouse")),
            ProductRow::new("B", "", None),
            ProductRow::new("C", "", Some("keyboard")),
            ProductRow::new("D", "", Some("mouse")),
        ];
        let state = IndexState::build(Tier::Mainstream, rows);
        assert_eq!(state.categories(), &["mouse".to_string(), "keyboard".to_string()]);
    }

    #[test]
    fn test_similar_products() {
        let state = IndexState::build(Tier::Mainstream, sample_rows());
        let similar = state.similar_products(0, 8).unwrap();
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].name, "B");
        assert!(similar[0].score > 0.0 && similar[0].score < 1.0);

        assert!(state.similar_products(2, 8).unwrap().is_empty());
        assert!(matches!(state.similar_products(3, 8), Err(Error::ProductNotFound(3))));
    }
}
