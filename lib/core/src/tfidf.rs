// TF-IDF vector space over category labels
use crate::tokenize::tokenize;
use crate::vector::SparseVector;
use ahash::AHashMap;

#[derive(Debug, Clone, Default)]
pub struct TfIdfModel {
    // term -> column
    vocabulary: AHashMap<String, u32>,
    // column -> term, sorted
    terms: Vec<String>,
    // column -> smoothed idf
    idf: Vec<f32>,
    // one l2-normalized vector per document, in input order
    vectors: Vec<SparseVector>,
}

impl TfIdfModel {
    /// Fit the vocabulary on `docs` and transform them.
    ///
    /// idf(t) = ln((1 + n) / (1 + df(t))) + 1, tf is the raw count.
    pub fn fit_transform<S: AsRef<str>>(docs: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d.as_ref())).collect();

        // term -> document frequency
        let mut term_dfs: AHashMap<&str, u32> = AHashMap::new();
        for tokens in &tokenized {
            let mut seen: Vec<&str> = tokens.iter().map(String::as_str).collect();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *term_dfs.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<String> = term_dfs.keys().map(|t| t.to_string()).collect();
        terms.sort_unstable();

        let n = docs.len() as f32;
        let idf: Vec<f32> = terms
            .iter()
            .map(|t| {
                let df = term_dfs.get(t.as_str()).copied().unwrap_or(0) as f32;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary: AHashMap<String, u32> = terms
            .iter()
            .enumerate()
            .map(|(col, t)| (t.clone(), col as u32))
            .collect();

        let vectors = tokenized
            .iter()
            .map(|tokens| {
                let mut counts: AHashMap<u32, u32> = AHashMap::new();
                for token in tokens {
                    if let Some(&col) = vocabulary.get(token) {
                        *counts.entry(col).or_insert(0) += 1;
                    }
                }
                let mut v = SparseVector::new(
                    counts
                        .into_iter()
                        .map(|(col, tf)| (col, tf as f32 * idf[col as usize]))
                        .collect(),
                );
                v.normalize();
                v
            })
            .collect();

        Self {
            vocabulary,
            terms,
            idf,
            vectors,
        }
    }

    /// Vocabulary terms in column order
    #[inline]
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[inline]
    #[must_use]
    pub fn column(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.column(term).map(|col| self.idf[col as usize])
    }

    #[inline]
    #[must_use]
    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    /// Weight of `term` in document `doc`, zero when absent
    #[must_use]
    pub fn weight(&self, doc: usize, term: &str) -> f32 {
        match (self.vectors.get(doc), self.column(term)) {
            (Some(v), Some(col)) => v.get(col),
            _ => 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_sorted() {
        let model = TfIdfModel::fit_transform(&["mouse pad", "keyboard", "mouse"]);
        assert_eq!(model.terms(), &["keyboard", "mouse", "pad"]);
        assert_eq!(model.column("mouse"), Some(1));
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_smoothed_idf() {
        let model = TfIdfModel::fit_transform(&["mouse pad", "keyboard", "mouse"]);
        // n = 3, df(mouse) = 2, df(pad) = 1
        let expected_mouse = (4.0f32 / 3.0).ln() + 1.0;
        let expected_pad = 2.0f32.ln() + 1.0;
        assert!((model.idf("mouse").unwrap() - expected_mouse).abs() < 1e-6);
        assert!((model.idf("pad").unwrap() - expected_pad).abs() < 1e-6);
        assert!(model.idf("the").is_none());
    }

    #[test]
    fn test_vectors_are_normalized() {
        let model = TfIdfModel::fit_transform(&["mouse pad", "", "mouse mouse"]);
        assert!((model.vectors()[0].norm() - 1.0).abs() < 1e-6);
        assert!(model.vectors()[1].is_empty());
        assert!((model.weight(2, "mouse") - 1.0).abs() < 1e-6);
        // rarer term weighs more
        assert!(model.weight(0, "pad") > model.weight(0, "mouse"));
    }

    #[test]
    fn test_empty_corpus() {
        let docs: Vec<String> = Vec::new();
        let model = TfIdfModel::fit_transform(&docs);
        assert!(model.is_empty());
        assert_eq!(model.vocabulary_len(), 0);

        let model = TfIdfModel::fit_transform(&["", "the", "a"]);
        assert_eq!(model.vocabulary_len(), 0);
        assert_eq!(model.len(), 3);
        assert!(model.vectors().iter().all(SparseVector::is_empty));
    }
}
